//! The `rspCode`/`rspMsg`/`data` response envelope.
//!
//! Every JSON response from the service is wrapped in the same three-field
//! object. Decoding happens in two phases: the outer envelope is parsed
//! first, and `data` is only deserialized into the caller's type once
//! `rspCode` has been checked.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

/// Maximum number of body bytes quoted in an envelope decode error.
pub const BODY_PREVIEW_LIMIT: usize = 1024;

/// Marker appended to a truncated body preview.
const TRUNCATION_MARKER: &str = "...";

/// A decoded response envelope whose payload has not been interpreted yet.
///
/// Every field is optional on the wire. A body without `rspCode` is read as
/// code `0`, so any JSON object decodes; only non-JSON bodies (and JSON that
/// is not an object) fail at this stage.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Status code. Zero means success.
    #[serde(rename = "rspCode", default)]
    pub code: i64,

    /// Diagnostic message from the service.
    #[serde(rename = "rspMsg", default)]
    pub message: String,

    /// Operation-specific payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Parses a complete response body as an envelope.
    ///
    /// On failure the error quotes at most [`BODY_PREVIEW_LIMIT`] bytes of
    /// the body.
    pub fn decode(body: &[u8]) -> ClientResult<Self> {
        serde_json::from_slice(body).map_err(|e| {
            ClientError::invalid_envelope(format!(
                "failed to decode response body ({}): {}",
                body_preview(body),
                e
            ))
            .with_source(e)
        })
    }

    /// Returns true if the service reported success.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Checks the status code, then decodes `data` into `T`.
    ///
    /// A non-zero code yields an [`ErrorKind::Api`](crate::ErrorKind::Api)
    /// error carrying `rspMsg` unchanged; `data` is not touched.
    pub fn into_data<T: DeserializeOwned>(self) -> ClientResult<T> {
        if !self.is_success() {
            return Err(ClientError::api(self.message));
        }
        serde_json::from_value(self.data).map_err(|e| {
            ClientError::data(format!("failed to decode data: {}", e)).with_source(e)
        })
    }
}

/// Renders a bounded, lossy UTF-8 preview of a response body.
pub fn body_preview(body: &[u8]) -> String {
    if body.len() > BODY_PREVIEW_LIMIT {
        let mut preview = String::from_utf8_lossy(&body[..BODY_PREVIEW_LIMIT]).into_owned();
        preview.push_str(TRUNCATION_MARKER);
        preview
    } else {
        String::from_utf8_lossy(body).into_owned()
    }
}
