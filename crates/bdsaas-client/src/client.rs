//! The bdsaas API client and its typed operations.

use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::record::CallRecord;
use crate::recording::Recording;

const SEATS_PATH: &str = "/bdsaas/call/phoneApi/pagePhoneSeat.do";
const CALL_PATH: &str = "/bdsaas/call/phoneApi/callPhone.do";
const QUERY_PATH: &str = "/bdsaas/call/phoneApi/queryCallPhoneRecord.do";
const RECORDING_PATH: &str = "/bdsaas/call/phoneApi/downloadRecord.do";

/// Client for the bdsaas telephony API.
///
/// Immutable after construction. Cloning is cheap and clones share the
/// underlying connection pool, so one client can serve many concurrent
/// tasks. Dropping an in-flight call's future aborts its request.
#[derive(Clone)]
pub struct Client {
    app_key: String,
    http: reqwest::Client,
    config: ClientConfig,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("app_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl Client {
    /// Creates a client for the production service.
    pub fn new(app_key: impl Into<String>) -> ClientResult<Self> {
        Self::with_config(app_key, ClientConfig::default())
    }

    /// Creates a client with a custom configuration.
    pub fn with_config(app_key: impl Into<String>, config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ClientError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            app_key: app_key.into(),
            http,
            config,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Lists the seat phone numbers available for outbound calls.
    ///
    /// An account without seats yields an empty list, not an error.
    pub async fn seats(&self) -> ClientResult<Vec<String>> {
        let body = AppKeyRequest {
            app_key: &self.app_key,
        };
        let seats: Option<Vec<String>> =
            self.request(Method::POST, SEATS_PATH, Some(&body)).await?;
        let seats = seats.unwrap_or_default();
        debug!(count = seats.len(), "fetched seats");
        Ok(seats)
    }

    /// Places a call from seat `from` to `to` and returns the session ID.
    ///
    /// # Errors
    ///
    /// A success envelope whose session ID is `null` or empty is reported
    /// as [`ErrorKind::Data`](crate::ErrorKind::Data) rather than returned
    /// as an empty string, since such a call cannot be queried or its
    /// recording downloaded later.
    pub async fn call(&self, from: &str, to: &str, options: &CallOptions) -> ClientResult<String> {
        let body = CallRequest {
            app_key: &self.app_key,
            seat_phone: from,
            to_phone: to,
            ip: options.effective_ip(),
            ext1: &options.notes,
        };
        let session_id: Option<String> =
            self.request(Method::POST, CALL_PATH, Some(&body)).await?;
        match session_id {
            Some(id) if !id.is_empty() => {
                debug!(session_id = %id, "call placed");
                Ok(id)
            }
            _ => Err(ClientError::data("call accepted but no session ID returned")),
        }
    }

    /// Fetches call records for the given sessions, in service order.
    pub async fn query<S: AsRef<str>>(&self, session_ids: &[S]) -> ClientResult<Vec<CallRecord>> {
        let session_ids: Vec<&str> = session_ids.iter().map(|id| id.as_ref()).collect();
        let body = QueryRequest {
            app_key: &self.app_key,
            session_ids: &session_ids,
        };
        let records: Option<Vec<CallRecord>> =
            self.request(Method::POST, QUERY_PATH, Some(&body)).await?;
        let records = records.unwrap_or_default();
        debug!(
            requested = session_ids.len(),
            count = records.len(),
            "fetched call records"
        );
        Ok(records)
    }

    /// Downloads the recording of a call.
    ///
    /// The bytes are returned unvalidated; see [`Recording::is_mpeg_audio`].
    pub async fn download_recording(&self, session_id: &str) -> ClientResult<Recording> {
        let body = RecordingRequest {
            app_key: &self.app_key,
            session_id,
        };
        let bytes = self.request_bytes(RECORDING_PATH, &body).await?;
        debug!(session_id = %session_id, len = bytes.len(), "downloaded recording");
        Ok(Recording::new(bytes))
    }
}

/// Optional parameters for [`Client::call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    /// Origin IP reported to the service. An empty value means unspecified
    /// and is sent as [`CallOptions::DEFAULT_IP`].
    pub ip: String,
    /// Free-form notes stored with the call record (`ext1`).
    pub notes: String,
}

impl CallOptions {
    /// Placeholder sent when the caller's IP is unspecified.
    pub const DEFAULT_IP: &'static str = "127.0.0.1";

    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin IP.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    fn effective_ip(&self) -> &str {
        if self.ip.is_empty() {
            Self::DEFAULT_IP
        } else {
            &self.ip
        }
    }
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            ip: Self::DEFAULT_IP.to_string(),
            notes: String::new(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppKeyRequest<'a> {
    app_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CallRequest<'a> {
    app_key: &'a str,
    seat_phone: &'a str,
    to_phone: &'a str,
    ip: &'a str,
    ext1: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    app_key: &'a str,
    session_ids: &'a [&'a str],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordingRequest<'a> {
    app_key: &'a str,
    session_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_options_default_ip() {
        let options = CallOptions::default();
        assert_eq!(options.ip, "127.0.0.1");
        assert_eq!(options.notes, "");
    }

    #[test]
    fn empty_ip_falls_back_to_default() {
        let options = CallOptions::new().with_ip("").with_notes("vip");
        assert_eq!(options.effective_ip(), "127.0.0.1");
        assert_eq!(options.notes, "vip");

        let options = CallOptions::new().with_ip("203.0.113.7");
        assert_eq!(options.effective_ip(), "203.0.113.7");
    }

    #[test]
    fn call_request_wire_shape() {
        let body = CallRequest {
            app_key: "k",
            seat_phone: "13800000000",
            to_phone: "13900000000",
            ip: "127.0.0.1",
            ext1: "",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "appKey": "k",
                "seatPhone": "13800000000",
                "toPhone": "13900000000",
                "ip": "127.0.0.1",
                "ext1": ""
            })
        );
    }

    #[test]
    fn query_request_wire_shape() {
        let ids = ["a", "b"];
        let body = QueryRequest {
            app_key: "k",
            session_ids: &ids,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"appKey": "k", "sessionIds": ["a", "b"]})
        );

        let body = QueryRequest {
            app_key: "k",
            session_ids: &[],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"appKey": "k", "sessionIds": []})
        );
    }

    #[test]
    fn debug_redacts_app_key() {
        let client = Client::new("super-secret-key").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
