//! HTTP round trip and envelope decoding.
//!
//! Each call issues exactly one request. The full body is buffered before
//! any decoding, and the response is dropped (releasing the connection) on
//! every exit path.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::client::Client;
use crate::envelope::Envelope;
use crate::error::{ClientError, ClientResult};

const JSON_CONTENT_TYPE: &str = "application/json";

impl Client {
    /// Sends one request and decodes the enveloped payload into `T`.
    ///
    /// For `GET` the body is encoded as URL query parameters (it must
    /// serialize to a flat map of strings). For every other method it is
    /// serialized as a JSON document; `None` sends an empty body.
    ///
    /// # Errors
    ///
    /// See [`ErrorKind`](crate::ErrorKind) for how each failure stage is
    /// reported.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        let bytes = read_body(response).await?;
        Envelope::decode(&bytes)?.into_data()
    }

    /// Sends one JSON `POST` and returns the raw response body.
    ///
    /// Used for binary endpoints. The service reports failures on these
    /// endpoints with a JSON envelope whose `Content-Type` is not reliable,
    /// so the body itself is inspected: anything that starts with a JSON
    /// object is decoded as an envelope, a non-zero code is reported as an
    /// API error and anything else as an invalid response.
    pub async fn request_bytes<B>(&self, path: &str, body: &B) -> ClientResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        let status = response.status();
        let json_header = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with(JSON_CONTENT_TYPE));
        let bytes = read_body(response).await?;

        if json_header || looks_like_json_object(&bytes) {
            let envelope = Envelope::decode(&bytes)?;
            if !envelope.is_success() {
                return Err(ClientError::api(envelope.message));
            }
            return Err(ClientError::invalid_response(format!(
                "expected binary payload, got JSON envelope with code {}",
                envelope.code
            )));
        }

        if !status.is_success() {
            return Err(ClientError::invalid_response(format!(
                "unexpected status {}: {}",
                status,
                crate::envelope::body_preview(&bytes)
            )));
        }

        Ok(bytes)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config().endpoint(path);
        let mut request = self
            .http()
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        if method == Method::GET {
            if let Some(query) = body {
                request = request.query(query);
            }
        } else if let Some(payload) = body {
            let encoded = serde_json::to_vec(payload).map_err(|e| {
                ClientError::encode(format!("failed to marshal json: {}", e)).with_source(e)
            })?;
            request = request.body(encoded);
        }

        trace!(method = %method, path = %path, "Sending request");

        let response = request.send().await?;
        debug!(
            method = %method,
            path = %path,
            status = %response.status(),
            "Received response"
        );
        Ok(response)
    }
}

async fn read_body(response: Response) -> ClientResult<Vec<u8>> {
    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            ClientError::timeout("deadline elapsed while reading response").with_source(e)
        } else {
            ClientError::network(format!("failed to read response: {}", e)).with_source(e)
        }
    })?;
    trace!(len = bytes.len(), "Read response body");
    Ok(bytes.to_vec())
}

fn looks_like_json_object(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_detection() {
        assert!(looks_like_json_object(br#"{"rspCode":404}"#));
        assert!(looks_like_json_object(b"\r\n  {}"));
        assert!(!looks_like_json_object(&[0xFF, 0xFB, 0x90, 0x64]));
        assert!(!looks_like_json_object(b"ID3\x04\x00"));
        assert!(!looks_like_json_object(b"[1, 2]"));
        assert!(!looks_like_json_object(b""));
    }
}
