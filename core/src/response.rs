//! Response buffering and classification.
//!
//! # Design
//! `interpret` consumes a [`RawResponse`], buffers the whole body, then maps
//! it to exactly one outcome:
//!
//! - JSON content type, body fails to parse → [`Error::Parse`].
//! - JSON body carrying the `meta.error` convention → [`Error::Domain`],
//!   whatever the HTTP status says.
//! - JSON body otherwise → success with the parsed value, again regardless
//!   of status. A JSON 500 without `meta.error` is a success; that matches
//!   the wire contract this client targets and is covered by a test.
//! - Non-JSON body with a non-2xx status → [`Error::Domain`] with the body
//!   text as the message.
//! - Non-JSON body, 2xx → success with the raw bytes.

use std::io::Read;

use tracing::debug;

use crate::error::Error;
use crate::headers::HeaderSet;
use crate::http::RawResponse;

/// Parsed or raw response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            Payload::Json(_) => None,
        }
    }
}

/// A successfully classified response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderSet,
    pub body: Payload,
}

impl Response {
    /// Shorthand for `self.body.as_json()`.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.body.as_json()
    }
}

/// Buffer and classify a raw response.
pub fn interpret(raw: RawResponse) -> Result<Response, Error> {
    let RawResponse {
        status,
        headers,
        mut body,
    } = raw;

    let mut buffer = Vec::new();
    if body.read_to_end(&mut buffer).is_err() {
        // Body stream died mid-read; same bucket as never connecting.
        return Err(Error::Transport);
    }
    debug!(status, bytes = buffer.len(), "interpreting response");

    if is_json(headers.get("Content-Type")) {
        let text = String::from_utf8_lossy(&buffer);
        let value: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => {
                return Err(Error::Parse {
                    raw: text.into_owned(),
                })
            }
        };
        if let Some(error) = value.get("meta").and_then(|meta| meta.get("error")) {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            let details = error.get("details").cloned();
            return Err(Error::Domain {
                status,
                headers,
                message,
                details,
            });
        }
        return Ok(Response {
            status,
            headers,
            body: Payload::Json(value),
        });
    }

    if !(200..300).contains(&status) {
        return Err(Error::Domain {
            status,
            headers,
            message: String::from_utf8_lossy(&buffer).into_owned(),
            details: None,
        });
    }
    Ok(Response {
        status,
        headers,
        body: Payload::Bytes(buffer),
    })
}

/// True when the content type, minus any `;` parameters, is
/// `application/json` (case-insensitive).
fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
