//! Plain-data wire types exchanged with a [`Transport`](crate::Transport).
//!
//! # Design
//! A `RequestEnvelope` is built fresh per call and handed to the transport;
//! it is never reused. A `RawResponse` carries the status line and headers
//! eagerly but leaves the body as a live reader, so streaming calls can
//! forward chunks as they arrive while regular calls buffer it whole.

use std::fmt;
use std::io::Read;

use crate::headers::HeaderSet;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One outgoing request, fully encoded: absolute URL with query string,
/// effective headers, and body bytes (if any).
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub method: Method,
    pub url: String,
    pub headers: HeaderSet,
    pub body: Option<Vec<u8>>,
}

/// A response as yielded by a transport, body not yet consumed.
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderSet,
    pub body: Box<dyn Read>,
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &"<stream>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
