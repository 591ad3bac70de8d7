//! The injected network capability.
//!
//! # Design
//! The rest of the crate only ever sees [`Transport`]: hand in a
//! [`RequestEnvelope`], get back a [`RawResponse`] or [`Error::Transport`].
//! `UreqTransport` is the default implementation; tests inject fakes to keep
//! the pipeline deterministic and network-free.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Error;
use crate::headers::HeaderSet;
use crate::http::{Method, RawResponse, RequestEnvelope};

/// One-shot request dispatch. Implementations open a connection, send the
/// envelope, and yield the response with its body still unread.
pub trait Transport: Send + Sync {
    fn send(&self, envelope: RequestEnvelope) -> Result<RawResponse, Error>;
}

/// Default transport over a blocking `ureq` agent.
///
/// Status codes are returned as data (4xx/5xx are not transport failures);
/// classification happens downstream in the response interpreter. Every
/// connection-level failure collapses into [`Error::Transport`].
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Apply a global per-call timeout. The default applies none.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, envelope: RequestEnvelope) -> Result<RawResponse, Error> {
        debug!(method = envelope.method.as_str(), url = %envelope.url, "dispatching request");
        let RequestEnvelope {
            method,
            url,
            headers,
            body,
        } = envelope;

        let result = match (method, body) {
            (Method::Get, _) => {
                let mut builder = self.agent.get(&url);
                for (name, value) in headers.iter() {
                    builder = builder.header(name, value);
                }
                builder.call()
            }
            (Method::Delete, _) => {
                let mut builder = self.agent.delete(&url);
                for (name, value) in headers.iter() {
                    builder = builder.header(name, value);
                }
                builder.call()
            }
            (Method::Post, Some(bytes)) => {
                let mut builder = self.agent.post(&url);
                for (name, value) in headers.iter() {
                    builder = builder.header(name, value);
                }
                builder.send(&bytes[..])
            }
            (Method::Post, None) => {
                let mut builder = self.agent.post(&url);
                for (name, value) in headers.iter() {
                    builder = builder.header(name, value);
                }
                builder.send_empty()
            }
            (Method::Put, Some(bytes)) => {
                let mut builder = self.agent.put(&url);
                for (name, value) in headers.iter() {
                    builder = builder.header(name, value);
                }
                builder.send(&bytes[..])
            }
            (Method::Put, None) => {
                let mut builder = self.agent.put(&url);
                for (name, value) in headers.iter() {
                    builder = builder.header(name, value);
                }
                builder.send_empty()
            }
        };

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "transport failure");
                return Err(Error::Transport);
            }
        };

        let (parts, body) = response.into_parts();
        let mut headers = HeaderSet::new();
        for (name, value) in parts.headers.iter() {
            if let Ok(text) = value.to_str() {
                headers.set(name.as_str(), text);
            }
        }
        Ok(RawResponse {
            status: parts.status.as_u16(),
            headers,
            body: Box::new(body.into_reader()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bind and immediately drop a listener to obtain a port nothing is
    /// listening on.
    fn dead_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn connection_refused_collapses_to_server_unavailable() {
        let transport = UreqTransport::new();
        let envelope = RequestEnvelope {
            method: Method::Get,
            url: format!("http://127.0.0.1:{}/anything", dead_port()),
            headers: HeaderSet::new(),
            body: None,
        };
        let err = transport.send(envelope).unwrap_err();
        assert!(matches!(err, Error::Transport));
        assert_eq!(err.to_string(), "Server unavailable");
    }
}
