//! Error taxonomy for client calls.
//!
//! # Design
//! Four variants, one per failure class: the network exchange never completed
//! (`Transport`), the body claimed JSON but did not parse (`Parse`), the
//! server signaled an application failure (`Domain`), or the outgoing
//! parameter tree could not be encoded (`Serialization`). Every error
//! surfaces to the caller through `Result`; nothing is retried or suppressed
//! here.

use thiserror::Error;

use crate::headers::HeaderSet;

/// Errors produced by the request/response pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection could not be established or was lost mid-exchange.
    /// Failure subtypes (DNS, refused, reset) are deliberately not
    /// distinguished.
    #[error("Server unavailable")]
    Transport,

    /// The server signaled an application-level failure, either through a
    /// `meta.error` payload or a non-2xx status with a non-JSON body.
    #[error("{message}")]
    Domain {
        status: u16,
        headers: HeaderSet,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The response claimed `application/json` but the body did not parse.
    #[error("invalid JSON response: {raw}")]
    Parse { raw: String },

    /// The outgoing parameter tree or JSON body could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_message_is_fixed() {
        assert_eq!(Error::Transport.to_string(), "Server unavailable");
    }

    #[test]
    fn domain_error_displays_its_message() {
        let err = Error::Domain {
            status: 404,
            headers: HeaderSet::new(),
            message: "not found".to_string(),
            details: None,
        };
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn parse_error_embeds_raw_body() {
        let err = Error::Parse {
            raw: "{broken".to_string(),
        };
        assert!(err.to_string().contains("{broken"));
    }
}
