//! The client: endpoint + base headers + injected transport.

use std::fmt;
use std::sync::Arc;

use crate::endpoint::Endpoint;
use crate::headers::HeaderSet;
use crate::resource::Resource;
use crate::transport::{Transport, UreqTransport};

/// A REST API client bound to one endpoint.
///
/// Holds no per-call state; any number of calls may run concurrently against
/// one client. `authorize` replaces the base header set wholesale rather than
/// mutating it, so an in-flight call keeps the header set it started with.
pub struct Client {
    endpoint: Endpoint,
    headers: HeaderSet,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Connect to `host` with defaults per [`Endpoint::resolve`].
    pub fn new(host: &str) -> Self {
        Self::with_options(host, None, None)
    }

    /// Connect with an explicit port and/or ssl hint.
    pub fn with_options(host: &str, port: Option<u16>, ssl: Option<bool>) -> Self {
        Self::with_transport(host, port, ssl, Arc::new(UreqTransport::new()))
    }

    /// Connect through a caller-supplied transport.
    pub fn with_transport(
        host: &str,
        port: Option<u16>,
        ssl: Option<bool>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Client {
            endpoint: Endpoint::resolve(host, port, ssl),
            headers: HeaderSet::new(),
            transport,
        }
    }

    /// Install a bearer token in the base header set.
    ///
    /// Replaces the set rather than editing in place; calls dispatched before
    /// this returns keep the headers they were built with.
    pub fn authorize(&mut self, token: &str) {
        self.headers = self
            .headers
            .merge(&HeaderSet::new().with("Authorization", format!("Bearer {token}")));
    }

    /// Request factory for one path. The path is normalized to a leading `/`.
    pub fn resource(&self, path: &str) -> Resource<'_> {
        Resource::new(self, path)
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn base_headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_resolves_endpoint_from_host_string() {
        let client = Client::new("https://api.example.com");
        assert_eq!(client.endpoint().host, "api.example.com");
        assert_eq!(client.endpoint().port, 443);
        assert!(client.endpoint().ssl);
    }

    #[test]
    fn base_headers_start_empty() {
        let client = Client::new("api.example.com");
        assert!(client.base_headers().is_empty());
    }

    #[test]
    fn authorize_sets_bearer_token() {
        let mut client = Client::new("api.example.com");
        client.authorize("sekrit");
        assert_eq!(
            client.base_headers().get("Authorization"),
            Some("Bearer sekrit")
        );
    }

    #[test]
    fn authorize_replaces_a_previous_token() {
        let mut client = Client::new("api.example.com");
        client.authorize("first");
        client.authorize("second");
        assert_eq!(client.base_headers().len(), 1);
        assert_eq!(
            client.base_headers().get("Authorization"),
            Some("Bearer second")
        );
    }
}
