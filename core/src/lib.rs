//! Generic JSON/HTTP REST client core.
//!
//! # Overview
//! Given a host string, builds per-resource request objects, serializes
//! nested parameters with bracket notation, dispatches through an injected
//! [`Transport`], and classifies the response into a [`Response`] or an
//! [`Error`].
//!
//! # Design
//! - `Client` owns the resolved [`Endpoint`], a base [`HeaderSet`], and the
//!   transport; it holds no per-call state.
//! - Every CRUD/verb method on a [`Resource`] reduces to one `execute`
//!   primitive (plus `stream` for live chunk delivery), so the whole
//!   pipeline is exercised through a single seam.
//! - The transport is the only component that touches the network; tests
//!   inject fakes and stay deterministic.
//! - Each call is independent and fire-once: no pooling, retries,
//!   cancellation, or rate limiting live here.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod headers;
pub mod http;
pub mod params;
pub mod resource;
pub mod response;
pub mod transport;

pub use client::Client;
pub use endpoint::Endpoint;
pub use error::Error;
pub use headers::HeaderSet;
pub use http::{Method, RawResponse, RequestEnvelope};
pub use params::{serialize, ParamValue, Params};
pub use resource::{Body, Resource};
pub use response::{Payload, Response};
pub use transport::{Transport, UreqTransport};
