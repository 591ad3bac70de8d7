//! Per-path request surface: CRUD and verb methods, body encoding, streaming.
//!
//! # Design
//! A `Resource` binds a [`Client`](crate::Client) to one URL path plus an
//! optional header overlay. The CRUD names (`index`/`show`/`create`/`update`/
//! `destroy`) are thin renames onto the verb methods, and everything funnels
//! into one `execute` primitive: serialize the query, merge headers, encode
//! the body, dispatch through the client's transport, interpret the result.
//! `stream` shares the envelope assembly but skips interpretation, forwarding
//! chunks as they arrive.

use std::io::Read;

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::headers::HeaderSet;
use crate::http::{Method, RequestEnvelope};
use crate::params::{self, Params};
use crate::response::{self, Response};

/// Request body, chosen by the caller at the type level.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// No body, no content-type change.
    Empty,
    /// JSON-encoded, sent as `application/json; charset=utf-8`.
    Json(serde_json::Value),
    /// Bracket-notation encoded, sent as `application/x-www-form-urlencoded`.
    Form(Params),
    /// Sent as-is, no content-type change.
    Raw(Vec<u8>),
}

/// A request factory bound to one path.
///
/// Cheap to build; may be reused for multiple calls against the same path.
#[derive(Debug, Clone)]
pub struct Resource<'a> {
    client: &'a Client,
    path: String,
    headers: HeaderSet,
}

impl<'a> Resource<'a> {
    pub(crate) fn new(client: &'a Client, path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Resource {
            client,
            path,
            headers: HeaderSet::new(),
        }
    }

    /// Add a header to this resource's overlay. Overlay entries win over the
    /// client's base headers on collision.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn index(&self, params: &Params) -> Result<Response, Error> {
        self.get(None, params)
    }

    pub fn show(&self, id: &str, params: &Params) -> Result<Response, Error> {
        self.get(Some(id), params)
    }

    pub fn create(&self, params: &Params, body: Body) -> Result<Response, Error> {
        self.post(None, params, body)
    }

    pub fn update(&self, id: &str, params: &Params, body: Body) -> Result<Response, Error> {
        self.put(Some(id), params, body)
    }

    pub fn destroy(&self, id: &str, params: &Params) -> Result<Response, Error> {
        self.del(Some(id), params)
    }

    pub fn get(&self, id: Option<&str>, params: &Params) -> Result<Response, Error> {
        self.execute(Method::Get, id, params, Body::Empty)
    }

    pub fn del(&self, id: Option<&str>, params: &Params) -> Result<Response, Error> {
        self.execute(Method::Delete, id, params, Body::Empty)
    }

    pub fn post(&self, id: Option<&str>, params: &Params, body: Body) -> Result<Response, Error> {
        self.execute(Method::Post, id, params, body)
    }

    pub fn put(&self, id: Option<&str>, params: &Params, body: Body) -> Result<Response, Error> {
        self.execute(Method::Put, id, params, body)
    }

    /// The one primitive behind every non-streaming method.
    pub fn execute(
        &self,
        method: Method,
        id: Option<&str>,
        params: &Params,
        body: Body,
    ) -> Result<Response, Error> {
        let envelope = self.envelope(method, id, params, body)?;
        let raw = self.client.transport().send(envelope)?;
        response::interpret(raw)
    }

    /// Dispatch and forward body chunks to `on_chunk` in receipt order,
    /// returning the full concatenated buffer.
    ///
    /// No response classification happens here; only a transport failure
    /// short-circuits. A slow `on_chunk` delays the next read but there is
    /// no backpressure signal beyond what the transport itself applies.
    pub fn stream(
        &self,
        method: Method,
        body: Body,
        mut on_chunk: impl FnMut(&[u8]),
    ) -> Result<Vec<u8>, Error> {
        let envelope = self.envelope(method, None, &Params::new(), body)?;
        let raw = self.client.transport().send(envelope)?;
        debug!(status = raw.status, "streaming response body");

        let mut reader = raw.body;
        let mut collected = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = reader.read(&mut chunk).map_err(|_| Error::Transport)?;
            if n == 0 {
                break;
            }
            on_chunk(&chunk[..n]);
            collected.extend_from_slice(&chunk[..n]);
        }
        Ok(collected)
    }

    fn envelope(
        &self,
        method: Method,
        id: Option<&str>,
        params: &Params,
        body: Body,
    ) -> Result<RequestEnvelope, Error> {
        let mut path = self.path.clone();
        if let Some(id) = id {
            path.push('/');
            path.push_str(id);
        }
        let query = params::serialize(params)?;
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }

        let mut headers = self.client.base_headers().merge(&self.headers);
        let body = match body {
            Body::Empty => None,
            Body::Raw(bytes) => Some(bytes),
            Body::Form(form) => {
                headers.set("Content-Type", "application/x-www-form-urlencoded");
                Some(params::serialize(&form)?.into_bytes())
            }
            Body::Json(value) => {
                headers.set("Content-Type", "application/json; charset=utf-8");
                Some(serde_json::to_vec(&value).map_err(|e| Error::Serialization(e.to_string()))?)
            }
        };

        Ok(RequestEnvelope {
            method,
            url: format!("{}{}", self.client.endpoint().base_url(), path),
            headers,
            body,
        })
    }
}
