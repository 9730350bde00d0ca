//! Request capability consumed by the matcher.
//!
//! # Responsibilities
//! - Expose the method, path and decoded query parameters of a request
//! - Adapt `axum::http::Request` so framework requests can be routed directly
//!
//! # Design Decisions
//! - The router never parses raw HTTP; transports supply this trait
//! - Query strings are decoded with `url::form_urlencoded`

use std::collections::HashMap;

use axum::http;

/// Minimal view of an incoming request.
pub trait Request {
    /// Request method, e.g. `GET`.
    fn method(&self) -> &str;

    /// Path component of the request URI.
    fn path(&self) -> &str;

    /// Decoded query-string parameters. Later duplicates win.
    fn query_params(&self) -> HashMap<String, String>;
}

/// Decodes an `application/x-www-form-urlencoded` query string.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

impl<B> Request for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn query_params(&self) -> HashMap<String, String> {
        self.uri().query().map(parse_query).unwrap_or_default()
    }
}
