//! HTTP boundary of the router.
//!
//! # Data Flow
//! ```text
//! transport request (axum/http or custom)
//!     → request.rs (Request capability: method, path, query)
//!     → routing::matcher (resolve effective path, match)
//! ```

pub mod request;

pub use request::{parse_query, Request};
