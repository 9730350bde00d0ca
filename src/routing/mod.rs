//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     get/post/put/delete/patch/any(template, handler)
//!     → route.rs (RouteCollection, insertion order = priority)
//!
//! Incoming Request (method, path, query)
//!     → matcher.rs (effective path, ordered scan)
//!     → pattern.rs (compile template once per route, capture values)
//!     → Return: MatchedRoute or None
//!     → router.rs (hand to dispatcher or its not-found path)
//! ```
//!
//! # Design Decisions
//! - Templates are regex text with `{name}` / `{name:constraint}` slots
//! - Compiled patterns cached per route, safe for concurrent reads
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod method;
pub mod pattern;
pub mod route;
pub mod router;

pub use matcher::{MatchedRoute, Matcher, RegexMatcher};
pub use method::{Method, UrlFormat};
pub use pattern::{compile, CompiledRoute, Placeholder};
pub use route::{Route, RouteCollection};
pub use router::Router;
