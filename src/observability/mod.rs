//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / dispatch / config produce:
//!     → tracing events (route matched, not found, skipped templates)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, level from config or RUST_LOG)
//! ```

pub mod logging;
