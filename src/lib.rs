//! Regex route matching with name-based handler argument binding.
//!
//! ```
//! use autobind_router::dispatch::{Arguments, ClosureDispatcher, ClosureHandler, Parameters};
//! use autobind_router::routing::{RegexMatcher, RouteCollection, Router};
//!
//! let mut routes = RouteCollection::new();
//! routes.get(
//!     r"/user/{name}/{id:\d+}",
//!     ClosureHandler::new(["id", "name"], |args: &Arguments| {
//!         format!("{} {}", args.value(0).unwrap_or(""), args.value(1).unwrap_or(""))
//!     }),
//! );
//!
//! let router = Router::new(RegexMatcher::new(routes), ClosureDispatcher::new());
//! let result = router.dispatch_path("GET", "/user/bohuslav/123", &Parameters::new());
//! assert_eq!(result.as_deref(), Some("123 bohuslav"));
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use error::{PatternError, RouterError, RouterResult};
pub use routing::Router;
