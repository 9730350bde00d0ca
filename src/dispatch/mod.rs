//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! MatchedRoute (placeholders + captured values)
//!     → handler parameter manifest (declared names, in order)
//!     → bind_arguments (align captures by name, drop unbound)
//!     → closure.rs (invoke closure) / controller.rs (resolve + invoke action)
//!     → handler result, or not-found result
//! ```
//!
//! # Design Decisions
//! - Parameter names are declared at registration, not reflected at dispatch
//! - Handlers of the wrong shape go to the not-found path, never panic
//! - Unbound parameters are omitted; `extra` values fill gaps by name

pub mod closure;
pub mod controller;
pub mod handler;

use std::collections::HashMap;

use crate::error::RouterResult;
use crate::routing::matcher::MatchedRoute;

pub use closure::ClosureDispatcher;
pub use controller::{ControllerClass, ControllerDispatcher, ControllerRegistry, ResolvedTarget};
pub use handler::{Arguments, ClosureHandler, Handler, Target};

/// Named values supplied by the caller alongside a matched route.
pub type Parameters = HashMap<String, String>;

/// Turns matched routes into handler invocations.
pub trait Dispatcher<R>: Send + Sync {
    /// Invokes the handler of `matched`, or the not-found handler if its shape is unusable.
    fn dispatch_route(&self, matched: &MatchedRoute<'_, R>, extra: &Parameters) -> Option<R>;

    /// Invokes the not-found handler, if one is set.
    fn dispatch_not_found(&self) -> Option<R>;

    /// Replaces the not-found handler; rejects handlers of the wrong shape.
    fn set_not_found_handler(&mut self, handler: Handler<R>) -> RouterResult<()>;
}

/// Aligns captured values with a handler's declared parameters.
///
/// For each parameter, in declaration order, the value of the placeholder with
/// the same name is taken from `pool`. Parameters with no such placeholder take
/// a same-named entry from `extra`, or are left out.
pub fn bind_arguments<'p, I>(params: &[String], pool: I, extra: &Parameters) -> Arguments
where
    I: IntoIterator<Item = (&'p str, &'p str)> + Clone,
{
    let mut args = Arguments::new();
    for param in params {
        let bound = pool
            .clone()
            .into_iter()
            .find(|(name, _)| *name == param.as_str())
            .map(|(_, value)| value)
            .or_else(|| extra.get(param).map(String::as_str));
        if let Some(value) = bound {
            args.push(param.as_str(), value);
        }
    }
    args
}

/// `(placeholder name, captured value)` pairs of a match, in template order.
pub(crate) fn capture_pool<'a, R>(
    matched: &'a MatchedRoute<'a, R>,
) -> impl Iterator<Item = (&'a str, &'a str)> + Clone {
    matched
        .placeholders()
        .iter()
        .zip(matched.captured_values())
        .map(|(p, v)| (p.name.as_str(), v.as_str()))
}
