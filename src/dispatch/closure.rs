//! Dispatch to closure handlers.

use crate::dispatch::handler::{Arguments, ClosureHandler, Handler};
use crate::dispatch::{bind_arguments, capture_pool, Dispatcher, Parameters};
use crate::error::{RouterError, RouterResult};
use crate::routing::matcher::MatchedRoute;

/// Invokes closure handlers with captured values bound by parameter name.
pub struct ClosureDispatcher<R> {
    not_found: Option<ClosureHandler<R>>,
}

impl<R> Default for ClosureDispatcher<R> {
    fn default() -> Self {
        Self { not_found: None }
    }
}

impl<R> ClosureDispatcher<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Dispatcher::set_not_found_handler`] for closures.
    pub fn with_not_found(mut self, handler: ClosureHandler<R>) -> Self {
        self.not_found = Some(handler);
        self
    }
}

impl<R> Dispatcher<R> for ClosureDispatcher<R> {
    fn dispatch_route(&self, matched: &MatchedRoute<'_, R>, extra: &Parameters) -> Option<R> {
        let Some(handler) = matched.route().handler().as_closure() else {
            tracing::debug!(url = %matched.route().url(), "Route handler is not a closure");
            return self.dispatch_not_found();
        };

        let args = bind_arguments(handler.params(), capture_pool(matched), extra);
        Some(handler.call(&args))
    }

    fn dispatch_not_found(&self) -> Option<R> {
        tracing::debug!(handler_set = self.not_found.is_some(), "Dispatching not found");
        self.not_found
            .as_ref()
            .map(|handler| handler.call(&Arguments::new()))
    }

    fn set_not_found_handler(&mut self, handler: Handler<R>) -> RouterResult<()> {
        match handler {
            Handler::Closure(handler) => {
                self.not_found = Some(handler);
                Ok(())
            }
            Handler::Target(_) => Err(RouterError::InvalidArgument(
                "not-found handler must be a closure".to_string(),
            )),
        }
    }
}
