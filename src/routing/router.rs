//! Router facade: matcher plus dispatcher.
//!
//! # Responsibilities
//! - Match the request to a route
//! - Hand the match to the dispatcher, or fall back to its not-found path
//!
//! # Design Decisions
//! - Matcher and dispatcher are `Send + Sync` trait objects, chosen at construction
//! - Construction is explicit; no global router state

use crate::dispatch::{Dispatcher, Parameters};
use crate::http::Request;
use crate::routing::matcher::Matcher;

/// Composes a [`Matcher`] and a [`Dispatcher`].
pub struct Router<R> {
    matcher: Box<dyn Matcher<R>>,
    dispatcher: Box<dyn Dispatcher<R>>,
}

impl<R> Router<R> {
    pub fn new(
        matcher: impl Matcher<R> + 'static,
        dispatcher: impl Dispatcher<R> + 'static,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            dispatcher: Box::new(dispatcher),
        }
    }

    /// Routes a request and returns the handler result.
    ///
    /// `None` means nothing handled the request: no route matched (or its handler
    /// was unusable) and no not-found handler is set.
    pub fn dispatch(&self, request: &dyn Request, extra: &Parameters) -> Option<R> {
        match self.matcher.match_request(request) {
            Some(matched) => self.dispatcher.dispatch_route(&matched, extra),
            None => self.dispatcher.dispatch_not_found(),
        }
    }

    /// Routes an explicit method and path.
    pub fn dispatch_path(&self, method: &str, path: &str, extra: &Parameters) -> Option<R> {
        match self.matcher.match_path_and_method(method, path) {
            Some(matched) => self.dispatcher.dispatch_route(&matched, extra),
            None => self.dispatcher.dispatch_not_found(),
        }
    }

    pub fn matcher(&self) -> &dyn Matcher<R> {
        self.matcher.as_ref()
    }

    pub fn dispatcher(&self) -> &dyn Dispatcher<R> {
        self.dispatcher.as_ref()
    }

    pub fn dispatcher_mut(&mut self) -> &mut dyn Dispatcher<R> {
        self.dispatcher.as_mut()
    }
}
