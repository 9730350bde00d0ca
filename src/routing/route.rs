//! Route definitions and the ordered route table.
//!
//! # Responsibilities
//! - Hold method, URL template and handler for each route
//! - Cache each route's compiled pattern on first use
//! - Keep routes in registration order (first registered, first tried)

use std::sync::OnceLock;

use crate::dispatch::handler::Handler;
use crate::error::PatternError;
use crate::routing::method::Method;
use crate::routing::pattern::{self, CompiledRoute};

/// A single (method, URL template, handler) binding.
pub struct Route<R> {
    method: Method,
    url: String,
    handler: Handler<R>,
    compiled: OnceLock<Result<CompiledRoute, PatternError>>,
}

impl<R> Route<R> {
    pub fn new(method: Method, url: impl Into<String>, handler: impl Into<Handler<R>>) -> Self {
        Self {
            method,
            url: url.into(),
            handler: handler.into(),
            compiled: OnceLock::new(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn handler(&self) -> &Handler<R> {
        &self.handler
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// Replaces the URL template and drops the cached compiled form.
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self.compiled = OnceLock::new();
        self
    }

    pub fn set_handler(&mut self, handler: impl Into<Handler<R>>) -> &mut Self {
        self.handler = handler.into();
        self
    }

    /// Compiled form of the template, compiled on first access.
    pub fn compiled(&self) -> Result<&CompiledRoute, &PatternError> {
        self.compiled
            .get_or_init(|| pattern::compile(&self.url))
            .as_ref()
    }
}

impl<R> std::fmt::Debug for Route<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Ordered set of routes. Insertion order is match priority.
#[derive(Debug)]
pub struct RouteCollection<R> {
    routes: Vec<Route<R>>,
}

impl<R> Default for RouteCollection<R> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<R> RouteCollection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, url: impl Into<String>, handler: impl Into<Handler<R>>) -> &mut Route<R> {
        self.create_route(Method::Get, url, handler)
    }

    pub fn post(&mut self, url: impl Into<String>, handler: impl Into<Handler<R>>) -> &mut Route<R> {
        self.create_route(Method::Post, url, handler)
    }

    pub fn put(&mut self, url: impl Into<String>, handler: impl Into<Handler<R>>) -> &mut Route<R> {
        self.create_route(Method::Put, url, handler)
    }

    pub fn delete(&mut self, url: impl Into<String>, handler: impl Into<Handler<R>>) -> &mut Route<R> {
        self.create_route(Method::Delete, url, handler)
    }

    pub fn patch(&mut self, url: impl Into<String>, handler: impl Into<Handler<R>>) -> &mut Route<R> {
        self.create_route(Method::Patch, url, handler)
    }

    /// Registers a route that accepts every request method.
    pub fn any(&mut self, url: impl Into<String>, handler: impl Into<Handler<R>>) -> &mut Route<R> {
        self.create_route(Method::Any, url, handler)
    }

    /// Builds a route, appends it and returns it for further configuration.
    pub fn create_route(
        &mut self,
        method: Method,
        url: impl Into<String>,
        handler: impl Into<Handler<R>>,
    ) -> &mut Route<R> {
        let index = self.routes.len();
        self.routes.push(Route::new(method, url, handler));
        &mut self.routes[index]
    }

    pub fn add_route(&mut self, route: Route<R>) -> &mut Self {
        self.routes.push(route);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route<R>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compiles every route eagerly, returning the first template error.
    pub fn compile_all(&self) -> Result<(), PatternError> {
        self.routes
            .iter()
            .try_for_each(|route| route.compiled().map(|_| ()).map_err(Clone::clone))
    }
}

impl<'a, R> IntoIterator for &'a RouteCollection<R> {
    type Item = &'a Route<R>;
    type IntoIter = std::slice::Iter<'a, Route<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl<R> Extend<Route<R>> for RouteCollection<R> {
    fn extend<T: IntoIterator<Item = Route<R>>>(&mut self, iter: T) {
        self.routes.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::handler::{ClosureHandler, Target};

    #[test]
    fn test_shortcuts_set_method() {
        let mut routes: RouteCollection<()> = RouteCollection::new();
        routes.get("/a", Target::new("home", "index"));
        routes.post("/a", Target::new("home", "index"));
        routes.put("/a", Target::new("home", "index"));
        routes.delete("/a", Target::new("home", "index"));
        routes.patch("/a", Target::new("home", "index"));
        routes.any("/a", Target::new("home", "index"));

        let methods: Vec<_> = routes.iter().map(Route::method).collect();
        assert_eq!(
            methods,
            vec![
                Method::Get,
                Method::Post,
                Method::Put,
                Method::Delete,
                Method::Patch,
                Method::Any
            ]
        );
    }

    #[test]
    fn test_setters_chain_and_recompile() {
        let mut routes: RouteCollection<&str> = RouteCollection::new();
        let route = routes.get("/old/{id}", ClosureHandler::nullary(|| "x"));
        assert_eq!(route.compiled().unwrap().placeholders().len(), 1);

        route.set_url("/new/{a}/{b}").set_method(Method::Post);
        assert_eq!(route.url(), "/new/{a}/{b}");
        assert_eq!(route.method(), Method::Post);
        assert_eq!(route.compiled().unwrap().placeholders().len(), 2);
    }

    #[test]
    fn test_add_route_keeps_order() {
        let mut routes: RouteCollection<()> = RouteCollection::new();
        routes
            .add_route(Route::new(Method::Get, "/first", Target::default()))
            .add_route(Route::new(Method::Get, "/second", Target::default()));
        let urls: Vec<_> = routes.iter().map(Route::url).collect();
        assert_eq!(urls, vec!["/first", "/second"]);
    }

    #[test]
    fn test_compile_all_reports_error() {
        let mut routes: RouteCollection<()> = RouteCollection::new();
        routes.get("/ok/{id:i}", Target::default());
        assert!(routes.compile_all().is_ok());

        routes.get("/{x}/{x}", Target::default());
        assert!(matches!(
            routes.compile_all(),
            Err(PatternError::DuplicatePlaceholder { .. })
        ));
    }
}
