//! Route matching logic.
//!
//! # Responsibilities
//! - Resolve the effective path of a request (path or query-string format)
//! - Test routes in registration order against path and method
//! - Return the first route matching both, with its ordered captures
//!
//! # Design Decisions
//! - A pattern hit with the wrong method does not stop the scan
//! - No match is `None`, never an error
//! - Routes whose template does not compile are skipped with a warning
//! - O(n) scan over routes (acceptable for typical route counts)

use crate::config::schema::MatcherConfig;
use crate::error::RouterResult;
use crate::http::Request;
use crate::routing::method::UrlFormat;
use crate::routing::pattern::Placeholder;
use crate::routing::route::{Route, RouteCollection};

/// Default query parameter carrying the path in [`UrlFormat::Get`] mode.
pub const DEFAULT_QUERY_PARAM: &str = "r";

/// A route that matched, with its captured values.
#[derive(Debug)]
pub struct MatchedRoute<'a, R> {
    route: &'a Route<R>,
    placeholders: &'a [Placeholder],
    captured: Vec<String>,
}

impl<'a, R> MatchedRoute<'a, R> {
    pub fn route(&self) -> &'a Route<R> {
        self.route
    }

    /// Placeholders in template order.
    pub fn placeholders(&self) -> &'a [Placeholder] {
        self.placeholders
    }

    /// Captured values, aligned by position with [`placeholders`](Self::placeholders).
    pub fn captured_values(&self) -> &[String] {
        &self.captured
    }

    /// Captured value for the placeholder called `name`.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.placeholders
            .iter()
            .position(|p| p.name == name)
            .and_then(|index| self.captured.get(index))
            .map(String::as_str)
    }
}

/// Trait for resolving requests to routes.
pub trait Matcher<R>: Send + Sync {
    /// Matches a request, resolving its effective path first.
    fn match_request(&self, request: &dyn Request) -> Option<MatchedRoute<'_, R>>;

    /// Matches an explicit method and path.
    fn match_path_and_method(&self, method: &str, path: &str) -> Option<MatchedRoute<'_, R>>;
}

/// Matches routes by compiling their templates into regular expressions.
#[derive(Debug)]
pub struct RegexMatcher<R> {
    routes: RouteCollection<R>,
    url_format: UrlFormat,
    query_param: String,
}

impl<R> RegexMatcher<R> {
    pub fn new(routes: RouteCollection<R>) -> Self {
        Self {
            routes,
            url_format: UrlFormat::default(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
        }
    }

    /// Creates a matcher with settings taken from configuration.
    pub fn from_config(routes: RouteCollection<R>, config: &MatcherConfig) -> RouterResult<Self> {
        let mut matcher = Self::new(routes);
        matcher.set_url_format(&config.url_format)?;
        matcher.set_query_param(config.query_param_name.clone());
        Ok(matcher)
    }

    pub fn routes(&self) -> &RouteCollection<R> {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut RouteCollection<R> {
        &mut self.routes
    }

    /// Sets the URL format from its tag (`path` or `get`).
    ///
    /// Unknown values are rejected and the current format is kept.
    pub fn set_url_format(&mut self, url_format: &str) -> RouterResult<&mut Self> {
        self.url_format = url_format.parse()?;
        Ok(self)
    }

    pub fn with_url_format(mut self, url_format: UrlFormat) -> Self {
        self.url_format = url_format;
        self
    }

    pub fn url_format(&self) -> UrlFormat {
        self.url_format
    }

    pub fn set_query_param(&mut self, name: impl Into<String>) -> &mut Self {
        self.query_param = name.into();
        self
    }

    pub fn query_param(&self) -> &str {
        &self.query_param
    }

    /// Path that templates are matched against for `request`.
    pub fn effective_path(&self, request: &dyn Request) -> String {
        match self.url_format {
            UrlFormat::Path => request.path().to_string(),
            UrlFormat::Get => {
                let route = request
                    .query_params()
                    .remove(&self.query_param)
                    .unwrap_or_default();
                format!("/{route}")
            }
        }
    }

    fn find(&self, method: &str, path: &str) -> Option<MatchedRoute<'_, R>> {
        for (index, route) in self.routes.iter().enumerate() {
            let compiled = match route.compiled() {
                Ok(compiled) => compiled,
                Err(error) => {
                    tracing::warn!(route_index = index, url = %route.url(), %error, "Skipping route with invalid template");
                    continue;
                }
            };

            let Some(captured) = compiled.captures(path) else {
                tracing::trace!(route_index = index, url = %route.url(), path, "Pattern did not match");
                continue;
            };

            if !route.method().accepts(method) {
                tracing::trace!(route_index = index, url = %route.url(), route_method = %route.method(), method, "Pattern matched, method did not");
                continue;
            }

            tracing::debug!(route_index = index, url = %route.url(), method, path, "Route matched");
            return Some(MatchedRoute {
                route,
                placeholders: compiled.placeholders(),
                captured,
            });
        }

        tracing::debug!(method, path, "No route matched");
        None
    }
}

impl<R> Matcher<R> for RegexMatcher<R> {
    fn match_request(&self, request: &dyn Request) -> Option<MatchedRoute<'_, R>> {
        let path = self.effective_path(request);
        self.find(request.method(), &path)
    }

    fn match_path_and_method(&self, method: &str, path: &str) -> Option<MatchedRoute<'_, R>> {
        self.find(method, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::handler::{ClosureHandler, Target};
    use crate::error::RouterError;
    use crate::routing::method::Method;
    use axum::body::Body;
    use axum::http;

    fn noop() -> ClosureHandler<&'static str> {
        ClosureHandler::nullary(|| "")
    }

    #[test]
    fn test_static_route() {
        let mut routes = RouteCollection::new();
        routes.get("/homepage/", noop());
        let matcher = RegexMatcher::new(routes);

        let matched = matcher.match_path_and_method("GET", "/homepage/").unwrap();
        assert_eq!(matched.route().url(), "/homepage/");
        assert!(matched.captured_values().is_empty());
        assert!(matcher.match_path_and_method("GET", "/iamnotset/").is_none());
    }

    #[test]
    fn test_method_fallthrough() {
        let mut routes = RouteCollection::new();
        routes.get("/x", noop());
        routes.post("/x", noop());
        let matcher = RegexMatcher::new(routes);

        let matched = matcher.match_path_and_method("POST", "/x").unwrap();
        assert_eq!(matched.route().method(), Method::Post);
        assert!(matcher.match_path_and_method("DELETE", "/x").is_none());
    }

    #[test]
    fn test_any_matches_all_methods() {
        let mut routes = RouteCollection::new();
        routes.any("/homepage/", noop());
        let matcher = RegexMatcher::new(routes);

        for method in ["GET", "POST", "PUT", "DELETE"] {
            let matched = matcher.match_path_and_method(method, "/homepage/").unwrap();
            assert_eq!(matched.route().method(), Method::Any);
        }
    }

    #[test]
    fn test_first_match_wins() {
        let mut routes: RouteCollection<()> = RouteCollection::new();
        routes.get("/item/{id:i}", Target::new("first", "view"));
        routes.get("/item/{slug}", Target::new("second", "view"));
        let matcher = RegexMatcher::new(routes);

        let matched = matcher.match_path_and_method("GET", "/item/5").unwrap();
        assert_eq!(
            matched.route().handler().as_target().unwrap().controller.as_deref(),
            Some("first")
        );
        let matched = matcher.match_path_and_method("GET", "/item/five").unwrap();
        assert_eq!(matched.value_of("slug"), Some("five"));
    }

    #[test]
    fn test_captures_align_with_placeholders() {
        let mut routes = RouteCollection::new();
        routes.get(r"/user/{name}/{id:\d+}", noop());
        let matcher = RegexMatcher::new(routes);

        let matched = matcher
            .match_path_and_method("GET", "/user/bohuslav/123")
            .unwrap();
        let names: Vec<_> = matched.placeholders().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "id"]);
        assert_eq!(matched.captured_values(), ["bohuslav", "123"]);
        assert!(matcher.match_path_and_method("GET", "/user/bohuslav").is_none());
    }

    #[test]
    fn test_invalid_template_is_skipped() {
        let mut routes = RouteCollection::new();
        routes.get("/{id}/{id}", noop());
        routes.get("/{a}/{b}", noop());
        let matcher = RegexMatcher::new(routes);

        let matched = matcher.match_path_and_method("GET", "/1/2").unwrap();
        assert_eq!(matched.route().url(), "/{a}/{b}");
    }

    #[test]
    fn test_get_format() {
        let mut routes = RouteCollection::new();
        routes.get("/foo/bar", noop());
        routes.get("/", noop());
        let mut matcher = RegexMatcher::new(routes);
        matcher.set_url_format("get").unwrap();
        assert_eq!(matcher.url_format(), UrlFormat::Get);

        let req = http::Request::builder()
            .uri("/index.php?r=foo/bar")
            .body(Body::empty())
            .unwrap();
        assert_eq!(matcher.effective_path(&req), "/foo/bar");
        let matched = matcher.match_request(&req).unwrap();
        assert_eq!(matched.route().url(), "/foo/bar");

        let bare = http::Request::builder()
            .uri("/foo/bar")
            .body(Body::empty())
            .unwrap();
        assert_eq!(matcher.effective_path(&bare), "/");
        assert_eq!(matcher.match_request(&bare).unwrap().route().url(), "/");
    }

    #[test]
    fn test_custom_query_param() {
        let mut routes = RouteCollection::new();
        routes.get("/users/{id:i}", noop());
        let mut matcher = RegexMatcher::new(routes).with_url_format(UrlFormat::Get);
        matcher.set_query_param("route");

        let req = http::Request::builder()
            .uri("/?route=users/42")
            .body(())
            .unwrap();
        assert_eq!(matcher.match_request(&req).unwrap().value_of("id"), Some("42"));
    }

    #[test]
    fn test_invalid_url_format_keeps_previous() {
        let mut matcher: RegexMatcher<()> = RegexMatcher::new(RouteCollection::new());
        matcher.set_url_format("get").unwrap();

        assert!(matches!(
            matcher.set_url_format("invalid value"),
            Err(RouterError::InvalidArgument(_))
        ));
        assert_eq!(matcher.url_format(), UrlFormat::Get);
    }
}
