//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::dispatch::handler::Target;
use crate::error::RouterResult;
use crate::routing::matcher::DEFAULT_QUERY_PARAM;
use crate::routing::method::{Method, UrlFormat};
use crate::routing::route::Route;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// How the matched path is derived from requests.
    pub matcher: MatcherConfig,

    /// Controller dispatch settings.
    pub dispatcher: DispatcherConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route table, in match priority order.
    pub routes: Vec<RouteConfig>,
}

/// Matcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// `path` (use the request path) or `get` (use a query parameter).
    ///
    /// Kept as text so unknown values surface as validation errors.
    pub url_format: String,

    /// Query parameter carrying the path when `url_format = "get"`.
    pub query_param_name: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            url_format: UrlFormat::default().as_str().to_string(),
            query_param_name: DEFAULT_QUERY_PARAM.to_string(),
        }
    }
}

/// Controller dispatcher configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Namespace prefixed to every resolved controller class.
    pub base_namespace: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A route mapping a template to a controller action.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Method tag (`GET`, `POST`, ..., `ANY`).
    #[serde(default = "default_method")]
    pub method: String,

    /// URL template, e.g. `/video/{id:i}`.
    pub url: String,

    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub controller: Option<String>,

    #[serde(default)]
    pub action: Option<String>,
}

fn default_method() -> String {
    Method::Any.as_str().to_string()
}

impl RouteConfig {
    pub fn target(&self) -> Target {
        Target {
            module: self.module.clone(),
            controller: self.controller.clone(),
            action: self.action.clone(),
        }
    }

    /// Builds the route this entry describes.
    pub fn to_route<R>(&self) -> RouterResult<Route<R>> {
        let method: Method = self.method.parse()?;
        Ok(Route::new(method, self.url.clone(), self.target()))
    }
}
