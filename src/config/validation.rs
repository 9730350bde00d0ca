//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check enumerated values (url format, route methods)
//! - Compile every route template
//! - Require controller and action on configured routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::RouterConfig;
use crate::routing::method::{Method, UrlFormat};
use crate::routing::pattern;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `routes[2].url`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !UrlFormat::is_valid(&config.matcher.url_format) {
        errors.push(ValidationError::new(
            "matcher.url_format",
            format!("unknown url format `{}`", config.matcher.url_format),
        ));
    }

    if config.matcher.query_param_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "matcher.query_param_name",
            "must not be empty",
        ));
    }

    for (i, route) in config.routes.iter().enumerate() {
        if !Method::is_valid(&route.method) {
            errors.push(ValidationError::new(
                format!("routes[{i}].method"),
                format!("unknown method `{}`", route.method),
            ));
        }

        if let Err(e) = pattern::compile(&route.url) {
            errors.push(ValidationError::new(format!("routes[{i}].url"), e.to_string()));
        }

        if route.controller.is_none() {
            errors.push(ValidationError::new(
                format!("routes[{i}].controller"),
                "is required",
            ));
        }

        if route.action.is_none() {
            errors.push(ValidationError::new(format!("routes[{i}].action"), "is required"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
