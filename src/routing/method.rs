//! Closed enumerations used by the router.
//!
//! # Design Decisions
//! - Variants map to fixed string tags through `as_str`, parsed back via `FromStr`
//! - `ALL` lists every variant so callers can enumerate the accepted values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// HTTP method a route is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
    Put,
    Patch,
    /// Wildcard: matches every request method.
    Any,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Get,
        Method::Post,
        Method::Delete,
        Method::Put,
        Method::Patch,
        Method::Any,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Any => "ANY",
        }
    }

    /// Returns true if `value` is one of the method tags.
    pub fn is_valid(value: &str) -> bool {
        Self::ALL.iter().any(|m| m.as_str() == value)
    }

    /// Returns true if a route registered with this method accepts `requested`.
    ///
    /// Comparison against the tag is exact.
    pub fn accepts(&self, requested: &str) -> bool {
        *self == Method::Any || self.as_str() == requested
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RouterError::InvalidArgument(format!("unknown method `{s}`")))
    }
}

/// Strategy for deciding which string is matched against route templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlFormat {
    /// Take the path component of the request URI.
    #[default]
    Path,
    /// Take the value of a query-string parameter, prefixed with `/`.
    Get,
}

impl UrlFormat {
    pub const ALL: [UrlFormat; 2] = [UrlFormat::Get, UrlFormat::Path];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlFormat::Path => "path",
            UrlFormat::Get => "get",
        }
    }

    pub fn is_valid(value: &str) -> bool {
        Self::ALL.iter().any(|f| f.as_str() == value)
    }
}

impl fmt::Display for UrlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlFormat {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.as_str() == s).ok_or_else(|| {
            RouterError::InvalidArgument(format!(
                "value of url format must be one of `get`, `path`; got `{s}`"
            ))
        })
    }
}
