//! Error definitions shared by the routing and dispatch subsystems.

use thiserror::Error;

/// Errors raised while compiling a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The same placeholder name appears more than once in one template.
    #[error("duplicate placeholder `{name}` in template `{template}`")]
    DuplicatePlaceholder { name: String, template: String },

    /// The generated expression was rejected by the regex engine.
    #[error("template `{template}` produced invalid regex `{regex}`: {reason}")]
    InvalidRegex {
        template: String,
        regex: String,
        reason: String,
    },
}

/// Errors surfaced to callers of the router.
///
/// Absence of a matching route is not an error; it travels as `None`.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A configuration value was rejected at the call site.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A URL template could not be compiled.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A handler asked for an argument that was not bound.
    #[error("argument `{0}` was not bound")]
    MissingArgument(String),

    /// A bound argument could not be converted to the requested type.
    #[error("argument `{name}` has invalid value `{value}`")]
    InvalidArgumentValue { name: String, value: String },
}

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::InvalidArgument("bad format".into());
        assert_eq!(err.to_string(), "invalid argument: bad format");

        let err = RouterError::from(PatternError::DuplicatePlaceholder {
            name: "id".into(),
            template: "/{id}/{id}".into(),
        });
        assert!(err.to_string().contains("duplicate placeholder `id`"));
    }
}
