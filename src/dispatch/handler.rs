//! Handler shapes attached to routes.
//!
//! A handler is either a closure with an explicit parameter-name manifest,
//! or a target descriptor naming a controller action.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{RouterError, RouterResult};

type HandlerFn<R> = dyn Fn(&Arguments) -> R + Send + Sync;

/// Arguments bound to a handler invocation, in handler parameter order.
///
/// Parameters that could not be bound are absent, so positions follow the
/// handler manifest with gaps removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<(String, String)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `position` in the bound argument list.
    pub fn value(&self, position: usize) -> Option<&str> {
        self.values.get(position).map(|(_, v)| v.as_str())
    }

    /// Value bound to the parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parses the value bound to `name`.
    pub fn parse<T: FromStr>(&self, name: &str) -> RouterResult<T> {
        let value = self
            .get(name)
            .ok_or_else(|| RouterError::MissingArgument(name.to_string()))?;
        value.parse().map_err(|_| RouterError::InvalidArgumentValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Bound values in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(_, v)| v.as_str())
    }

    /// `(parameter, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// A callable plus the names of its formal parameters.
pub struct ClosureHandler<R> {
    params: Vec<String>,
    func: Arc<HandlerFn<R>>,
}

impl<R> ClosureHandler<R> {
    /// Creates a handler whose parameters are named, in declaration order, by `params`.
    pub fn new<I, S, F>(params: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Arguments) -> R + Send + Sync + 'static,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            func: Arc::new(func),
        }
    }

    /// Handler with no declared parameters.
    pub fn nullary<F>(func: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            params: Vec::new(),
            func: Arc::new(move |_: &Arguments| func()),
        }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn call(&self, args: &Arguments) -> R {
        (self.func)(args)
    }
}

impl<R> Clone for ClosureHandler<R> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<R> fmt::Debug for ClosureHandler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Descriptor naming a controller action.
///
/// Each field is either a literal or a `{name}` token referring to one of the
/// route's placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub module: Option<String>,
    pub controller: Option<String>,
    pub action: Option<String>,
}

impl Target {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            module: None,
            controller: Some(controller.into()),
            action: Some(action.into()),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Placeholder names referenced by the module, controller or action fields.
    pub fn referenced_placeholders(&self) -> impl Iterator<Item = &str> {
        [&self.module, &self.controller, &self.action]
            .into_iter()
            .flatten()
            .filter_map(|value| placeholder_name(value))
    }
}

/// Returns the placeholder name if `value` is a `{name}` token.
///
/// A token starts with `{` and contains a closing `}`; any `:constraint` suffix
/// is ignored.
pub fn placeholder_name(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('{')?;
    let end = inner.rfind('}')?;
    let inner = &inner[..end];
    let name = inner.split(':').next().unwrap_or(inner);
    Some(name.trim())
}

/// What a route invokes when it matches.
pub enum Handler<R> {
    Closure(ClosureHandler<R>),
    Target(Target),
}

impl<R> Handler<R> {
    /// Shortcut for a closure handler with named parameters.
    pub fn closure<I, S, F>(params: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Arguments) -> R + Send + Sync + 'static,
    {
        Handler::Closure(ClosureHandler::new(params, func))
    }

    pub fn as_closure(&self) -> Option<&ClosureHandler<R>> {
        match self {
            Handler::Closure(handler) => Some(handler),
            Handler::Target(_) => None,
        }
    }

    pub fn as_target(&self) -> Option<&Target> {
        match self {
            Handler::Target(target) => Some(target),
            Handler::Closure(_) => None,
        }
    }
}

impl<R> Clone for Handler<R> {
    fn clone(&self) -> Self {
        match self {
            Handler::Closure(h) => Handler::Closure(h.clone()),
            Handler::Target(t) => Handler::Target(t.clone()),
        }
    }
}

impl<R> fmt::Debug for Handler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Closure(h) => f.debug_tuple("Closure").field(h).finish(),
            Handler::Target(t) => f.debug_tuple("Target").field(t).finish(),
        }
    }
}

impl<R> From<ClosureHandler<R>> for Handler<R> {
    fn from(handler: ClosureHandler<R>) -> Self {
        Handler::Closure(handler)
    }
}

impl<R> From<Target> for Handler<R> {
    fn from(target: Target) -> Self {
        Handler::Target(target)
    }
}
