//! Dispatch to controller actions.
//!
//! # Responsibilities
//! - Resolve module, controller and action from a route's target descriptor
//! - Look the resolved class and method up in an explicit registry
//! - Bind the remaining captures to the action's parameters and invoke it
//!
//! # Design Decisions
//! - Classes are registered up front; no construction by name at runtime
//! - Class and method lookups are ASCII case-insensitive
//! - Placeholders used to pick module/controller/action are never passed as arguments
//! - The `Controller` suffix is appended only when both controller and action
//!   come from placeholders

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::config::schema::DispatcherConfig;
use crate::dispatch::handler::{placeholder_name, Arguments, ClosureHandler, Handler, Target};
use crate::dispatch::{bind_arguments, capture_pool, Dispatcher, Parameters};
use crate::error::{RouterError, RouterResult};
use crate::routing::matcher::MatchedRoute;

pub const CONTROLLERS_SEGMENT: &str = "Controllers";
pub const MODULES_SEGMENT: &str = "Modules";
pub const CONTROLLER_SUFFIX: &str = "Controller";
pub const ACTION_PREFIX: &str = "action";
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Joins non-empty namespace segments.
pub fn join_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}

/// A registered controller class and its action methods.
pub struct ControllerClass<R> {
    path: String,
    actions: HashMap<String, (String, ClosureHandler<R>)>,
}

impl<R> ControllerClass<R> {
    /// Starts a class whose instances are built with `C::default()` on every call.
    pub fn build<C: Default + 'static>(path: impl Into<String>) -> ControllerBuilder<C, R> {
        ControllerBuilder {
            path: path.into(),
            actions: HashMap::new(),
            _controller: PhantomData,
        }
    }

    /// Fully qualified class path, e.g. `App::Controllers::VideoController`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self, name: &str) -> Option<&ClosureHandler<R>> {
        self.actions
            .get(&name.to_ascii_lowercase())
            .map(|(_, handler)| handler)
    }

    /// Registered method names, as declared.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.actions.values().map(|(name, _)| name.as_str())
    }
}

impl<R> fmt::Debug for ControllerClass<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClass")
            .field("path", &self.path)
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`ControllerClass`] bound to a concrete controller type.
pub struct ControllerBuilder<C, R> {
    path: String,
    actions: HashMap<String, (String, ClosureHandler<R>)>,
    _controller: PhantomData<fn() -> C>,
}

impl<C: Default + 'static, R> ControllerBuilder<C, R> {
    /// Registers method `name` with its declared parameter names.
    pub fn action<I, S, F>(mut self, name: &str, params: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&C, &Arguments) -> R + Send + Sync + 'static,
    {
        let handler = ClosureHandler::new(params, move |args: &Arguments| {
            let controller = C::default();
            func(&controller, args)
        });
        self.actions
            .insert(name.to_ascii_lowercase(), (name.to_string(), handler));
        self
    }

    pub fn finish(self) -> ControllerClass<R> {
        ControllerClass {
            path: self.path,
            actions: self.actions,
        }
    }
}

/// Lookup table from class path to controller class.
pub struct ControllerRegistry<R> {
    classes: HashMap<String, ControllerClass<R>>,
}

impl<R> Default for ControllerRegistry<R> {
    fn default() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }
}

impl<R> ControllerRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, class: ControllerClass<R>) -> &mut Self {
        self.classes.insert(class.path.to_ascii_lowercase(), class);
        self
    }

    pub fn with(mut self, class: ControllerClass<R>) -> Self {
        self.register(class);
        self
    }

    pub fn get(&self, path: &str) -> Option<&ControllerClass<R>> {
        self.classes.get(&path.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<R> fmt::Debug for ControllerRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.classes.values()).finish()
    }
}

/// Class and method a matched route resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub class: String,
    pub method: String,
    /// Placeholder values left for argument binding, in template order.
    pub parameters: Vec<(String, String)>,
}

/// Dispatches target descriptors to registered controller actions.
pub struct ControllerDispatcher<R> {
    registry: ControllerRegistry<R>,
    base_namespace: String,
    not_found: Option<Target>,
}

impl<R> ControllerDispatcher<R> {
    pub fn new(registry: ControllerRegistry<R>) -> Self {
        Self {
            registry,
            base_namespace: String::new(),
            not_found: None,
        }
    }

    pub fn from_config(registry: ControllerRegistry<R>, config: &DispatcherConfig) -> Self {
        let mut dispatcher = Self::new(registry);
        dispatcher.set_base_namespace(config.base_namespace.clone());
        dispatcher
    }

    pub fn set_base_namespace(&mut self, base_namespace: impl Into<String>) -> &mut Self {
        self.base_namespace = base_namespace.into();
        self
    }

    pub fn base_namespace(&self) -> &str {
        &self.base_namespace
    }

    pub fn with_not_found(mut self, target: Target) -> Self {
        self.not_found = Some(target);
        self
    }

    pub fn registry(&self) -> &ControllerRegistry<R> {
        &self.registry
    }

    /// Resolves the class, method and bindable values of a matched route.
    ///
    /// Returns `None` when the handler is not a target descriptor, lacks
    /// controller or action, or refers to a placeholder the route does not have.
    pub fn resolve(&self, matched: &MatchedRoute<'_, R>) -> Option<ResolvedTarget> {
        let target = matched.route().handler().as_target()?;
        let controller = target.controller.as_deref()?;
        let action = target.action.as_deref()?;

        let namespace = self.resolve_namespace(target, matched)?;

        let (class_name, action) = match placeholder_name(action) {
            Some(action_placeholder) => {
                let action = matched.value_of(action_placeholder)?;
                let class_name = match placeholder_name(controller) {
                    Some(controller_placeholder) => {
                        format!("{}{CONTROLLER_SUFFIX}", matched.value_of(controller_placeholder)?)
                    }
                    None => controller.to_string(),
                };
                (class_name, action)
            }
            None => (controller.to_string(), action),
        };

        let consumed: Vec<&str> = target.referenced_placeholders().collect();
        let parameters = capture_pool(matched)
            .filter(|(name, _)| !consumed.contains(name))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Some(ResolvedTarget {
            class: join_path([namespace.as_str(), class_name.as_str()]),
            method: format!("{ACTION_PREFIX}{action}"),
            parameters,
        })
    }

    fn resolve_namespace(&self, target: &Target, matched: &MatchedRoute<'_, R>) -> Option<String> {
        match target.module.as_deref() {
            Some(module) => {
                let module = match placeholder_name(module) {
                    Some(placeholder) => matched.value_of(placeholder)?,
                    None => module,
                };
                Some(join_path([
                    self.base_namespace.as_str(),
                    MODULES_SEGMENT,
                    module,
                    CONTROLLERS_SEGMENT,
                ]))
            }
            None => Some(join_path([self.base_namespace.as_str(), CONTROLLERS_SEGMENT])),
        }
    }

    fn lookup(&self, class: &str, method: &str) -> Option<&ClosureHandler<R>> {
        let Some(controller) = self.registry.get(class) else {
            tracing::warn!(class, "Controller class is not registered");
            return None;
        };
        let handler = controller.method(method);
        if handler.is_none() {
            tracing::warn!(class, method, "Controller action is not registered");
        }
        handler
    }
}

impl<R> Dispatcher<R> for ControllerDispatcher<R> {
    fn dispatch_route(&self, matched: &MatchedRoute<'_, R>, extra: &Parameters) -> Option<R> {
        let Some(resolved) = self.resolve(matched) else {
            tracing::debug!(url = %matched.route().url(), "Route handler does not resolve to a controller action");
            return self.dispatch_not_found();
        };

        let Some(handler) = self.lookup(&resolved.class, &resolved.method) else {
            return self.dispatch_not_found();
        };

        let pool = resolved
            .parameters
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));
        let args = bind_arguments(handler.params(), pool, extra);

        tracing::debug!(class = %resolved.class, method = %resolved.method, args = args.len(), "Invoking controller action");
        Some(handler.call(&args))
    }

    fn dispatch_not_found(&self) -> Option<R> {
        let target = self.not_found.as_ref()?;
        let controller = target.controller.as_deref()?;
        let action = target.action.as_deref()?;

        let class = join_path([
            self.base_namespace.as_str(),
            CONTROLLERS_SEGMENT,
            controller,
        ]);
        let method = format!("{ACTION_PREFIX}{action}");

        tracing::debug!(%class, %method, "Dispatching not found");
        self.lookup(&class, &method)
            .map(|handler| handler.call(&Arguments::new()))
    }

    fn set_not_found_handler(&mut self, handler: Handler<R>) -> RouterResult<()> {
        match handler {
            Handler::Target(target) => {
                self.not_found = Some(target);
                Ok(())
            }
            Handler::Closure(_) => Err(RouterError::InvalidArgument(
                "not-found handler must be a controller target".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::{Matcher, RegexMatcher};
    use crate::routing::route::RouteCollection;

    #[derive(Default)]
    struct VideoController;

    impl VideoController {
        fn view(&self, args: &Arguments) -> String {
            format!("video:{}", args.values().collect::<Vec<_>>().join(","))
        }
    }

    fn registry() -> ControllerRegistry<String> {
        ControllerRegistry::new().with(
            ControllerClass::build::<VideoController>("App::Controllers::VideoController")
                .action("actionView", ["id"], VideoController::view)
                .action("actionNotFound", Vec::<String>::new(), |_, _| "not found".to_string())
                .finish(),
        )
    }

    fn dispatcher() -> ControllerDispatcher<String> {
        let mut dispatcher = ControllerDispatcher::new(registry());
        dispatcher.set_base_namespace("App");
        dispatcher
    }

    fn matcher(url: &str, target: Target) -> RegexMatcher<String> {
        let mut routes = RouteCollection::new();
        routes.get(url, target);
        RegexMatcher::new(routes)
    }

    #[test]
    fn test_join_path_skips_empty() {
        assert_eq!(join_path(["", "Controllers", "Home"]), "Controllers::Home");
        assert_eq!(join_path(["App", "Controllers"]), "App::Controllers");
    }

    #[test]
    fn test_resolve_literal_target() {
        let matcher = matcher(r"/video/{id:\d+}", Target::new("VideoController", "view"));
        let matched = matcher.match_path_and_method("GET", "/video/123").unwrap();

        let resolved = dispatcher().resolve(&matched).unwrap();
        assert_eq!(resolved.class, "App::Controllers::VideoController");
        assert_eq!(resolved.method, "actionview");
        assert_eq!(resolved.parameters, vec![("id".to_string(), "123".to_string())]);
    }

    #[test]
    fn test_resolve_dynamic_controller_and_action() {
        let matcher = matcher(
            r"/automatics/{controller}/{action}/{id:\d+}",
            Target::new("{controller}", "{action}"),
        );
        let matched = matcher
            .match_path_and_method("GET", "/automatics/video/view/123")
            .unwrap();

        let resolved = dispatcher().resolve(&matched).unwrap();
        assert_eq!(resolved.class, "App::Controllers::videoController");
        assert_eq!(resolved.method, "actionview");
        assert_eq!(resolved.parameters, vec![("id".to_string(), "123".to_string())]);
    }

    #[test]
    fn test_literal_controller_keeps_name_with_dynamic_action() {
        let matcher = matcher(
            "/automatics/video/{action}/{id:i}",
            Target::new("VideoController", "{action}"),
        );
        let matched = matcher
            .match_path_and_method("GET", "/automatics/video/view/9")
            .unwrap();

        let resolved = dispatcher().resolve(&matched).unwrap();
        assert_eq!(resolved.class, "App::Controllers::VideoController");
        assert_eq!(resolved.method, "actionview");
    }

    #[test]
    fn test_resolve_module_namespace() {
        let matcher = matcher(
            "/{module}/{controller}/{action}/{id:i}",
            Target::new("{controller}", "{action}").with_module("{module}"),
        );
        let matched = matcher
            .match_path_and_method("GET", "/shop/cart/show/1")
            .unwrap();

        let resolved = dispatcher().resolve(&matched).unwrap();
        assert_eq!(resolved.class, "App::Modules::shop::Controllers::cartController");
        assert_eq!(resolved.method, "actionshow");
        assert_eq!(resolved.parameters.len(), 1);
    }

    #[test]
    fn test_dispatch_invokes_registered_action() {
        let matcher = matcher(
            "/automatics/{id:i}/{controller}/{action}",
            Target::new("{controller}", "{action}"),
        );
        let matched = matcher
            .match_path_and_method("GET", "/automatics/123/video/view")
            .unwrap();

        let result = dispatcher().dispatch_route(&matched, &Parameters::new());
        assert_eq!(result.as_deref(), Some("video:123"));
    }

    #[test]
    fn test_missing_keys_go_to_not_found() {
        let matcher = matcher("/{controller}/{action}", Target::default());
        let matched = matcher.match_path_and_method("GET", "/video/view").unwrap();

        assert!(dispatcher().resolve(&matched).is_none());
        assert_eq!(dispatcher().dispatch_route(&matched, &Parameters::new()), None);

        let with_fallback = dispatcher().with_not_found(Target::new("VideoController", "notFound"));
        assert_eq!(
            with_fallback.dispatch_route(&matched, &Parameters::new()).as_deref(),
            Some("not found")
        );
    }

    #[test]
    fn test_unregistered_class_goes_to_not_found() {
        let matcher = matcher("/{controller}/{action}", Target::new("{controller}", "{action}"));
        let matched = matcher.match_path_and_method("GET", "/audio/play").unwrap();

        let dispatcher = dispatcher().with_not_found(Target::new("VideoController", "notFound"));
        assert_eq!(
            dispatcher.dispatch_route(&matched, &Parameters::new()).as_deref(),
            Some("not found")
        );
    }

    #[test]
    fn test_not_found_handler_must_be_target() {
        let mut dispatcher = dispatcher();
        let err = dispatcher
            .set_not_found_handler(Handler::closure(Vec::<String>::new(), |_: &Arguments| String::new()))
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidArgument(_)));

        dispatcher
            .set_not_found_handler(Handler::Target(Target::new("VideoController", "notFound")))
            .unwrap();
        assert_eq!(dispatcher.dispatch_not_found().as_deref(), Some("not found"));
    }
}
