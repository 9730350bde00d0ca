//! Shared fixtures for integration tests.

use std::collections::HashMap;

use autobind_router::dispatch::{Arguments, ControllerClass, ControllerRegistry};
use autobind_router::http::{parse_query, Request};

pub const BASE_NAMESPACE: &str = "Tests::Application";

/// Request built from raw server-style fields.
pub struct FakeRequest {
    pub method: String,
    pub uri: String,
    pub query: String,
}

impl FakeRequest {
    pub fn new(method: &str, uri: &str, query: &str) -> Self {
        Self {
            method: method.to_string(),
            uri: uri.to_string(),
            query: query.to_string(),
        }
    }
}

impl Request for FakeRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.uri
    }

    fn query_params(&self) -> HashMap<String, String> {
        parse_query(&self.query)
    }
}

#[derive(Default)]
pub struct VideoController;

impl VideoController {
    pub fn view(&self, args: &Arguments) -> String {
        args.get("id").unwrap_or_default().to_string()
    }

    pub fn not_found(&self, _: &Arguments) -> String {
        "not found".to_string()
    }
}

#[derive(Default)]
pub struct TestController {
    prefix: &'static str,
}

impl TestController {
    pub fn view(&self, args: &Arguments) -> String {
        format!("{}{}", self.prefix, args.get("id").unwrap_or_default())
    }
}

/// Controllers mirroring a small application tree.
///
/// ```text
/// Tests::Application::Controllers::VideoController
/// Tests::Application::Modules::TestModule::Controllers::TestController
/// ```
#[allow(dead_code)]
pub fn registry() -> ControllerRegistry<String> {
    ControllerRegistry::new()
        .with(
            ControllerClass::build::<VideoController>(format!("{BASE_NAMESPACE}::Controllers::VideoController"))
                .action("actionView", ["id"], VideoController::view)
                .action("actionNotFound", Vec::<String>::new(), VideoController::not_found)
                .finish(),
        )
        .with(
            ControllerClass::build::<TestController>(format!(
                "{BASE_NAMESPACE}::Modules::TestModule::Controllers::TestController"
            ))
            .action("actionView", ["id"], TestController::view)
            .finish(),
        )
}
