use serde::Serialize;

/// Serializable view of a route descriptor: method, relative path and the
/// name of the controller method that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: String,
    pub path: String,
    pub handler: String,
}

impl RouteInfo {
    pub fn new(method: impl Into<String>, path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            handler: handler.into(),
        }
    }
}

/// Serializable view of everything registered for one controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerInfo {
    pub controller: String,
    pub base_path: String,
    pub routes: Vec<RouteInfo>,
}
