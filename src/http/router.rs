//! Application router and path-prefixed route groups.
//!
//! `AppRouter` owns the (method, path) → handler table. A `RouteGroup`
//! collects routes relative to a prefix and is mounted back into the router,
//! after which every path `P` registered on it is served at `prefix + P`.

use std::time::Duration;

use axum::{routing::MethodRouter, Router};

use crate::http::middleware;

/// Join a group prefix and a route path with exactly one separating slash.
pub fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => prefix.to_string(),
        _ => format!("{prefix}/{path}"),
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Routes sharing a common path prefix.
pub struct RouteGroup {
    prefix: String,
    router: Router,
    paths: Vec<String>,
}

impl RouteGroup {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            router: Router::new(),
            paths: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register `method_router` at `path`, relative to the group prefix.
    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        let router = std::mem::take(&mut self.router);
        self.router = router.route(path, method_router);
        self.paths.push(join_path(&self.prefix, path));
        self
    }

    /// Externally reachable paths registered so far.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

#[derive(Debug, Clone, Copy)]
struct DefaultMiddleware {
    request_timeout: Duration,
}

/// Top-level router for the service.
pub struct AppRouter {
    router: Router,
    routes: Vec<String>,
    middleware: Option<DefaultMiddleware>,
}

impl AppRouter {
    /// A bare router with no middleware.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes: Vec::new(),
            middleware: None,
        }
    }

    /// A router that wraps every route with request logging, request IDs,
    /// panic recovery, metrics and a request timeout.
    pub fn with_default_middleware(request_timeout: Duration) -> Self {
        Self {
            middleware: Some(DefaultMiddleware { request_timeout }),
            ..Self::new()
        }
    }

    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        let router = std::mem::take(&mut self.router);
        self.router = router.route(path, method_router);
        self.routes.push(path.to_string());
        self
    }

    /// Create an empty group scoped to `prefix`. Nothing is served until the
    /// group is passed to [`AppRouter::mount`].
    pub fn group(&self, prefix: &str) -> RouteGroup {
        RouteGroup::new(prefix)
    }

    pub fn mount(&mut self, group: RouteGroup) {
        let router = std::mem::take(&mut self.router);
        self.router = if group.prefix.is_empty() {
            router.merge(group.router)
        } else {
            router.nest(&group.prefix, group.router)
        };
        self.routes.extend(group.paths);
    }

    /// Every path registered on the router, including mounted groups.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// Finish construction. Middleware wraps all routes registered so far.
    pub fn into_router(self) -> Router {
        match self.middleware {
            Some(defaults) => middleware::apply_defaults(self.router, defaults.request_timeout),
            None => self.router,
        }
    }
}

impl Default for AppRouter {
    fn default() -> Self {
        Self::new()
    }
}
