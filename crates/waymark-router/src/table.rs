//! Route declarations and the compiled route table.

use std::future::Future;

use tracing::warn;

use crate::diag::Diagnostics;
use crate::error::ConfigError;
use crate::handler::{into_handler, Context, Handler, HandlerResult};
use crate::path::PathPattern;
use crate::request::{Method, PathParams};

/// A route declaration, supplied once at startup.
///
/// `path` and a main handler are mandatory; everything else has a default.
/// Compilation consumes the declaration and produces an immutable
/// [`CompiledRoute`]; the declaration itself is never mutated in place.
///
/// # Example
///
/// ```ignore
/// let route = Route::new("/items/:id")
///     .method("GET")
///     .pre(require_auth)
///     .handler(fetch_item)
///     .post(stamp_version);
/// ```
pub struct Route {
    path: String,
    method: Option<Method>,
    handler: Option<Handler>,
    pre: Vec<Handler>,
    post: Vec<Handler>,
}

impl Route {
    /// Starts a declaration for the given path pattern.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
            handler: None,
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    /// Sets the HTTP method. Defaults to GET when never called.
    #[must_use]
    pub fn method(mut self, method: &str) -> Self {
        self.method = Some(Method::parse(method));
        self
    }

    /// Sets the main handler.
    #[must_use]
    pub fn handler<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler = Some(into_handler(f));
        self
    }

    /// Appends a pre-handler; pre-handlers run before the main handler in
    /// the order they were added.
    #[must_use]
    pub fn pre<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.pre.push(into_handler(f));
        self
    }

    /// Appends a post-handler; post-handlers run after the main handler in
    /// the order they were added.
    #[must_use]
    pub fn post<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.post.push(into_handler(f));
        self
    }
}

/// A validated, normalized route. Immutable once compiled.
pub struct CompiledRoute {
    pattern: PathPattern,
    method: Method,
    /// The execution chain: pre-handlers, main handler, post-handlers.
    funcs: Vec<Handler>,
}

impl CompiledRoute {
    /// The declared path pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The normalized (uppercased) method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub(crate) fn funcs(&self) -> &[Handler] {
        &self.funcs
    }
}

/// A compiled route plus the parameters extracted from the request path.
/// Lives only for the duration of one request.
pub struct MatchedRoute<'a> {
    route: &'a CompiledRoute,
    /// Extracted path parameters.
    pub params: PathParams,
}

impl MatchedRoute<'_> {
    /// The matched route.
    pub fn route(&self) -> &CompiledRoute {
        self.route
    }
}

/// The compiled route table. Built once at startup, never mutated after,
/// and therefore freely shared across concurrently handled requests.
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Validates and compiles route declarations, in registration order.
    ///
    /// Fails with [`ConfigError`] when a declaration lacks a path or a
    /// handler. A method outside the recognized verbs is accepted verbatim
    /// but reported when diagnostics are enabled.
    pub fn compile(routes: Vec<Route>, diagnostics: Diagnostics) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(routes.len());

        for route in routes {
            if route.path.is_empty() {
                return Err(ConfigError::MissingPath);
            }
            let Some(handler) = route.handler else {
                return Err(ConfigError::MissingHandler { path: route.path });
            };

            let method = route.method.unwrap_or(Method::Get);
            if !method.is_recognized() && diagnostics.is_enabled() {
                warn!(method = %method, path = %route.path, "not a recognized HTTP verb");
            }

            let pattern = PathPattern::parse(&route.path);

            let mut funcs = route.pre;
            funcs.push(handler);
            funcs.extend(route.post);

            compiled.push(CompiledRoute {
                pattern,
                method,
                funcs,
            });
        }

        Ok(Self { routes: compiled })
    }

    /// Finds the first route matching the request, in registration order.
    ///
    /// Routes are filtered by exact method equality first, then by path
    /// match. Registration order is the only tie-break.
    pub fn lookup(&self, path: &str, method: &Method) -> Option<MatchedRoute<'_>> {
        self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            let params = route.pattern.match_path(path)?;
            Some(MatchedRoute { route, params })
        })
    }

    /// The number of compiled routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Outcome;

    async fn noop(_ctx: Context) -> HandlerResult {
        Ok(Outcome::empty())
    }

    #[test]
    fn test_missing_handler_fails_compilation() {
        let err = RouteTable::compile(vec![Route::new("/items")], Diagnostics::Disabled)
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::MissingHandler { path } if path == "/items"));
    }

    #[test]
    fn test_missing_path_fails_compilation() {
        let err = RouteTable::compile(vec![Route::new("").handler(noop)], Diagnostics::Disabled)
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::MissingPath));
    }

    #[test]
    fn test_method_defaults_to_get() {
        let table = RouteTable::compile(
            vec![Route::new("/items").handler(noop)],
            Diagnostics::Disabled,
        )
        .unwrap();

        assert!(table.lookup("/items", &Method::Get).is_some());
        assert!(table.lookup("/items", &Method::Post).is_none());
    }

    #[test]
    fn test_method_is_normalized_uppercase() {
        let table = RouteTable::compile(
            vec![Route::new("/items").method("post").handler(noop)],
            Diagnostics::Disabled,
        )
        .unwrap();

        let matched = table.lookup("/items", &Method::Post).unwrap();
        assert_eq!(matched.route().method(), &Method::Post);
    }

    #[test]
    fn test_unrecognized_method_still_routes() {
        let table = RouteTable::compile(
            vec![Route::new("/cache").method("purge").handler(noop)],
            Diagnostics::Enabled,
        )
        .unwrap();

        let method = Method::parse("PURGE");
        assert!(table.lookup("/cache", &method).is_some());
        assert!(table.lookup("/cache", &Method::Get).is_none());
    }

    #[test]
    fn test_registration_order_wins() {
        let table = RouteTable::compile(
            vec![
                Route::new("/items/:id").handler(noop),
                Route::new("/items/special").handler(noop),
            ],
            Diagnostics::Disabled,
        )
        .unwrap();

        // Both patterns match; the earliest-declared one is selected.
        let matched = table.lookup("/items/special", &Method::Get).unwrap();
        assert_eq!(matched.params.get("id"), Some("special"));
        assert_eq!(matched.route().pattern().pattern(), "/items/:id");
    }

    #[test]
    fn test_chain_is_pre_handler_post() {
        let table = RouteTable::compile(
            vec![Route::new("/items").pre(noop).pre(noop).handler(noop).post(noop)],
            Diagnostics::Disabled,
        )
        .unwrap();

        let matched = table.lookup("/items", &Method::Get).unwrap();
        assert_eq!(matched.route().funcs().len(), 4);
    }

    #[test]
    fn test_no_match_returns_none() {
        let table = RouteTable::compile(
            vec![Route::new("/items").handler(noop)],
            Diagnostics::Disabled,
        )
        .unwrap();

        assert!(table.lookup("/nope", &Method::Get).is_none());
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}
