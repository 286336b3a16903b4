//! Route table, resolution and reverse routing
//!
//! Registered routes are split three ways:
//!
//! - static routes (no `:`) are matched by exact lookup
//! - fully-dynamic routes (every segment is a placeholder, e.g.
//!   `/:controller/:action`) are matched by segment count, first registered wins
//! - everything else goes into the [`RadixTrie`]
//!
//! Resolution tries them in that order. Reverse routing walks the full table in
//! registration order.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, HandlerRouteCache};
use crate::error::{RouterError, RouterResult};
use crate::handler::Handler;
use crate::hooks::{BoxedUriHook, UriHook};
use crate::params::{build_query, parse_query, RouteParams};
use crate::radix::RadixTrie;
use crate::template::{self, segment_at, PARAM_MARKER};
use crate::{debug_log, info_log, trace_log, Matcher};
#[cfg(feature = "cache")]
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// RouterConfig
// ============================================================================

/// Environment the router builds URLs for
///
/// # Example
///
/// ```
/// use radix_router::RouterConfig;
///
/// let config = RouterConfig::new()
///     .base_uri("/subdir")
///     .protocol("https")
///     .host("example.com");
///
/// assert_eq!(config.base_uri, "/subdir");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Prefix stripped before resolving and prepended to built URLs
    pub base_uri: String,
    /// Scheme used for absolute URLs
    pub protocol: String,
    /// Host used for absolute URLs
    pub host: String,
    /// Maximum number of handlers kept in the reverse-routing cache
    pub cache_capacity: usize,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            cache_capacity: 1000,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Path router
///
/// Register routes first, then share the router for lookups: `resolve` and
/// `get_url` take `&self` and the router is `Send + Sync`.
///
/// # Example
///
/// ```
/// use radix_router::{Router, RouterConfig};
///
/// let mut router = Router::new(RouterConfig::default());
/// router.add_route("/", "site/index");
/// router.add_route("/user/:id", "user/view");
/// router.add_route("/:controller/:action", ":controller/:action");
///
/// let matcher = router.resolve("/user/42?tab=posts").unwrap();
/// assert!(matcher.found);
/// assert_eq!(matcher.param("id"), Some("42"));
/// assert_eq!(matcher.param("tab"), Some("posts"));
///
/// let matcher = router.resolve("/blog/list").unwrap();
/// assert_eq!(matcher.handler_template(), Some("blog/list"));
///
/// let params = [("id", "7")].into_iter().collect();
/// assert_eq!(router.get_url("user/view", &params, false), "/user/7");
/// ```
pub struct Router {
    config: RouterConfig,
    /// Every registered route, in registration order
    routes: Vec<(String, Handler)>,
    static_routes: HashMap<String, Handler>,
    fully_dynamic_routes: Vec<(String, Handler)>,
    radix: RadixTrie,
    hooks: Vec<BoxedUriHook>,
    #[cfg(feature = "cache")]
    cache: Mutex<HandlerRouteCache>,
}

impl Router {
    /// Create an empty router
    pub fn new(config: RouterConfig) -> Self {
        Self {
            #[cfg(feature = "cache")]
            cache: Mutex::new(HandlerRouteCache::with_capacity(config.cache_capacity)),
            config,
            routes: Vec::new(),
            static_routes: HashMap::new(),
            fully_dynamic_routes: Vec::new(),
            radix: RadixTrie::new(),
            hooks: Vec::new(),
        }
    }

    /// Create a router and register routes in iteration order
    pub fn with_routes<R, H, I>(config: RouterConfig, routes: I) -> Self
    where
        R: Into<String>,
        H: Into<Handler>,
        I: IntoIterator<Item = (R, H)>,
    {
        let mut router = Self::new(config);
        for (route, handler) in routes {
            router.add_route(route, handler);
        }
        info_log!("Router initialised with {} route(s)", router.len());
        router
    }

    /// Register a route
    ///
    /// Registering the same route again replaces its handler but keeps its
    /// original position.
    pub fn add_route(&mut self, route: impl Into<String>, handler: impl Into<Handler>) {
        let route = route.into();
        let handler = handler.into();

        upsert(&mut self.routes, &route, handler.clone());
        self.clear_cache();

        if !template::has_params(&route) {
            debug_log!("Registered static route '{}'", route);
            self.static_routes.insert(route, handler);
        } else if template::is_fully_dynamic(&route) {
            debug_log!("Registered fully dynamic route '{}'", route);
            upsert(&mut self.fully_dynamic_routes, &route, handler);
        } else {
            debug_log!("Registered trie route '{}'", route);
            self.radix.insert(&route, handler);
        }
    }

    /// Validate the route path, then register it
    pub fn try_add_route(
        &mut self,
        route: impl Into<String>,
        handler: impl Into<Handler>,
    ) -> RouterResult<()> {
        let route = route.into();
        template::validate_route_path(&route)
            .map_err(|reason| RouterError::InvalidRoute {
                route: route.clone(),
                reason,
            })?;
        self.add_route(route, handler);
        Ok(())
    }

    /// Register a URI hook
    pub fn add_hook(&mut self, hook: impl UriHook) {
        self.hooks.push(Box::new(hook));
        self.hooks.sort_by_key(|hook| std::cmp::Reverse(hook.priority()));
    }

    /// Resolve a request path
    ///
    /// The base URI is stripped and the query string is parsed and merged
    /// into the parameters; path parameters win over query parameters with
    /// the same name.
    pub fn resolve(&self, path: &str) -> RouterResult<Matcher> {
        let base = self.config.base_uri.as_str();
        let path = if base.is_empty() {
            path
        } else {
            path.strip_prefix(base).unwrap_or(path)
        };

        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (path, RouteParams::new()),
        };

        let path = format!("/{}", path.trim_matches('/'));
        trace_log!("Resolving '{}'", path);

        if let Some(handler) = self.static_routes.get(&path) {
            return Ok(Matcher::found(handler.clone(), RouteParams::new()));
        }

        let mut matcher = self.radix.search(&path)?;

        if !matcher.found {
            matcher = self.find_fully_dynamic_route(&path);
        }

        for (name, value) in query {
            matcher.params.insert_if_absent(name, value);
        }

        Ok(matcher)
    }

    /// Positional match against the fully-dynamic routes.
    ///
    /// First route with the same number of segments wins.
    fn find_fully_dynamic_route(&self, path: &str) -> Matcher {
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();

        for (route, handler) in &self.fully_dynamic_routes {
            let names: Vec<&str> = route.trim_matches('/').split('/').collect();

            if names.len() != parts.len() {
                continue;
            }

            let params: RouteParams = names
                .iter()
                .copied()
                .map(|name| name.strip_prefix(PARAM_MARKER).unwrap_or(name))
                .zip(parts.iter().copied())
                .collect();

            trace_log!("'{}' matched fully dynamic route '{}'", path, route);
            return Matcher::found(handler.clone().bind(&params), params);
        }

        Matcher::not_found()
    }

    /// Build the URL of a handler (reverse routing)
    ///
    /// Among the routes able to produce `handler`, the one using the most of
    /// `params` is chosen. Parameters it does not use are appended as a query
    /// string. A handler no route produces is used as the path itself.
    pub fn get_url(&self, handler: &str, params: &RouteParams, absolute: bool) -> String {
        let routes = self.handler_routes(handler);

        let chosen = if params.is_empty() {
            routes.first()
        } else {
            best_route(&routes, params)
        };

        let mut remaining = params.clone();
        let mut uri = match chosen {
            Some(route) => {
                let (uri, consumed) = template::fill(route, params);
                for name in &consumed {
                    remaining.remove(name);
                }
                uri
            }
            None => handler.to_string(),
        };

        if !remaining.is_empty() {
            uri.push_str("/?");
            uri.push_str(&build_query(&remaining));
        }

        for hook in &self.hooks {
            trace_log!("Running URI hook '{}'", hook.name());
            hook.after_build_uri(&mut uri);
        }

        if absolute {
            format!(
                "{}://{}{}{}",
                self.config.protocol, self.config.host, self.config.base_uri, uri
            )
        } else {
            format!("{}{}", self.config.base_uri, uri)
        }
    }

    /// Routes able to produce `handler`, in registration order
    pub fn handler_routes(&self, handler: &str) -> Arc<[String]> {
        if let Some(routes) = self.cached_routes(handler) {
            return routes;
        }

        let routes: Arc<[String]> = self
            .routes
            .iter()
            .filter_map(|(route, pattern)| {
                let pattern = pattern.as_template()?;
                resolve_handler_pattern(route, pattern, handler)
            })
            .collect();

        debug_log!("Handler '{}' maps to {} route(s)", handler, routes.len());
        self.cache_routes(handler, &routes);
        routes
    }

    #[cfg(feature = "cache")]
    fn cached_routes(&self, handler: &str) -> Option<Arc<[String]>> {
        self.cache.lock().get(handler)
    }

    #[cfg(not(feature = "cache"))]
    fn cached_routes(&self, _handler: &str) -> Option<Arc<[String]>> {
        None
    }

    #[cfg(feature = "cache")]
    fn cache_routes(&self, handler: &str, routes: &Arc<[String]>) {
        self.cache
            .lock()
            .insert(handler.to_string(), Arc::clone(routes));
    }

    #[cfg(not(feature = "cache"))]
    fn cache_routes(&self, _handler: &str, _routes: &Arc<[String]>) {}

    #[cfg(feature = "cache")]
    fn clear_cache(&mut self) {
        self.cache.get_mut().clear();
    }

    #[cfg(not(feature = "cache"))]
    fn clear_cache(&mut self) {}

    /// Reverse-routing cache statistics
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats().clone()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// All registered routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.routes
            .iter()
            .map(|(route, handler)| (route.as_str(), handler))
    }

    /// The trie holding mixed static/parameter routes
    pub fn radix(&self) -> &RadixTrie {
        &self.radix
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

/// Replace the value of an existing key in place, or append
fn upsert(table: &mut Vec<(String, Handler)>, route: &str, handler: Handler) {
    match table.iter_mut().find(|(existing, _)| existing == route) {
        Some(slot) => slot.1 = handler,
        None => table.push((route.to_string(), handler)),
    }
}

/// Specialise a (route, handler pattern) pair for a concrete handler.
///
/// Each `:name` of the pattern takes the handler's text at the same offset,
/// up to the next `/`, and the route gets the same value. Returns the route
/// when the specialised pattern equals `handler`.
fn resolve_handler_pattern(route: &str, pattern: &str, handler: &str) -> Option<String> {
    let mut pattern = pattern.to_string();
    let mut route = route.to_string();
    let mut cursor = 0;

    while let Some(pos) = pattern[cursor..].find(PARAM_MARKER).map(|p| p + cursor) {
        let name = segment_at(&pattern, pos + 1).to_string();
        let value = segment_at(handler, pos);

        if name.is_empty() || value.is_empty() {
            break;
        }

        pattern.replace_range(pos..pos + 1 + name.len(), value);
        route = template::replace_param(&route, &name, value);
        cursor = pos + value.len();
    }

    (pattern == handler).then_some(route)
}

/// Score each route by how far its placeholders are covered by `params`,
/// then take the last of the best.
///
/// A placeholder found in `params` scores +1; the first one missing scores -1
/// and ends the scan for that route.
fn best_route<'a>(routes: &'a [String], params: &RouteParams) -> Option<&'a String> {
    let mut scores: Vec<(&String, i32)> = Vec::with_capacity(routes.len());

    for route in routes {
        let mut score = 0;
        for placeholder in template::placeholders(route) {
            if params.contains(placeholder.name) {
                score += 1;
            } else {
                score -= 1;
                break;
            }
        }

        match scores.iter_mut().find(|(existing, _)| *existing == route) {
            Some(slot) => slot.1 = score,
            None => scores.push((route, score)),
        }
    }

    scores.sort_by_key(|(_, score)| *score);
    scores.last().map(|(route, _)| *route)
}
