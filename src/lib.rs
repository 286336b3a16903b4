//! # Radix Router
//!
//! A URL path router built on a compressed trie, with support for:
//!
//! - **Static routes** - Exact-match lookups for paths without parameters
//! - **Parameter routes** - `:name` segments extracted while walking the trie
//! - **Fully dynamic routes** - `/:controller/:action` style catch-alls matched by segment count
//! - **Handler templates** - Handlers reusing `:name` tokens, filled from the matched path
//! - **Reverse routing** - Build the URL of a handler from a set of parameters
//! - **URI hooks** - Rewrite built URLs before the base URI and host are added
//!
//! # Quick Start
//!
//! ```
//! use radix_router::{Router, RouterConfig};
//!
//! let router = Router::with_routes(
//!     RouterConfig::new().base_uri("/app"),
//!     [
//!         ("/", "site/index"),
//!         ("/user/:id", "user/view"),
//!         ("/admin/:module/:action", ":module/admin/:action"),
//!     ],
//! );
//!
//! let matcher = router.resolve("/app/admin/shop/edit").unwrap();
//! assert!(matcher.found);
//! assert_eq!(matcher.handler_template(), Some("shop/admin/edit"));
//! assert_eq!(matcher.param("module"), Some("shop"));
//!
//! let params = [("id", "5")].into_iter().collect();
//! assert_eq!(router.get_url("user/view", &params, false), "/app/user/5");
//! ```
//!
//! # Errors
//!
//! An unmatched path is reported through [`Matcher::found`]. Only a route table
//! that cannot be searched unambiguously (sibling routes such as `/user/:id`
//! and `/user/:alias`) makes [`Router::resolve`] fail, with
//! [`RouterError::AmbiguousParam`].
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU memo table for reverse-routing lookups

#![doc(html_root_url = "https://docs.rs/radix_router/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Trie storage
pub mod node;
pub mod radix;

// Routing
pub mod handler;
pub mod hooks;
pub mod params;
pub mod router;
pub mod template;

// Error handling
pub mod error;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, HandlerRouteCache};
pub use error::{RouterError, RouterResult};
pub use handler::{Handler, HandlerFn};
pub use hooks::{hook_fn, BoxedUriHook, FnHook, UriHook};
pub use node::{Edge, Node};
pub use params::RouteParams;
pub use radix::RadixTrie;
pub use router::{Router, RouterConfig};

/// Result of resolving a path
///
/// # Example
///
/// ```
/// use radix_router::{Handler, Matcher, RouteParams};
///
/// let mut params = RouteParams::new();
/// params.insert("id", "123");
/// let matcher = Matcher::found(Handler::from("user/view"), params);
///
/// assert!(matcher.found);
/// assert_eq!(matcher.param("id"), Some("123"));
/// assert!(!Matcher::not_found().found);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    /// A route matched the path
    pub found: bool,
    /// Handler of the matched route, with `:name` tokens filled for templates
    pub handler: Option<Handler>,
    /// Path parameters in extraction order, followed by query parameters
    pub params: RouteParams,
}

impl Matcher {
    /// A successful match
    pub fn found(handler: Handler, params: RouteParams) -> Self {
        Self {
            found: true,
            handler: Some(handler),
            params,
        }
    }

    /// No route matched
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Get a parameter value
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The handler text, when it is a template
    pub fn handler_template(&self) -> Option<&str> {
        self.handler.as_ref()?.as_template()
    }
}
