//! URI build hooks
//!
//! Hooks run once per [`Router::get_url`](crate::Router::get_url) call, after
//! placeholders are filled and leftover parameters appended, but before the
//! base URI and host are prefixed. They may rewrite the URI in place, e.g.
//! to add tracking parameters.
//!
//! # Example
//!
//! ```
//! use radix_router::{hook_fn, Router, RouterConfig};
//!
//! let mut router = Router::new(RouterConfig::default());
//! router.add_route("/blog/:slug", "blog/view");
//! router.add_hook(hook_fn("utm", |uri: &mut String| uri.push_str("?utm_source=feed")));
//!
//! let params = [("slug", "hello")].into_iter().collect();
//! assert_eq!(router.get_url("blog/view", &params, false), "/blog/hello?utm_source=feed");
//! ```

/// Hook invoked with every URI built by reverse routing
pub trait UriHook: Send + Sync + 'static {
    /// Called with the built URI, before base URI and host are prefixed
    fn after_build_uri(&self, uri: &mut String);

    /// Hook name for debugging
    fn name(&self) -> &str {
        "UriHook"
    }

    /// Hook priority (higher runs first)
    ///
    /// Hooks with equal priority run in registration order.
    fn priority(&self) -> i32 {
        0
    }
}

/// Helper to create a hook from a function
pub fn hook_fn<F>(name: impl Into<String>, f: F) -> FnHook<F>
where
    F: Fn(&mut String) + Send + Sync + 'static,
{
    FnHook {
        name: name.into(),
        priority: 0,
        f,
    }
}

/// Hook created from a function
pub struct FnHook<F> {
    name: String,
    priority: i32,
    f: F,
}

impl<F> FnHook<F> {
    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl<F> UriHook for FnHook<F>
where
    F: Fn(&mut String) + Send + Sync + 'static,
{
    fn after_build_uri(&self, uri: &mut String) {
        (self.f)(uri);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// Type-erased hook for dynamic dispatch
pub type BoxedUriHook = Box<dyn UriHook>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingHook {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl UriHook for RecordingHook {
        fn after_build_uri(&self, uri: &mut String) {
            self.calls.lock().unwrap().push(uri.clone());
            uri.push_str("#seen");
        }
    }

    #[test]
    fn test_hook_mutates_uri() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let hook = RecordingHook {
            calls: calls.clone(),
        };

        let mut uri = "/user/5".to_string();
        hook.after_build_uri(&mut uri);

        assert_eq!(uri, "/user/5#seen");
        assert_eq!(calls.lock().unwrap().as_slice(), ["/user/5".to_string()]);
    }

    #[test]
    fn test_hook_defaults() {
        let hook = RecordingHook {
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        assert_eq!(hook.name(), "UriHook");
        assert_eq!(hook.priority(), 0);
    }

    #[test]
    fn test_hook_fn() {
        let hook = hook_fn("upper", |uri: &mut String| *uri = uri.to_uppercase()).with_priority(5);

        let mut uri = "/a/b".to_string();
        hook.after_build_uri(&mut uri);

        assert_eq!(uri, "/A/B");
        assert_eq!(hook.name(), "upper");
        assert_eq!(hook.priority(), 5);
    }
}
