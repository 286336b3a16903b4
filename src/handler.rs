//! Route handler values
//!
//! A handler is whatever the caller wants back when a route matches. Only the
//! [`Handler::Template`] variant takes part in placeholder substitution and
//! reverse routing; the other variants are returned untouched.

use crate::params::RouteParams;
use crate::template;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Callable handler signature
pub type HandlerFn = Arc<dyn Fn(&RouteParams) -> String + Send + Sync>;

/// Value attached to a registered route
#[derive(Clone)]
pub enum Handler {
    /// String template, may reuse `:name` tokens from the route
    /// (e.g. `/user/:id` => `user/view/:id`)
    Template(String),
    /// Function invoked by the caller with the extracted parameters
    Callable(HandlerFn),
    /// Any other value, returned verbatim
    Value(Arc<dyn Any + Send + Sync>),
}

impl Handler {
    /// Create a template handler
    pub fn template(template: impl Into<String>) -> Self {
        Handler::Template(template.into())
    }

    /// Create a callable handler
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&RouteParams) -> String + Send + Sync + 'static,
    {
        Handler::Callable(Arc::new(f))
    }

    /// Wrap an opaque value
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Handler::Value(Arc::new(value))
    }

    /// The template string, if this is a template handler
    pub fn as_template(&self) -> Option<&str> {
        match self {
            Handler::Template(template) => Some(template),
            _ => None,
        }
    }

    /// Downcast an opaque value
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Handler::Value(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Call a callable handler. Templates render to themselves.
    pub fn invoke(&self, params: &RouteParams) -> Option<String> {
        match self {
            Handler::Template(template) => Some(template.clone()),
            Handler::Callable(f) => Some(f(params)),
            Handler::Value(_) => None,
        }
    }

    /// Replace `:name` tokens of a template handler with bound values.
    ///
    /// Non-template handlers come back unchanged.
    pub(crate) fn bind(self, params: &RouteParams) -> Self {
        match self {
            Handler::Template(template) if !params.is_empty() => {
                Handler::Template(template::replace_params(&template, params))
            }
            other => other,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Handler::Callable(_) => f.write_str("Callable(..)"),
            Handler::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Templates compare by text, other variants by identity
impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Handler::Template(a), Handler::Template(b)) => a == b,
            (Handler::Callable(a), Handler::Callable(b)) => Arc::ptr_eq(a, b),
            (Handler::Value(a), Handler::Value(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Handler {
    fn from(template: &str) -> Self {
        Handler::Template(template.to_string())
    }
}

impl From<String> for Handler {
    fn from(template: String) -> Self {
        Handler::Template(template)
    }
}

impl PartialEq<str> for Handler {
    fn eq(&self, other: &str) -> bool {
        self.as_template() == Some(other)
    }
}

impl PartialEq<&str> for Handler {
    fn eq(&self, other: &&str) -> bool {
        self.as_template() == Some(*other)
    }
}
