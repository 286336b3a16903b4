//! Error handling for the router
//!
//! A request path that matches nothing is not an error: it comes back as a
//! [`Matcher`](crate::Matcher) with `found == false`. The errors here signal
//! defects in the route table itself.

use thiserror::Error;

/// Result alias used throughout the crate
pub type RouterResult<T> = Result<T, RouterError>;

/// Errors raised by route registration and resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Several sibling parameter edges could bind the same path segment.
    ///
    /// Raised for tables such as `/user/:id` + `/user/:alias`. Each candidate
    /// is the full route label that could have matched.
    #[error("Cannot determine param for the route parts: {}", .candidates.join(", "))]
    AmbiguousParam { candidates: Vec<String> },

    /// Route path rejected by [`Router::try_add_route`](crate::Router::try_add_route)
    #[error("Invalid route '{route}': {reason}")]
    InvalidRoute { route: String, reason: String },
}

impl RouterError {
    /// Check if this is an ambiguity error
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, RouterError::AmbiguousParam { .. })
    }

    /// Candidate labels of an ambiguity error, empty for other variants
    pub fn candidates(&self) -> &[String] {
        match self {
            RouterError::AmbiguousParam { candidates } => candidates,
            RouterError::InvalidRoute { .. } => &[],
        }
    }
}
