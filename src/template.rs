//! `:name` placeholder handling
//!
//! A placeholder starts at `:` and runs to the next `/` or the end of the
//! string, so `/user/:id/posts` carries the single placeholder `id`. These
//! helpers are shared by the trie, the router and reverse routing.

use crate::params::RouteParams;
use std::collections::HashSet;

/// Marker opening a placeholder
pub const PARAM_MARKER: char = ':';

/// A placeholder found in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Byte offset of the `:` marker
    pub start: usize,
    /// Byte offset one past the last name byte
    pub end: usize,
    /// Name without the marker
    pub name: &'a str,
}

/// Iterate over the placeholders of a template, left to right
pub fn placeholders(template: &str) -> impl Iterator<Item = Placeholder<'_>> + '_ {
    let mut offset = 0;
    std::iter::from_fn(move || {
        let start = offset + template.get(offset..)?.find(PARAM_MARKER)?;
        let name = segment_at(template, start + 1);
        let end = start + 1 + name.len();
        offset = end;
        Some(Placeholder { start, end, name })
    })
}

/// Slice of `s` starting at `pos` and stopping before the next `/`.
///
/// Empty when `pos` is past the end or not on a char boundary.
pub fn segment_at(s: &str, pos: usize) -> &str {
    let rest = s.get(pos..).unwrap_or_default();
    match rest.find('/') {
        Some(slash) => &rest[..slash],
        None => rest,
    }
}

/// Check whether a route contains any placeholder
pub fn has_params(route: &str) -> bool {
    route.contains(PARAM_MARKER)
}

/// Check whether every `/`-separated segment of a route is a placeholder
///
/// Leading and trailing slashes are ignored, so `/:controller/:action/` counts.
pub fn is_fully_dynamic(route: &str) -> bool {
    route
        .trim_matches('/')
        .split('/')
        .all(|part| part.starts_with(PARAM_MARKER))
}

/// Textual replacement of every `:name` with its bound value, in binding order
pub fn replace_params(template: &str, params: &RouteParams) -> String {
    let mut result = template.to_string();
    for (name, value) in params.iter() {
        result = result.replace(&format!("{PARAM_MARKER}{name}"), value);
    }
    result
}

/// Replace the placeholders named `name` with `value`
///
/// Unlike [`replace_params`], `:id` does not touch `:idx`.
pub fn replace_param(template: &str, name: &str, value: &str) -> String {
    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for placeholder in placeholders(template).filter(|p| p.name == name) {
        result.push_str(&template[last..placeholder.start]);
        result.push_str(value);
        last = placeholder.end;
    }

    result.push_str(&template[last..]);
    result
}

/// Fill placeholders from `params`, leaving unknown ones in place.
///
/// Returns the built string and the names that were consumed.
pub fn fill(template: &str, params: &RouteParams) -> (String, Vec<String>) {
    let mut result = String::with_capacity(template.len());
    let mut consumed = Vec::new();
    let mut last = 0;

    for placeholder in placeholders(template) {
        if let Some(value) = params.get(placeholder.name) {
            result.push_str(&template[last..placeholder.start]);
            result.push_str(value);
            last = placeholder.end;
            if !consumed.iter().any(|name| name == placeholder.name) {
                consumed.push(placeholder.name.to_string());
            }
        }
    }

    result.push_str(&template[last..]);
    (result, consumed)
}

/// Validate a route path pattern
///
/// # Validation Rules
///
/// - No consecutive slashes (`//`)
/// - Parameter names must not be empty
/// - Parameter names contain only alphanumerics and underscores
/// - No duplicate parameter names
pub fn validate_route_path(path: &str) -> Result<(), String> {
    if path.contains("//") {
        return Err("route path cannot contain consecutive slashes".to_string());
    }

    let mut seen = HashSet::new();
    for placeholder in placeholders(path) {
        let name = placeholder.name;

        if name.is_empty() {
            return Err("route parameter name cannot be empty".to_string());
        }

        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(format!(
                "route parameter '{}' must contain only alphanumeric characters and underscores",
                name
            ));
        }

        if !seen.insert(name) {
            return Err(format!("duplicate route parameter: '{}'", name));
        }
    }

    Ok(())
}
