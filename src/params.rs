//! Route parameters and query strings
//!
//! [`RouteParams`] holds the values bound to `:name` placeholders (and merged
//! query-string values). It keeps insertion order: path parameters appear in
//! the order they were extracted, and reverse routing appends leftovers in
//! the order the caller supplied them.

use url::form_urlencoded;

/// Ordered name -> value map
///
/// # Example
///
/// ```
/// use radix_router::RouteParams;
///
/// // Route pattern: /users/:id
/// // Matched path: /users/123
/// let mut params = RouteParams::new();
/// params.insert("id", "123");
///
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
/// assert_eq!(params.get_as::<i32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: Vec<(String, String)>,
}

impl RouteParams {
    /// Create new empty route params
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value as a string
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Insert a parameter
    ///
    /// An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    /// Insert only if the key is not bound yet
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains(&key) {
            self.params.push((key, value.into()));
        }
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.params.iter().position(|(name, _)| name == key)?;
        Some(self.params.remove(pos).1)
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.iter().any(|(name, _)| name == key)
    }

    /// Iterate over all parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterate over parameter names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name.as_str())
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RouteParams::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for RouteParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

// ============================================================================
// Query strings
// ============================================================================

/// Parse an `application/x-www-form-urlencoded` query string
///
/// Keys are flat: a repeated key keeps its first position and its last value.
///
/// ```
/// use radix_router::params::parse_query;
///
/// let query = parse_query("page=1&sort=name&q=hello+world");
/// assert_eq!(query.get("page"), Some(&"1".to_string()));
/// assert_eq!(query.get("q"), Some(&"hello world".to_string()));
/// ```
pub fn parse_query(query: &str) -> RouteParams {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Encode parameters as a query string, in insertion order
pub fn build_query(params: &RouteParams) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id", "123");

        assert_eq!(params.get("id"), Some(&"123".to_string()));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
    }

    #[test]
    fn test_route_params_get_as() {
        let params: RouteParams = [("id", "123"), ("active", "true")].into_iter().collect();

        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<u32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut params: RouteParams = [("a", "1"), ("b", "2")].into_iter().collect();
        params.insert("a", "3");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_insert_if_absent() {
        let mut params: RouteParams = [("id", "5")].into_iter().collect();
        params.insert_if_absent("id", "99");
        params.insert_if_absent("page", "2");

        assert_eq!(params.get("id"), Some(&"5".to_string()));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["id", "page"]);
    }

    #[test]
    fn test_remove() {
        let mut params: RouteParams = [("x", "1"), ("y", "2")].into_iter().collect();
        assert_eq!(params.remove("x"), Some("1".to_string()));
        assert_eq!(params.remove("x"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_route_params_empty() {
        let params = RouteParams::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("page=1&sort=name&filter=active");

        assert_eq!(query.get("page"), Some(&"1".to_string()));
        assert_eq!(query.get("sort"), Some(&"name".to_string()));
        assert_eq!(query.get("filter"), Some(&"active".to_string()));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn test_parse_query_decoding() {
        let query = parse_query("q=hello%20world&name=a+b&flag");

        assert_eq!(query.get("q"), Some(&"hello world".to_string()));
        assert_eq!(query.get("name"), Some(&"a b".to_string()));
        assert_eq!(query.get("flag"), Some(&String::new()));
    }

    #[test]
    fn test_parse_query_repeated_key() {
        let query = parse_query("tag=rust&tag=trie");
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("tag"), Some(&"trie".to_string()));
    }

    #[test]
    fn test_empty_query_string() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_build_query() {
        let params: RouteParams = [("slug", "test"), ("q", "a b&c")].into_iter().collect();
        assert_eq!(build_query(&params), "slug=test&q=a+b%26c");
    }
}
