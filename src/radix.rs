//! Radix trie over route strings
//!
//! Routes are stored character-compressed: `/user/:id` and `/user/list`
//! share a single `/user/` edge. Placeholders are stored as plain text and
//! interpreted during [`RadixTrie::search`].
//!
//! Handlers are kept in a side registry keyed by the route string exactly as
//! inserted. A search rebuilds that key by concatenating the labels it walked
//! over, before any parameter substitution.

use crate::error::{RouterError, RouterResult};
use crate::handler::Handler;
use crate::node::{Edge, Node};
use crate::params::RouteParams;
use crate::template::{segment_at, PARAM_MARKER};
use crate::{error_log, trace_log, warn_log, Matcher};
use std::collections::btree_map::Entry;
use std::collections::HashMap;

/// Compressed trie with a handler registry
#[derive(Debug, Clone)]
pub struct RadixTrie {
    root: Node,
    handlers: HashMap<String, Handler>,
}

impl RadixTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self {
            root: Node::new(false),
            handlers: HashMap::new(),
        }
    }

    /// Register a route and its handler
    ///
    /// Inserting the same route twice only replaces the handler.
    pub fn insert(&mut self, route: &str, handler: Handler) {
        self.handlers.insert(route.to_string(), handler);

        if route.is_empty() {
            self.root.is_leaf = true;
            return;
        }

        let mut node = &mut self.root;
        let mut index = 0;

        while index < route.len() {
            let rest = &route[index..];
            let Some(transition) = rest.chars().next() else {
                break;
            };

            let edge = match node.edges.entry(transition) {
                // Nothing starts with this character yet: hang the whole rest here
                Entry::Vacant(slot) => {
                    slot.insert(Edge::new(rest));
                    break;
                }
                Entry::Occupied(slot) => slot.into_mut(),
            };

            let step = match first_mismatch(rest, &edge.label) {
                None if rest.len() == edge.label.len() => {
                    edge.target.is_leaf = true;
                    break;
                }
                None if rest.len() < edge.label.len() => {
                    // rest is a prefix of the label
                    edge.split(rest.len(), true);
                    break;
                }
                None => edge.label.len(),
                Some(split) => {
                    edge.split(split, false);
                    split
                }
            };

            node = &mut edge.target;
            index += step;
        }
    }

    /// Look a path up, extracting placeholder values on the way
    ///
    /// A path that reaches no leaf yields `found == false`. A path that hits
    /// several sibling placeholders with no way to tell them apart (e.g.
    /// `/user/:id` and `/user/:alias`) yields [`RouterError::AmbiguousParam`].
    pub fn search(&self, path: &str) -> RouterResult<Matcher> {
        let mut params = RouteParams::new();
        let mut current = &self.root;
        let mut index = 0;
        let mut search_path = String::new();

        while index < path.len() {
            let rest = &path[index..];
            let Some(transition) = rest.chars().next() else {
                break;
            };

            let Some(mut edge) = current.transition(transition) else {
                trace_log!("No edge for '{}' at offset {} of '{}'", transition, index, path);
                return Ok(Matcher::not_found());
            };

            search_path.push_str(&edge.label);
            let mut label = edge.label.clone();

            // A placeholder edge right after a literal one: `/user/` then `:id`
            if let Some(param_edge) = edge.target.transition(PARAM_MARKER) {
                edge = param_edge;
                label.push_str(&edge.label);
                search_path.push_str(&edge.label);
            }

            let mut cursor = 0;
            while let Some(pos) = label[cursor..].find(PARAM_MARKER).map(|p| p + cursor) {
                let value = segment_at(rest, pos).to_string();
                if value.is_empty() {
                    break;
                }

                if pos + 1 == label.len() {
                    let candidates: Vec<String> = edge
                        .target
                        .edges
                        .values()
                        .map(|next| format!("{}{}", label, next.label))
                        .collect();
                    error_log!("Ambiguous parameter for '{}': {:?}", path, candidates);
                    return Err(RouterError::AmbiguousParam { candidates });
                }

                let name = segment_at(&label, pos + 1).to_string();
                label.replace_range(pos..pos + 1 + name.len(), &value);
                cursor = pos + value.len();
                trace_log!("Bound '{}' = '{}'", name, value);
                params.insert(name, value);
            }

            if !rest.starts_with(&label) {
                trace_log!("Label '{}' does not match '{}'", label, rest);
                return Ok(Matcher::not_found());
            }

            index += label.len();
            current = &edge.target;
        }

        if !current.is_leaf {
            return Ok(Matcher::not_found());
        }

        match self.handlers.get(&search_path) {
            Some(handler) => {
                let handler = handler.clone().bind(&params);
                Ok(Matcher::found(handler, params))
            }
            None => {
                warn_log!("Leaf reached for '{}' but no handler under '{}'", path, search_path);
                Ok(Matcher::not_found())
            }
        }
    }

    /// Handler registered under an exact route string
    pub fn handler(&self, route: &str) -> Option<&Handler> {
        self.handlers.get(route)
    }

    /// Root of the trie
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no route was registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for RadixTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of the first differing character, skipping the first one.
///
/// `None` when one string is a prefix of the other.
fn first_mismatch(word: &str, edge_word: &str) -> Option<usize> {
    word.char_indices()
        .zip(edge_word.chars())
        .skip(1)
        .find(|((_, a), b)| a != b)
        .map(|((offset, _), _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(trie: &RadixTrie, path: &str) -> bool {
        trie.search(path).unwrap().found
    }

    #[test]
    fn test_first_mismatch() {
        assert_eq!(first_mismatch("test", "team"), Some(2));
        assert_eq!(first_mismatch("tea", "team"), None);
        assert_eq!(first_mismatch("team", "team"), None);
        assert_eq!(first_mismatch("héllo", "hallo"), Some(1));
        assert_eq!(first_mismatch("éa", "éb"), Some(2));
    }

    #[test]
    fn test_insert_search_shared_prefixes() {
        let mut trie = RadixTrie::new();
        let words = ["toast", "test", "tester", "team", "tea"];

        for word in words {
            trie.insert(word, Handler::from(word));
            assert!(found(&trie, word), "just inserted {word}");
        }

        for word in words {
            let matcher = trie.search(word).unwrap();
            assert!(matcher.found, "{word} lost after later inserts");
            assert_eq!(matcher.handler, Some(Handler::from(word)));
        }

        assert!(!found(&trie, "te"));
        assert!(!found(&trie, "toaster"));
        assert!(!found(&trie, "x"));
    }

    #[test]
    fn test_split_structure() {
        let mut trie = RadixTrie::new();
        trie.insert("test", Handler::from("a"));
        trie.insert("team", Handler::from("b"));

        let te = trie.root().transition('t').unwrap();
        assert_eq!(te.label, "te");
        assert!(!te.target.is_leaf);
        assert_eq!(te.target.transition('s').unwrap().label, "st");
        assert_eq!(te.target.transition('a').unwrap().label, "am");

        // Prefix of an existing label becomes a leaf in the middle
        trie.insert("tes", Handler::from("c"));
        let s = te_child(&trie, 's');
        assert_eq!(s.label, "s");
        assert!(s.target.is_leaf);
        assert_eq!(s.target.transition('t').unwrap().label, "t");
    }

    fn te_child(trie: &RadixTrie, c: char) -> &Edge {
        trie.root()
            .transition('t')
            .and_then(|te| te.target.transition(c))
            .unwrap()
    }

    #[test]
    fn test_insert_order_independence() {
        let paths = ["/about", "/blog", "/contact", "/shop/cart", "/shop"];
        let mut forward = RadixTrie::new();
        let mut backward = RadixTrie::new();

        for path in paths {
            forward.insert(path, Handler::from(path));
        }
        for path in paths.iter().rev() {
            backward.insert(path, Handler::from(*path));
        }

        for path in paths {
            assert_eq!(
                forward.search(path).unwrap().handler,
                backward.search(path).unwrap().handler
            );
            assert!(found(&forward, path));
        }
    }

    #[test]
    fn test_reinsert_is_idempotent() {
        let mut trie = RadixTrie::new();
        trie.insert("/blog/:slug", Handler::from("blog/:slug"));
        let before = trie.root().clone();

        trie.insert("/blog/:slug", Handler::from("post/:slug"));

        assert_eq!(trie.root(), &before);
        assert_eq!(trie.len(), 1);
        let matcher = trie.search("/blog/hello").unwrap();
        assert_eq!(matcher.handler, Some(Handler::from("post/hello")));
    }

    #[test]
    fn test_param_extraction() {
        let mut trie = RadixTrie::new();
        trie.insert("/user/:id", Handler::from("user/view/:id"));

        let matcher = trie.search("/user/42").unwrap();
        assert!(matcher.found);
        assert_eq!(matcher.param("id"), Some("42"));
        assert_eq!(matcher.handler, Some(Handler::from("user/view/42")));
    }

    #[test]
    fn test_param_edge_after_literal() {
        let mut trie = RadixTrie::new();
        trie.insert("/user/list", Handler::from("user/list"));
        trie.insert("/user/:id", Handler::from("user/view"));

        let matcher = trie.search("/user/7").unwrap();
        assert!(matcher.found);
        assert_eq!(matcher.param("id"), Some("7"));
        assert_eq!(matcher.handler, Some(Handler::from("user/view")));
    }

    #[test]
    fn test_several_params() {
        let mut trie = RadixTrie::new();
        trie.insert("/admin/:module/:action/edit", Handler::from(":module/admin/:action"));

        let matcher = trie.search("/admin/shop/products/edit").unwrap();
        assert!(matcher.found);
        assert_eq!(matcher.param("module"), Some("shop"));
        assert_eq!(matcher.param("action"), Some("products"));
        assert_eq!(matcher.handler, Some(Handler::from("shop/admin/products")));

        let keys: Vec<_> = matcher.params.keys().collect();
        assert_eq!(keys, vec!["module", "action"]);

        assert!(!found(&trie, "/admin/shop/products/delete"));
        assert!(!found(&trie, "/admin/shop"));
    }

    #[test]
    fn test_param_value_containing_marker() {
        let mut trie = RadixTrie::new();
        trie.insert("/tag/:name", Handler::from("tag"));

        let matcher = trie.search("/tag/:name").unwrap();
        assert!(matcher.found);
        assert_eq!(matcher.param("name"), Some(":name"));
    }

    #[test]
    fn test_missing_value_is_no_match() {
        let mut trie = RadixTrie::new();
        trie.insert("/user/:id", Handler::from("user"));

        assert!(!found(&trie, "/user/"));
        assert!(!found(&trie, "/user"));
    }

    #[test]
    fn test_ambiguous_siblings() {
        let mut trie = RadixTrie::new();
        trie.insert("/user/:id", Handler::from("by-id"));
        trie.insert("/user/:alias", Handler::from("by-alias"));

        let error = trie.search("/user/john").unwrap_err();
        assert!(error.is_ambiguous());
        assert_eq!(
            error.candidates(),
            &["/user/:alias".to_string(), "/user/:id".to_string()]
        );
    }

    #[test]
    fn test_ambiguous_siblings_behind_literal_edge() {
        let mut trie = RadixTrie::new();
        trie.insert("/user/list", Handler::from("list"));
        trie.insert("/user/:id", Handler::from("by-id"));
        trie.insert("/user/:alias", Handler::from("by-alias"));

        let error = trie.search("/user/john").unwrap_err();
        assert_eq!(
            error.candidates(),
            &["/user/:alias".to_string(), "/user/:id".to_string()]
        );
    }

    #[test]
    fn test_non_template_handler_untouched() {
        let mut trie = RadixTrie::new();
        trie.insert("/page/:n", Handler::value(7_i64));

        let matcher = trie.search("/page/3").unwrap();
        assert!(matcher.found);
        assert_eq!(
            matcher.handler.as_ref().and_then(|h| h.downcast_ref::<i64>()),
            Some(&7)
        );
    }

    #[test]
    fn test_empty_route() {
        let mut trie = RadixTrie::new();
        assert!(!found(&trie, ""));
        trie.insert("", Handler::from("root"));
        assert!(found(&trie, ""));
    }
}
