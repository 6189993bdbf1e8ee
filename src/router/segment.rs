//! Path segment variants.
//!
//! A route pattern such as `/users/<id>/posts/<page?>` is split on `/` and every
//! token becomes one [`Segment`]. Each segment knows how to match a single
//! component of an incoming request path and, for parameters, how to bind the
//! component's value.
//!
//! | Token      | Segment                    | Matches                                   |
//! |------------|----------------------------|-------------------------------------------|
//! | `""`       | `Exact("/")`               | the empty component (the root path)       |
//! | `users`    | `Exact("users")`           | exactly `users`                           |
//! | `<id>`     | `Param { name: "id" }`     | any non-empty component, bound to `id`    |
//! | `<page?>`  | `Optional { name: "page" }`| like `Param`, but the component may be absent |

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::core::{bind_param, ParamVec};

/// Value of the `Exact` segment produced for the empty token.
pub(crate) const ROOT_COMPONENT: &str = "/";

/// One `/`-delimited unit of a route pattern.
///
/// Segments are immutable once built except for the validation pattern of
/// `Param` and `Optional`, which the
/// [`ConstraintRegistry`](super::ConstraintRegistry) attaches after
/// registration.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Sentinel held by the root node of every method tree. Never compared
    /// against a request component.
    Root,
    /// Literal component.
    Exact(Arc<str>),
    /// Required named parameter.
    Param {
        /// Name the matched component is bound to
        name: Arc<str>,
        /// Anchored validation pattern, if constrained
        pattern: Option<Regex>,
    },
    /// Named parameter whose presence in the path is optional.
    Optional {
        /// Name the matched component is bound to
        name: Arc<str>,
        /// Anchored validation pattern, if constrained
        pattern: Option<Regex>,
    },
}

impl Segment {
    /// Classify a single pattern token.
    ///
    /// Never fails: any string is representable as some segment.
    ///
    /// ```
    /// use trierouter::router::Segment;
    ///
    /// assert_eq!(Segment::from_token(""), Segment::exact("/"));
    /// assert_eq!(Segment::from_token("<id>"), Segment::param("id"));
    /// assert_eq!(Segment::from_token("<page?>"), Segment::optional("page"));
    /// assert_eq!(Segment::from_token("users"), Segment::exact("users"));
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.is_empty() {
            return Segment::exact(ROOT_COMPONENT);
        }

        if let Some(name) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return match name.strip_suffix('?') {
                Some(name) => Segment::optional(name),
                None => Segment::param(name),
            };
        }

        Segment::exact(token)
    }

    /// Literal segment
    #[must_use]
    pub fn exact(value: &str) -> Self {
        Segment::Exact(Arc::from(value))
    }

    /// Unconstrained required parameter
    #[must_use]
    pub fn param(name: &str) -> Self {
        Segment::Param {
            name: Arc::from(name),
            pattern: None,
        }
    }

    /// Unconstrained optional parameter
    #[must_use]
    pub fn optional(name: &str) -> Self {
        Segment::Optional {
            name: Arc::from(name),
            pattern: None,
        }
    }

    /// Parameter name for `Param` and `Optional`, `None` otherwise.
    #[must_use]
    pub fn param_name(&self) -> Option<&Arc<str>> {
        match self {
            Segment::Param { name, .. } | Segment::Optional { name, .. } => Some(name),
            Segment::Root | Segment::Exact(_) => None,
        }
    }

    /// Whether this is an `Optional` parameter
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Segment::Optional { .. })
    }

    /// Attached validation pattern, if any.
    #[must_use]
    pub fn pattern(&self) -> Option<&Regex> {
        match self {
            Segment::Param { pattern, .. } | Segment::Optional { pattern, .. } => pattern.as_ref(),
            Segment::Root | Segment::Exact(_) => None,
        }
    }

    /// Replace the validation pattern. Returns `false` for segments that
    /// cannot carry one.
    pub(crate) fn set_pattern(&mut self, regex: Regex) -> bool {
        match self {
            Segment::Param { pattern, .. } | Segment::Optional { pattern, .. } => {
                *pattern = Some(regex);
                true
            }
            Segment::Root | Segment::Exact(_) => false,
        }
    }

    /// Test one request path component against this segment.
    ///
    /// For `Param` and `Optional` a successful match also writes the component
    /// into `params` under the segment's name. A failed match writes nothing.
    ///
    /// # Panics
    ///
    /// Panics when called on [`Segment::Root`]. The root sentinel is never a
    /// child node, so reaching it means the tree was built by hand incorrectly.
    #[allow(clippy::panic)]
    pub fn matches(&self, component: &str, params: &mut ParamVec) -> bool {
        match self {
            Segment::Root => panic!("root segment cannot be matched against a path component"),
            Segment::Exact(value) if value.as_ref() == ROOT_COMPONENT => {
                component.is_empty() || component == ROOT_COMPONENT
            }
            Segment::Exact(value) => value.as_ref() == component,
            Segment::Param { name, pattern } | Segment::Optional { name, pattern } => {
                if component.is_empty() {
                    return false;
                }
                if let Some(regex) = pattern {
                    if !regex.is_match(component) {
                        return false;
                    }
                }
                bind_param(params, name, component);
                true
            }
        }
    }
}

/// Deduplication equality used while inserting into the trie.
///
/// Literals compare by value, parameters by name within the same variant.
/// Validation patterns are ignored.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Segment::Root, Segment::Root) => true,
            (Segment::Exact(a), Segment::Exact(b)) => a == b,
            (Segment::Param { name: a, .. }, Segment::Param { name: b, .. }) => a == b,
            (Segment::Optional { name: a, .. }, Segment::Optional { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Segment {}

/// Renders the segment back into pattern syntax.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Root => Ok(()),
            Segment::Exact(value) => f.write_str(value),
            Segment::Param { name, .. } => write!(f, "<{name}>"),
            Segment::Optional { name, .. } => write!(f, "<{name}?>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_variants() {
        assert_eq!(Segment::from_token(""), Segment::exact("/"));
        assert_eq!(Segment::from_token("user"), Segment::exact("user"));
        assert_eq!(Segment::from_token("<id>"), Segment::param("id"));
        assert_eq!(Segment::from_token("<name?>"), Segment::optional("name"));
    }

    #[test]
    fn test_from_token_unbalanced_brackets_are_literal() {
        assert_eq!(Segment::from_token("<id"), Segment::exact("<id"));
        assert_eq!(Segment::from_token("id>"), Segment::exact("id>"));
        assert_eq!(Segment::from_token("<"), Segment::exact("<"));
    }

    #[test]
    fn test_equality_rules() {
        assert_eq!(Segment::exact("a"), Segment::exact("a"));
        assert_ne!(Segment::exact("a"), Segment::exact("b"));
        assert_eq!(Segment::param("id"), Segment::param("id"));
        assert_ne!(Segment::param("id"), Segment::param("slug"));
        // Same name, different variant
        assert_ne!(Segment::param("id"), Segment::optional("id"));
        // A literal spelled like a param name is still a literal
        assert_ne!(Segment::exact("id"), Segment::param("id"));
        assert_ne!(Segment::Root, Segment::exact("/"));
    }

    #[test]
    fn test_equality_ignores_pattern() {
        let mut constrained = Segment::param("id");
        assert!(constrained.set_pattern(Regex::new(r"^(?:\d+)$").unwrap()));
        assert_eq!(constrained, Segment::param("id"));
    }

    #[test]
    fn test_exact_root_matches_empty_component() {
        let mut params = ParamVec::new();
        let root = Segment::exact("/");
        assert!(root.matches("", &mut params));
        assert!(root.matches("/", &mut params));
        assert!(!root.matches("a", &mut params));
        assert!(params.is_empty());
    }

    #[test]
    fn test_param_binds_on_match() {
        let mut params = ParamVec::new();
        assert!(Segment::param("id").matches("42", &mut params));
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].0.as_ref(), "id");
        assert_eq!(params[0].1, "42");
    }

    #[test]
    fn test_param_rejects_empty_component() {
        let mut params = ParamVec::new();
        assert!(!Segment::param("id").matches("", &mut params));
        assert!(!Segment::optional("id").matches("", &mut params));
        assert!(params.is_empty());
    }

    #[test]
    fn test_failed_validation_writes_nothing() {
        let mut params = ParamVec::new();
        let mut seg = Segment::optional("page");
        seg.set_pattern(Regex::new(r"^(?:\d+)$").unwrap());
        assert!(!seg.matches("abc", &mut params));
        assert!(params.is_empty());
        assert!(seg.matches("7", &mut params));
        assert_eq!(params[0].1, "7");
    }

    #[test]
    fn test_exact_cannot_take_pattern() {
        let mut seg = Segment::exact("a");
        assert!(!seg.set_pattern(Regex::new("a").unwrap()));
        assert!(seg.pattern().is_none());
    }

    #[test]
    #[should_panic(expected = "root segment")]
    fn test_root_match_is_fatal() {
        let mut params = ParamVec::new();
        Segment::Root.matches("anything", &mut params);
    }

    #[test]
    fn test_display_round_trips_tokens() {
        for token in ["users", "<id>", "<page?>"] {
            assert_eq!(Segment::from_token(token).to_string(), token);
        }
    }
}
