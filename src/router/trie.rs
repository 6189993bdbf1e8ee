//! Segment trie used for route matching
//!
//! Routes that share leading path components share nodes. Registering
//!
//! ```text
//! /user/create
//! /user/edit
//! ```
//!
//! produces
//!
//! ```text
//! (root) ── "/" ── user ─┬─ create
//!                        └─ edit
//! ```
//!
//! so `user` is allocated and matched once for both routes.
//!
//! ## Matching policy
//!
//! Children are kept in first-insertion order. Lookup commits to the first
//! child whose segment matches the component and never revisits its siblings,
//! even if that child's subtree fails further down. Registration order is
//! therefore the only priority mechanism.

use std::sync::Arc;

use super::core::ParamVec;
use super::segment::{Segment, ROOT_COMPONENT};

/// Parameter occurrences recorded during one insertion: the parameter name and
/// the child-index path from the tree root to the node holding it. The path is
/// `None` when an equal node already existed; that node belongs to an earlier
/// route and is left alone.
pub(crate) type ParamSites = Vec<(Arc<str>, Option<Vec<usize>>)>;

/// Node in the segment trie.
///
/// A node exclusively owns its children. `handler` is set iff some registered
/// route ends exactly at this node.
#[derive(Debug)]
pub struct TrieNode<H> {
    segment: Segment,
    children: Vec<TrieNode<H>>,
    handler: Option<Arc<H>>,
}

impl<H> TrieNode<H> {
    /// Create the root node of a method tree
    pub(crate) fn root() -> Self {
        Self::new(Segment::Root)
    }

    fn new(segment: Segment) -> Self {
        Self {
            segment,
            children: Vec::new(),
            handler: None,
        }
    }

    /// Segment this node matches
    #[must_use]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Children in first-insertion order
    #[must_use]
    pub fn children(&self) -> &[TrieNode<H>] {
        &self.children
    }

    /// Handler of the route ending at this node, if any
    #[must_use]
    pub fn handler(&self) -> Option<&Arc<H>> {
        self.handler.as_ref()
    }

    /// Insert the remaining segments of a route below this node.
    ///
    /// * An exhausted segment list stores `handler` here, replacing any
    ///   previous one.
    /// * An `Optional` segment is inserted twice: once skipped (the remaining
    ///   segments continue from this node) and once as a regular child.
    /// * Equal segments are deduplicated against existing children.
    ///
    /// `trail` is the child-index path from the tree root to `self`. Every
    /// parameter of the route is reported through `sites`, with a position
    /// only if this insertion created its node.
    pub(crate) fn insert(
        &mut self,
        segments: &[Segment],
        handler: &Arc<H>,
        trail: &mut Vec<usize>,
        sites: &mut ParamSites,
    ) {
        let Some((segment, remaining)) = segments.split_first() else {
            self.handler = Some(Arc::clone(handler));
            return;
        };

        if segment.is_optional() {
            self.insert(remaining, handler, trail, sites);
        }

        let (index, created) = match self.children.iter().position(|c| c.segment == *segment) {
            Some(index) => (index, false),
            None => {
                self.children.push(TrieNode::new(segment.clone()));
                (self.children.len() - 1, true)
            }
        };

        trail.push(index);
        if let Some(name) = segment.param_name() {
            sites.push((Arc::clone(name), created.then(|| trail.clone())));
        }
        self.children[index].insert(remaining, handler, trail, sites);
        trail.pop();
    }

    /// Resolve the remaining request path components below this node.
    ///
    /// Parameters bound along the way are written into `params`. Returns the
    /// handler of the node reached when the components run out, or `None` if
    /// no child matches a component or the final node has no handler.
    pub(crate) fn resolve(&self, components: &[&str], params: &mut ParamVec) -> Option<&Arc<H>> {
        let Some((component, remaining)) = components.split_first() else {
            return self.handler.as_ref();
        };

        // First match wins, no backtracking into later siblings
        let child = self
            .children
            .iter()
            .find(|child| child.segment.matches(component, params))?;

        child.resolve(remaining, params)
    }

    /// Follow a child-index path from this node
    pub(crate) fn node_mut(&mut self, path: &[usize]) -> Option<&mut TrieNode<H>> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    pub(crate) fn segment_mut(&mut self) -> &mut Segment {
        &mut self.segment
    }

    /// Collect the pattern of every node holding a handler, depth-first in
    /// child order.
    pub(crate) fn collect_patterns(&self, tokens: &mut Vec<String>, out: &mut Vec<String>) {
        for child in &self.children {
            tokens.push(render_token(&child.segment));
            if child.handler.is_some() {
                out.push(render_pattern(tokens));
            }
            child.collect_patterns(tokens, out);
            tokens.pop();
        }
    }

    /// Number of nodes in this subtree, including `self`
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TrieNode::node_count).sum::<usize>()
    }
}

fn render_token(segment: &Segment) -> String {
    match segment {
        Segment::Exact(value) if value.as_ref() == ROOT_COMPONENT => String::new(),
        other => other.to_string(),
    }
}

fn render_pattern(tokens: &[String]) -> String {
    let pattern = tokens.join("/");
    if pattern.is_empty() {
        ROOT_COMPONENT.to_string()
    } else {
        pattern
    }
}
