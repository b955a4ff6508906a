//! DOM queries: by id, class, kind name; generic predicate matching.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::element::kind::ElementKind;

impl Dom<'_> {
    /// Find the first node, in tree order, whose `id` attribute matches.
    ///
    /// Ids are only unique per container, so a deeper duplicate is shadowed.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk_depth_first(self.root())
            .into_iter()
            .find(|node| self.get(*node).and_then(NodeData::id) == Some(id))
    }

    /// Find all nodes that have the given class token.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all nodes whose kind name (see [`ElementKind::name`]) matches.
    pub fn query_by_kind(&self, name: &str) -> Vec<NodeId> {
        self.query_all(|data| data.kind.name() == name)
    }

    /// Find all nodes matching an arbitrary predicate, in tree order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_depth_first(self.root())
            .into_iter()
            .filter(|node| self.get(*node).is_some_and(&predicate))
            .collect()
    }

    /// The nearest enclosing form of `id`, if any.
    pub fn enclosing_form(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .into_iter()
            .find(|node| matches!(self.get(*node).map(|d| &d.kind), Some(ElementKind::Form)))
    }
}
