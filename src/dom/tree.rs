//! Tree operations: attach, keyed registration, walk.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};
use crate::config::RenderConfig;
use crate::element::kind::ElementKind;
use crate::error::{MarkupError, Result, Warning};
use crate::scope::Scope;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[Child] = &[];

/// A child slot of a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(NodeId),
    /// Text, escaped when rendered.
    Text(String),
    /// A markup fragment emitted verbatim.
    Raw(String),
}

/// Anything that can be added to a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Node(NodeData),
    Text(String),
    Raw(String),
}

impl From<NodeData> for Content {
    fn from(node: NodeData) -> Self {
        Content::Node(node)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

/// Keys of a container's direct children, in registration order.
#[derive(Debug, Clone, Default)]
struct KeyRegistry {
    keys: Vec<(String, NodeId)>,
    /// Suffix counter for duplicate input names; only ever grows.
    counter: usize,
}

impl KeyRegistry {
    fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|(k, _)| k == key)
    }

    fn get(&self, key: &str) -> Option<NodeId> {
        self.keys.iter().find(|(k, _)| k == key).map(|(_, id)| *id)
    }

    /// Pick the key for an input named `name`: the name itself if free,
    /// otherwise `name` plus the next unused counter value.
    fn input_key(&mut self, name: &str) -> String {
        if !self.contains(name) {
            return name.to_owned();
        }
        loop {
            self.counter += 1;
            let candidate = format!("{name}{}", self.counter);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// The markup tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps, so there is no ownership cycle between a node and its
/// container. The tree borrows an optional [`Scope`] for the duration of one
/// build-and-render pass.
pub struct Dom<'s> {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<Child>>,
    keys: SecondaryMap<NodeId, KeyRegistry>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: NodeId,
    scope: Option<&'s dyn Scope>,
    config: RenderConfig,
    warnings: Vec<Warning>,
}

impl Dom<'static> {
    /// Create a tree with an empty body and no scope.
    pub fn new() -> Self {
        Self::build(None, RenderConfig::default())
    }
}

impl Default for Dom<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> Dom<'s> {
    /// Create a tree whose unbound inputs read from `scope`.
    pub fn with_scope(scope: &'s dyn Scope) -> Self {
        Self::build(Some(scope), RenderConfig::default())
    }

    fn build(scope: Option<&'s dyn Scope>, config: RenderConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new(ElementKind::Body));
        let mut children = SecondaryMap::new();
        children.insert(root, Vec::new());
        let mut keys = SecondaryMap::new();
        keys.insert(root, KeyRegistry::default());
        Self {
            nodes,
            children,
            keys,
            parent: SecondaryMap::new(),
            root,
            scope,
            config,
            warnings: Vec::new(),
        }
    }

    /// Replace the configuration (builder).
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn scope(&self) -> Option<&'s dyn Scope> {
        self.scope
    }

    /// The body node every tree starts with.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add content to the container `parent`.
    ///
    /// - A node is attached: its indent becomes the parent's + 1. Inputs are
    ///   resolved immediately and registered under their name (or name plus
    ///   a counter when taken); other nodes with an id are registered under
    ///   it, failing with [`MarkupError::DuplicateId`] on collision.
    ///   Returns the new node.
    /// - Text and raw fragments are appended and the *parent* is returned.
    pub fn add(&mut self, parent: NodeId, content: impl Into<Content>) -> Result<NodeId> {
        match content.into() {
            Content::Node(node) => self.attach(parent, node),
            Content::Text(text) => self.push_literal(parent, Child::Text(text)),
            Content::Raw(raw) => self.push_literal(parent, Child::Raw(raw)),
        }
    }

    /// Append escaped text. Returns `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId> {
        self.push_literal(parent, Child::Text(text.into()))
    }

    /// Append a verbatim markup fragment. Returns `parent`.
    pub fn add_raw(&mut self, parent: NodeId, markup: impl Into<String>) -> Result<NodeId> {
        self.push_literal(parent, Child::Raw(markup.into()))
    }

    fn container(&self, id: NodeId) -> Result<&NodeData> {
        let data = self.nodes.get(id).ok_or(MarkupError::UnknownNode)?;
        if !data.kind.is_container() {
            return Err(MarkupError::NotAContainer {
                kind: data.kind.name(),
            });
        }
        Ok(data)
    }

    fn push_literal(&mut self, parent: NodeId, child: Child) -> Result<NodeId> {
        self.container(parent)?;
        self.children
            .get_mut(parent)
            .ok_or(MarkupError::UnknownNode)?
            .push(child);
        Ok(parent)
    }

    fn attach(&mut self, parent: NodeId, mut node: NodeData) -> Result<NodeId> {
        node.indent = self.container(parent)?.indent + 1;
        let scope = self.scope;
        let registry = self.keys.get_mut(parent).ok_or(MarkupError::UnknownNode)?;

        let key = if let Some(input) = node.kind.as_input_mut() {
            input.resolve(scope);
            let key = registry.input_key(&input.name);
            if key != input.name {
                tracing::debug!(name = %input.name, key = %key, "input name taken, registered under suffixed key");
            }
            Some(key)
        } else if let Some(id) = node.id() {
            if registry.contains(id) {
                return Err(MarkupError::DuplicateId { id: id.to_owned() });
            }
            Some(id.to_owned())
        } else {
            None
        };

        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        self.keys.insert(id, KeyRegistry::default());
        self.parent.insert(id, parent);
        if let Some(children) = self.children.get_mut(parent) {
            children.push(Child::Node(id));
        }
        if let (Some(key), Some(registry)) = (key, self.keys.get_mut(parent)) {
            registry.keys.push((key, id));
        }
        Ok(id)
    }

    /// Record a non-fatal problem and log it.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Warnings recorded so far, oldest first.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[Child] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Node children only, skipping text.
    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .filter_map(|child| match child {
                Child::Node(node) => Some(*node),
                _ => None,
            })
            .collect()
    }

    /// Look up a direct child by its registered key.
    pub fn child_by_key(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        self.keys.get(parent).and_then(|registry| registry.get(key))
    }

    /// Registered keys of a container's direct children, in attach order.
    pub fn child_keys(&self, parent: NodeId) -> Vec<&str> {
        self.keys
            .get(parent)
            .map(|registry| registry.keys.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default()
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Mutable access for chained configuration, failing on a stale id.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(MarkupError::UnknownNode)
    }

    /// Number of nodes in the tree, including the body.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the body has no children.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal of nodes starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for child in self.child_nodes(current).into_iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::input::{Binding, Control, Input};
    use crate::scope::RequestScope;
    use serde_json::json;

    fn text_input(name: &str, binding: Binding) -> NodeData {
        NodeData::new(ElementKind::Input(Input::new(
            name,
            binding,
            Control::Text { label: None },
        )))
    }

    #[test]
    fn new_has_body_root() {
        let dom = Dom::new();
        assert_eq!(dom.get(dom.root()).unwrap().kind, ElementKind::Body);
        assert_eq!(dom.len(), 1);
        assert!(dom.is_empty());
    }

    #[test]
    fn indent_is_parent_plus_one() {
        let mut dom = Dom::new();
        let a = dom.add(dom.root(), NodeData::new(ElementKind::Div)).unwrap();
        let b = dom.add(a, NodeData::new(ElementKind::Div)).unwrap();
        assert_eq!(dom.get(a).unwrap().indent, 1);
        assert_eq!(dom.get(b).unwrap().indent, 2);
        assert_eq!(dom.parent(b), Some(a));
        assert_eq!(dom.ancestors(b), vec![a, dom.root()]);
    }

    #[test]
    fn duplicate_id_under_same_parent_fails() {
        let mut dom = Dom::new();
        let root = dom.root();
        dom.add(root, NodeData::new(ElementKind::Div).with_id("main")).unwrap();
        let err = dom
            .add(root, NodeData::new(ElementKind::Div).with_id("main"))
            .unwrap_err();
        assert!(matches!(err, MarkupError::DuplicateId { id } if id == "main"));
    }

    #[test]
    fn same_id_under_different_parents_is_allowed() {
        let mut dom = Dom::new();
        let root = dom.root();
        let a = dom.add(root, NodeData::new(ElementKind::Div)).unwrap();
        let b = dom.add(root, NodeData::new(ElementKind::Div)).unwrap();
        assert!(dom.add(a, NodeData::new(ElementKind::Div).with_id("x")).is_ok());
        assert!(dom.add(b, NodeData::new(ElementKind::Div).with_id("x")).is_ok());
    }

    #[test]
    fn duplicate_input_names_get_counter_suffix() {
        let mut dom = Dom::new();
        let root = dom.root();
        for _ in 0..3 {
            dom.add(root, text_input("x", Binding::Unbound)).unwrap();
        }
        assert_eq!(dom.child_keys(root), vec!["x", "x1", "x2"]);
    }

    #[test]
    fn counter_is_per_parent_and_never_reused() {
        let mut dom = Dom::new();
        let root = dom.root();
        dom.add(root, text_input("a", Binding::Unbound)).unwrap();
        dom.add(root, text_input("a", Binding::Unbound)).unwrap();
        dom.add(root, text_input("b", Binding::Unbound)).unwrap();
        dom.add(root, text_input("b", Binding::Unbound)).unwrap();
        assert_eq!(dom.child_keys(root), vec!["a", "a1", "b", "b2"]);

        let div = dom.add(root, NodeData::new(ElementKind::Div)).unwrap();
        dom.add(div, text_input("a", Binding::Unbound)).unwrap();
        dom.add(div, text_input("a", Binding::Unbound)).unwrap();
        assert_eq!(dom.child_keys(div), vec!["a", "a1"]);
    }

    #[test]
    fn suffixed_key_skips_taken_names() {
        let mut dom = Dom::new();
        let root = dom.root();
        dom.add(root, NodeData::new(ElementKind::Div).with_id("x1")).unwrap();
        dom.add(root, text_input("x", Binding::Unbound)).unwrap();
        dom.add(root, text_input("x", Binding::Unbound)).unwrap();
        assert_eq!(dom.child_keys(root), vec!["x1", "x", "x2"]);
    }

    #[test]
    fn container_id_colliding_with_input_key_fails() {
        let mut dom = Dom::new();
        let root = dom.root();
        dom.add(root, text_input("name", Binding::Unbound)).unwrap();
        let err = dom
            .add(root, NodeData::new(ElementKind::Div).with_id("name"))
            .unwrap_err();
        assert!(matches!(err, MarkupError::DuplicateId { .. }));
    }

    #[test]
    fn inputs_resolve_at_attach() {
        let scope = RequestScope::new().with("x", 7);
        let mut dom = Dom::with_scope(&scope);
        let root = dom.root();
        let id = dom.add(root, text_input("x", Binding::Unbound)).unwrap();
        let input = dom.get(id).unwrap().kind.as_input().unwrap();
        assert_eq!(input.value(), Some(&json!(7)));
    }

    #[test]
    fn text_returns_the_container() {
        let mut dom = Dom::new();
        let root = dom.root();
        let div = dom.add(root, NodeData::new(ElementKind::Div)).unwrap();
        assert_eq!(dom.add(div, "hello").unwrap(), div);
        assert_eq!(dom.add_raw(div, "<br />").unwrap(), div);
        assert_eq!(
            dom.children(div),
            &[Child::Text("hello".into()), Child::Raw("<br />".into())]
        );
    }

    #[test]
    fn leaves_reject_children() {
        let mut dom = Dom::new();
        let root = dom.root();
        let input = dom.add(root, text_input("x", Binding::Unbound)).unwrap();
        let err = dom.add(input, "text").unwrap_err();
        assert!(matches!(err, MarkupError::NotAContainer { kind: "TextInput" }));
    }

    #[test]
    fn child_by_key_lookup() {
        let mut dom = Dom::new();
        let root = dom.root();
        let div = dom.add(root, NodeData::new(ElementKind::Div).with_id("d")).unwrap();
        assert_eq!(dom.child_by_key(root, "d"), Some(div));
        assert_eq!(dom.child_by_key(root, "nope"), None);
    }

    #[test]
    fn walk_depth_first_order() {
        let mut dom = Dom::new();
        let root = dom.root();
        let a = dom.add(root, NodeData::new(ElementKind::Div)).unwrap();
        let b = dom.add(root, NodeData::new(ElementKind::Div)).unwrap();
        let c = dom.add(a, NodeData::new(ElementKind::Div)).unwrap();
        dom.add(a, "text").unwrap();
        let d = dom.add(a, NodeData::new(ElementKind::Div)).unwrap();
        assert_eq!(dom.walk_depth_first(root), vec![root, a, c, d, b]);
    }

    #[test]
    fn warnings_are_recorded() {
        let mut dom = Dom::new();
        dom.warn(Warning::NoRows { widget: "ResultList" });
        assert_eq!(dom.warnings(), &[Warning::NoRows { widget: "ResultList" }]);
    }
}
