//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::css::{parse_declarations, StyleParseError};
use crate::dom::attrs::{AttrMap, StyleMap};
use crate::element::kind::ElementKind;

new_key_type! {
    /// Unique identifier for a node in a [`Dom`](super::Dom). Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single node.
///
/// A `NodeData` is built detached, configured, then moved into a tree with
/// [`Dom::add`](super::Dom::add). Once attached it cannot be attached again.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: ElementKind,
    /// Markup attributes in insertion order. The identity lives here as `id`.
    pub attributes: AttrMap,
    /// Inline style in insertion order.
    pub style: StyleMap,
    /// Tree depth; parent's indent + 1, fixed when attached.
    pub indent: usize,
}

impl NodeData {
    /// Create a detached node of the given kind.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: AttrMap::new(),
            style: StyleMap::new(),
            indent: 0,
        }
    }

    /// Set the identity (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.attributes.insert("id", id);
        self
    }

    /// Append a class token (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Merge style entries (builder).
    pub fn with_style(mut self, style: &StyleMap) -> Self {
        self.style.merge(style);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id")
    }

    /// Set the identity. Only checked for uniqueness when the node is attached.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.attributes.insert("id", id);
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.attributes.get("class")
    }

    /// Replace the `class` attribute.
    pub fn set_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.attributes.insert("class", class);
        self
    }

    /// Append a space-separated class token, creating the attribute if absent.
    pub fn add_class(&mut self, class: &str) -> &mut Self {
        let joined = match self.attributes.get("class") {
            Some(existing) => format!("{existing} {class}"),
            None => class.to_owned(),
        };
        self.attributes.insert("class", joined);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class()
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key, value);
        self
    }

    /// Merge attributes; later keys overwrite.
    pub fn add_attrs(&mut self, attrs: &AttrMap) -> &mut Self {
        self.attributes.merge(attrs);
        self
    }

    /// Replace all style entries.
    pub fn set_style(&mut self, style: StyleMap) -> &mut Self {
        self.style = style;
        self
    }

    /// Merge style entries; later keys overwrite earlier ones.
    pub fn add_style(&mut self, style: &StyleMap) -> &mut Self {
        self.style.merge(style);
        self
    }

    /// Merge style entries parsed from an inline declaration string.
    pub fn add_style_str(&mut self, declarations: &str) -> Result<&mut Self, StyleParseError> {
        for (property, value) in parse_declarations(declarations)? {
            self.style.insert(property, value);
        }
        Ok(self)
    }

    /// Mark an input for autofocus.
    pub fn set_autofocus(&mut self) -> &mut Self {
        self.attributes.insert("autofocus", "autofocus");
        self
    }
}
