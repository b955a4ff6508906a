//! Widget trait: expand into markup nodes under a host node.
//!
//! A widget is a composite that the tree does not know about. Adding one with
//! [`Dom::add_widget`] attaches a transparent host node (a
//! [`ElementKind::Grid`]) carrying the widget's id and classes, then lets the
//! widget build its subtree beneath it. The `WidgetExt` trait adds
//! builder-style convenience methods for attaching ids and classes.

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::element::kind::ElementKind;
use crate::error::{MarkupError, Result};

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all composite widgets.
///
/// Object-safe: the core methods use `&self`. Methods that require
/// `Self: Sized` are on the `WidgetExt` extension trait instead.
pub trait Widget {
    /// Type name, used as the host node's kind name (e.g. "ResultList").
    fn widget_type(&self) -> &'static str;

    /// Whether the widget must sit inside a form that has an id.
    ///
    /// Checked before anything is attached.
    fn requires_form(&self) -> bool {
        false
    }

    /// Id given to the host node.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Classes given to the host node.
    fn classes(&self) -> &[String] {
        &[]
    }

    /// Build the widget's nodes under `host`.
    fn build(&self, dom: &mut Dom<'_>, host: NodeId) -> Result<()>;
}

// ---------------------------------------------------------------------------
// WidgetExt
// ---------------------------------------------------------------------------

/// Extension trait providing builder-style convenience methods for widgets.
///
/// Automatically implemented for all types that implement `Widget`.
pub trait WidgetExt: Widget {
    /// Wrap this widget with an id.
    fn with_id(self, id: &str) -> WidgetBuilder<Self>
    where
        Self: Sized,
    {
        WidgetBuilder {
            widget: self,
            id: Some(id.to_owned()),
            classes: Vec::new(),
        }
    }

    /// Wrap this widget with a single class.
    fn with_class(self, class: &str) -> WidgetBuilder<Self>
    where
        Self: Sized,
    {
        WidgetBuilder {
            widget: self,
            id: None,
            classes: vec![class.to_owned()],
        }
    }
}

// Blanket implementation: every Widget gets WidgetExt for free.
impl<T: Widget> WidgetExt for T {}

// ---------------------------------------------------------------------------
// WidgetBuilder
// ---------------------------------------------------------------------------

/// A wrapper around a widget that adds id and class metadata.
///
/// Created by `WidgetExt::with_id` or `with_class`. Delegates building to the
/// inner widget.
#[derive(Debug)]
pub struct WidgetBuilder<W: Widget> {
    /// The wrapped widget.
    pub widget: W,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl<W: Widget> WidgetBuilder<W> {
    /// Set the id (chainable).
    pub fn set_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Add a class (chainable).
    pub fn add_class(mut self, class: &str) -> Self {
        let class = class.to_owned();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }
}

impl<W: Widget> Widget for WidgetBuilder<W> {
    fn widget_type(&self) -> &'static str {
        self.widget.widget_type()
    }

    fn requires_form(&self) -> bool {
        self.widget.requires_form()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn build(&self, dom: &mut Dom<'_>, host: NodeId) -> Result<()> {
        self.widget.build(dom, host)
    }
}

// ---------------------------------------------------------------------------
// Dom integration
// ---------------------------------------------------------------------------

impl Dom<'_> {
    /// Attach `widget` under `parent` and build it. Returns the host node.
    ///
    /// Widgets that need a form fail with [`MarkupError::MissingFormId`]
    /// before anything is attached.
    pub fn add_widget(&mut self, parent: NodeId, widget: &dyn Widget) -> Result<NodeId> {
        let kind = widget.widget_type();
        if widget.requires_form() {
            self.form_id_at(parent)
                .ok_or(MarkupError::MissingFormId { widget: kind })?;
        }
        let mut host = NodeData::new(ElementKind::Grid { widget: kind });
        if let Some(id) = widget.id() {
            host.set_id(id);
        }
        for class in widget.classes() {
            host.add_class(class);
        }
        let host = self.add(parent, host)?;
        tracing::debug!(widget = kind, "building widget");
        widget.build(self, host)?;
        Ok(host)
    }

    /// Id of the form that is `node` or encloses it.
    pub fn form_id_at(&self, node: NodeId) -> Option<String> {
        let form = match self.get(node).map(|data| &data.kind) {
            Some(ElementKind::Form) => Some(node),
            _ => self.enclosing_form(node),
        }?;
        self.get(form)
            .and_then(NodeData::id)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Note(&'static str);

    impl Widget for Note {
        fn widget_type(&self) -> &'static str {
            "Note"
        }

        fn build(&self, dom: &mut Dom<'_>, host: NodeId) -> Result<()> {
            dom.paragraph(host, self.0)?;
            Ok(())
        }
    }

    struct Picker;

    impl Widget for Picker {
        fn widget_type(&self) -> &'static str {
            "Picker"
        }

        fn requires_form(&self) -> bool {
            true
        }

        fn build(&self, _dom: &mut Dom<'_>, _host: NodeId) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn host_renders_only_its_children() {
        let mut dom = Dom::new();
        dom.add_widget(dom.root(), &Note("hello")).unwrap();
        assert_eq!(dom.render_fragment(), "\t\t<p>hello</p>\n");
    }

    #[test]
    fn builder_sets_host_id_and_classes() {
        let mut dom = Dom::new();
        let widget = Note("x").with_id("n").add_class("wide");
        let host = dom.add_widget(dom.root(), &widget).unwrap();
        let data = dom.get(host).unwrap();
        assert_eq!(data.id(), Some("n"));
        assert_eq!(data.class(), Some("wide"));
        assert_eq!(data.kind.name(), "Note");
    }

    #[test]
    fn form_required_before_attach() {
        let mut dom = Dom::new();
        let err = dom.add_widget(dom.root(), &Picker).unwrap_err();
        assert!(matches!(err, MarkupError::MissingFormId { widget: "Picker" }));
        assert!(dom.is_empty());
    }

    #[test]
    fn form_without_id_does_not_count() {
        let mut dom = Dom::new();
        let form = dom.form(dom.root(), None, None).unwrap();
        assert!(dom.add_widget(form, &Picker).is_err());
    }

    #[test]
    fn nested_form_is_found() {
        let mut dom = Dom::new();
        let form = dom.form(dom.root(), Some("f"), None).unwrap();
        let div = dom.div(form).unwrap();
        assert!(dom.add_widget(div, &Picker).is_ok());
        assert_eq!(dom.form_id_at(div).as_deref(), Some("f"));
    }
}
