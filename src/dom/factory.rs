//! Create-and-attach constructors on [`Dom`].
//!
//! Every constructor builds a detached [`NodeData`], attaches it under
//! `parent` through [`Dom::add`] and returns the new node's id. Literal
//! helpers (`line_break`, `rule`, `whitespace`, `stylesheet`) return the
//! parent, like text does.

use serde_json::Value;

use super::attrs::AttrMap;
use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::element::code_source::CodeSource;
use crate::element::dropdown::Dropdown;
use crate::element::input::{Binding, Control, Input};
use crate::element::kind::{ElementKind, Link, Table, TextTag};
use crate::error::{MarkupError, Result, Warning};
use crate::render::escape::escape_html;
use crate::value::{display, is_truthy, loosely_equals};

fn input_node(attributes: AttrMap, input: Input) -> NodeData {
    let mut node = NodeData::new(ElementKind::Input(input));
    node.attributes = attributes;
    node
}

fn wrong_kind(expected: &'static str, found: &'static str) -> MarkupError {
    MarkupError::WrongKind { expected, found }
}

impl Dom<'_> {
    // -- containers ---------------------------------------------------------

    pub fn div(&mut self, parent: NodeId) -> Result<NodeId> {
        self.add(parent, NodeData::new(ElementKind::Div))
    }

    /// A div registered under `id` in its parent.
    pub fn div_with_id(&mut self, parent: NodeId, id: &str) -> Result<NodeId> {
        self.add(parent, NodeData::new(ElementKind::Div).with_id(id))
    }

    pub fn header(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        let header = self.add(parent, NodeData::new(ElementKind::Header))?;
        self.add_text_if_any(header, text)?;
        Ok(header)
    }

    /// A `post` form. A `name` doubles as the form's id, which is what grid
    /// widgets address it by.
    pub fn form(&mut self, parent: NodeId, name: Option<&str>, action: Option<&str>) -> Result<NodeId> {
        let mut form = NodeData::new(ElementKind::Form).with_attr("method", "post");
        if let Some(name) = name {
            form.set_attr("name", name).set_id(name);
        }
        if let Some(action) = action {
            form.set_attr("action", action);
        }
        self.add(parent, form)
    }

    pub fn paragraph(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        self.text_container(parent, TextTag::Paragraph, text)
    }

    pub fn span(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        self.text_container(parent, TextTag::Span, text)
    }

    /// A `<label>`, optionally tied to the control with id `target`.
    pub fn label(&mut self, parent: NodeId, text: &str, target: Option<&str>) -> Result<NodeId> {
        let mut label = NodeData::new(ElementKind::Text(TextTag::Label));
        if let Some(target) = target {
            label.set_attr("for", target);
        }
        let label = self.add(parent, label)?;
        self.add_text_if_any(label, text)?;
        Ok(label)
    }

    /// An inline script. The code is emitted verbatim.
    pub fn script(&mut self, parent: NodeId, code: &str) -> Result<NodeId> {
        let script = self.add(parent, NodeData::new(ElementKind::Text(TextTag::Script)))?;
        if !code.is_empty() {
            self.add_raw(script, code)?;
        }
        Ok(script)
    }

    /// A script loaded from `src`.
    pub fn script_source(&mut self, parent: NodeId, src: &str) -> Result<NodeId> {
        self.add(
            parent,
            NodeData::new(ElementKind::Text(TextTag::Script)).with_attr("src", src),
        )
    }

    /// `h1`..`h6`; other levels are clamped into that range.
    pub fn headline(&mut self, parent: NodeId, level: u8, text: &str) -> Result<NodeId> {
        let level = level.clamp(1, 6);
        let headline = self.add(parent, NodeData::new(ElementKind::Headline(level)))?;
        self.add_text_if_any(headline, text)?;
        Ok(headline)
    }

    /// A hyperlink. Without a label the destination is shown.
    pub fn link(
        &mut self,
        parent: NodeId,
        href: &str,
        label: Option<&str>,
        target: Option<&str>,
    ) -> Result<NodeId> {
        let mut link = NodeData::new(ElementKind::Link(Link {
            label: label.unwrap_or(href).to_owned(),
        }))
        .with_attr("href", href);
        if let Some(target) = target {
            link.set_attr("target", target);
        }
        self.add(parent, link)
    }

    /// A named anchor that `#id` fragments jump to.
    pub fn anchor(&mut self, parent: NodeId, id: &str) -> Result<NodeId> {
        self.add(
            parent,
            NodeData::new(ElementKind::Anchor).with_id(id).with_attr("name", id),
        )
    }

    pub fn table(&mut self, parent: NodeId) -> Result<NodeId> {
        self.add(parent, NodeData::new(ElementKind::Table(Table::new())))
    }

    pub fn row(&mut self, table: NodeId) -> Result<NodeId> {
        self.add(table, NodeData::new(ElementKind::Row))
    }

    /// A `td` holding escaped `text` (may be empty).
    pub fn cell(&mut self, row: NodeId, text: &str) -> Result<NodeId> {
        let cell = self.add(row, NodeData::new(ElementKind::Cell { header: false }))?;
        self.add_text_if_any(cell, text)?;
        Ok(cell)
    }

    /// A `th` holding escaped `text` (may be empty).
    pub fn head_cell(&mut self, row: NodeId, text: &str) -> Result<NodeId> {
        let cell = self.add(row, NodeData::new(ElementKind::Cell { header: true }))?;
        self.add_text_if_any(cell, text)?;
        Ok(cell)
    }

    // -- literals -----------------------------------------------------------

    /// `count` line breaks on one line.
    pub fn line_break(&mut self, parent: NodeId, count: usize) -> Result<NodeId> {
        self.add_raw(parent, "<br />".repeat(count.max(1)))
    }

    pub fn rule(&mut self, parent: NodeId) -> Result<NodeId> {
        self.add_raw(parent, "<hr />")
    }

    /// `n` non-breaking spaces.
    pub fn whitespace(&mut self, parent: NodeId, n: usize) -> Result<NodeId> {
        self.add_raw(parent, "&#160;".repeat(n))
    }

    pub fn stylesheet(&mut self, parent: NodeId, href: &str) -> Result<NodeId> {
        self.add_raw(
            parent,
            format!("<link href=\"{}\" rel=\"stylesheet\" />", escape_html(href)),
        )
    }

    // -- inputs -------------------------------------------------------------

    pub fn text_input(
        &mut self,
        parent: NodeId,
        name: &str,
        binding: impl Into<Binding>,
        label: Option<&str>,
    ) -> Result<NodeId> {
        let attrs = AttrMap::from([("type", "text"), ("name", name), ("id", name)]);
        let control = Control::Text {
            label: label.map(str::to_owned),
        };
        self.add(parent, input_node(attrs, Input::new(name, binding, control)))
    }

    pub fn password(
        &mut self,
        parent: NodeId,
        name: &str,
        binding: impl Into<Binding>,
        label: Option<&str>,
    ) -> Result<NodeId> {
        let attrs = AttrMap::from([("type", "password"), ("name", name), ("id", name)]);
        let control = Control::Password {
            label: label.map(str::to_owned),
        };
        self.add(parent, input_node(attrs, Input::new(name, binding, control)))
    }

    /// A textarea, 8 rows by 80 columns until resized.
    pub fn textarea(
        &mut self,
        parent: NodeId,
        name: &str,
        binding: impl Into<Binding>,
        label: Option<&str>,
    ) -> Result<NodeId> {
        let attrs = AttrMap::from([("name", name), ("id", name), ("cols", "80"), ("rows", "8")]);
        let control = Control::Textarea {
            label: label.map(str::to_owned),
        };
        self.add(parent, input_node(attrs, Input::new(name, binding, control)))
    }

    pub fn hidden(&mut self, parent: NodeId, name: &str, binding: impl Into<Binding>) -> Result<NodeId> {
        let attrs = AttrMap::from([("type", "hidden"), ("id", name), ("name", name)]);
        self.add(parent, input_node(attrs, Input::new(name, binding, Control::Hidden)))
    }

    /// A submit button; `label` is both its caption and its submitted value.
    pub fn submit(&mut self, parent: NodeId, name: &str, label: &str) -> Result<NodeId> {
        let attrs = AttrMap::from([("type", "submit"), ("name", name)]);
        self.add(parent, input_node(attrs, Input::new(name, label, Control::Submit)))
    }

    pub fn button(&mut self, parent: NodeId, name: &str, label: &str) -> Result<NodeId> {
        let attrs = AttrMap::from([("type", "button"), ("name", name)]);
        self.add(parent, input_node(attrs, Input::new(name, label, Control::Button)))
    }

    /// A checkbox submitting `value` when checked.
    ///
    /// A falsy `value` records [`Warning::EmptyCheckboxValue`]; the box still
    /// renders but never shows as checked.
    pub fn checkbox(
        &mut self,
        parent: NodeId,
        name: &str,
        value: impl Into<Value>,
        label: Option<&str>,
        binding: impl Into<Binding>,
    ) -> Result<NodeId> {
        let value = value.into();
        let valid = is_truthy(&value);
        if !valid {
            self.warn(Warning::EmptyCheckboxValue {
                name: name.to_owned(),
            });
        }
        let attrs = AttrMap::from([
            ("type", "checkbox"),
            ("name", name),
            ("id", name),
            ("value", display(&value).as_str()),
        ]);
        let control = Control::Checkbox {
            value,
            label: label.map(str::to_owned),
            label_class: None,
            valid,
        };
        self.add(parent, input_node(attrs, Input::new(name, binding, control)))
    }

    /// A radio button; its id is `name` followed by `value`.
    pub fn radio(
        &mut self,
        parent: NodeId,
        name: &str,
        value: impl Into<Value>,
        label: Option<&str>,
        binding: impl Into<Binding>,
    ) -> Result<NodeId> {
        let value = value.into();
        let shown = display(&value);
        let attrs = AttrMap::from([
            ("type", "radio"),
            ("name", name),
            ("id", format!("{name}{shown}").as_str()),
            ("value", shown.as_str()),
        ]);
        let control = Control::Radio {
            value,
            label: label.map(str::to_owned),
            label_class: None,
        };
        self.add(parent, input_node(attrs, Input::new(name, binding, control)))
    }

    /// One radio per code, each followed by a line break. The configured
    /// "other" code gets an extra break before it.
    pub fn radio_set(
        &mut self,
        parent: NodeId,
        name: &str,
        codes: &CodeSource,
        binding: impl Into<Binding>,
    ) -> Result<NodeId> {
        let binding = binding.into();
        let set = self.add(parent, NodeData::new(ElementKind::RadioSet))?;
        let other = Value::String(self.config().other_code.clone());
        for (code, label) in codes.codes() {
            let code = Value::String(code.to_owned());
            if loosely_equals(&code, &other) {
                self.line_break(set, 1)?;
            }
            self.radio(set, name, code, Some(label), binding.clone())?;
            self.line_break(set, 1)?;
        }
        Ok(set)
    }

    /// A select box over `codes`, using the configured sentinel code and label.
    pub fn dropdown(
        &mut self,
        parent: NodeId,
        name: &str,
        codes: CodeSource,
        binding: impl Into<Binding>,
    ) -> Result<NodeId> {
        let attrs = AttrMap::from([("id", name), ("name", name)]);
        let config = self.config();
        let input = Input::dropdown(
            name,
            codes,
            binding,
            config.missing_code.clone(),
            config.no_entry_label.clone(),
        );
        self.add(parent, input_node(attrs, input))
    }

    // -- post-attach configuration -----------------------------------------

    pub fn dropdown_mut(&mut self, id: NodeId) -> Result<&mut Dropdown> {
        let node = self.node_mut(id)?;
        let found = node.kind.name();
        node.kind
            .as_input_mut()
            .and_then(Input::as_dropdown_mut)
            .ok_or(wrong_kind("Dropdown", found))
    }

    pub fn table_mut(&mut self, id: NodeId) -> Result<&mut Table> {
        match &mut self.node_mut(id)?.kind {
            ElementKind::Table(table) => Ok(table),
            other => Err(wrong_kind("Table", other.name())),
        }
    }

    /// Per-column `text-align` from a pattern over `{l, c, r}`.
    pub fn set_column_alignments(&mut self, table: NodeId, pattern: &str) -> Result<()> {
        self.table_mut(table)?.set_column_alignments(pattern);
        Ok(())
    }

    /// Submit the enclosing form when a checkbox is clicked or a dropdown changes.
    pub fn set_auto_submit(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        let event = match node.kind.as_input().map(|input| &input.control) {
            Some(Control::Checkbox { .. }) => "onclick",
            Some(Control::Dropdown(_)) => "onchange",
            _ => return Err(wrong_kind("Checkbox or Dropdown", node.kind.name())),
        };
        node.set_attr(event, "submit()");
        Ok(())
    }

    /// Class of the label rendered next to a checkbox or radio; applied to
    /// every radio of a radio set.
    pub fn set_label_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let targets = match self.get(id).map(|node| &node.kind) {
            Some(ElementKind::RadioSet) => self.child_nodes(id),
            Some(_) => vec![id],
            None => return Err(MarkupError::UnknownNode),
        };
        for target in targets {
            let node = self.node_mut(target)?;
            let found = node.kind.name();
            match node.kind.as_input_mut().map(|input| &mut input.control) {
                Some(Control::Checkbox { label_class, .. } | Control::Radio { label_class, .. }) => {
                    *label_class = Some(class.to_owned());
                }
                _ => return Err(wrong_kind("Checkbox or Radio", found)),
            }
        }
        Ok(())
    }

    /// `size` and `maxlength` of a text or password input.
    pub fn set_input_size(&mut self, id: NodeId, size: usize, max_length: usize) -> Result<()> {
        let node = self.node_mut(id)?;
        let is_text = matches!(
            node.kind.as_input().map(|input| &input.control),
            Some(Control::Text { .. } | Control::Password { .. })
        );
        if !is_text {
            return Err(wrong_kind("TextInput", node.kind.name()));
        }
        node.set_attr("size", size.to_string())
            .set_attr("maxlength", max_length.to_string());
        Ok(())
    }

    /// Rows and columns of a textarea.
    pub fn set_textarea_size(&mut self, id: NodeId, rows: usize, cols: usize) -> Result<()> {
        let node = self.node_mut(id)?;
        let is_textarea = matches!(
            node.kind.as_input().map(|input| &input.control),
            Some(Control::Textarea { .. })
        );
        if !is_textarea {
            return Err(wrong_kind("Textarea", node.kind.name()));
        }
        node.set_attr("cols", cols.to_string())
            .set_attr("rows", rows.to_string());
        Ok(())
    }

    pub fn set_colspan(&mut self, cell: NodeId, width: usize) -> Result<()> {
        let node = self.node_mut(cell)?;
        if !matches!(node.kind, ElementKind::Cell { .. }) {
            return Err(wrong_kind("Cell", node.kind.name()));
        }
        node.set_attr("colspan", width.to_string());
        Ok(())
    }

    fn text_container(&mut self, parent: NodeId, tag: TextTag, text: &str) -> Result<NodeId> {
        let node = self.add(parent, NodeData::new(ElementKind::Text(tag)))?;
        self.add_text_if_any(node, text)?;
        Ok(node)
    }

    fn add_text_if_any(&mut self, parent: NodeId, text: &str) -> Result<()> {
        if !text.is_empty() {
            self.add_text(parent, text)?;
        }
        Ok(())
    }
}
