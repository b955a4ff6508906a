//! Tree to markup.
//!
//! Rendering is a read-only walk over the arena. Attribute and style strings
//! are assembled into a fresh buffer per node and nothing is written back,
//! so rendering the same tree twice yields the same string.
//!
//! Layout: one tab per tree depth. Block containers put their children on
//! their own lines and close on a line of their own, followed by an
//! `<!--id-->` marker when the container has an id. Inline containers (cells,
//! headlines, paragraphs, spans, scripts) keep text runs on the tag's line
//! unless they hold element children.

use std::fmt::Write as _;

use super::escape::escape_html;
use crate::dom::attrs::{AttrMap, StyleMap};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::{Child, Dom};
use crate::element::code_source::CodeEntry;
use crate::element::dropdown::Dropdown;
use crate::element::input::{Control, Input};
use crate::element::kind::ElementKind;
use crate::error::{MarkupError, Result};
use crate::value::display;

/// ` key="value"` for every attribute, then ` style="k:v;k:v"` if any style
/// is set. Values are escaped.
pub fn attribute_string(attributes: &AttrMap, style: &StyleMap) -> String {
    let mut out = String::new();
    for (key, value) in attributes.iter() {
        let _ = write!(out, " {key}=\"{}\"", escape_html(value));
    }
    if !style.is_empty() {
        let declarations: Vec<String> = style
            .iter()
            .map(|(property, value)| format!("{property}:{value}"))
            .collect();
        let _ = write!(out, " style=\"{}\"", escape_html(&declarations.join(";")));
    }
    out
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

impl Dom<'_> {
    /// Render the whole tree, starting at the body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_node(&mut out, self.root(), None);
        out
    }

    /// Render one subtree.
    pub fn render_node(&self, id: NodeId) -> Result<String> {
        if !self.contains(id) {
            return Err(MarkupError::UnknownNode);
        }
        let mut out = String::new();
        self.write_node(&mut out, id, None);
        Ok(out)
    }

    /// Render the body's children without the `<body>` wrapper.
    pub fn render_fragment(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.get(self.root()) {
            self.write_children(&mut out, self.root(), root);
        }
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, column_style: Option<&StyleMap>) {
        let Some(data) = self.get(id) else {
            return;
        };
        tracing::trace!(kind = data.kind.name(), indent = data.indent, "render node");

        let attrs = match column_style {
            Some(column) if !column.is_empty() => {
                let mut style = data.style.clone();
                style.merge(column);
                attribute_string(&data.attributes, &style)
            }
            _ => attribute_string(&data.attributes, &data.style),
        };
        let indent = tabs(data.indent);

        match &data.kind {
            ElementKind::Body => {
                let _ = writeln!(out, "<body{attrs}>");
                self.write_children(out, id, data);
                out.push_str("</body>\n");
            }
            ElementKind::Div | ElementKind::Header | ElementKind::Form | ElementKind::Table(_) => {
                let tag = block_tag(&data.kind);
                let _ = writeln!(out, "{indent}<{tag}{attrs}>");
                self.write_children(out, id, data);
                let _ = write!(out, "{indent}</{tag}>");
                if let Some(node_id) = data.id() {
                    let _ = write!(out, "<!--{node_id}-->");
                }
                out.push('\n');
            }
            ElementKind::Row => {
                let _ = writeln!(out, "{indent}<tr{attrs}>");
                self.write_children(out, id, data);
                let _ = writeln!(out, "{indent}</tr>");
            }
            ElementKind::Text(tag) if !data.kind.inlines_text() => {
                let tag = tag.tag();
                let _ = writeln!(out, "{indent}<{tag}{attrs}>");
                self.write_children(out, id, data);
                let _ = writeln!(out, "{indent}</{tag}>");
            }
            ElementKind::Text(_) | ElementKind::Headline(_) | ElementKind::Cell { .. } => {
                let tag = inline_tag(&data.kind);
                let has_nodes = self.children(id).iter().any(|c| matches!(c, Child::Node(_)));
                if has_nodes {
                    let _ = writeln!(out, "{indent}<{tag}{attrs}>");
                    self.write_children(out, id, data);
                    let _ = writeln!(out, "{indent}</{tag}>");
                } else {
                    let _ = write!(out, "{indent}<{tag}{attrs}>");
                    self.write_children(out, id, data);
                    let _ = writeln!(out, "</{tag}>");
                }
            }
            ElementKind::Link(link) => {
                let _ = writeln!(out, "{indent}<a{attrs}>{}</a>", escape_html(&link.label));
            }
            ElementKind::Anchor => {
                let _ = writeln!(out, "{indent}<a{attrs}></a>");
            }
            ElementKind::RadioSet | ElementKind::Grid { .. } => {
                self.write_children(out, id, data);
            }
            ElementKind::Input(input) => write_input(out, data, input, &indent),
        }
    }

    fn write_children(&self, out: &mut String, id: NodeId, data: &NodeData) {
        let column_styles = match &data.kind {
            ElementKind::Row => self
                .parent(id)
                .and_then(|table| self.get(table))
                .and_then(|table| match &table.kind {
                    ElementKind::Table(table) => Some(table.column_styles()),
                    _ => None,
                }),
            _ => None,
        };
        let inline = data.kind.inlines_text();
        let literal_indent = tabs(data.indent + 1);
        let mut column = 0;

        for child in self.children(id) {
            match child {
                Child::Node(node) => {
                    let style = column_styles.and_then(|styles| styles.get(column));
                    self.write_node(out, *node, style);
                    column += 1;
                }
                Child::Text(text) => {
                    write_literal(out, &escape_html(text), inline, &literal_indent);
                }
                Child::Raw(markup) => write_literal(out, markup, inline, &literal_indent),
            }
        }
    }
}

fn write_literal(out: &mut String, literal: &str, inline: bool, indent: &str) {
    if inline {
        out.push_str(literal);
        return;
    }
    out.push_str(indent);
    out.push_str(literal);
    if !literal.ends_with('\n') {
        out.push('\n');
    }
}

fn block_tag(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::Header => "header",
        ElementKind::Form => "form",
        ElementKind::Table(_) => "table",
        _ => "div",
    }
}

fn inline_tag(kind: &ElementKind) -> String {
    match kind {
        ElementKind::Text(tag) => tag.tag().to_owned(),
        ElementKind::Headline(level) => format!("h{level}"),
        ElementKind::Cell { header: true } => "th".to_owned(),
        _ => "td".to_owned(),
    }
}

fn write_input(out: &mut String, data: &NodeData, input: &Input, indent: &str) {
    let shown = input.value().map(display).unwrap_or_default();
    match &input.control {
        Control::Text { label } | Control::Password { label } => {
            let attrs = data.attributes.clone().with("value", shown);
            let _ = writeln!(out, "{indent}<input{} />", attribute_string(&attrs, &data.style));
            if let Some(label) = label {
                let _ = writeln!(
                    out,
                    "{indent}\t<label for=\"{}\">{}</label>",
                    escape_html(&input.name),
                    escape_html(label)
                );
            }
        }
        Control::Hidden | Control::Submit | Control::Button => {
            let attrs = data.attributes.clone().with("value", shown);
            let _ = writeln!(out, "{indent}<input{} />", attribute_string(&attrs, &data.style));
        }
        Control::Textarea { label } => {
            if let Some(label) = label {
                let _ = writeln!(
                    out,
                    "{indent}<label for=\"{}\">{}</label><br />",
                    escape_html(&input.name),
                    escape_html(label)
                );
            }
            let _ = writeln!(
                out,
                "{indent}<textarea{}>{}</textarea>",
                attribute_string(&data.attributes, &data.style),
                escape_html(&shown)
            );
        }
        Control::Checkbox {
            label, label_class, ..
        }
        | Control::Radio {
            label, label_class, ..
        } => {
            let mut attrs = data.attributes.clone();
            if input.is_checked() {
                attrs.insert("checked", "checked");
            }
            let _ = write!(out, "{indent}<input{} />", attribute_string(&attrs, &data.style));
            if let Some(label) = label {
                let target = data.id().unwrap_or(&input.name);
                let _ = write!(out, "<label for=\"{}\"", escape_html(target));
                if let Some(class) = label_class {
                    let _ = write!(out, " class=\"{}\"", escape_html(class));
                }
                let _ = write!(out, ">{}</label>", escape_html(label));
            }
            out.push('\n');
        }
        Control::Dropdown(dropdown) => write_dropdown(out, data, input, dropdown, indent),
    }
}

fn write_dropdown(out: &mut String, data: &NodeData, input: &Input, dropdown: &Dropdown, indent: &str) {
    let mut attrs = data.attributes.clone();
    if let Some(size) = dropdown.multiple {
        attrs.insert("name", format!("{}[]", input.name));
        attrs.insert("multiple", "multiple");
        attrs.insert("size", size.to_string());
    }
    let _ = writeln!(out, "{indent}<select{}>", attribute_string(&attrs, &data.style));

    let effective = dropdown.effective_value(input.value());
    let option = |out: &mut String, depth: &str, code: &str, label: &str| {
        let selected = if dropdown.is_selected(code, &effective) {
            " selected=\"selected\""
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{depth}<option value=\"{}\"{selected}>{}</option>",
            escape_html(code),
            escape_html(label)
        );
    };

    let inner = format!("{indent}\t");
    if !dropdown.no_missing {
        option(out, &inner, &dropdown.missing_code, &dropdown.no_entry_label);
    }
    let nested = format!("{indent}\t\t");
    for entry in dropdown.codes.entries() {
        match entry {
            CodeEntry::Code { code, label } => option(out, &inner, code, label),
            CodeEntry::Group { label, codes } => {
                let _ = writeln!(out, "{inner}<optgroup label=\"{}\">", escape_html(label));
                for (code, label) in codes {
                    option(out, &nested, code, label);
                }
                let _ = writeln!(out, "{inner}</optgroup>");
            }
        }
    }
    let _ = writeln!(out, "{indent}</select>");
}
