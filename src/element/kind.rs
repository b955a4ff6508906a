//! The closed set of element kinds a tree can hold.
//!
//! Every node carries the same attribute/style/identity record
//! ([`NodeData`](crate::dom::NodeData)); what differs per tag lives here and is
//! dispatched by the renderer with a single `match`.

use crate::dom::attrs::StyleMap;
use crate::element::input::Input;

/// Tag of a text-oriented container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTag {
    Paragraph,
    Span,
    Label,
    Script,
}

impl TextTag {
    pub fn tag(self) -> &'static str {
        match self {
            TextTag::Paragraph => "p",
            TextTag::Span => "span",
            TextTag::Label => "label",
            TextTag::Script => "script",
        }
    }
}

/// Column alignment for [`Table::set_column_alignments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Map a pattern letter (`l`, `c`, `r`) to an alignment.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'l' | 'L' => Some(Alignment::Left),
            'c' | 'C' => Some(Alignment::Center),
            'r' | 'R' => Some(Alignment::Right),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Per-column styles propagated to the cells of each row at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    column_styles: Vec<StyleMap>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `text-align` per column from a pattern over `{l, c, r}`.
    ///
    /// Letters outside that set leave their column untouched but still
    /// advance the column index.
    pub fn set_column_alignments(&mut self, pattern: &str) {
        for (index, letter) in pattern.chars().enumerate() {
            if let Some(alignment) = Alignment::from_letter(letter) {
                self.column_style_mut(index)
                    .insert("text-align", alignment.as_css());
            }
        }
    }

    /// Merge `style` into the style of column `index`.
    pub fn add_column_style(&mut self, index: usize, style: &StyleMap) {
        self.column_style_mut(index).merge(style);
    }

    pub fn column_styles(&self) -> &[StyleMap] {
        &self.column_styles
    }

    fn column_style_mut(&mut self, index: usize) -> &mut StyleMap {
        if self.column_styles.len() <= index {
            self.column_styles.resize_with(index + 1, StyleMap::new);
        }
        &mut self.column_styles[index]
    }
}

/// A hyperlink; the visible label is stored apart from the `href` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
}

/// Element kinds. Everything except inputs, links and anchors holds children.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Document body; the root of every tree.
    Body,
    Div,
    Header,
    Form,
    Text(TextTag),
    /// `h1`..`h6`.
    Headline(u8),
    Link(Link),
    Anchor,
    Table(Table),
    Row,
    /// `td`, or `th` when `header` is set.
    Cell { header: bool },
    /// A run of radio buttons; renders only its children.
    RadioSet,
    /// Host node of a grid widget; renders only its children.
    Grid { widget: &'static str },
    Input(Input),
}

impl ElementKind {
    /// Short type name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Body => "Body",
            ElementKind::Div => "Div",
            ElementKind::Header => "Header",
            ElementKind::Form => "Form",
            ElementKind::Text(TextTag::Paragraph) => "Paragraph",
            ElementKind::Text(TextTag::Span) => "Span",
            ElementKind::Text(TextTag::Label) => "Label",
            ElementKind::Text(TextTag::Script) => "Script",
            ElementKind::Headline(_) => "Headline",
            ElementKind::Link(_) => "Link",
            ElementKind::Anchor => "Anchor",
            ElementKind::Table(_) => "Table",
            ElementKind::Row => "Row",
            ElementKind::Cell { header: false } => "Cell",
            ElementKind::Cell { header: true } => "HeadCell",
            ElementKind::RadioSet => "RadioSet",
            ElementKind::Grid { widget } => *widget,
            ElementKind::Input(input) => input.control.name(),
        }
    }

    /// Whether nodes of this kind accept children.
    pub fn is_container(&self) -> bool {
        !matches!(
            self,
            ElementKind::Input(_) | ElementKind::Link(_) | ElementKind::Anchor
        )
    }

    /// Inline containers emit text runs without indentation.
    pub fn inlines_text(&self) -> bool {
        matches!(
            self,
            ElementKind::Cell { .. }
                | ElementKind::Headline(_)
                | ElementKind::Text(TextTag::Paragraph | TextTag::Span | TextTag::Script)
        )
    }

    pub fn as_input(&self) -> Option<&Input> {
        match self {
            ElementKind::Input(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut Input> {
        match self {
            ElementKind::Input(input) => Some(input),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_alignments_lcr() {
        let mut table = Table::new();
        table.set_column_alignments("lcr");
        let styles = table.column_styles();
        assert_eq!(styles.len(), 3);
        assert_eq!(styles[0].get("text-align"), Some("left"));
        assert_eq!(styles[1].get("text-align"), Some("center"));
        assert_eq!(styles[2].get("text-align"), Some("right"));
    }

    #[test]
    fn unknown_alignment_letter_skips_column() {
        let mut table = Table::new();
        table.set_column_alignments("l-r");
        let styles = table.column_styles();
        assert_eq!(styles.len(), 3);
        assert!(styles[1].is_empty());
        assert_eq!(styles[2].get("text-align"), Some("right"));
    }

    #[test]
    fn column_style_merges_with_alignment() {
        let mut table = Table::new();
        table.set_column_alignments("r");
        table.add_column_style(0, &StyleMap::from([("width", "40px")]));
        let col = &table.column_styles()[0];
        assert_eq!(col.get("text-align"), Some("right"));
        assert_eq!(col.get("width"), Some("40px"));
    }

    #[test]
    fn containers_and_inline_kinds() {
        assert!(ElementKind::Div.is_container());
        assert!(!ElementKind::Anchor.is_container());
        assert!(ElementKind::Cell { header: true }.inlines_text());
        assert!(ElementKind::Text(TextTag::Span).inlines_text());
        assert!(!ElementKind::Text(TextTag::Label).inlines_text());
        assert!(!ElementKind::Row.inlines_text());
    }

    #[test]
    fn names() {
        assert_eq!(ElementKind::Cell { header: true }.name(), "HeadCell");
        assert_eq!(ElementKind::Grid { widget: "ResultList" }.name(), "ResultList");
    }
}
