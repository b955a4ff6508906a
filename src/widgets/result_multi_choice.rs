//! ResultMultiChoice widget: rows toggle in and out of a selection set.

use serde_json::Value;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;
use crate::value::{contains_loosely, display, Record};
use crate::widget::traits::Widget;
use crate::widgets::grid::{
    anchor_for, cell_text, clickable_header, multi_selection_hook, no_rows, require_form,
    selection_fields, ColumnMapping,
};

/// Separator of the selected identifiers in the hidden field.
const SEPARATOR: char = ';';
/// Escapes a literal separator (and itself) inside one identifier.
const ESCAPE: char = '\\';

/// Join identifier values for the hidden field. A `;` or `\` inside a value
/// is preceded by `\`.
fn encode_selection(values: &[Value]) -> String {
    let mut joined = String::new();
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            joined.push(SEPARATOR);
        }
        for c in display(value).chars() {
            if c == SEPARATOR || c == ESCAPE {
                joined.push(ESCAPE);
            }
            joined.push(c);
        }
    }
    joined
}

/// Split a hidden field written by [`encode_selection`]. Empty parts are dropped.
fn decode_selection(joined: &str) -> Vec<Value> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = joined.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => current.push(chars.next().unwrap_or(ESCAPE)),
            SEPARATOR => {
                if !current.is_empty() {
                    values.push(Value::String(std::mem::take(&mut current)));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        values.push(Value::String(current));
    }
    values
}

/// Multi-row selection keyed by a single identifier column.
#[derive(Debug, Clone, Default)]
pub struct ResultMultiChoice {
    rows: Vec<Record>,
    identifier: String,
    selected: Option<Vec<Value>>,
    mapping: ColumnMapping,
    alignments: Option<String>,
}

impl ResultMultiChoice {
    pub fn new(rows: Vec<Record>, identifier: impl Into<String>) -> Self {
        Self {
            rows,
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    /// Identifier values of the selected rows.
    pub fn selected<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.selected = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn column_alignments(mut self, pattern: &str) -> Self {
        self.alignments = Some(pattern.to_owned());
        self
    }

    /// The explicit selection, or the one posted back in the hidden field.
    fn selection(&self, dom: &Dom<'_>) -> Vec<Value> {
        if let Some(selected) = &self.selected {
            return selected.clone();
        }
        let key = format!("{}{}", dom.config().selection_prefix, self.identifier);
        match dom.scope().and_then(|scope| scope.get(&key)) {
            Some(Value::Array(items)) => items,
            Some(Value::String(joined)) => decode_selection(&joined),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![other],
        }
    }
}

impl Widget for ResultMultiChoice {
    fn widget_type(&self) -> &'static str {
        "ResultMultiChoice"
    }

    fn requires_form(&self) -> bool {
        true
    }

    fn build(&self, dom: &mut Dom<'_>, host: NodeId) -> Result<()> {
        let form = require_form(dom, host, self.widget_type())?;
        if self.rows.is_empty() {
            return no_rows(dom, host, self.widget_type());
        }
        let columns = self.mapping.resolve(&self.rows);
        let selection = self.selection(dom);
        let selected_style = dom.config().selected_row_style()?;

        let grid_id = anchor_for(dom, host)?;
        let table = dom.table(host)?;
        if let Some(pattern) = &self.alignments {
            dom.set_column_alignments(table, pattern)?;
        }
        clickable_header(dom, table, &columns, grid_id.as_deref(), &form)?;

        for record in &self.rows {
            let row = dom.row(table)?;
            let node = dom.node_mut(row)?;
            node.set_attr(
                "onclick",
                multi_selection_hook(&form, &self.identifier, record),
            );
            let chosen = record
                .get(&self.identifier)
                .is_some_and(|value| !value.is_null() && contains_loosely(&selection, value));
            if chosen {
                node.set_style(selected_style.clone());
            }
            for (column, _) in &columns {
                dom.cell(row, &cell_text(record, column))?;
            }
        }

        let joined = encode_selection(&selection);
        selection_fields(
            dom,
            host,
            grid_id.as_deref(),
            [(self.identifier.as_str(), joined)],
        )
    }
}
