//! Pieces shared by the grid widgets: column mapping, selection matching,
//! run-length grouping and the client hook strings.

use serde_json::Value;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::{MarkupError, Result, Warning};
use crate::value::{display, is_numeric, loosely_equals, Record};

/// Ordered column key to header label mapping.
///
/// Empty means "every key of the first row, labelled by itself".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    columns: Vec<(String, String)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.columns.push((key.into(), label.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    /// The columns to show for `rows`.
    pub fn resolve(&self, rows: &[Record]) -> Vec<(String, String)> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        rows.first()
            .map(|first| first.keys().map(|k| (k.clone(), k.clone())).collect())
            .unwrap_or_default()
    }

    /// Every key of the first row, labelled from the mapping when present.
    pub fn resolve_all(&self, rows: &[Record]) -> Vec<(String, String)> {
        rows.first()
            .map(|first| {
                first
                    .keys()
                    .map(|key| {
                        let label = self.label(key).unwrap_or(key).to_owned();
                        (key.clone(), label)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ColumnMapping {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Text shown for a cell; absent and null values show as empty.
pub fn cell_text(row: &Record, column: &str) -> String {
    row.get(column).map(display).unwrap_or_default()
}

/// Whether `row` is the selected one: every identifier column is present in
/// both and loosely equal. No identifiers never match.
pub fn row_matches(identifiers: &[String], row: &Record, selected: &Record) -> bool {
    !identifiers.is_empty()
        && identifiers.iter().all(|column| {
            match (row.get(column), selected.get(column)) {
                (Some(a), Some(b)) if !a.is_null() && !b.is_null() => loosely_equals(a, b),
                _ => false,
            }
        })
}

/// Recover a selection from the hidden fields of the previous request.
pub fn recover_selection(dom: &Dom<'_>, identifiers: &[String]) -> Record {
    let mut selected = Record::new();
    let Some(scope) = dom.scope() else {
        return selected;
    };
    let prefix = &dom.config().selection_prefix;
    for column in identifiers {
        if let Some(value) = scope.get(&format!("{prefix}{column}")) {
            if !value.is_null() && display(&value) != "" {
                selected.insert(column.clone(), value);
            }
        }
    }
    selected
}

/// Id of the form the grid posts through.
pub fn require_form(dom: &Dom<'_>, host: NodeId, widget: &'static str) -> Result<String> {
    dom.form_id_at(host)
        .ok_or(MarkupError::MissingFormId { widget })
}

/// Record the empty-input warning and show the placeholder instead of a table.
pub fn no_rows(dom: &mut Dom<'_>, host: NodeId, widget: &'static str) -> Result<()> {
    dom.warn(Warning::NoRows { widget });
    let text = dom.config().no_results_text.clone();
    dom.add_text(host, text)?;
    Ok(())
}

/// Collapses repeats in the first column into a blank marker.
#[derive(Debug, Default)]
pub struct RunLength {
    previous: Option<Value>,
}

impl RunLength {
    /// Whether `value` repeats the previous row's non-numeric value.
    pub fn repeats(&mut self, value: &Value) -> bool {
        let repeats = !is_numeric(value)
            && self
                .previous
                .as_ref()
                .is_some_and(|previous| loosely_equals(previous, value));
        self.previous = Some(value.clone());
        repeats
    }
}

/// Add a body cell, blank-marked when `grouped`.
pub fn grouped_cell(dom: &mut Dom<'_>, row: NodeId, text: &str, grouped: bool) -> Result<NodeId> {
    if grouped {
        let cell = dom.cell(row, "")?;
        dom.add_raw(cell, "&nbsp;")?;
        Ok(cell)
    } else {
        dom.cell(row, text)
    }
}

/// Content of a single-quoted JavaScript string literal.
pub fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Click hook of a header cell: remember the column, re-target the form at
/// the grid's anchor if it has one, submit.
pub fn header_hook(grid_id: Option<&str>, form: &str, column: &str) -> String {
    let form = js_string(form);
    let field = js_string(grid_id.unwrap_or_default());
    let retarget = grid_id
        .map(|id| format!(";document.forms['{form}'].action='#{}'", js_string(id)))
        .unwrap_or_default();
    format!(
        "document.getElementById('{field}_selectedColumn').value='{}'{retarget};document.forms['{form}'].submit()",
        js_string(column)
    )
}

/// Click hook of a row in a single-selection grid.
pub fn selection_hook(form: &str, identifiers: &[String], row: &Record) -> String {
    let pairs: Vec<String> = identifiers
        .iter()
        .map(|column| {
            format!(
                "'{}':'{}'",
                js_string(column),
                js_string(&cell_text(row, column))
            )
        })
        .collect();
    format!(
        "entryChoiceSetSelection('{}', {{{}}});",
        js_string(form),
        pairs.join(",")
    )
}

/// Click hook of a row in a multi-selection grid.
pub fn multi_selection_hook(form: &str, identifier: &str, row: &Record) -> String {
    format!(
        "entryMultiChoiceSetSelection('{}', '{}', '{}');",
        js_string(form),
        js_string(identifier),
        js_string(&cell_text(row, identifier))
    )
}

/// Header row with clickable cells.
pub fn clickable_header(
    dom: &mut Dom<'_>,
    table: NodeId,
    columns: &[(String, String)],
    grid_id: Option<&str>,
    form: &str,
) -> Result<NodeId> {
    let class = dom.config().headcell_class.clone();
    let row = dom.row(table)?;
    for (column, label) in columns {
        let cell = dom.head_cell(row, label)?;
        dom.node_mut(cell)?
            .set_attr("onclick", header_hook(grid_id, form, column))
            .set_class(class.as_str());
    }
    Ok(row)
}

/// The anchor (when the grid has an id) that the header hook jumps back to.
pub fn anchor_for(dom: &mut Dom<'_>, host: NodeId) -> Result<Option<String>> {
    let grid_id = dom.get(host).and_then(|data| data.id()).map(str::to_owned);
    if let Some(id) = &grid_id {
        dom.anchor(host, id)?;
    }
    Ok(grid_id)
}

/// Hidden fields carrying the clicked column and the selection, plus the
/// client script they are driven by.
pub fn selection_fields<'a>(
    dom: &mut Dom<'_>,
    host: NodeId,
    grid_id: Option<&str>,
    fields: impl IntoIterator<Item = (&'a str, String)>,
) -> Result<()> {
    let column_field = format!("{}_selectedColumn", grid_id.unwrap_or_default());
    dom.hidden(host, &column_field, Value::Null)?;
    let prefix = dom.config().selection_prefix.clone();
    for (column, value) in fields {
        dom.hidden(host, &format!("{prefix}{column}"), value)?;
    }
    let script = dom.config().forms_script.clone();
    dom.script_source(host, &script)?;
    Ok(())
}
