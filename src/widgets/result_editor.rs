//! ResultEditor widget: a ResultChoice whose selected row turns into inputs.

use serde_json::Value;

use crate::dom::attrs::StyleMap;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::element::code_source::CodeSource;
use crate::error::Result;
use crate::value::{display, Record};
use crate::widget::traits::Widget;
use crate::widgets::grid::{
    anchor_for, cell_text, clickable_header, no_rows, recover_selection, require_form,
    row_matches, selection_fields, selection_hook, ColumnMapping,
};

/// Dropdown editor configuration of one column.
#[derive(Debug, Clone, PartialEq)]
struct EntryCodes {
    codes: CodeSource,
    multiple: bool,
    size: usize,
}

/// In-place editing of the selected row.
///
/// Protected columns (the identifiers, plus any passed to
/// [`protect`](Self::protect)) stay read-only. Other columns of the selected
/// row become text inputs, or dropdowns when [`entry_codes`](Self::entry_codes)
/// was configured for them. Unselected rows show coded values by label.
#[derive(Debug, Clone, Default)]
pub struct ResultEditor {
    rows: Vec<Record>,
    identifiers: Vec<String>,
    selected: Option<Record>,
    mapping: ColumnMapping,
    alignments: Option<String>,
    protected: Vec<String>,
    entry_codes: Vec<(String, EntryCodes)>,
}

impl ResultEditor {
    pub fn new<I, S>(rows: Vec<Record>, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        Self {
            rows,
            protected: identifiers.clone(),
            identifiers,
            ..Self::default()
        }
    }

    pub fn selected(mut self, row: Record) -> Self {
        self.selected = Some(row);
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

    /// Mark more columns read-only.
    pub fn protect<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Edit `column` through a dropdown over `codes`. With `multiple`, the
    /// dropdown allows several selections and shows `size` rows.
    pub fn entry_codes(mut self, column: &str, codes: CodeSource, multiple: bool, size: usize) -> Self {
        let config = EntryCodes {
            codes,
            multiple,
            size,
        };
        match self.entry_codes.iter_mut().find(|(c, _)| c == column) {
            Some((_, existing)) => *existing = config,
            None => self.entry_codes.push((column.to_owned(), config)),
        }
        self
    }

    fn codes_for(&self, column: &str) -> Option<&EntryCodes> {
        self.entry_codes
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, codes)| codes)
    }

    fn is_protected(&self, column: &str) -> bool {
        self.protected.iter().any(|c| c == column)
    }

    fn edit_row(
        &self,
        dom: &mut Dom<'_>,
        row: NodeId,
        record: &Record,
        columns: &[(String, String)],
        form: &str,
    ) -> Result<()> {
        for (column, _) in columns {
            if self.is_protected(column) {
                dom.cell(row, &cell_text(record, column))?;
                continue;
            }
            let cell = dom.cell(row, "")?;
            let value = record.get(column).cloned();
            match self.codes_for(column) {
                Some(entry) => {
                    let dropdown = dom.dropdown(cell, column, entry.codes.clone(), value)?;
                    let dropdown = dom.dropdown_mut(dropdown)?;
                    dropdown.set_no_missing();
                    if entry.multiple {
                        dropdown.set_multiple(entry.size);
                    }
                }
                None => {
                    dom.text_input(cell, column, value, None)?;
                }
            }
        }

        let (name, label) = {
            let config = dom.config();
            (config.save_submit_name.clone(), config.save_submit_label.clone())
        };
        let cell = dom.cell(row, "")?;
        let save = dom.submit(cell, &name, &label)?;
        dom.node_mut(save)?
            .set_style(StyleMap::from([("width", "120px")]))
            .set_attr("onclick", selection_hook(form, &self.identifiers, record));
        Ok(())
    }

    fn show_row(&self, dom: &mut Dom<'_>, row: NodeId, record: &Record, columns: &[(String, String)]) -> Result<()> {
        for (column, _) in columns {
            let text = match (record.get(column), self.codes_for(column)) {
                (Some(value @ Value::Array(_)), _) => display(value),
                (Some(value), Some(entry)) => entry
                    .codes
                    .label_for(value)
                    .map(str::to_owned)
                    .unwrap_or_else(|| display(value)),
                (Some(value), None) => display(value),
                (None, _) => String::new(),
            };
            dom.cell(row, &text)?;
        }
        Ok(())
    }
}

impl Widget for ResultEditor {
    fn widget_type(&self) -> &'static str {
        "ResultEditor"
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
        let selection = match &self.selected {
            Some(row) if !row.is_empty() => row.clone(),
            _ => recover_selection(dom, &self.identifiers),
        };
        let selected_style = dom.config().selected_row_style()?;

        let grid_id = anchor_for(dom, host)?;
        let table = dom.table(host)?;
        if let Some(pattern) = &self.alignments {
            dom.set_column_alignments(table, pattern)?;
        }
        clickable_header(dom, table, &columns, grid_id.as_deref(), &form)?;

        for record in &self.rows {
            let row = dom.row(table)?;
            if row_matches(&self.identifiers, record, &selection) {
                tracing::debug!(widget = self.widget_type(), "editing selected row");
                dom.node_mut(row)?.set_style(selected_style.clone());
                self.edit_row(dom, row, record, &columns, &form)?;
            } else {
                dom.node_mut(row)?
                    .set_attr("onclick", selection_hook(&form, &self.identifiers, record));
                self.show_row(dom, row, record, &columns)?;
            }
        }

        let fields = self
            .identifiers
            .iter()
            .map(|column| (column.as_str(), cell_text(&selection, column)));
        selection_fields(dom, host, grid_id.as_deref(), fields)
    }
}
