//! ResultList widget: tabular rows as a read-only table.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;
use crate::value::Record;
use crate::widget::traits::Widget;
use crate::widgets::grid::{cell_text, grouped_cell, no_rows, ColumnMapping, RunLength};

/// A table with one header row and one body row per record.
///
/// Repeated text in the first column is blanked so runs read as groups.
///
/// # Examples
///
/// ```ignore
/// let list = ResultList::new(rows)
///     .mapping(ColumnMapping::from([("name", "Name"), ("city", "City")]))
///     .column_alignments("lr");
/// dom.add_widget(parent, &list)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    rows: Vec<Record>,
    mapping: ColumnMapping,
    show_all: bool,
    alignments: Option<String>,
}

impl ResultList {
    pub fn new(rows: Vec<Record>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Show only (and label) the mapped columns, in mapping order.
    pub fn mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Show every column of the first row; the mapping only supplies labels.
    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    /// Alignment pattern over `{l, c, r}` for the table's columns.
    pub fn column_alignments(mut self, pattern: &str) -> Self {
        self.alignments = Some(pattern.to_owned());
        self
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }
}

impl Widget for ResultList {
    fn widget_type(&self) -> &'static str {
        "ResultList"
    }

    fn build(&self, dom: &mut Dom<'_>, host: NodeId) -> Result<()> {
        if self.rows.is_empty() {
            return no_rows(dom, host, self.widget_type());
        }
        let columns = if self.show_all {
            self.mapping.resolve_all(&self.rows)
        } else {
            self.mapping.resolve(&self.rows)
        };
        tracing::debug!(rows = self.rows.len(), columns = columns.len(), "result list");

        let table = dom.table(host)?;
        if let Some(pattern) = &self.alignments {
            dom.set_column_alignments(table, pattern)?;
        }
        let header = dom.row(table)?;
        for (_, label) in &columns {
            dom.head_cell(header, label)?;
        }

        let mut run = RunLength::default();
        for record in &self.rows {
            let row = dom.row(table)?;
            for (index, (column, _)) in columns.iter().enumerate() {
                let grouped = index == 0
                    && run.repeats(record.get(column).unwrap_or(&serde_json::Value::Null));
                grouped_cell(dom, row, &cell_text(record, column), grouped)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Warning;
    use crate::widget::traits::WidgetExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn rows(value: Value) -> Vec<Record> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn renders_header_and_rows_with_grouping() {
        let mut dom = Dom::new();
        let list = ResultList::new(rows(json!([
            {"city": "Bonn", "n": 1},
            {"city": "Bonn", "n": 2},
            {"city": "Köln", "n": 3}
        ])))
        .mapping(ColumnMapping::from([("city", "City"), ("n", "No.")]));
        dom.add_widget(dom.root(), &list).unwrap();

        let expected = "\t\t<table>\n\
            \t\t\t<tr>\n\
            \t\t\t\t<th>City</th>\n\
            \t\t\t\t<th>No.</th>\n\
            \t\t\t</tr>\n\
            \t\t\t<tr>\n\
            \t\t\t\t<td>Bonn</td>\n\
            \t\t\t\t<td>1</td>\n\
            \t\t\t</tr>\n\
            \t\t\t<tr>\n\
            \t\t\t\t<td>&nbsp;</td>\n\
            \t\t\t\t<td>2</td>\n\
            \t\t\t</tr>\n\
            \t\t\t<tr>\n\
            \t\t\t\t<td>Köln</td>\n\
            \t\t\t\t<td>3</td>\n\
            \t\t\t</tr>\n\
            \t\t</table>\n";
        assert_eq!(dom.render_fragment(), expected);
    }

    #[test]
    fn numeric_first_column_is_not_grouped() {
        let mut dom = Dom::new();
        let list = ResultList::new(rows(json!([{"n": 1}, {"n": 1}])));
        dom.add_widget(dom.root(), &list).unwrap();
        assert_eq!(dom.render_fragment().matches("<td>1</td>").count(), 2);
    }

    #[test]
    fn values_are_escaped() {
        let mut dom = Dom::new();
        let list = ResultList::new(rows(json!([{"v": "<b>"}])));
        dom.add_widget(dom.root(), &list).unwrap();
        assert!(dom.render_fragment().contains("<td>&lt;b&gt;</td>"));
    }

    #[test]
    fn show_all_keeps_unmapped_columns() {
        let mut dom = Dom::new();
        let list = ResultList::new(rows(json!([{"id": 1, "name": "x"}])))
            .mapping(ColumnMapping::from([("name", "Name")]))
            .show_all(true);
        dom.add_widget(dom.root(), &list).unwrap();
        let out = dom.render_fragment();
        assert!(out.contains("<th>id</th>"));
        assert!(out.contains("<th>Name</th>"));
    }

    #[test]
    fn alignments_reach_every_row() {
        let mut dom = Dom::new();
        let list = ResultList::new(rows(json!([{"a": "x", "b": 1}, {"a": "y", "b": 2}])))
            .column_alignments("lr");
        dom.add_widget(dom.root(), &list).unwrap();
        let out = dom.render_fragment();
        assert_eq!(out.matches("style=\"text-align:right\"").count(), 3);
    }

    #[test]
    fn no_rows_renders_placeholder() {
        let mut dom = Dom::new();
        dom.add_widget(dom.root(), &ResultList::new(Vec::new()).with_id("r"))
            .unwrap();
        assert_eq!(dom.render_fragment(), "\t\tNo results available!\n");
        assert_eq!(dom.warnings(), &[Warning::NoRows { widget: "ResultList" }]);
    }
}
