//! Table helpers: whole rows from cell texts, and a quick result-set dump.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;
use crate::value::Record;
use crate::widgets::grid::{cell_text, grouped_cell, no_rows, RunLength};

impl Dom<'_> {
    /// Append a row of `td` cells to `table`. Returns the row.
    pub fn fill_row<S: AsRef<str>>(&mut self, table: NodeId, cells: &[S]) -> Result<NodeId> {
        let row = self.row(table)?;
        for text in cells {
            self.cell(row, text.as_ref())?;
        }
        Ok(row)
    }

    /// Append a row of `th` cells to `table`. Returns the row.
    pub fn fill_header_row<S: AsRef<str>>(&mut self, table: NodeId, cells: &[S]) -> Result<NodeId> {
        let row = self.row(table)?;
        for text in cells {
            self.head_cell(row, text.as_ref())?;
        }
        Ok(row)
    }

    /// Dump `rows` into `table`: a header of the first row's keys, then one
    /// row per record with repeats in the first column blanked. With no rows
    /// the "no results" placeholder is added instead.
    pub fn add_result_set(&mut self, table: NodeId, rows: &[Record]) -> Result<()> {
        let Some(first) = rows.first() else {
            return no_rows(self, table, "ResultSet");
        };
        let keys: Vec<String> = first.keys().cloned().collect();
        self.fill_header_row(table, &keys)?;

        let mut run = RunLength::default();
        for record in rows {
            let row = self.row(table)?;
            for (index, key) in keys.iter().enumerate() {
                let grouped = index == 0
                    && run.repeats(record.get(key).unwrap_or(&serde_json::Value::Null));
                grouped_cell(self, row, &cell_text(record, key), grouped)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::tree::Child;
    use crate::error::Warning;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn fill_rows() {
        let mut dom = Dom::new();
        let table = dom.table(dom.root()).unwrap();
        dom.fill_header_row(table, &["A", "B"]).unwrap();
        let row = dom.fill_row(table, &["1", "2"]).unwrap();
        assert_eq!(dom.child_nodes(row).len(), 2);
        assert_eq!(
            dom.render_fragment(),
            "\t<table>\n\t\t<tr>\n\t\t\t<th>A</th>\n\t\t\t<th>B</th>\n\t\t</tr>\n\t\t<tr>\n\t\t\t<td>1</td>\n\t\t\t<td>2</td>\n\t\t</tr>\n\t</table>\n"
        );
    }

    #[test]
    fn result_set_groups_first_column() {
        let rows: Vec<Record> = [json!({"k": "a", "v": 1}), json!({"k": "a", "v": 2})]
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        let mut dom = Dom::new();
        let table = dom.table(dom.root()).unwrap();
        dom.add_result_set(table, &rows).unwrap();
        let out = dom.render_fragment();
        assert!(out.contains("<th>k</th>"));
        assert_eq!(out.matches("<td>a</td>").count(), 1);
        assert_eq!(out.matches("<td>&nbsp;</td>").count(), 1);
    }

    #[test]
    fn empty_result_set() {
        let mut dom = Dom::new();
        let table = dom.table(dom.root()).unwrap();
        dom.add_result_set(table, &[]).unwrap();
        assert_eq!(
            dom.children(table),
            &[Child::Text("No results available!".into())]
        );
        assert_eq!(dom.warnings(), &[Warning::NoRows { widget: "ResultSet" }]);
    }
}
