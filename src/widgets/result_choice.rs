//! ResultChoice widget: a result table whose rows can be clicked to select one.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;
use crate::value::Record;
use crate::widget::traits::Widget;
use crate::widgets::grid::{
    anchor_for, cell_text, clickable_header, no_rows, recover_selection, require_form,
    row_matches, selection_fields, selection_hook, ColumnMapping,
};

/// Single-row selection over tabular data.
///
/// The selection round-trips through hidden fields named
/// `selection_prefix + identifier` in the enclosing form, which must have an
/// id. When no selected row is given, it is recovered from those fields in
/// the scope.
#[derive(Debug, Clone, Default)]
pub struct ResultChoice {
    rows: Vec<Record>,
    identifiers: Vec<String>,
    selected: Option<Record>,
    mapping: ColumnMapping,
    alignments: Option<String>,
}

impl ResultChoice {
    pub fn new<I, S>(rows: Vec<Record>, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows,
            identifiers: identifiers.into_iter().map(Into::into).collect(),
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

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

impl Widget for ResultChoice {
    fn widget_type(&self) -> &'static str {
        "ResultChoice"
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
            let node = dom.node_mut(row)?;
            node.set_attr("onclick", selection_hook(&form, &self.identifiers, record));
            if row_matches(&self.identifiers, record, &selection) {
                node.set_style(selected_style.clone());
            }
            for (column, _) in &columns {
                dom.cell(row, &cell_text(record, column))?;
            }
        }

        let fields = self
            .identifiers
            .iter()
            .map(|column| (column.as_str(), cell_text(&selection, column)));
        selection_fields(dom, host, grid_id.as_deref(), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupError;
    use crate::scope::RequestScope;
    use crate::widget::traits::WidgetExt;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn people() -> Vec<Record> {
        vec![
            record(json!({"id": 1, "name": "Ann"})),
            record(json!({"id": 2, "name": "Bob"})),
        ]
    }

    #[test]
    fn outside_a_form_is_a_binding_error() {
        let mut dom = Dom::new();
        let err = dom
            .add_widget(dom.root(), &ResultChoice::new(people(), ["id"]))
            .unwrap_err();
        assert!(matches!(err, MarkupError::MissingFormId { widget: "ResultChoice" }));
    }

    #[test]
    fn selected_row_is_marked_and_round_trips() {
        let mut dom = Dom::new();
        let form = dom.form(dom.root(), Some("f"), None).unwrap();
        let choice = ResultChoice::new(people(), ["id"])
            .selected(record(json!({"id": 2})))
            .with_id("people");
        dom.add_widget(form, &choice).unwrap();
        let out = dom.render_fragment();

        assert!(out.contains("<a id=\"people\" name=\"people\"></a>"));
        assert!(out.contains(
            "<tr onclick=\"entryChoiceSetSelection('f', {'id':'2'});\" style=\"background:grey;color:white\">"
        ));
        assert!(out.contains("<tr onclick=\"entryChoiceSetSelection('f', {'id':'1'});\">"));
        assert!(out.contains(
            "<th onclick=\"document.getElementById('people_selectedColumn').value='name';document.forms['f'].action='#people';document.forms['f'].submit()\" class=\"grid-headcell\">name</th>"
        ));
        assert!(out.contains(
            "<input type=\"hidden\" id=\"people_selectedColumn\" name=\"people_selectedColumn\" value=\"\" />"
        ));
        assert!(out.contains(
            "<input type=\"hidden\" id=\"selected_id\" name=\"selected_id\" value=\"2\" />"
        ));
        assert!(out.contains("<script src=\"/js/forms.js\"></script>"));
    }

    #[test]
    fn selection_recovered_from_scope() {
        let scope = RequestScope::new()
            .with("selected_id", "1")
            .with("_selectedColumn", "name");
        let mut dom = Dom::with_scope(&scope);
        let form = dom.form(dom.root(), Some("f"), None).unwrap();
        dom.add_widget(form, &ResultChoice::new(people(), ["id"]))
            .unwrap();
        let out = dom.render_fragment();
        assert_eq!(out.matches("style=\"background:grey;color:white\"").count(), 1);
        assert!(out.contains("{'id':'1'});\" style="));
        assert!(out.contains("name=\"_selectedColumn\" value=\"name\""));
        assert!(out.contains("name=\"selected_id\" value=\"1\""));
    }

    #[test]
    fn empty_rows_still_need_a_form() {
        let mut dom = Dom::new();
        assert!(dom
            .add_widget(dom.root(), &ResultChoice::new(Vec::new(), ["id"]))
            .is_err());

        let form = dom.form(dom.root(), Some("f"), None).unwrap();
        dom.add_widget(form, &ResultChoice::new(Vec::new(), ["id"]))
            .unwrap();
        assert!(dom.render_fragment().contains("No results available!"));
    }
}
