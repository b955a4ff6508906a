//! Dropdown (select) state and option selection rules.

use serde_json::Value;

use crate::element::code_source::CodeSource;
use crate::value::{contains_loosely, loosely_equals};

/// A `<select>` element's configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    pub codes: CodeSource,
    /// Visible rows when multi-select is enabled.
    pub multiple: Option<usize>,
    /// Suppress the leading "no entry" option.
    pub no_missing: bool,
    pub missing_code: String,
    pub no_entry_label: String,
}

impl Dropdown {
    pub fn new(
        codes: CodeSource,
        missing_code: impl Into<String>,
        no_entry_label: impl Into<String>,
    ) -> Self {
        Self {
            codes,
            multiple: None,
            no_missing: false,
            missing_code: missing_code.into(),
            no_entry_label: no_entry_label.into(),
        }
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple.is_some()
    }

    /// Drop the leading "no entry" option.
    pub fn set_no_missing(&mut self) -> &mut Self {
        self.no_missing = true;
        self
    }

    /// Override the sentinel code.
    pub fn set_missing(&mut self, code: impl Into<String>) -> &mut Self {
        self.missing_code = code.into();
        self
    }

    /// Allow several selections, showing `size` rows.
    pub fn set_multiple(&mut self, size: usize) -> &mut Self {
        self.multiple = Some(size);
        self
    }

    /// The value options are compared against: the resolved value, or the
    /// sentinel code when nothing (or an empty value) resolved.
    pub fn effective_value(&self, resolved: Option<&Value>) -> Value {
        match resolved {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                Value::String(self.missing_code.clone())
            }
            Some(Value::String(s)) if s.is_empty() => Value::String(self.missing_code.clone()),
            Some(value) => value.clone(),
        }
    }

    /// Whether option `code` is selected under the effective value.
    ///
    /// Lists select by membership, scalars by loose equality.
    pub fn is_selected(&self, code: &str, effective: &Value) -> bool {
        let code = Value::String(code.to_owned());
        match effective {
            Value::Array(items) => contains_loosely(items, &code),
            scalar => loosely_equals(scalar, &code),
        }
    }
}
