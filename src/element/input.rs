//! Input elements and the value-resolution protocol.
//!
//! An input is bound to a `name` and optionally to an explicit value. When it
//! is attached to a container its displayed value is resolved once:
//!
//! 1. nothing bound and a scope available: `scope[name]` if truthy, otherwise missing
//! 2. bound to a record containing `name`: `record[name]`
//! 3. bound to a record without `name`: missing (the record itself is discarded)
//! 4. bound to anything else (scalars, lists): that value unchanged
//!
//! The outcome is three-way, see [`Resolved`].

use serde_json::Value;

use crate::element::code_source::CodeSource;
use crate::element::dropdown::Dropdown;
use crate::scope::Scope;
use crate::value::{contains_loosely, is_truthy, loosely_equals, Record};

/// What an input was bound to at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Binding {
    /// No explicit value; the scope decides.
    #[default]
    Unbound,
    /// A scalar, list, or record to look the input's name up in.
    Value(Value),
}

impl Binding {
    /// Bind to a record; resolution looks up the input's own name in it.
    pub fn record(record: Record) -> Self {
        Binding::Value(Value::Object(record))
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Binding::Unbound,
            other => Binding::Value(other),
        }
    }
}

impl From<Option<Value>> for Binding {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Binding::Unbound, Binding::from)
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Binding::Value(Value::String(value.to_owned()))
    }
}

impl From<String> for Binding {
    fn from(value: String) -> Self {
        Binding::Value(Value::String(value))
    }
}

impl From<Record> for Binding {
    fn from(record: Record) -> Self {
        Binding::record(record)
    }
}

/// Outcome of value resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Resolved {
    /// Nothing bound and no scope to ask.
    #[default]
    Unbound,
    /// A value was found.
    Present(Value),
    /// A source was consulted but held nothing for this name.
    Missing,
}

impl Resolved {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Resolved::Present(value) => Some(value),
            _ => None,
        }
    }
}

/// Run the resolution protocol for `name`.
pub fn resolve(binding: &Binding, name: &str, scope: Option<&dyn Scope>) -> Resolved {
    match binding {
        Binding::Unbound | Binding::Value(Value::Null) => match scope {
            Some(scope) => match scope.get(name) {
                Some(value) if is_truthy(&value) => Resolved::Present(value),
                _ => Resolved::Missing,
            },
            None => Resolved::Unbound,
        },
        Binding::Value(Value::Object(record)) => match record.get(name) {
            Some(value) if !value.is_null() => Resolved::Present(value.clone()),
            _ => Resolved::Missing,
        },
        Binding::Value(value) => Resolved::Present(value.clone()),
    }
}

/// Kind-specific part of an input.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Text { label: Option<String> },
    Password { label: Option<String> },
    Textarea { label: Option<String> },
    Hidden,
    Submit,
    Button,
    Checkbox {
        value: Value,
        label: Option<String>,
        label_class: Option<String>,
        /// False when constructed with a falsy value; such a box never checks.
        valid: bool,
    },
    Radio {
        value: Value,
        label: Option<String>,
        label_class: Option<String>,
    },
    Dropdown(Dropdown),
}

impl Control {
    pub fn name(&self) -> &'static str {
        match self {
            Control::Text { .. } => "TextInput",
            Control::Password { .. } => "Password",
            Control::Textarea { .. } => "Textarea",
            Control::Hidden => "Hidden",
            Control::Submit => "Submit",
            Control::Button => "Button",
            Control::Checkbox { .. } => "Checkbox",
            Control::Radio { .. } => "Radio",
            Control::Dropdown(_) => "Dropdown",
        }
    }
}

/// A leaf element bound to a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub name: String,
    pub binding: Binding,
    pub resolved: Resolved,
    pub control: Control,
}

impl Input {
    pub fn new(name: impl Into<String>, binding: impl Into<Binding>, control: Control) -> Self {
        Self {
            name: name.into(),
            binding: binding.into(),
            resolved: Resolved::Unbound,
            control,
        }
    }

    /// Resolve against the binding and, if unbound, the scope.
    pub fn resolve(&mut self, scope: Option<&dyn Scope>) {
        self.resolved = resolve(&self.binding, &self.name, scope);
    }

    pub fn value(&self) -> Option<&Value> {
        self.resolved.value()
    }

    /// For checkboxes and radios: whether the resolved value selects this one.
    ///
    /// A resolved list checks the box when it contains the box's value.
    pub fn is_checked(&self) -> bool {
        let own = match &self.control {
            Control::Checkbox { valid: false, .. } => return false,
            Control::Checkbox { value, .. } | Control::Radio { value, .. } => value,
            _ => return false,
        };
        match self.value() {
            Some(Value::Array(items)) => contains_loosely(items, own),
            Some(resolved) => loosely_equals(resolved, own),
            None => false,
        }
    }

    pub fn as_dropdown(&self) -> Option<&Dropdown> {
        match &self.control {
            Control::Dropdown(dropdown) => Some(dropdown),
            _ => None,
        }
    }

    pub fn as_dropdown_mut(&mut self) -> Option<&mut Dropdown> {
        match &mut self.control {
            Control::Dropdown(dropdown) => Some(dropdown),
            _ => None,
        }
    }

    /// Convenience for dropdown construction.
    pub fn dropdown(
        name: impl Into<String>,
        codes: CodeSource,
        binding: impl Into<Binding>,
        missing_code: impl Into<String>,
        no_entry_label: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            binding,
            Control::Dropdown(Dropdown::new(codes, missing_code, no_entry_label)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::RequestScope;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn record_containing_name() {
        let binding = Binding::record(record(json!({"x": 5})));
        assert_eq!(resolve(&binding, "x", None), Resolved::Present(json!(5)));
    }

    #[test]
    fn record_without_name_is_missing() {
        let binding = Binding::record(record(json!({"y": 5})));
        assert_eq!(resolve(&binding, "x", None), Resolved::Missing);
    }

    #[test]
    fn record_with_null_entry_is_missing() {
        let binding = Binding::record(record(json!({"x": null})));
        assert_eq!(resolve(&binding, "x", None), Resolved::Missing);
    }

    #[test]
    fn unbound_reads_scope() {
        let scope = RequestScope::new().with("x", 7);
        assert_eq!(
            resolve(&Binding::Unbound, "x", Some(&scope)),
            Resolved::Present(json!(7))
        );
    }

    #[test]
    fn unbound_falsy_scope_value_is_missing() {
        let scope = RequestScope::new().with("x", "");
        assert_eq!(resolve(&Binding::Unbound, "x", Some(&scope)), Resolved::Missing);
        assert_eq!(resolve(&Binding::Unbound, "y", Some(&scope)), Resolved::Missing);
    }

    #[test]
    fn unbound_without_scope() {
        assert_eq!(resolve(&Binding::Unbound, "x", None), Resolved::Unbound);
    }

    #[test]
    fn scalar_passes_through() {
        let scope = RequestScope::new().with("x", 7);
        let binding = Binding::from("literal");
        assert_eq!(
            resolve(&binding, "x", Some(&scope)),
            Resolved::Present(json!("literal"))
        );
    }

    #[test]
    fn list_passes_through() {
        let binding = Binding::from(json!(["1", "2"]));
        assert_eq!(resolve(&binding, "x", None), Resolved::Present(json!(["1", "2"])));
    }

    #[test]
    fn null_binding_is_unbound() {
        assert_eq!(Binding::from(Value::Null), Binding::Unbound);
        assert_eq!(Binding::from(None::<Value>), Binding::Unbound);
    }

    #[test]
    fn radio_checked_by_loose_match() {
        let mut radio = Input::new(
            "color",
            json!(2),
            Control::Radio {
                value: json!("2"),
                label: None,
                label_class: None,
            },
        );
        radio.resolve(None);
        assert!(radio.is_checked());
    }

    #[test]
    fn invalid_checkbox_never_checks() {
        let mut checkbox = Input::new(
            "agree",
            json!(""),
            Control::Checkbox {
                value: json!(""),
                label: None,
                label_class: None,
                valid: false,
            },
        );
        checkbox.resolve(None);
        assert!(!checkbox.is_checked());
    }
}
