//! Code sources: ordered `code -> label` lists feeding dropdowns, radio sets
//! and the grid editor.

use serde_json::Value;

use crate::value::{display, loosely_equals};

/// One entry of a [`CodeSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeEntry {
    Code { code: String, label: String },
    /// An option group holding its own codes.
    Group { label: String, codes: Vec<(String, String)> },
}

/// Ordered mapping from stored code to display label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSource {
    entries: Vec<CodeEntry>,
}

impl CodeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels that double as their own codes.
    pub fn simple<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                CodeEntry::Code {
                    code: label.clone(),
                    label,
                }
            })
            .collect();
        Self { entries }
    }

    /// Explicit `(code, label)` pairs.
    pub fn pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(code, label)| CodeEntry::Code {
                code: code.into(),
                label: label.into(),
            })
            .collect();
        Self { entries }
    }

    /// Add a single code (builder).
    pub fn with_code(mut self, code: impl Into<String>, label: impl Into<String>) -> Self {
        self.entries.push(CodeEntry::Code {
            code: code.into(),
            label: label.into(),
        });
        self
    }

    /// Add an option group (builder).
    pub fn with_group<I, K, V>(mut self, label: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.push(CodeEntry::Group {
            label: label.into(),
            codes: codes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        self
    }

    /// Build from JSON: an array is a simple source, an object maps codes to
    /// labels and nested objects become option groups. Other values yield an
    /// empty source.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::simple(items.iter().map(display)),
            Value::Object(map) => {
                let entries = map
                    .iter()
                    .map(|(code, inner)| match inner {
                        Value::Object(group) => CodeEntry::Group {
                            label: code.clone(),
                            codes: group.iter().map(|(k, v)| (k.clone(), display(v))).collect(),
                        },
                        other => CodeEntry::Code {
                            code: code.clone(),
                            label: display(other),
                        },
                    })
                    .collect();
                Self { entries }
            }
            _ => Self::default(),
        }
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `(code, label)` pair, flattening groups, in order.
    pub fn codes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|entry| {
            let pairs: Vec<(&str, &str)> = match entry {
                CodeEntry::Code { code, label } => vec![(code.as_str(), label.as_str())],
                CodeEntry::Group { codes, .. } => codes
                    .iter()
                    .map(|(c, l)| (c.as_str(), l.as_str()))
                    .collect(),
            };
            pairs
        })
    }

    /// The label stored for `code`, compared loosely (`2` finds `"2"`).
    pub fn label_for(&self, code: &Value) -> Option<&str> {
        self.codes()
            .find(|(c, _)| loosely_equals(&Value::String((*c).to_owned()), code))
            .map(|(_, label)| label)
    }
}
