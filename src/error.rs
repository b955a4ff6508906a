//! Fatal errors and non-fatal warnings.

use crate::config::ConfigError;
use crate::css::StyleParseError;

/// Where a failure sits in the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Tree shape violations (duplicate identity under one parent).
    Structural,
    /// A widget whose state needs an enclosing identified form.
    Binding,
    /// Bad caller input: unknown nodes, malformed styles or configuration.
    Usage,
}

/// Fatal errors. Any of these aborts the current build/render pass.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("id '{id}' is already used by a sibling in the same container")]
    DuplicateId { id: String },
    #[error("{widget} must be placed inside a form that has a unique id")]
    MissingFormId { widget: &'static str },
    #[error("node cannot hold children: {kind}")]
    NotAContainer { kind: &'static str },
    #[error("node does not exist in this tree")]
    UnknownNode,
    #[error("expected a {expected} node, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Style(#[from] StyleParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MarkupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateId { .. } => ErrorCategory::Structural,
            Self::MissingFormId { .. } => ErrorCategory::Binding,
            Self::NotAContainer { .. }
            | Self::UnknownNode
            | Self::WrongKind { .. }
            | Self::Style(_)
            | Self::Config(_) => {
                ErrorCategory::Usage
            }
        }
    }
}

/// Non-fatal problems. Recorded on the tree and logged; rendering continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    /// A checkbox was given a falsy value; it renders but can never be checked.
    #[error("checkbox '{name}' needs a non-empty value; it will render unchecked")]
    EmptyCheckboxValue { name: String },
    /// A grid widget received no rows; a placeholder is rendered instead.
    #[error("{widget} received no rows; rendering placeholder")]
    NoRows { widget: &'static str },
}

pub type Result<T> = std::result::Result<T, MarkupError>;
