//! Render configuration: sentinel codes, labels, hook targets, widget styling.
//!
//! Defaults are compiled in. A TOML file or string may override any subset of
//! keys; unknown keys are rejected so typos surface at load time.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::css::{parse_declarations, StyleParseError};
use crate::dom::attrs::StyleMap;

/// Errors from loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid selected_row_style: {0}")]
    Style(#[from] StyleParseError),
}

/// Configuration shared by every node of a [`Dom`](crate::dom::Dom).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Prefix of the hidden fields that carry a grid's selected row.
    pub selection_prefix: String,
    /// Code of the leading "no entry" dropdown option.
    pub missing_code: String,
    /// Label of the leading "no entry" dropdown option.
    pub no_entry_label: String,
    /// Placeholder rendered by grids that receive no rows.
    pub no_results_text: String,
    /// Script referenced by selectable grids.
    pub forms_script: String,
    /// Name and label of the editor's save button.
    pub save_submit_name: String,
    pub save_submit_label: String,
    /// Inline style applied to a grid's selected row.
    pub selected_row_style: String,
    /// Class of clickable grid header cells.
    pub headcell_class: String,
    /// Radio-set code that gets an extra line break before it.
    pub other_code: String,
    /// `lang` attribute of rendered documents.
    pub lang: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            selection_prefix: "selected_".to_owned(),
            missing_code: "999".to_owned(),
            no_entry_label: "no entry".to_owned(),
            no_results_text: "No results available!".to_owned(),
            forms_script: "/js/forms.js".to_owned(),
            save_submit_name: "save_result_editor".to_owned(),
            save_submit_label: "save".to_owned(),
            selected_row_style: "background: grey; color: white".to_owned(),
            headcell_class: "grid-headcell".to_owned(),
            other_code: "99".to_owned(),
            lang: "en".to_owned(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML, filling unspecified keys with defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check values that are parsed lazily elsewhere.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selected_row_style()?;
        Ok(())
    }

    /// The selected-row style as a map.
    pub fn selected_row_style(&self) -> Result<StyleMap, StyleParseError> {
        Ok(parse_declarations(&self.selected_row_style)?.into_iter().collect())
    }

    /// Set the selection prefix (builder).
    pub fn with_selection_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.selection_prefix = prefix.into();
        self
    }

    /// Set the dropdown sentinel code and label (builder).
    pub fn with_missing(mut self, code: impl Into<String>, label: impl Into<String>) -> Self {
        self.missing_code = code.into();
        self.no_entry_label = label.into();
        self
    }

    /// Set the "no results" placeholder (builder).
    pub fn with_no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = text.into();
        self
    }

    /// Set the forms script path (builder).
    pub fn with_forms_script(mut self, path: impl Into<String>) -> Self {
        self.forms_script = path.into();
        self
    }

    /// Set the selected-row style (builder). Validated when the config is used.
    pub fn with_selected_row_style(mut self, style: impl Into<String>) -> Self {
        self.selected_row_style = style.into();
        self
    }

    /// Set the document language (builder).
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}
