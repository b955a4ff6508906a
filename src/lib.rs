//! # gilt-markup
//!
//! A server-side HTML tree builder with scope-bound form inputs and stateful
//! result grids.
//!
//! Pages are built as a retained tree of typed elements, then serialized in one
//! pass to indented markup. Inputs resolve their value from an explicit binding
//! or from a request [`Scope`](scope::Scope); grid widgets turn rows of records
//! into tables whose selection survives a form round-trip.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed tree with keyed children, factories and queries
//! - **[`element`]**: Closed set of element kinds, inputs, dropdowns, code sources
//! - **[`render`]**: Pure, repeatable serialization to markup
//! - **[`css`]**: Tokenizer and parser for inline style declarations
//! - **[`widget`]**: The trait composite widgets implement
//! - **[`widgets`]**: ResultList, ResultChoice, ResultMultiChoice, ResultEditor
//! - **[`document`]**: Full page around a tree
//! - **[`config`]**: Render configuration, loadable from TOML
//!
//! ```ignore
//! use gilt_markup::prelude::*;
//!
//! let mut dom = Dom::new();
//! let form = dom.form(dom.root(), Some("search"), None)?;
//! dom.text_input(form, "q", Binding::Unbound, Some("Query"))?;
//! dom.submit(form, "go", "Search")?;
//! println!("{}", dom.render());
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod scope;
pub mod value;

// Core systems
pub mod css;
pub mod dom;
pub mod element;

// Widget system
pub mod widget;
pub mod widgets;

// Rendering
pub mod document;
pub mod render;

pub mod testing;

pub use config::RenderConfig;
pub use document::Document;
pub use dom::{Dom, NodeData, NodeId};
pub use error::{MarkupError, Result, Warning};
pub use scope::{RequestScope, Scope};

/// The types most builders need.
pub mod prelude {
    pub use crate::config::RenderConfig;
    pub use crate::document::Document;
    pub use crate::dom::{AttrMap, Dom, NodeData, NodeId, StyleMap};
    pub use crate::element::{Binding, CodeSource};
    pub use crate::error::{MarkupError, Result, Warning};
    pub use crate::scope::{RequestScope, Scope};
    pub use crate::value::Record;
    pub use crate::widget::{Widget, WidgetExt};
    pub use crate::widgets::{ColumnMapping, ResultChoice, ResultEditor, ResultList, ResultMultiChoice};
}
