//! Element kinds: containers, inputs, dropdowns and their code sources.

pub mod code_source;
pub mod dropdown;
pub mod input;
pub mod kind;

pub use code_source::{CodeEntry, CodeSource};
pub use dropdown::Dropdown;
pub use input::{resolve, Binding, Control, Input, Resolved};
pub use kind::{Alignment, ElementKind, Link, Table, TextTag};
