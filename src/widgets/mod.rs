//! Composite widgets: result grids and table helpers.

pub mod grid;
pub mod result_choice;
pub mod result_editor;
pub mod result_list;
pub mod result_multi_choice;
pub mod table;

pub use grid::ColumnMapping;
pub use result_choice::ResultChoice;
pub use result_editor::ResultEditor;
pub use result_list::ResultList;
pub use result_multi_choice::ResultMultiChoice;
