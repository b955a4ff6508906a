//! Rendering pipeline: tree to markup string, plus escaping.

pub mod escape;
pub mod html;

pub use escape::escape_html;
pub use html::attribute_string;
