//! Inline style strings: tokenizer and declaration parser.

pub mod declarations;
pub mod tokenizer;

pub use declarations::{parse_declarations, StyleParseError};
