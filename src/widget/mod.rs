//! Widget system: the trait composites implement and the id/class builder.

pub mod traits;

pub use traits::{Widget, WidgetBuilder, WidgetExt};
