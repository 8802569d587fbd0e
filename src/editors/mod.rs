//! Built-in editors, one per row kind.

pub mod list;
pub mod number;
pub mod text;
pub mod time;
pub mod toggle;

pub use list::{MultiSelectionEditor, SingleSelectionEditor};
pub use number::NumberEditor;
pub use text::TextEditor;
pub use time::{TimeEditor, TimePeriodEditor};
pub use toggle::ToggleEditor;
