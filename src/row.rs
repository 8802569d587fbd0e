//! Preference rows
//!
//! A row is one visible entry on a preference screen: a preference key, a
//! title and a kind-specific spec carrying the attributes an editor needs to
//! seed its state (limits, selection labels, display fallbacks). Rows are
//! plain descriptions; rendering them is the host's job.

use crate::model::{Time, TimePeriod};

/// Identifier the controller assigns when a row is added to a screen.
pub type RowId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    /// Preference store key this row edits.
    pub key: String,
    pub title: String,
    pub spec: RowSpec,
}

/// Classifier for text input rows, forwarded to the host UI so it can pick a
/// suitable on-screen keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Phone,
    Email,
    Password,
}

impl InputType {
    pub fn id(self) -> i64 {
        match self {
            InputType::Text => 0,
            InputType::Number => 1,
            InputType::Phone => 2,
            InputType::Email => 3,
            InputType::Password => 4,
        }
    }

    /// Unknown ids fall back to plain text input.
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => InputType::Number,
            2 => InputType::Phone,
            3 => InputType::Email,
            4 => InputType::Password,
            _ => InputType::Text,
        }
    }
}

/// How a single-selection list confirms a choice: with OK/cancel buttons, or
/// immediately when an item is tapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    OkCancel,
    ItemClick,
}

impl SelectionMode {
    pub fn id(self) -> i64 {
        match self {
            SelectionMode::OkCancel => 0,
            SelectionMode::ItemClick => 1,
        }
    }

    pub fn from_id(id: i64) -> Self {
        match id {
            1 => SelectionMode::ItemClick,
            _ => SelectionMode::OkCancel,
        }
    }
}

/// The store values behind a selection list, parallel to its labels.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionValues {
    Int(Vec<i64>),
    Str(Vec<String>),
}

impl SelectionValues {
    pub fn len(&self) -> usize {
        match self {
            SelectionValues::Int(v) => v.len(),
            SelectionValues::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Kind-specific row attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSpec {
    Text {
        hint: Option<String>,
        input_type: InputType,
        /// Maximum input length; `i64::MAX` means unbounded.
        max_length: i64,
    },
    Number {
        default_value: i64,
        /// `i64::MIN` means unbounded below.
        min_value: i64,
        /// `i64::MAX` means unbounded above.
        max_value: i64,
        unit: Option<String>,
        hint: Option<String>,
    },
    SingleSelection {
        labels: Vec<String>,
        values: SelectionValues,
        mode: SelectionMode,
    },
    MultiSelection {
        labels: Vec<String>,
        values: SelectionValues,
    },
    Time {
        /// Seed for the editor when the key is unset or unparseable.
        default_time: Time,
        use_24_hour: bool,
        /// Display text when the key is unset or unparseable.
        missing_text: Option<String>,
    },
    TimePeriod {
        default_period: TimePeriod,
        use_24_hour: bool,
        missing_text: Option<String>,
    },
    Toggle,
}

impl RowSpec {
    /// Plain text row with no hint or length limit.
    pub fn text() -> Self {
        RowSpec::Text {
            hint: None,
            input_type: InputType::Text,
            max_length: i64::MAX,
        }
    }

    /// Unbounded number row with no unit.
    pub fn number(default_value: i64) -> Self {
        RowSpec::Number {
            default_value,
            min_value: i64::MIN,
            max_value: i64::MAX,
            unit: None,
            hint: None,
        }
    }

    pub fn time(default_time: Time, use_24_hour: bool) -> Self {
        RowSpec::Time {
            default_time,
            use_24_hour,
            missing_text: None,
        }
    }

    pub fn time_period(default_period: TimePeriod, use_24_hour: bool) -> Self {
        RowSpec::TimePeriod {
            default_period,
            use_24_hour,
            missing_text: None,
        }
    }
}
