//! Serializable editor state
//!
//! Every editor freezes its working state into a [`Bundle`] before its UI is
//! launched, and reconstructs it after the host process may have been torn
//! down and recreated. States are a closed set of kinds sharing the base
//! fields (target preference key, display title), selected by an explicit
//! discriminator in the serialized map.
//!
//! Reconstruction is lenient where a documented default exists (absent
//! optional keys fall back) and strict where it does not: a missing or
//! unknown discriminator is an error.

use crate::bundle::{Bundle, BundleError};
use crate::model::{Time, TimePeriod};
use crate::row::{InputType, SelectionMode, SelectionValues};

/// Base field: target preference key.
pub const KEY_KEY: &str = "key";
/// Base field: display title for the editor UI.
pub const KEY_TITLE: &str = "title";
/// Kind discriminator.
pub const KEY_KIND: &str = "kind";

pub const KEY_VALUE: &str = "value";
pub const KEY_HINT: &str = "hint";
pub const KEY_INPUT_TYPE: &str = "inputType";
pub const KEY_MAX_LENGTH: &str = "maxLength";
pub const KEY_DEFAULT_VALUE: &str = "def";
pub const KEY_MIN_VALUE: &str = "min";
pub const KEY_MAX_VALUE: &str = "max";
pub const KEY_UNIT: &str = "unit";
pub const KEY_LABELS: &str = "labels";
pub const KEY_VALUES: &str = "values";
pub const KEY_SELECTED_INDEX: &str = "selIdx";
pub const KEY_SINGLE_SELECTION_TYPE: &str = "singleSelType";
pub const KEY_SELECTED_INDICES: &str = "selectedIndices";
pub const KEY_TIME: &str = "time";
pub const KEY_TIME_FOR_NULL: &str = "timeForNull";
pub const KEY_TIME_PERIOD: &str = "timePeriod";
pub const KEY_TIME_PERIOD_FOR_NULL: &str = "timePeriodForNull";
pub const KEY_IS_24_HOUR_VIEW: &str = "is24HourView";

/// Selected-index sentinel for "nothing selected".
pub const NO_SELECTION: i64 = -1;

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub key: Option<String>,
    pub title: Option<String>,
    pub kind: StateKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateKind {
    Text(TextState),
    Number(NumberState),
    SingleSelection(SingleSelectionState),
    MultiSelection(MultiSelectionState),
    Time(TimeState),
    TimePeriod(TimePeriodState),
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    /// Current value the editor starts from.
    pub value: String,
    pub hint: Option<String>,
    pub input_type: InputType,
    /// `i64::MAX` means unbounded.
    pub max_length: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberState {
    pub value: i64,
    pub default_value: i64,
    pub min_value: i64,
    pub max_value: i64,
    pub unit: Option<String>,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleSelectionState {
    pub labels: Vec<String>,
    pub values: SelectionValues,
    /// Index into `labels`, or [`NO_SELECTION`].
    pub selected_index: i64,
    pub mode: SelectionMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelectionState {
    pub labels: Vec<String>,
    pub values: SelectionValues,
    /// One flag per label.
    pub checked: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeState {
    /// Current value, if the preference held a parseable one.
    pub time: Option<Time>,
    /// Seed shown when `time` is `None`.
    pub time_for_missing: Time,
    pub use_24_hour: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimePeriodState {
    pub period: Option<TimePeriod>,
    pub period_for_missing: TimePeriod,
    pub use_24_hour: bool,
}

impl EditorState {
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            StateKind::Text(_) => "text",
            StateKind::Number(_) => "number",
            StateKind::SingleSelection(_) => "singleSelection",
            StateKind::MultiSelection(_) => "multiSelection",
            StateKind::Time(_) => "time",
            StateKind::TimePeriod(_) => "timePeriod",
            StateKind::Toggle => "toggle",
        }
    }

    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new();
        if let Some(key) = &self.key {
            bundle.put_str(KEY_KEY, key.clone());
        }
        if let Some(title) = &self.title {
            bundle.put_str(KEY_TITLE, title.clone());
        }
        bundle.put_str(KEY_KIND, self.kind_name());

        match &self.kind {
            StateKind::Text(s) => {
                bundle.put_str(KEY_VALUE, s.value.clone());
                if let Some(hint) = &s.hint {
                    bundle.put_str(KEY_HINT, hint.clone());
                }
                bundle.put_int(KEY_INPUT_TYPE, s.input_type.id());
                bundle.put_int(KEY_MAX_LENGTH, s.max_length);
            }
            StateKind::Number(s) => {
                bundle.put_int(KEY_VALUE, s.value);
                bundle.put_int(KEY_DEFAULT_VALUE, s.default_value);
                bundle.put_int(KEY_MIN_VALUE, s.min_value);
                bundle.put_int(KEY_MAX_VALUE, s.max_value);
                if let Some(unit) = &s.unit {
                    bundle.put_str(KEY_UNIT, unit.clone());
                }
                if let Some(hint) = &s.hint {
                    bundle.put_str(KEY_HINT, hint.clone());
                }
            }
            StateKind::SingleSelection(s) => {
                bundle.put_str_list(KEY_LABELS, s.labels.clone());
                put_selection_values(&mut bundle, &s.values);
                bundle.put_int(KEY_SELECTED_INDEX, s.selected_index);
                bundle.put_int(KEY_SINGLE_SELECTION_TYPE, s.mode.id());
            }
            StateKind::MultiSelection(s) => {
                bundle.put_str_list(KEY_LABELS, s.labels.clone());
                put_selection_values(&mut bundle, &s.values);
                bundle.put_bool_list(KEY_SELECTED_INDICES, s.checked.clone());
            }
            StateKind::Time(s) => {
                if let Some(time) = &s.time {
                    bundle.put_str(KEY_TIME, time.to_string());
                }
                bundle.put_str(KEY_TIME_FOR_NULL, s.time_for_missing.to_string());
                bundle.put_bool(KEY_IS_24_HOUR_VIEW, s.use_24_hour);
            }
            StateKind::TimePeriod(s) => {
                if let Some(period) = &s.period {
                    bundle.put_str(KEY_TIME_PERIOD, period.to_string());
                }
                bundle.put_str(KEY_TIME_PERIOD_FOR_NULL, s.period_for_missing.to_string());
                bundle.put_bool(KEY_IS_24_HOUR_VIEW, s.use_24_hour);
            }
            StateKind::Toggle => {}
        }

        bundle
    }

    pub fn from_bundle(bundle: &Bundle) -> Result<Self, BundleError> {
        let kind_name = bundle.require_str(KEY_KIND)?;
        let kind = match kind_name {
            "text" => StateKind::Text(TextState {
                value: bundle.get_str(KEY_VALUE).unwrap_or("").to_string(),
                hint: bundle.get_str(KEY_HINT).map(str::to_string),
                input_type: InputType::from_id(bundle.get_int(KEY_INPUT_TYPE).unwrap_or(0)),
                max_length: bundle.get_int(KEY_MAX_LENGTH).unwrap_or(i64::MAX),
            }),
            "number" => StateKind::Number(NumberState {
                value: bundle.get_int(KEY_VALUE).unwrap_or(0),
                default_value: bundle.get_int(KEY_DEFAULT_VALUE).unwrap_or(0),
                min_value: bundle.get_int(KEY_MIN_VALUE).unwrap_or(i64::MIN),
                max_value: bundle.get_int(KEY_MAX_VALUE).unwrap_or(i64::MAX),
                unit: bundle.get_str(KEY_UNIT).map(str::to_string),
                hint: bundle.get_str(KEY_HINT).map(str::to_string),
            }),
            "singleSelection" => StateKind::SingleSelection(SingleSelectionState {
                labels: bundle.get_str_list(KEY_LABELS).unwrap_or(&[]).to_vec(),
                values: get_selection_values(bundle),
                selected_index: bundle.get_int(KEY_SELECTED_INDEX).unwrap_or(NO_SELECTION),
                mode: SelectionMode::from_id(
                    bundle.get_int(KEY_SINGLE_SELECTION_TYPE).unwrap_or(0),
                ),
            }),
            "multiSelection" => StateKind::MultiSelection(MultiSelectionState {
                labels: bundle.get_str_list(KEY_LABELS).unwrap_or(&[]).to_vec(),
                values: get_selection_values(bundle),
                checked: bundle
                    .get_bool_list(KEY_SELECTED_INDICES)
                    .unwrap_or(&[])
                    .to_vec(),
            }),
            "time" => StateKind::Time(TimeState {
                time: parse_time_lenient(bundle, KEY_TIME),
                time_for_missing: parse_time_lenient(bundle, KEY_TIME_FOR_NULL)
                    .unwrap_or_default(),
                use_24_hour: bundle.get_bool(KEY_IS_24_HOUR_VIEW).unwrap_or(false),
            }),
            "timePeriod" => StateKind::TimePeriod(TimePeriodState {
                period: parse_period_lenient(bundle, KEY_TIME_PERIOD),
                period_for_missing: parse_period_lenient(bundle, KEY_TIME_PERIOD_FOR_NULL)
                    .unwrap_or_default(),
                use_24_hour: bundle.get_bool(KEY_IS_24_HOUR_VIEW).unwrap_or(false),
            }),
            "toggle" => StateKind::Toggle,
            other => {
                return Err(BundleError::Invalid {
                    key: KEY_KIND.to_string(),
                    reason: format!("unknown state kind {other:?}"),
                })
            }
        };

        Ok(EditorState {
            key: bundle.get_str(KEY_KEY).map(str::to_string),
            title: bundle.get_str(KEY_TITLE).map(str::to_string),
            kind,
        })
    }
}

fn put_selection_values(bundle: &mut Bundle, values: &SelectionValues) {
    match values {
        SelectionValues::Int(v) => bundle.put_int_list(KEY_VALUES, v.clone()),
        SelectionValues::Str(v) => bundle.put_str_list(KEY_VALUES, v.clone()),
    }
}

fn get_selection_values(bundle: &Bundle) -> SelectionValues {
    if let Some(ints) = bundle.get_int_list(KEY_VALUES) {
        SelectionValues::Int(ints.to_vec())
    } else {
        SelectionValues::Str(
            bundle
                .get_str_list(KEY_VALUES)
                .unwrap_or(&[])
                .to_vec(),
        )
    }
}

/// A snapshot written by an older or foreign producer may hold junk here;
/// treat it as absent instead of failing the whole thaw.
fn parse_time_lenient(bundle: &Bundle, key: &str) -> Option<Time> {
    let raw = bundle.get_str(key)?;
    match raw.parse() {
        Ok(time) => Some(time),
        Err(e) => {
            tracing::debug!("ignoring unparseable time under {key:?}: {e}");
            None
        }
    }
}

fn parse_period_lenient(bundle: &Bundle, key: &str) -> Option<TimePeriod> {
    let raw = bundle.get_str(key)?;
    match raw.parse() {
        Ok(period) => Some(period),
        Err(e) => {
            tracing::debug!("ignoring unparseable time period under {key:?}: {e}");
            None
        }
    }
}
