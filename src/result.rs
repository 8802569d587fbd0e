//! Editor result protocol
//!
//! When an editor UI finishes, the host hands back a result bundle: a result
//! code plus a kind-specific payload. The code alone decides confirmed vs
//! cancelled; any non-cancel code counts as confirmed. Payload decoding is
//! per-editor, since only the editor knows which keys its UI writes.

use crate::bundle::{Bundle, BundleError};
use crate::model::{Time, TimePeriod};

/// Result code key, namespaced to avoid colliding with host keys.
pub const KEY_RESULT_CODE: &str = "imoya-preference-result-code";
/// Single-selection payload: chosen index.
pub const KEY_SELECTION: &str = "listSelection";
/// Multi-selection payload: one flag per label.
pub const KEY_SELECTED_INDICES: &str = "selectedIndices";
/// Time editor payload.
pub const KEY_SELECTED_TIME: &str = "selectedTime";
/// Time period editor payload.
pub const KEY_SELECTED_TIME_PERIOD: &str = "selectedTimePeriod";
/// Text and number editor payload.
pub const KEY_INPUT_VALUE: &str = "inputValue";

/// The editor UI was confirmed.
pub const RESULT_OK: i64 = -1;
/// The editor UI was dismissed without confirming.
pub const RESULT_CANCELED: i64 = 0;

/// A decoded editor result: the code plus whatever payload the editor's UI
/// produced. Cancelled results carry no payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorResult {
    pub code: i64,
    pub payload: ResultPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultPayload {
    None,
    Text(String),
    Number(i64),
    SingleSelection(i64),
    MultiSelection(Vec<bool>),
    Time(Time),
    TimePeriod(TimePeriod),
}

impl EditorResult {
    pub fn cancelled() -> Self {
        EditorResult {
            code: RESULT_CANCELED,
            payload: ResultPayload::None,
        }
    }

    pub fn ok(payload: ResultPayload) -> Self {
        EditorResult {
            code: RESULT_OK,
            payload,
        }
    }

    /// Any code other than [`RESULT_CANCELED`] counts as confirmed.
    pub fn confirmed(&self) -> bool {
        self.code != RESULT_CANCELED
    }

    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.put_int(KEY_RESULT_CODE, self.code);
        match &self.payload {
            ResultPayload::None => {}
            ResultPayload::Text(v) => bundle.put_str(KEY_INPUT_VALUE, v.clone()),
            ResultPayload::Number(v) => bundle.put_int(KEY_INPUT_VALUE, *v),
            ResultPayload::SingleSelection(idx) => bundle.put_int(KEY_SELECTION, *idx),
            ResultPayload::MultiSelection(flags) => {
                bundle.put_bool_list(KEY_SELECTED_INDICES, flags.clone())
            }
            ResultPayload::Time(t) => bundle.put_str(KEY_SELECTED_TIME, t.to_string()),
            ResultPayload::TimePeriod(p) => {
                bundle.put_str(KEY_SELECTED_TIME_PERIOD, p.to_string())
            }
        }
        bundle
    }

    /// Reads the result code, treating an absent code as cancelled.
    pub fn code_of(bundle: &Bundle) -> i64 {
        bundle.get_int(KEY_RESULT_CODE).unwrap_or(RESULT_CANCELED)
    }
}

/// Parses a time payload string, mapping parse failures onto the carrying
/// key so callers see which bundle entry was bad.
pub fn parse_time_payload(bundle: &Bundle, key: &str) -> Result<Time, BundleError> {
    let raw = bundle.require_str(key)?;
    raw.parse().map_err(|e| BundleError::Invalid {
        key: key.to_string(),
        reason: format!("{e}"),
    })
}

pub fn parse_period_payload(bundle: &Bundle, key: &str) -> Result<TimePeriod, BundleError> {
    let raw = bundle.require_str(key)?;
    raw.parse().map_err(|e| BundleError::Invalid {
        key: key.to_string(),
        reason: format!("{e}"),
    })
}
