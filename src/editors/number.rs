//! Bounded integer editor.

use crate::bundle::{Bundle, BundleError};
use crate::editor::{Activation, EditError, Editor};
use crate::result::{EditorResult, ResultPayload, KEY_INPUT_VALUE, RESULT_CANCELED};
use crate::row::{Row, RowSpec};
use crate::state::{EditorState, NumberState, StateKind};
use crate::store::PreferenceStore;

/// Edits an integer preference via a numeric input UI.
#[derive(Debug, Default)]
pub struct NumberEditor;

impl Editor for NumberEditor {
    fn compatible(&self, spec: &RowSpec) -> bool {
        matches!(spec, RowSpec::Number { .. })
    }

    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError> {
        let RowSpec::Number {
            default_value,
            min_value,
            max_value,
            unit,
            hint,
        } = &row.spec
        else {
            return Err(EditError::WrongKind);
        };
        let value = store.get_int(&row.key).unwrap_or(*default_value);
        Ok(Activation::Launch(EditorState {
            key: Some(row.key.clone()),
            title: Some(row.title.clone()),
            kind: StateKind::Number(NumberState {
                value,
                default_value: *default_value,
                min_value: *min_value,
                max_value: *max_value,
                unit: unit.clone(),
                hint: hint.clone(),
            }),
        }))
    }

    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError> {
        let code = EditorResult::code_of(bundle);
        if code == RESULT_CANCELED {
            return Ok(EditorResult::cancelled());
        }
        let value = bundle.require_int(KEY_INPUT_VALUE)?;
        Ok(EditorResult {
            code,
            payload: ResultPayload::Number(value),
        })
    }

    fn apply_result(
        &self,
        state: &EditorState,
        result: &EditorResult,
        store: &mut dyn PreferenceStore,
    ) -> Result<(), EditError> {
        let key = state.key.as_deref().ok_or(EditError::MissingKey)?;
        match &result.payload {
            ResultPayload::Number(value) => {
                store.set_int(key, *value);
                Ok(())
            }
            _ => Err(EditError::WrongPayload),
        }
    }
}
