//! Boolean toggle, applied inline with no UI round trip.

use crate::bundle::{Bundle, BundleError};
use crate::editor::{Activation, EditError, Editor};
use crate::result::EditorResult;
use crate::row::{Row, RowSpec};
use crate::state::EditorState;
use crate::store::PreferenceStore;

/// Flips a boolean preference directly when its row is activated. An unset
/// key reads as `false`, so the first activation writes `true`.
#[derive(Debug, Default)]
pub struct ToggleEditor;

impl Editor for ToggleEditor {
    fn compatible(&self, spec: &RowSpec) -> bool {
        matches!(spec, RowSpec::Toggle)
    }

    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError> {
        if !matches!(row.spec, RowSpec::Toggle) {
            return Err(EditError::WrongKind);
        }
        let current = store.get_bool(&row.key).unwrap_or(false);
        store.set_bool(&row.key, !current);
        Ok(Activation::Applied)
    }

    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError> {
        Ok(EditorResult {
            code: EditorResult::code_of(bundle),
            payload: crate::result::ResultPayload::None,
        })
    }

    fn apply_result(
        &self,
        _state: &EditorState,
        _result: &EditorResult,
        _store: &mut dyn PreferenceStore,
    ) -> Result<(), EditError> {
        Err(EditError::NoRoundTrip)
    }
}
