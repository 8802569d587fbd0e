//! Free-form string editor.

use crate::bundle::{Bundle, BundleError};
use crate::editor::{Activation, EditError, Editor};
use crate::result::{EditorResult, ResultPayload, KEY_INPUT_VALUE};
use crate::row::{Row, RowSpec};
use crate::state::{EditorState, StateKind, TextState};
use crate::store::PreferenceStore;

/// Edits a string preference via a text input UI.
#[derive(Debug, Default)]
pub struct TextEditor;

impl Editor for TextEditor {
    fn compatible(&self, spec: &RowSpec) -> bool {
        matches!(spec, RowSpec::Text { .. })
    }

    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError> {
        let RowSpec::Text {
            hint,
            input_type,
            max_length,
        } = &row.spec
        else {
            return Err(EditError::WrongKind);
        };
        let value = store.get_string(&row.key).unwrap_or_default();
        Ok(Activation::Launch(EditorState {
            key: Some(row.key.clone()),
            title: Some(row.title.clone()),
            kind: StateKind::Text(TextState {
                value,
                hint: hint.clone(),
                input_type: *input_type,
                max_length: *max_length,
            }),
        }))
    }

    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError> {
        let code = EditorResult::code_of(bundle);
        if code == crate::result::RESULT_CANCELED {
            return Ok(EditorResult::cancelled());
        }
        let value = bundle.require_str(KEY_INPUT_VALUE)?.to_string();
        Ok(EditorResult {
            code,
            payload: ResultPayload::Text(value),
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
            ResultPayload::Text(value) => {
                store.set_string(key, value);
                Ok(())
            }
            _ => Err(EditError::WrongPayload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{KEY_RESULT_CODE, RESULT_OK};
    use crate::store::MemoryStore;

    fn row() -> Row {
        Row {
            id: 0,
            key: "name".to_string(),
            title: "Name".to_string(),
            spec: RowSpec::text(),
        }
    }

    #[test]
    fn activate_seeds_from_store() {
        let mut store = MemoryStore::new();
        store.set_string("name", "saved");
        match TextEditor.activate(&row(), &mut store).unwrap() {
            Activation::Launch(state) => match state.kind {
                StateKind::Text(s) => assert_eq!(s.value, "saved"),
                _ => unreachable!(),
            },
            Activation::Applied => unreachable!(),
        }
    }

    #[test]
    fn activate_with_unset_key_seeds_empty() {
        let mut store = MemoryStore::new();
        match TextEditor.activate(&row(), &mut store).unwrap() {
            Activation::Launch(state) => match state.kind {
                StateKind::Text(s) => assert_eq!(s.value, ""),
                _ => unreachable!(),
            },
            Activation::Applied => unreachable!(),
        }
    }

    #[test]
    fn decode_then_apply_writes_the_store() {
        let mut store = MemoryStore::new();
        let Activation::Launch(state) = TextEditor.activate(&row(), &mut store).unwrap() else {
            unreachable!()
        };

        let mut bundle = Bundle::new();
        bundle.put_int(KEY_RESULT_CODE, RESULT_OK);
        bundle.put_str(KEY_INPUT_VALUE, "typed");
        let result = TextEditor.decode_result(&bundle).unwrap();
        assert!(result.confirmed());

        TextEditor.apply_result(&state, &result, &mut store).unwrap();
        assert_eq!(store.get_string("name").as_deref(), Some("typed"));
    }

    #[test]
    fn confirmed_result_without_value_is_an_error() {
        let mut bundle = Bundle::new();
        bundle.put_int(KEY_RESULT_CODE, RESULT_OK);
        assert_eq!(
            TextEditor.decode_result(&bundle),
            Err(BundleError::MissingKey(KEY_INPUT_VALUE.to_string()))
        );
    }
}
