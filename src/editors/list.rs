//! Selection list editors.
//!
//! Single selection maps the stored value back to an index when seeding and
//! writes the chosen entry's value when applying; a cleared selection removes
//! the key. Multi selection stores the chosen entries' values joined with
//! commas, with an all-clear removing the key, matching how the joined string
//! is split back into flags when seeding.

use crate::bundle::{Bundle, BundleError};
use crate::editor::{Activation, EditError, Editor};
use crate::result::{
    EditorResult, ResultPayload, KEY_SELECTED_INDICES, KEY_SELECTION, RESULT_CANCELED,
};
use crate::row::{Row, RowSpec, SelectionValues};
use crate::state::{
    EditorState, MultiSelectionState, SingleSelectionState, StateKind, NO_SELECTION,
};
use crate::store::PreferenceStore;

/// Edits a preference holding exactly one of a fixed set of values.
#[derive(Debug, Default)]
pub struct SingleSelectionEditor;

/// Edits a preference holding any subset of a fixed set of values, stored as
/// a comma-joined string.
#[derive(Debug, Default)]
pub struct MultiSelectionEditor;

fn stored_index(values: &SelectionValues, store: &dyn PreferenceStore, key: &str) -> i64 {
    let found = match values {
        SelectionValues::Int(v) => store
            .get_int(key)
            .and_then(|stored| v.iter().position(|x| *x == stored)),
        SelectionValues::Str(v) => store
            .get_string(key)
            .and_then(|stored| v.iter().position(|x| *x == stored)),
    };
    found.map(|i| i as i64).unwrap_or(NO_SELECTION)
}

fn value_text(values: &SelectionValues, index: usize) -> String {
    match values {
        SelectionValues::Int(v) => v[index].to_string(),
        SelectionValues::Str(v) => v[index].clone(),
    }
}

impl Editor for SingleSelectionEditor {
    fn compatible(&self, spec: &RowSpec) -> bool {
        matches!(spec, RowSpec::SingleSelection { .. })
    }

    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError> {
        let RowSpec::SingleSelection {
            labels,
            values,
            mode,
        } = &row.spec
        else {
            return Err(EditError::WrongKind);
        };
        Ok(Activation::Launch(EditorState {
            key: Some(row.key.clone()),
            title: Some(row.title.clone()),
            kind: StateKind::SingleSelection(SingleSelectionState {
                labels: labels.clone(),
                values: values.clone(),
                selected_index: stored_index(values, store, &row.key),
                mode: *mode,
            }),
        }))
    }

    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError> {
        let code = EditorResult::code_of(bundle);
        if code == RESULT_CANCELED {
            return Ok(EditorResult::cancelled());
        }
        let index = bundle.require_int(KEY_SELECTION)?;
        Ok(EditorResult {
            code,
            payload: ResultPayload::SingleSelection(index),
        })
    }

    fn apply_result(
        &self,
        state: &EditorState,
        result: &EditorResult,
        store: &mut dyn PreferenceStore,
    ) -> Result<(), EditError> {
        let key = state.key.as_deref().ok_or(EditError::MissingKey)?;
        let StateKind::SingleSelection(s) = &state.kind else {
            return Err(EditError::WrongKind);
        };
        let ResultPayload::SingleSelection(index) = result.payload else {
            return Err(EditError::WrongPayload);
        };

        if index == NO_SELECTION {
            store.remove(key);
            return Ok(());
        }
        let len = s.values.len();
        if index < 0 || index as usize >= len {
            return Err(EditError::SelectionOutOfRange { index, len });
        }
        match &s.values {
            SelectionValues::Int(v) => store.set_int(key, v[index as usize]),
            SelectionValues::Str(v) => store.set_string(key, &v[index as usize]),
        }
        Ok(())
    }
}

impl Editor for MultiSelectionEditor {
    fn compatible(&self, spec: &RowSpec) -> bool {
        matches!(spec, RowSpec::MultiSelection { .. })
    }

    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError> {
        let RowSpec::MultiSelection { labels, values } = &row.spec else {
            return Err(EditError::WrongKind);
        };

        let stored = store.get_string(&row.key).unwrap_or_default();
        let parts: Vec<&str> = if stored.is_empty() {
            Vec::new()
        } else {
            stored.split(',').collect()
        };
        let checked = (0..values.len())
            .map(|i| parts.contains(&value_text(values, i).as_str()))
            .collect();

        Ok(Activation::Launch(EditorState {
            key: Some(row.key.clone()),
            title: Some(row.title.clone()),
            kind: StateKind::MultiSelection(MultiSelectionState {
                labels: labels.clone(),
                values: values.clone(),
                checked,
            }),
        }))
    }

    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError> {
        let code = EditorResult::code_of(bundle);
        if code == RESULT_CANCELED {
            return Ok(EditorResult::cancelled());
        }
        let flags = bundle.require_bool_list(KEY_SELECTED_INDICES)?.to_vec();
        Ok(EditorResult {
            code,
            payload: ResultPayload::MultiSelection(flags),
        })
    }

    fn apply_result(
        &self,
        state: &EditorState,
        result: &EditorResult,
        store: &mut dyn PreferenceStore,
    ) -> Result<(), EditError> {
        let key = state.key.as_deref().ok_or(EditError::MissingKey)?;
        let StateKind::MultiSelection(s) = &state.kind else {
            return Err(EditError::WrongKind);
        };
        let ResultPayload::MultiSelection(flags) = &result.payload else {
            return Err(EditError::WrongPayload);
        };

        let len = s.values.len();
        if flags.len() != len {
            return Err(EditError::SelectionLengthMismatch {
                flags: flags.len(),
                len,
            });
        }
        let selected: Vec<String> = (0..len)
            .filter(|i| flags[*i])
            .map(|i| value_text(&s.values, i))
            .collect();
        if selected.is_empty() {
            store.remove(key);
        } else {
            store.set_string(key, &selected.join(","));
        }
        Ok(())
    }
}
