//! Time and time period editors.
//!
//! Both store their value as the canonical string form of the model type, and
//! both seed leniently: an unset or unparseable stored value becomes "no
//! current value" with the row's default shown instead.

use crate::bundle::{Bundle, BundleError};
use crate::editor::{Activation, EditError, Editor, Presentation};
use crate::model::{Time, TimePeriod};
use crate::result::{
    parse_period_payload, parse_time_payload, EditorResult, ResultPayload, KEY_SELECTED_TIME,
    KEY_SELECTED_TIME_PERIOD, RESULT_CANCELED,
};
use crate::row::{Row, RowSpec};
use crate::state::{EditorState, StateKind, TimePeriodState, TimeState};
use crate::store::PreferenceStore;

/// Edits a time-of-day preference stored as `H:MM:SS`.
#[derive(Debug, Default)]
pub struct TimeEditor;

/// Edits a time period preference stored as `H:MM:SS-H:MM:SS`. Presented as
/// its own screen since it hosts two pickers.
#[derive(Debug, Default)]
pub struct TimePeriodEditor;

fn stored_time(store: &dyn PreferenceStore, key: &str) -> Option<Time> {
    let raw = store.get_string(key)?;
    match raw.parse() {
        Ok(time) => Some(time),
        Err(e) => {
            tracing::debug!("stored value under {key:?} is not a time: {e}");
            None
        }
    }
}

fn stored_period(store: &dyn PreferenceStore, key: &str) -> Option<TimePeriod> {
    let raw = store.get_string(key)?;
    match raw.parse() {
        Ok(period) => Some(period),
        Err(e) => {
            tracing::debug!("stored value under {key:?} is not a time period: {e}");
            None
        }
    }
}

impl Editor for TimeEditor {
    fn compatible(&self, spec: &RowSpec) -> bool {
        matches!(spec, RowSpec::Time { .. })
    }

    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError> {
        let RowSpec::Time {
            default_time,
            use_24_hour,
            ..
        } = &row.spec
        else {
            return Err(EditError::WrongKind);
        };
        Ok(Activation::Launch(EditorState {
            key: Some(row.key.clone()),
            title: Some(row.title.clone()),
            kind: StateKind::Time(TimeState {
                time: stored_time(store, &row.key),
                time_for_missing: *default_time,
                use_24_hour: *use_24_hour,
            }),
        }))
    }

    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError> {
        let code = EditorResult::code_of(bundle);
        if code == RESULT_CANCELED {
            return Ok(EditorResult::cancelled());
        }
        let time = parse_time_payload(bundle, KEY_SELECTED_TIME)?;
        Ok(EditorResult {
            code,
            payload: ResultPayload::Time(time),
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
            ResultPayload::Time(time) => {
                store.set_string(key, &time.to_string());
                Ok(())
            }
            _ => Err(EditError::WrongPayload),
        }
    }
}

impl Editor for TimePeriodEditor {
    fn compatible(&self, spec: &RowSpec) -> bool {
        matches!(spec, RowSpec::TimePeriod { .. })
    }

    fn presentation(&self) -> Presentation {
        Presentation::Screen
    }

    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError> {
        let RowSpec::TimePeriod {
            default_period,
            use_24_hour,
            ..
        } = &row.spec
        else {
            return Err(EditError::WrongKind);
        };
        Ok(Activation::Launch(EditorState {
            key: Some(row.key.clone()),
            title: Some(row.title.clone()),
            kind: StateKind::TimePeriod(TimePeriodState {
                period: stored_period(store, &row.key),
                period_for_missing: *default_period,
                use_24_hour: *use_24_hour,
            }),
        }))
    }

    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError> {
        let code = EditorResult::code_of(bundle);
        if code == RESULT_CANCELED {
            return Ok(EditorResult::cancelled());
        }
        let period = parse_period_payload(bundle, KEY_SELECTED_TIME_PERIOD)?;
        Ok(EditorResult {
            code,
            payload: ResultPayload::TimePeriod(period),
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
            ResultPayload::TimePeriod(period) => {
                store.set_string(key, &period.to_string());
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

    fn time_row() -> Row {
        Row {
            id: 0,
            key: "alarm".to_string(),
            title: "Alarm".to_string(),
            spec: RowSpec::time(Time::new(7, 0, 0), true),
        }
    }

    fn period_row() -> Row {
        Row {
            id: 0,
            key: "quiet".to_string(),
            title: "Quiet hours".to_string(),
            spec: RowSpec::time_period(
                TimePeriod::new(Time::new(22, 0, 0), Time::new(6, 0, 0)),
                true,
            ),
        }
    }

    #[test]
    fn time_seed_parses_the_stored_string() {
        let mut store = MemoryStore::new();
        store.set_string("alarm", "6:45");
        let Activation::Launch(state) = TimeEditor.activate(&time_row(), &mut store).unwrap()
        else {
            unreachable!()
        };
        match state.kind {
            StateKind::Time(s) => assert_eq!(s.time, Some(Time::new(6, 45, 0))),
            _ => unreachable!(),
        }
    }

    #[test]
    fn time_seed_treats_junk_as_unset() {
        let mut store = MemoryStore::new();
        store.set_string("alarm", "sometime");
        let Activation::Launch(state) = TimeEditor.activate(&time_row(), &mut store).unwrap()
        else {
            unreachable!()
        };
        match state.kind {
            StateKind::Time(s) => {
                assert_eq!(s.time, None);
                assert_eq!(s.time_for_missing, Time::new(7, 0, 0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn time_apply_writes_canonical_form() {
        let mut store = MemoryStore::new();
        let Activation::Launch(state) = TimeEditor.activate(&time_row(), &mut store).unwrap()
        else {
            unreachable!()
        };

        let mut bundle = Bundle::new();
        bundle.put_int(KEY_RESULT_CODE, RESULT_OK);
        bundle.put_str(KEY_SELECTED_TIME, "8:05");
        let result = TimeEditor.decode_result(&bundle).unwrap();
        TimeEditor.apply_result(&state, &result, &mut store).unwrap();
        assert_eq!(store.get_string("alarm").as_deref(), Some("8:05:00"));
    }

    #[test]
    fn period_editor_uses_its_own_screen() {
        assert_eq!(TimePeriodEditor.presentation(), Presentation::Screen);
        assert_eq!(TimeEditor.presentation(), Presentation::Dialog);
    }

    #[test]
    fn period_round_trip_through_the_store() {
        let mut store = MemoryStore::new();
        let Activation::Launch(state) =
            TimePeriodEditor.activate(&period_row(), &mut store).unwrap()
        else {
            unreachable!()
        };

        let mut bundle = Bundle::new();
        bundle.put_int(KEY_RESULT_CODE, RESULT_OK);
        bundle.put_str(KEY_SELECTED_TIME_PERIOD, "23:30-5:15");
        let result = TimePeriodEditor.decode_result(&bundle).unwrap();
        TimePeriodEditor
            .apply_result(&state, &result, &mut store)
            .unwrap();
        assert_eq!(
            store.get_string("quiet").as_deref(),
            Some("23:30:00-5:15:00")
        );

        let Activation::Launch(state) =
            TimePeriodEditor.activate(&period_row(), &mut store).unwrap()
        else {
            unreachable!()
        };
        match state.kind {
            StateKind::TimePeriod(s) => assert_eq!(
                s.period,
                Some(TimePeriod::new(Time::new(23, 30, 0), Time::new(5, 15, 0)))
            ),
            _ => unreachable!(),
        }
    }
}
