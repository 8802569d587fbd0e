//! Screen controller
//!
//! Ties one preference screen together: the rows it shows, the registry of
//! editors behind them, and the freeze/thaw of the whole screen. The host
//! drives it through a fixed lifecycle: register editors, add rows, restore a
//! snapshot if one survived, commit, then activate rows and deliver results
//! as the UI produces them.
//!
//! The store and the launcher are collaborators passed per call, never owned,
//! so the controller itself stays freezable.

use crate::bundle::Bundle;
use crate::display;
use crate::editor::{Editor, EditorHost};
use crate::editors::{
    MultiSelectionEditor, NumberEditor, SingleSelectionEditor, TextEditor, TimeEditor,
    TimePeriodEditor, ToggleEditor,
};
use crate::registry::{DeliveryOutcome, DispatchOutcome, EditorRegistry, RegistryError};
use crate::row::{Row, RowId, RowSpec};
use crate::store::PreferenceStore;
use std::fmt;

pub struct ScreenController {
    registry: EditorRegistry,
    rows: Vec<Row>,
    /// Editor tag bound to the row at the same index.
    bindings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    UnknownRow(RowId),
    /// No registered editor can edit the given row spec.
    NoCompatibleEditor,
    /// A selection row's label and value lists differ in length.
    LabelCountMismatch { labels: usize, values: usize },
    Registry(RegistryError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::UnknownRow(id) => write!(f, "no row with id {id}"),
            ControllerError::NoCompatibleEditor => {
                write!(f, "no registered editor accepts this row")
            }
            ControllerError::LabelCountMismatch { labels, values } => {
                write!(f, "{labels} labels for {values} selection values")
            }
            ControllerError::Registry(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegistryError> for ControllerError {
    fn from(e: RegistryError) -> Self {
        ControllerError::Registry(e)
    }
}

impl ScreenController {
    /// Controller with no editors; every editor must be registered by hand.
    pub fn new() -> Self {
        ScreenController {
            registry: EditorRegistry::new(),
            rows: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Controller with the built-in editors registered under their kind
    /// names, covering every [`RowSpec`] variant.
    pub fn with_default_editors() -> Self {
        let mut controller = Self::new();
        let defaults: [(&str, Box<dyn Editor>); 7] = [
            ("text", Box::new(TextEditor)),
            ("number", Box::new(NumberEditor)),
            ("singleSelection", Box::new(SingleSelectionEditor)),
            ("multiSelection", Box::new(MultiSelectionEditor)),
            ("time", Box::new(TimeEditor)),
            ("timePeriod", Box::new(TimePeriodEditor)),
            ("toggle", Box::new(ToggleEditor)),
        ];
        for (tag, editor) in defaults {
            // Distinct literal tags on a fresh, uncommitted registry.
            controller
                .registry
                .register(tag, editor)
                .unwrap_or_else(|_| unreachable!());
        }
        controller
    }

    /// Adds a custom editor. Only valid before [`commit`].
    ///
    /// [`commit`]: ScreenController::commit
    pub fn register_editor(
        &mut self,
        tag: impl Into<String>,
        editor: Box<dyn Editor>,
    ) -> Result<(), ControllerError> {
        self.registry.register(tag, editor)?;
        Ok(())
    }

    /// Adds a row bound to the first registered editor compatible with its
    /// spec. Only valid before [`commit`].
    ///
    /// [`commit`]: ScreenController::commit
    pub fn add_row(
        &mut self,
        key: impl Into<String>,
        title: impl Into<String>,
        spec: RowSpec,
    ) -> Result<RowId, ControllerError> {
        if self.registry.is_committed() {
            return Err(ControllerError::Registry(RegistryError::Committed));
        }
        check_selection_lengths(&spec)?;
        let tag = self
            .registry
            .find_compatible(&spec)
            .ok_or(ControllerError::NoCompatibleEditor)?
            .to_string();
        Ok(self.push_row(key.into(), title.into(), spec, tag))
    }

    /// Adds a row bound to a specific editor tag. Only valid before
    /// [`commit`].
    ///
    /// [`commit`]: ScreenController::commit
    pub fn add_row_with_tag(
        &mut self,
        key: impl Into<String>,
        title: impl Into<String>,
        spec: RowSpec,
        tag: &str,
    ) -> Result<RowId, ControllerError> {
        if self.registry.is_committed() {
            return Err(ControllerError::Registry(RegistryError::Committed));
        }
        check_selection_lengths(&spec)?;
        if !self.registry.contains_tag(tag) {
            return Err(ControllerError::Registry(RegistryError::UnknownTag(
                tag.to_string(),
            )));
        }
        Ok(self.push_row(key.into(), title.into(), spec, tag.to_string()))
    }

    fn push_row(&mut self, key: String, title: String, spec: RowSpec, tag: String) -> RowId {
        let id = self.rows.len();
        self.rows.push(Row {
            id,
            key,
            title,
            spec,
        });
        self.bindings.push(tag);
        id
    }

    /// Thaws a snapshot taken by [`save_state`] in a previous process. Only
    /// valid before [`commit`], with the same editor tags registered.
    ///
    /// [`save_state`]: ScreenController::save_state
    /// [`commit`]: ScreenController::commit
    pub fn restore(&mut self, snapshot: &Bundle) -> Result<(), ControllerError> {
        self.registry.restore(snapshot)?;
        Ok(())
    }

    /// Fixes the editor set; rows may be activated afterwards.
    pub fn commit(&mut self) {
        self.registry.commit();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id)
    }

    /// Begins an edit for a row, in response to the user activating it.
    pub fn activate_row(
        &mut self,
        id: RowId,
        store: &mut dyn PreferenceStore,
        host: &mut dyn EditorHost,
    ) -> Result<DispatchOutcome, ControllerError> {
        let row = self
            .rows
            .get(id)
            .ok_or(ControllerError::UnknownRow(id))?
            .clone();
        let tag = self.bindings[id].clone();
        Ok(self.registry.dispatch(&tag, &row, store, host)?)
    }

    /// Hands an editor result bundle from the host to the pending edit that
    /// claims its correlation id.
    pub fn deliver_result(
        &mut self,
        correlation_id: i64,
        bundle: &Bundle,
        store: &mut dyn PreferenceStore,
    ) -> Result<DeliveryOutcome, ControllerError> {
        Ok(self.registry.deliver(correlation_id, bundle, store)?)
    }

    /// Freezes the whole screen's editing state for the host to persist.
    pub fn save_state(&self) -> Bundle {
        self.registry.snapshot()
    }

    /// Display text for one row.
    pub fn display_text(&self, id: RowId, store: &dyn PreferenceStore) -> Option<String> {
        self.rows.get(id).map(|row| display::display_text(row, store))
    }

    /// Display text for every row, in row order. Hosts call this after a
    /// delivery to refresh the screen.
    pub fn refresh_all(&self, store: &dyn PreferenceStore) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| display::display_text(row, store))
            .collect()
    }

    /// Tears the screen down: drops every row, editor and pending record.
    /// A host that wants the in-flight edits back later must call
    /// [`save_state`] first.
    ///
    /// [`save_state`]: ScreenController::save_state
    pub fn on_destroy(&mut self) {
        self.registry = EditorRegistry::new();
        self.rows.clear();
        self.bindings.clear();
    }
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::with_default_editors()
    }
}

/// Selection rows pair each label with a value; a length mismatch would make
/// some entries unrenderable or unsaveable, so it is rejected up front.
fn check_selection_lengths(spec: &RowSpec) -> Result<(), ControllerError> {
    let (labels, values) = match spec {
        RowSpec::SingleSelection { labels, values, .. } => (labels.len(), values.len()),
        RowSpec::MultiSelection { labels, values } => (labels.len(), values.len()),
        _ => return Ok(()),
    };
    if labels != values {
        return Err(ControllerError::LabelCountMismatch { labels, values });
    }
    Ok(())
}
