//! Editor seam
//!
//! An editor owns one kind of round trip: seed state from the store, hand a
//! launch request to the host, and later fold a result bundle back into the
//! store. Editors are stateless; working state lives in [`EditorState`] so it
//! can be frozen and thawed by the registry between the two halves.

use crate::bundle::{Bundle, BundleError};
use crate::result::EditorResult;
use crate::row::{Row, RowSpec};
use crate::state::EditorState;
use crate::store::PreferenceStore;
use std::fmt;

/// How the host should present an editor UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Modal dialog over the current screen.
    Dialog,
    /// Separate full screen.
    Screen,
}

/// Everything the host needs to show an editor UI and route its result back.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    /// Registry tag of the editor being launched.
    pub tag: String,
    /// Correlation id the host must echo when delivering the result.
    pub correlation_id: i64,
    pub title: Option<String>,
    pub presentation: Presentation,
    /// Frozen editor state, opaque to the host.
    pub state: Bundle,
}

/// Host-side launcher for editor UIs.
pub trait EditorHost {
    fn launch(&mut self, request: LaunchRequest);
}

/// What activating a row did.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// A UI round trip is needed; launch with this state.
    Launch(EditorState),
    /// The edit was applied inline, no UI needed.
    Applied,
}

/// One editable preference kind.
pub trait Editor {
    /// Whether this editor can edit rows with the given spec.
    fn compatible(&self, spec: &RowSpec) -> bool;

    fn presentation(&self) -> Presentation {
        Presentation::Dialog
    }

    /// Begins an edit: either seeds a state for a UI round trip, or applies
    /// the change directly for editors that need no UI.
    fn activate(
        &self,
        row: &Row,
        store: &mut dyn PreferenceStore,
    ) -> Result<Activation, EditError>;

    /// Decodes a host result bundle into this editor's result shape.
    fn decode_result(&self, bundle: &Bundle) -> Result<EditorResult, BundleError>;

    /// Folds a confirmed result into the store, guided by the state frozen
    /// at activation time.
    fn apply_result(
        &self,
        state: &EditorState,
        result: &EditorResult,
        store: &mut dyn PreferenceStore,
    ) -> Result<(), EditError>;
}

/// Errors from activating an editor or applying its result.
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// The state carries no target preference key.
    MissingKey,
    /// The editor was given a row spec or state kind it does not handle.
    WrongKind,
    /// The result payload does not match what this editor applies.
    WrongPayload,
    /// A selection index is outside the value list.
    SelectionOutOfRange { index: i64, len: usize },
    /// A multi-selection flag list does not match the value list length.
    SelectionLengthMismatch { flags: usize, len: usize },
    /// The editor has no result phase at all.
    NoRoundTrip,
    Bundle(BundleError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::MissingKey => write!(f, "editor state has no preference key"),
            EditError::WrongKind => write!(f, "editor given an incompatible row or state"),
            EditError::WrongPayload => write!(f, "result payload does not fit this editor"),
            EditError::SelectionOutOfRange { index, len } => {
                write!(f, "selection index {index} out of range for {len} values")
            }
            EditError::SelectionLengthMismatch { flags, len } => {
                write!(f, "{flags} selection flags for {len} values")
            }
            EditError::NoRoundTrip => write!(f, "editor has no result phase"),
            EditError::Bundle(e) => write!(f, "bundle error: {e}"),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditError::Bundle(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BundleError> for EditError {
    fn from(e: BundleError) -> Self {
        EditError::Bundle(e)
    }
}
