//! Editor registry
//!
//! The registry owns the editors for one preference screen, keyed by tag, and
//! runs the asynchronous half of every edit: it allocates correlation ids,
//! remembers which editor is waiting for a result, and folds delivered
//! results back through the owning editor. Its whole working state freezes
//! into a [`Bundle`] and thaws in a freshly built registry, which is how an
//! in-flight edit survives process recreation.
//!
//! Registration order matters: default editor lookup picks the first
//! compatible editor, and tags must be unique. After [`commit`] the editor
//! set is fixed; only then may edits be dispatched.
//!
//! [`commit`]: EditorRegistry::commit

use crate::bundle::{Bundle, BundleError};
use crate::editor::{Activation, EditError, Editor, EditorHost, LaunchRequest};
use crate::roundtrip::{state_key, CorrelationIds, KEY_PENDING, NO_CORRELATION};
use crate::row::{Row, RowSpec};
use crate::state::EditorState;
use crate::store::PreferenceStore;
use std::fmt;

struct EditorEntry {
    tag: String,
    editor: Box<dyn Editor>,
    /// Frozen working state of the most recent launch.
    state: Option<EditorState>,
    /// Correlation id of an outstanding result, if any.
    pending: Option<i64>,
}

#[derive(Default)]
pub struct EditorRegistry {
    entries: Vec<EditorEntry>,
    ids: CorrelationIds,
    committed: bool,
}

/// What dispatching a row did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A UI was launched; the host will deliver a result under this id.
    Launched(i64),
    /// The edit was applied inline.
    Applied,
}

/// What delivering a result bundle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The result was confirmed and folded into the store.
    Applied { tag: String },
    /// The edit was dismissed; the store is untouched.
    Cancelled { tag: String },
    /// No pending edit claimed the result; it was dropped.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    DuplicateTag(String),
    UnknownTag(String),
    /// The operation is only valid before [`EditorRegistry::commit`].
    Committed,
    /// The operation is only valid after [`EditorRegistry::commit`].
    NotCommitted,
    Edit(EditError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateTag(tag) => write!(f, "editor tag {tag:?} already registered"),
            RegistryError::UnknownTag(tag) => write!(f, "no editor registered under {tag:?}"),
            RegistryError::Committed => write!(f, "registry is already committed"),
            RegistryError::NotCommitted => write!(f, "registry is not committed yet"),
            RegistryError::Edit(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Edit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EditError> for RegistryError {
    fn from(e: EditError) -> Self {
        RegistryError::Edit(e)
    }
}

impl From<BundleError> for RegistryError {
    fn from(e: BundleError) -> Self {
        RegistryError::Edit(EditError::Bundle(e))
    }
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an editor under a unique tag. Only valid before [`commit`].
    ///
    /// [`commit`]: EditorRegistry::commit
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        editor: Box<dyn Editor>,
    ) -> Result<(), RegistryError> {
        if self.committed {
            return Err(RegistryError::Committed);
        }
        let tag = tag.into();
        if self.entries.iter().any(|e| e.tag == tag) {
            return Err(RegistryError::DuplicateTag(tag));
        }
        self.entries.push(EditorEntry {
            tag,
            editor,
            state: None,
            pending: None,
        });
        Ok(())
    }

    /// Fixes the editor set. Dispatch and delivery are only valid afterwards,
    /// restore only before.
    pub fn commit(&mut self) {
        self.committed = true;
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.entries.iter().any(|e| e.tag == tag)
    }

    /// First registered editor compatible with the spec, if any.
    pub fn find_compatible(&self, spec: &RowSpec) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.editor.compatible(spec))
            .map(|e| e.tag.as_str())
    }

    /// Begins an edit through the editor registered under `tag`. Either the
    /// edit is applied inline, or the host is asked to launch a UI and the
    /// registry starts waiting on the returned correlation id.
    pub fn dispatch(
        &mut self,
        tag: &str,
        row: &Row,
        store: &mut dyn PreferenceStore,
        host: &mut dyn EditorHost,
    ) -> Result<DispatchOutcome, RegistryError> {
        if !self.committed {
            return Err(RegistryError::NotCommitted);
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.tag == tag)
            .ok_or_else(|| RegistryError::UnknownTag(tag.to_string()))?;

        match entry.editor.activate(row, store)? {
            Activation::Applied => Ok(DispatchOutcome::Applied),
            Activation::Launch(state) => {
                let id = self.ids.allocate();
                let request = LaunchRequest {
                    tag: entry.tag.clone(),
                    correlation_id: id,
                    title: state.title.clone(),
                    presentation: entry.editor.presentation(),
                    state: state.to_bundle(),
                };
                entry.state = Some(state);
                entry.pending = Some(id);
                tracing::debug!(tag = %entry.tag, id, "launching editor");
                host.launch(request);
                Ok(DispatchOutcome::Launched(id))
            }
        }
    }

    /// Delivers a host result bundle for an earlier dispatch.
    ///
    /// An id no pending edit claims is dropped, not an error: results can
    /// legitimately arrive after the edit they belong to was superseded by a
    /// thaw or already resolved. [`NO_CORRELATION`] matches the sole pending
    /// edit when exactly one exists.
    pub fn deliver(
        &mut self,
        correlation_id: i64,
        bundle: &Bundle,
        store: &mut dyn PreferenceStore,
    ) -> Result<DeliveryOutcome, RegistryError> {
        if !self.committed {
            return Err(RegistryError::NotCommitted);
        }

        let index = if correlation_id == NO_CORRELATION {
            let mut pending = self.entries.iter().enumerate().filter(|(_, e)| e.pending.is_some());
            match (pending.next(), pending.next()) {
                (Some((i, _)), None) => Some(i),
                _ => None,
            }
        } else {
            self.entries
                .iter()
                .position(|e| e.pending == Some(correlation_id))
        };
        let Some(index) = index else {
            tracing::debug!(correlation_id, "dropping result no pending edit claims");
            return Ok(DeliveryOutcome::Ignored);
        };

        let entry = &mut self.entries[index];
        let tag = entry.tag.clone();

        // A decode or apply error leaves the record in place: the edit is
        // still pending and the host may redeliver a corrected bundle.
        let result = entry.editor.decode_result(bundle)?;
        if !result.confirmed() {
            entry.pending = None;
            entry.state = None;
            tracing::debug!(tag = %tag, "edit cancelled");
            return Ok(DeliveryOutcome::Cancelled { tag });
        }

        let Some(state) = entry.state.clone() else {
            entry.pending = None;
            tracing::warn!(tag = %tag, "pending edit has no frozen state, dropping result");
            return Ok(DeliveryOutcome::Ignored);
        };
        entry.editor.apply_result(&state, &result, store)?;
        entry.pending = None;
        entry.state = None;
        tracing::debug!(tag = %tag, "edit applied");
        Ok(DeliveryOutcome::Applied { tag })
    }

    /// Freezes all editor working state and pending ids into one bundle.
    pub fn snapshot(&self) -> Bundle {
        let mut bundle = Bundle::new();
        let mut pending = Bundle::new();
        for entry in &self.entries {
            if let Some(state) = &entry.state {
                bundle.put_map(state_key(&entry.tag), state.to_bundle());
            }
            if let Some(id) = entry.pending {
                pending.put_int(entry.tag.clone(), id);
            }
        }
        bundle.put_map(KEY_PENDING, pending);
        bundle
    }

    /// Thaws a snapshot into this registry. Only valid before [`commit`],
    /// with the same editor tags registered as when the snapshot was taken.
    /// Tags the snapshot mentions but this registry lacks are skipped.
    ///
    /// [`commit`]: EditorRegistry::commit
    pub fn restore(&mut self, snapshot: &Bundle) -> Result<(), RegistryError> {
        if self.committed {
            return Err(RegistryError::Committed);
        }

        for entry in &mut self.entries {
            if let Some(frozen) = snapshot.get_map(&state_key(&entry.tag)) {
                entry.state = Some(EditorState::from_bundle(frozen)?);
            }
        }

        if let Some(pending) = snapshot.get_map(KEY_PENDING) {
            let tags: Vec<String> = pending.keys().map(str::to_string).collect();
            for tag in tags {
                let Some(id) = pending.get_int(&tag) else {
                    continue;
                };
                match self.entries.iter_mut().find(|e| e.tag == tag) {
                    Some(entry) => {
                        entry.pending = Some(id);
                        self.ids.ensure_above(id);
                    }
                    None => {
                        tracing::debug!(tag = %tag, "snapshot names an unregistered editor tag");
                    }
                }
            }
        }
        Ok(())
    }
}
