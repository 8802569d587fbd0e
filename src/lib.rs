//! Preference screen editing for hosts with recreatable UIs.
//!
//! A [`ScreenController`] holds the rows of one settings screen and an
//! [`EditorRegistry`] of editors behind them. Editing is asynchronous: the
//! controller hands the host a [`LaunchRequest`] with a frozen editor state
//! and a correlation id, the host shows whatever UI it likes, and later
//! delivers a result bundle back. Because all working state freezes into a
//! [`Bundle`], the host process can die and be recreated between the two
//! halves without losing the edit.
//!
//! [`ScreenController`]: controller::ScreenController
//! [`EditorRegistry`]: registry::EditorRegistry
//! [`LaunchRequest`]: editor::LaunchRequest
//! [`Bundle`]: bundle::Bundle

pub mod bundle;
pub mod controller;
pub mod display;
pub mod editor;
pub mod editors;
pub mod model;
pub mod registry;
pub mod result;
pub mod roundtrip;
pub mod row;
pub mod state;
pub mod store;

pub use bundle::{Bundle, BundleError, BundleValue};
pub use controller::{ControllerError, ScreenController};
pub use editor::{Activation, EditError, Editor, EditorHost, LaunchRequest, Presentation};
pub use model::{ParsePeriodError, ParseTimeError, PeriodError, Time, TimePeriod};
pub use registry::{DeliveryOutcome, DispatchOutcome, EditorRegistry, RegistryError};
pub use result::{EditorResult, ResultPayload, RESULT_CANCELED, RESULT_OK};
pub use row::{InputType, Row, RowId, RowSpec, SelectionMode, SelectionValues};
pub use state::{EditorState, StateKind};
pub use store::{MemoryStore, PreferenceStore};
