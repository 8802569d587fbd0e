//! Flat key-value snapshot container
//!
//! A `Bundle` is the serialization currency of the crate: editor states,
//! editor results and whole-screen snapshots are all flat maps from string
//! keys to a small set of value shapes. Nesting is explicit via the `Map`
//! variant, which is how a screen snapshot carries one sub-bundle per editor
//! tag.
//!
//! Bundles round-trip through JSON, so a host can persist a frozen screen to
//! disk across process death and hand it back on recreation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// One value in a [`Bundle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BundleValue {
    Bool(bool),
    Int(i64),
    Str(String),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    BoolList(Vec<bool>),
    Map(Bundle),
}

/// Ordered flat map of string keys to [`BundleValue`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<BundleValue> {
        self.entries.remove(key)
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.entries.insert(key.into(), BundleValue::Bool(value));
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i64) {
        self.entries.insert(key.into(), BundleValue::Int(value));
    }

    pub fn put_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), BundleValue::Str(value.into()));
    }

    pub fn put_str_list(&mut self, key: impl Into<String>, value: Vec<String>) {
        self.entries.insert(key.into(), BundleValue::StrList(value));
    }

    pub fn put_int_list(&mut self, key: impl Into<String>, value: Vec<i64>) {
        self.entries.insert(key.into(), BundleValue::IntList(value));
    }

    pub fn put_bool_list(&mut self, key: impl Into<String>, value: Vec<bool>) {
        self.entries
            .insert(key.into(), BundleValue::BoolList(value));
    }

    pub fn put_map(&mut self, key: impl Into<String>, value: Bundle) {
        self.entries.insert(key.into(), BundleValue::Map(value));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(BundleValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(BundleValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(BundleValue::Str(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn get_str_list(&self, key: &str) -> Option<&[String]> {
        match self.entries.get(key) {
            Some(BundleValue::StrList(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn get_int_list(&self, key: &str) -> Option<&[i64]> {
        match self.entries.get(key) {
            Some(BundleValue::IntList(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn get_bool_list(&self, key: &str) -> Option<&[bool]> {
        match self.entries.get(key) {
            Some(BundleValue::BoolList(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn get_map(&self, key: &str) -> Option<&Bundle> {
        match self.entries.get(key) {
            Some(BundleValue::Map(v)) => Some(v),
            _ => None,
        }
    }

    /// Like [`Bundle::get_int`] but a missing or mistyped key is an error.
    /// Used for structurally-required keys that have no safe default.
    pub fn require_int(&self, key: &str) -> Result<i64, BundleError> {
        self.get_int(key).ok_or_else(|| required(self, key, "Int"))
    }

    pub fn require_str(&self, key: &str) -> Result<&str, BundleError> {
        self.get_str(key).ok_or_else(|| required(self, key, "Str"))
    }

    pub fn require_bool_list(&self, key: &str) -> Result<&[bool], BundleError> {
        self.get_bool_list(key)
            .ok_or_else(|| required(self, key, "BoolList"))
    }

    pub fn require_map(&self, key: &str) -> Result<&Bundle, BundleError> {
        self.get_map(key).ok_or_else(|| required(self, key, "Map"))
    }

    pub fn to_json_string(&self) -> Result<String, BundleError> {
        serde_json::to_string_pretty(self).map_err(|e| BundleError::Json(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self, BundleError> {
        serde_json::from_str(s).map_err(|e| BundleError::Json(e.to_string()))
    }

    /// Persist this bundle as JSON, typically a frozen screen snapshot the
    /// host wants to survive process death.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BundleError> {
        let contents = self.to_json_string()?;
        std::fs::write(path.as_ref(), contents).map_err(|e| BundleError::Io(e.to_string()))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|e| BundleError::Io(e.to_string()))?;
        Self::from_json_str(&contents)
    }
}

fn required(bundle: &Bundle, key: &str, expected: &'static str) -> BundleError {
    if bundle.contains_key(key) {
        BundleError::WrongType {
            key: key.to_string(),
            expected,
        }
    } else {
        BundleError::MissingKey(key.to_string())
    }
}

/// Errors from bundle reconstruction and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// A structurally-required key is absent.
    MissingKey(String),
    /// The key exists but holds a different value shape.
    WrongType { key: String, expected: &'static str },
    /// The key exists with the right shape but an unusable value.
    Invalid { key: String, reason: String },
    Json(String),
    Io(String),
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::MissingKey(key) => write!(f, "required key {key:?} is missing"),
            BundleError::WrongType { key, expected } => {
                write!(f, "key {key:?} does not hold a {expected} value")
            }
            BundleError::Invalid { key, reason } => write!(f, "key {key:?}: {reason}"),
            BundleError::Json(msg) => write!(f, "JSON error: {msg}"),
            BundleError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for BundleError {}
