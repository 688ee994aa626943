//! Per-mount form state: values, touched set and error map.
//!
//! All three are created when a form mounts, mutated during interaction and
//! reset the moment a submission is accepted. Nothing here persists.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Metadata for a file the applicant selected. Size and type checks run
/// against this metadata only; bytes are read from `path` at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FileMeta {
    pub file_name: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub path: PathBuf,
}

impl FileMeta {
    /// Lowercased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

/// Current value of a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    File(FileMeta),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileMeta> {
        match self {
            Self::File(meta) => Some(meta),
            _ => None,
        }
    }

    /// Empty, or text that is whitespace-only.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::File(_) => false,
        }
    }
}

static EMPTY: FieldValue = FieldValue::Empty;

/// Field name → current value for one mounted form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<String, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn clear(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// Trimmed text value, if the field holds non-blank text.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            FieldValue::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    pub fn file(&self, name: &str) -> Option<&FileMeta> {
        self.get(name).as_file()
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).is_blank()
    }

    /// Back to initial empty values.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_blank())
    }
}

/// Fields the user has interacted with. Errors are only written for touched
/// fields, which is what keeps pristine inputs visually quiet.
#[derive(Debug, Clone, Default)]
pub struct TouchedState {
    fields: HashSet<String>,
}

impl TouchedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, name: &str) {
        self.fields.insert(name.to_string());
    }

    pub fn mark_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    pub fn reset(&mut self) {
        self.fields.clear();
    }
}

/// Field name → Arabic error message. Only failing fields have entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorState {
    errors: HashMap<String, String>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, message: impl Into<String>) {
        self.errors.insert(name.to_string(), message.into());
    }

    pub fn remove(&mut self, name: &str) {
        self.errors.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.errors.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn reset(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
