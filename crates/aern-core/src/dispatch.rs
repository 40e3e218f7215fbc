//! Modality routing: which remote table receives a submission, and the
//! record it carries.
//!
//! Single-modality submissions route to one of three dedicated tables;
//! combined submissions always route to the one fusion table. Binary
//! modalities (audio, photo) enter a record only as already-resolved
//! content URIs — the upload step happens before dispatch.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// An accepted input kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modality {
    Text,
    Audio,
    Photo,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Text, Modality::Audio, Modality::Photo];

    /// Column name in the remote tables.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Photo => "photo",
        }
    }

    /// Human-facing label for messages ("Audio upload failed: ...").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Audio => "Audio",
            Self::Photo => "Photo",
        }
    }

    /// Parse a column name back into a modality.
    pub fn from_column(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "audio" => Some(Self::Audio),
            "photo" => Some(Self::Photo),
            _ => None,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The four remote table targets, resolved once at startup.
#[derive(Debug, Clone)]
pub struct TableSet {
    pub text: String,
    pub audio: String,
    pub photo: String,
    pub combined: String,
}

impl TableSet {
    /// Dedicated table for a single-modality submission.
    pub fn single_target(&self, modality: Modality) -> &str {
        match modality {
            Modality::Text => &self.text,
            Modality::Audio => &self.audio,
            Modality::Photo => &self.photo,
        }
    }
}

/// A modality → value mapping destined for one remote row insertion.
///
/// At most one entry per modality; audio/photo values are resolved URIs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    entries: BTreeMap<Modality, String>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for a modality.
    pub fn insert(&mut self, modality: Modality, value: String) {
        self.entries.insert(modality, value);
    }

    pub fn get(&self, modality: Modality) -> Option<&str> {
        self.entries.get(&modality).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Modalities currently populated.
    pub fn modalities(&self) -> impl Iterator<Item = Modality> + '_ {
        self.entries.keys().copied()
    }

    /// Render as the JSON object the row-insertion call expects.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (modality, value) in &self.entries {
            map.insert(modality.column().to_string(), Value::String(value.clone()));
        }
        Value::Object(map)
    }
}

/// A routed submission: the table to hit and the record to send.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    pub table_id: String,
    pub record: InputRecord,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Combined mode with zero populated modalities; no remote call is made.
    #[error("at least one input is required")]
    NoInput,
}

/// Route a single-modality submission to its dedicated table.
///
/// `value` is the user text, or the resolved upload URI for audio/photo —
/// callers must not pass an unresolved binary modality here.
pub fn plan_single(tables: &TableSet, modality: Modality, value: String) -> SubmissionPlan {
    let mut record = InputRecord::new();
    record.insert(modality, value);
    SubmissionPlan {
        table_id: tables.single_target(modality).to_string(),
        record,
    }
}

/// Route a combined submission: any non-empty record goes to the fusion
/// table; an empty one is rejected before any remote call.
pub fn plan_combined(
    tables: &TableSet,
    record: InputRecord,
) -> Result<SubmissionPlan, DispatchError> {
    if record.is_empty() {
        return Err(DispatchError::NoInput);
    }
    Ok(SubmissionPlan {
        table_id: tables.combined.clone(),
        record,
    })
}
