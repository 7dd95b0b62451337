//! Validation of user-declared advisory exceptions.
//!
//! Every entry is kept, valid or not. A malformed entry is flagged but its
//! `advisory_id`, when present, still counts as a suppression.

use crate::error::ExceptionFormatError;
use serde_json::Value;
use std::collections::BTreeSet;

pub const REQUIRED_FIELDS: [&str; 3] = ["advisory_id", "changed_by", "notes"];

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionEntry {
    pub raw: Value,
    pub advisory_id: Option<String>,
    pub problem: Option<ExceptionFormatError>,
}

impl ExceptionEntry {
    pub fn from_value(raw: Value) -> Self {
        let problem = check_fields(&raw).err();
        let advisory_id = raw.get("advisory_id").and_then(advisory_id_string);

        Self {
            raw,
            advisory_id,
            problem,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.problem.is_none()
    }

    /// Message surfaced to the reporter for a malformed entry.
    pub fn error_message(&self) -> Option<String> {
        self.problem.as_ref().map(|problem| {
            format!(
                "The exception {} is not properly formatted ({}). Each exception needs exactly \
                 an `advisory_id`, a `changed_by` and a `notes` field.",
                self.raw, problem
            )
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExceptionSet {
    entries: Vec<ExceptionEntry>,
}

impl ExceptionSet {
    /// Absent and empty lists both mean no suppressions.
    pub fn from_config(exceptions: Option<&[Value]>) -> Self {
        let entries = exceptions
            .unwrap_or_default()
            .iter()
            .cloned()
            .map(ExceptionEntry::from_value)
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ExceptionEntry] {
        &self.entries
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ExceptionEntry> {
        self.entries.iter().filter(|e| !e.is_valid())
    }

    /// Identifiers to suppress, regardless of entry validity.
    pub fn suppressed_ids(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter_map(|e| e.advisory_id.clone())
            .collect()
    }
}

fn check_fields(raw: &Value) -> Result<(), ExceptionFormatError> {
    let map = raw.as_object().ok_or(ExceptionFormatError::NotAMapping)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !map.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    let mut unexpected: Vec<String> = map
        .keys()
        .filter(|key| !REQUIRED_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect();
    unexpected.sort();

    match (missing.is_empty(), unexpected.is_empty()) {
        (true, true) => Ok(()),
        (false, true) => Err(ExceptionFormatError::MissingFields(missing)),
        (true, false) => Err(ExceptionFormatError::UnexpectedFields(unexpected)),
        (false, false) => Err(ExceptionFormatError::MismatchedFields {
            missing,
            unexpected,
        }),
    }
}

// Unquoted YAML ids arrive as numbers; audit reports key them as strings.
fn advisory_id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
