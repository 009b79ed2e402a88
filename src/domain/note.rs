//! Calendar note types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// A free-text note attached to a calendar day
///
/// Notes may be converted into tasks; conversion does not delete the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarNote {
    pub id: String,
    /// Calendar-day key, `YYYY-MM-DD`
    pub date: String,
    pub content: String,
}

impl CalendarNote {
    /// Create a note for the given day
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: generate_id("note"),
            date: date.into(),
            content: content.into(),
        }
    }
}

/// Notes grouped by their calendar-day key
pub type NotesByDate = BTreeMap<String, Vec<CalendarNote>>;
