//! Task data model

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// `id` is the creation timestamp in milliseconds and doubles as the
/// unique key for toggle/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: i64, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            completed: false,
        }
    }

    /// Checkbox glyph used by list renderers
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[✓]"
        } else {
            "[ ]"
        }
    }
}

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
