//! History entry representing one past calculation.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier for this entry.
    pub id: String,
    /// The expression as entered, e.g. `7 + 3` or `sqrt(4)`.
    pub expression: String,
    /// The formatted result.
    pub result: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Create a new entry stamped with a fresh id and the current time.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            expression: expression.into(),
            result: result.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// The expression and result to copy back into the calculator.
    pub fn recall(&self) -> (&str, &str) {
        (&self.expression, &self.result)
    }

    /// Local wall-clock time of the entry, formatted `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp).single() {
            Some(time) => time.format("%H:%M:%S").to_string(),
            None => String::from("--:--:--"),
        }
    }

    /// Creation time as a UTC datetime, if the timestamp is in range.
    pub fn created_at(&self) -> Option<DateTime<chrono::Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = HistoryEntry::new("1 + 1", "2");
        let b = HistoryEntry::new("1 + 1", "2");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_recall_is_a_projection() {
        let entry = HistoryEntry::new("7 + 3", "10");
        assert_eq!(entry.recall(), ("7 + 3", "10"));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = HistoryEntry {
            id: "1700000000000".to_string(),
            expression: "sqrt(4)".to_string(),
            result: "2".to_string(),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1700000000000",
                "expression": "sqrt(4)",
                "result": "2",
                "timestamp": 1_700_000_000_000_i64,
            })
        );
        assert!(entry.created_at().is_some());
        assert_eq!(entry.time_label().len(), 8);
    }
}
