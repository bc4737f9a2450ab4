use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "urgent" => Some(Priority::Urgent),
            "normal" => Some(Priority::Normal),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw per-label percentages. Not affected by floors or overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub urgent: f64,
    pub normal: f64,
    pub low: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResult {
    pub priority: Priority,
    pub confidence: u32,
    pub scores: ScoreBreakdown,
}

impl PriorityResult {
    /// Returned whenever scoring fails internally.
    pub fn fallback() -> Self {
        Self {
            priority: Priority::Normal,
            confidence: 50,
            scores: ScoreBreakdown {
                urgent: 0.0,
                normal: 50.0,
                low: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeadlineResult {
    pub deadline: Option<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackAck {
    pub status: &'static str,
    pub message: &'static str,
}

impl FeedbackAck {
    pub fn added() -> Self {
        Self {
            status: "success",
            message: "Feedback added",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageReport {
    pub classification: PriorityResult,
    pub deadline: DeadlineResult,
    pub summary: String,
    pub draft: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_string(&PriorityResult::fallback()).unwrap();
        assert_eq!(
            json,
            r#"{"priority":"normal","confidence":50,"scores":{"urgent":0.0,"normal":50.0,"low":0.0}}"#
        );
    }

    #[test]
    fn absent_deadline_is_null() {
        let json = serde_json::to_value(DeadlineResult::default()).unwrap();
        assert!(json["deadline"].is_null());
        assert_eq!(json["confidence"], 0.0);
    }

    #[test]
    fn labels_round_trip_through_names() {
        for priority in [Priority::Urgent, Priority::Normal, Priority::Low] {
            assert_eq!(Priority::from_label(priority.as_str()), Some(priority));
        }
        assert_eq!(Priority::from_label("Urgent"), None);
    }
}
