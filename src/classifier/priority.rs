use crate::domain::{Priority, PriorityResult, ScoreBreakdown, TrainingExample};

use super::{
    keywords::{count_present, LOW_KEYWORDS, NORMAL_KEYWORDS, OVERRIDE_PHRASES, URGENT_KEYWORDS},
    training::TrainingLog,
};

const URGENT_FLOOR: f64 = 60.0;
const NORMAL_FLOOR: f64 = 50.0;
const LOW_FLOOR: f64 = 40.0;
const OVERRIDE_FLOOR: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordCounts {
    pub urgent: usize,
    pub normal: usize,
    pub low: usize,
}

impl KeywordCounts {
    pub fn from_haystack(haystack: &str) -> Self {
        Self {
            urgent: count_present(URGENT_KEYWORDS, haystack),
            normal: count_present(NORMAL_KEYWORDS, haystack),
            low: count_present(LOW_KEYWORDS, haystack),
        }
    }

    /// Percentages of the total. With no matches every label is 0.
    pub fn breakdown(&self) -> ScoreBreakdown {
        let total = (self.urgent + self.normal + self.low).max(1) as f64;
        ScoreBreakdown {
            urgent: self.urgent as f64 / total * 100.0,
            normal: self.normal as f64 / total * 100.0,
            low: self.low as f64 / total * 100.0,
        }
    }

    /// Ties go to the more urgent label, so all-zero counts select urgent.
    pub fn leading(&self) -> Priority {
        if self.urgent >= self.normal && self.urgent >= self.low {
            Priority::Urgent
        } else if self.normal >= self.low {
            Priority::Normal
        } else {
            Priority::Low
        }
    }
}

/// Rule-based urgency scorer.
///
/// Scoring reads only the message text and the keyword tables. The training
/// log is carried alongside for feedback accumulation and is never consulted.
#[derive(Debug, Default)]
pub struct PriorityScorer {
    training: TrainingLog,
}

impl PriorityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&self, body: &str, subject: &str, sender: &str) -> PriorityResult {
        let haystack = build_haystack(subject, body, sender);
        let counts = KeywordCounts::from_haystack(&haystack);
        let scores = counts.breakdown();

        let mut priority = counts.leading();
        let mut confidence = match priority {
            Priority::Urgent => scores.urgent.max(URGENT_FLOOR),
            Priority::Normal => scores.normal.max(NORMAL_FLOOR),
            Priority::Low => scores.low.max(LOW_FLOOR),
        };

        if OVERRIDE_PHRASES
            .iter()
            .any(|phrase| haystack.contains(phrase))
        {
            priority = Priority::Urgent;
            confidence = confidence.max(OVERRIDE_FLOOR);
        }

        tracing::debug!(
            target: "classifier",
            urgent = counts.urgent,
            normal = counts.normal,
            low = counts.low,
            %priority,
            confidence,
            "message scored"
        );

        PriorityResult {
            priority,
            confidence: confidence.trunc() as u32,
            scores,
        }
    }

    /// Records labelled examples for an external trainer. Scoring is unchanged.
    pub fn add_examples(&self, texts: &[String], labels: &[String]) -> Vec<TrainingExample> {
        let added = self.training.append(texts, labels);
        tracing::info!(
            target: "feedback",
            added = added.len(),
            total = self.training.len(),
            "training examples recorded"
        );
        added
    }
}

fn build_haystack(subject: &str, body: &str, sender: &str) -> String {
    format!("{subject} {body} {sender}").to_lowercase()
}
