use crate::{
    ai::{Capability, QuestionAnswering},
    domain::DeadlineResult,
};

use super::keywords::DEADLINE_QUESTIONS;

/// Picks the best deadline span by asking the QA engine several phrasings of
/// the same question.
pub struct DeadlineExtractor {
    qa: Capability<dyn QuestionAnswering>,
}

impl DeadlineExtractor {
    pub fn new(qa: Capability<dyn QuestionAnswering>) -> Self {
        Self { qa }
    }

    pub async fn extract(&self, body: &str) -> DeadlineResult {
        let qa = match &self.qa {
            Capability::Available(qa) => qa,
            Capability::Unavailable { reason } => {
                tracing::warn!(target: "deadline", %reason, "question answering unavailable");
                return DeadlineResult::default();
            }
        };

        let mut best = DeadlineResult::default();
        for question in DEADLINE_QUESTIONS {
            match qa.ask(question, body).await {
                // strictly greater: earlier questions keep ties
                Ok(answer) if answer.score > best.confidence => {
                    best = DeadlineResult {
                        deadline: Some(answer.answer),
                        confidence: answer.score,
                    };
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(target: "deadline", question, error = %err, "question skipped");
                }
            }
        }

        tracing::debug!(
            target: "deadline",
            found = best.deadline.is_some(),
            confidence = best.confidence,
            "deadline extraction finished"
        );
        best
    }
}
