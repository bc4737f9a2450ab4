use crate::ai::{Capability, Summarization, SummaryParams};

const MIN_SUMMARIZABLE_CHARS: usize = 50;
const MAX_INPUT_CHARS: usize = 1000;
const MIN_SUMMARY_LENGTH: usize = 30;
const FALLBACK_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

pub struct Summarizer {
    engine: Capability<dyn Summarization>,
    max_length: usize,
}

impl Summarizer {
    pub fn new(engine: Capability<dyn Summarization>, max_length: usize) -> Self {
        Self { engine, max_length }
    }

    pub async fn summarize(&self, body: &str) -> String {
        let engine = match &self.engine {
            Capability::Available(engine) => engine,
            Capability::Unavailable { reason } => {
                tracing::debug!(target: "summary", %reason, "summarizer unavailable; using fallback");
                return fallback_summary(body);
            }
        };

        let trimmed = body.trim();
        let length = trimmed.chars().count();
        if length < MIN_SUMMARIZABLE_CHARS {
            return trimmed.to_string();
        }

        let input = if length > MAX_INPUT_CHARS {
            format!("{}{ELLIPSIS}", take_chars(trimmed, MAX_INPUT_CHARS))
        } else {
            trimmed.to_string()
        };

        let params = SummaryParams {
            max_length: self.max_length,
            min_length: MIN_SUMMARY_LENGTH,
            deterministic: true,
        };
        match engine.summarize(&input, params).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(target: "summary", error = %err, "summarization failed; using fallback");
                fallback_summary(body)
            }
        }
    }
}

/// First two sentences, or a 200-character prefix when there are fewer than
/// three `". "`-separated segments.
pub fn fallback_summary(text: &str) -> String {
    let segments: Vec<&str> = text.split(". ").collect();
    if segments.len() <= 2 {
        if text.chars().count() > FALLBACK_CHARS {
            return format!("{}{ELLIPSIS}", take_chars(text, FALLBACK_CHARS));
        }
        return text.to_string();
    }
    format!("{}.", segments[..2].join(". "))
}

fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::ai::error::InferenceError;

    #[derive(Default)]
    struct RecordingEngine {
        fail: bool,
        seen: Mutex<Vec<(String, SummaryParams)>>,
    }

    #[async_trait]
    impl Summarization for RecordingEngine {
        async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String, InferenceError> {
            self.seen.lock().push((text.to_string(), params));
            if self.fail {
                return Err(InferenceError::EmptyResponse);
            }
            Ok("model summary".to_string())
        }
    }

    fn with_engine(engine: Arc<RecordingEngine>) -> Summarizer {
        let engine: Arc<dyn Summarization> = engine;
        Summarizer::new(Capability::Available(engine), 100)
    }

    fn sentences(count: usize) -> String {
        (0..count)
            .map(|i| format!("Sentence number {i} talks about the quarterly plan"))
            .collect::<Vec<_>>()
            .join(". ")
    }

    #[tokio::test]
    async fn short_body_is_returned_trimmed() {
        let engine = Arc::new(RecordingEngine::default());
        let summarizer = with_engine(engine.clone());
        let body = "  Can we move the call to Friday afternoon?  ";
        assert_eq!(
            summarizer.summarize(body).await,
            "Can we move the call to Friday afternoon?"
        );
        assert!(engine.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn forty_char_body_is_unchanged_without_engine() {
        let body = "x".repeat(40);
        let summarizer = Summarizer::new(Capability::unavailable("offline"), 100);
        assert_eq!(summarizer.summarize(&body).await, body);
    }

    #[tokio::test]
    async fn long_body_is_truncated_before_summarizing() {
        let engine = Arc::new(RecordingEngine::default());
        let summarizer = with_engine(engine.clone());
        let body = "é".repeat(2000);

        assert_eq!(summarizer.summarize(&body).await, "model summary");

        let seen = engine.seen.lock();
        let (input, params) = &seen[0];
        assert_eq!(input.chars().count(), 1003);
        assert!(input.ends_with("..."));
        assert_eq!(
            *params,
            SummaryParams {
                max_length: 100,
                min_length: 30,
                deterministic: true
            }
        );
    }

    #[tokio::test]
    async fn engine_failure_uses_sentence_fallback() {
        let engine = Arc::new(RecordingEngine {
            fail: true,
            ..Default::default()
        });
        let summarizer = with_engine(engine);
        let summary = summarizer.summarize(&sentences(40)).await;
        assert_eq!(
            summary,
            "Sentence number 0 talks about the quarterly plan. \
             Sentence number 1 talks about the quarterly plan."
        );
    }

    #[tokio::test]
    async fn long_body_without_engine_uses_fallback() {
        let summarizer = Summarizer::new(Capability::unavailable("offline"), 100);

        let many = sentences(45);
        assert!(many.len() >= 2000);
        assert!(summarizer.summarize(&many).await.ends_with("quarterly plan."));

        let one_run_on = "word ".repeat(400);
        let summary = summarizer.summarize(&one_run_on).await;
        assert_eq!(summary.chars().count(), 203);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn fallback_keeps_short_two_segment_text() {
        assert_eq!(fallback_summary("One. Two"), "One. Two");
        assert_eq!(fallback_summary(""), "");
    }

    #[test]
    fn take_chars_respects_boundaries() {
        assert_eq!(take_chars("héllo", 2), "hé");
        assert_eq!(take_chars("hi", 10), "hi");
    }
}
