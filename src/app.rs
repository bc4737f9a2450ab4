use std::{
    future::Future,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
};

use futures::FutureExt;

use crate::{
    ai::Capabilities,
    classifier::{DeadlineExtractor, PriorityScorer},
    db::{self, FeedbackRepository, FeedbackStore},
    domain::{
        DeadlineResult, EmailInput, FeedbackAck, FeedbackRequest, PriorityResult, TriageReport,
    },
    infrastructure::directories::ResolvedPaths,
    processor::{fallback_summary, ReplyDrafter, Summarizer},
};

/// Per-invocation bundle of the triage components.
///
/// Every public operation runs behind a guard that turns an internal failure
/// into that operation's fallback value, so callers always get a result.
pub struct TriageApp {
    scorer: PriorityScorer,
    deadlines: DeadlineExtractor,
    summarizer: Summarizer,
    drafter: ReplyDrafter,
    feedback: Option<Arc<dyn FeedbackStore>>,
}

impl TriageApp {
    pub fn new(
        capabilities: Capabilities,
        summary_max_length: usize,
        feedback: Option<Arc<dyn FeedbackStore>>,
    ) -> Self {
        Self {
            scorer: PriorityScorer::new(),
            deadlines: DeadlineExtractor::new(capabilities.qa),
            summarizer: Summarizer::new(capabilities.summarizer, summary_max_length),
            drafter: ReplyDrafter,
            feedback,
        }
    }

    pub fn classify(&self, input: &EmailInput) -> PriorityResult {
        guard("classify", PriorityResult::fallback, || {
            self.scorer
                .classify(&input.body, &input.subject, &input.sender)
        })
    }

    pub async fn extract_deadline(&self, body: &str) -> DeadlineResult {
        guard_async(
            "extract_deadline",
            DeadlineResult::default,
            self.deadlines.extract(body),
        )
        .await
    }

    pub async fn summarize(&self, body: &str) -> String {
        guard_async(
            "summarize",
            || fallback_summary(body),
            self.summarizer.summarize(body),
        )
        .await
    }

    pub fn draft_reply(&self, priority: &str) -> String {
        guard(
            "draft_reply",
            || ReplyDrafter.draft("normal").to_string(),
            || self.drafter.draft(priority).to_string(),
        )
    }

    /// Records the examples locally and forwards them to the store. A store
    /// failure is logged and does not change the acknowledgement.
    pub async fn add_feedback(&self, request: &FeedbackRequest) -> FeedbackAck {
        guard_async("add_feedback", FeedbackAck::added, async {
            let added = self.scorer.add_examples(&request.texts, &request.labels);
            if added.is_empty() {
                return FeedbackAck::added();
            }
            match &self.feedback {
                Some(store) => {
                    if let Err(err) = store.append(&added).await {
                        tracing::warn!(
                            target: "feedback",
                            error = %err,
                            count = added.len(),
                            "failed to persist training examples"
                        );
                    }
                }
                None => {
                    tracing::warn!(
                        target: "feedback",
                        count = added.len(),
                        "no feedback store; examples kept in memory only"
                    );
                }
            }
            FeedbackAck::added()
        })
        .await
    }

    /// Classification, deadline, summary and a reply for the classified
    /// priority in one pass.
    pub async fn process(&self, input: &EmailInput) -> TriageReport {
        let classification = self.classify(input);
        let deadline = self.extract_deadline(&input.body).await;
        let summary = self.summarize(&input.body).await;
        let draft = self.draft_reply(classification.priority.as_str());
        TriageReport {
            classification,
            deadline,
            summary,
            draft,
        }
    }

    pub async fn close(&self) {
        if let Some(store) = &self.feedback {
            store.close().await;
        }
    }
}

/// Opens the SQLite feedback store, or logs and returns `None`.
pub async fn open_feedback_store(paths: &ResolvedPaths) -> Option<Arc<dyn FeedbackStore>> {
    match db::init_pool(&paths.feedback_db_path).await {
        Ok(pool) => Some(Arc::new(FeedbackRepository::new(pool))),
        Err(err) => {
            tracing::warn!(
                target: "feedback",
                error = %err,
                path = %paths.feedback_db_path.display(),
                "failed to open feedback store"
            );
            None
        }
    }
}

fn guard<T>(operation: &'static str, fallback: impl FnOnce() -> T, run: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(value) => value,
        Err(panic) => {
            tracing::error!(
                target: "app",
                operation,
                panic = panic_message(&panic),
                "operation failed; returning fallback"
            );
            fallback()
        }
    }
}

async fn guard_async<T, F>(operation: &'static str, fallback: impl FnOnce() -> T, run: F) -> T
where
    F: Future<Output = T>,
{
    match AssertUnwindSafe(run).catch_unwind().await {
        Ok(value) => value,
        Err(panic) => {
            tracing::error!(
                target: "app",
                operation,
                panic = panic_message(&panic),
                "operation failed; returning fallback"
            );
            fallback()
        }
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
