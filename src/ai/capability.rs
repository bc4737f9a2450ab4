//! Seams for the external inference engines.
//!
//! Components hold a [`Capability`] rather than a concrete client so that an
//! engine which failed to start is represented explicitly and tests can inject
//! deterministic stubs.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::InferenceError;

/// An external engine that may or may not have come up.
pub enum Capability<T: ?Sized> {
    Available(Arc<T>),
    Unavailable { reason: String },
}

impl<T: ?Sized> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Capability::Available(inner) => Capability::Available(inner.clone()),
            Capability::Unavailable { reason } => Capability::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QaAnswer {
    pub answer: String,
    /// Engine confidence in [0, 1]; 0 means no usable span.
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryParams {
    pub max_length: usize,
    pub min_length: usize,
    pub deterministic: bool,
}

/// Extractive question answering over a context passage.
#[async_trait]
pub trait QuestionAnswering: Send + Sync {
    async fn ask(&self, question: &str, context: &str) -> Result<QaAnswer, InferenceError>;
}

/// Abstractive summarization.
#[async_trait]
pub trait Summarization: Send + Sync {
    async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String, InferenceError>;
}
