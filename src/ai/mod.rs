pub mod capability;
mod client;
pub mod error;
mod inference;

use std::sync::Arc;

pub use capability::{Capability, QuestionAnswering, Summarization, SummaryParams};
pub use client::InferenceClient;

use crate::config::InferenceConfig;

/// The engines handed to the triage components.
pub struct Capabilities {
    pub qa: Capability<dyn QuestionAnswering>,
    pub summarizer: Capability<dyn Summarization>,
}

impl Capabilities {
    pub fn unavailable(reason: &str) -> Self {
        Self {
            qa: Capability::unavailable(reason),
            summarizer: Capability::unavailable(reason),
        }
    }
}

pub fn connect(config: &InferenceConfig) -> Capabilities {
    if !config.enabled {
        tracing::warn!(target: "inference", "inference disabled; running in fallback mode");
        return Capabilities::unavailable("inference disabled by configuration");
    }

    match InferenceClient::new(config.clone()) {
        Ok(client) => {
            let client = Arc::new(client);
            let qa: Arc<dyn QuestionAnswering> = client.clone();
            let summarizer: Arc<dyn Summarization> = client;
            tracing::info!(
                target: "inference",
                url = %config.api_url,
                qa_model = %config.qa_model,
                summarization_model = %config.summarization_model,
                "inference client ready"
            );
            Capabilities {
                qa: Capability::Available(qa),
                summarizer: Capability::Available(summarizer),
            }
        }
        Err(err) => {
            tracing::warn!(target: "inference", error = %err, "failed to build inference client");
            Capabilities::unavailable(&err.to_string())
        }
    }
}
