use std::future::Future;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::time::timeout;

use crate::config::InferenceConfig;

use super::{
    capability::{QaAnswer, QuestionAnswering, Summarization, SummaryParams},
    error::InferenceError,
    inference::{build_qa_request, build_summary_request, parse_qa_response, parse_summary_response},
};

/// HTTP client for a hosted model-inference endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    http: Client,
    config: InferenceConfig,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let http = Client::builder()
            .user_agent(format!("mail-triage/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.config.api_url.trim_end_matches('/'), model)
    }

    async fn post<B: Serialize + Sync>(&self, model: &str, body: &B) -> Result<String, InferenceError> {
        let mut request = self.http.post(self.model_url(model)).json(body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, InferenceError>
    where
        F: Future<Output = Result<T, InferenceError>>,
    {
        timeout(self.config.timeout, call)
            .await
            .map_err(|_| InferenceError::Timeout(self.config.timeout))?
    }
}

#[async_trait]
impl QuestionAnswering for InferenceClient {
    async fn ask(&self, question: &str, context: &str) -> Result<QaAnswer, InferenceError> {
        let request = build_qa_request(question, context);
        let body = self
            .bounded(self.post(&self.config.qa_model, &request))
            .await?;
        parse_qa_response(&body)
    }
}

#[async_trait]
impl Summarization for InferenceClient {
    async fn summarize(&self, text: &str, params: SummaryParams) -> Result<String, InferenceError> {
        let request = build_summary_request(text, params);
        let body = self
            .bounded(self.post(&self.config.summarization_model, &request))
            .await?;
        parse_summary_response(&body)
    }
}
