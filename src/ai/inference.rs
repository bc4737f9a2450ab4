use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    capability::{QaAnswer, SummaryParams},
    error::InferenceError,
};

pub fn build_qa_request<'a>(question: &'a str, context: &'a str) -> QaRequest<'a> {
    QaRequest {
        inputs: QaInputs { question, context },
    }
}

pub fn build_summary_request(text: &str, params: SummaryParams) -> SummaryRequest<'_> {
    SummaryRequest {
        inputs: text,
        parameters: SummaryParameters {
            max_length: params.max_length,
            min_length: params.min_length,
            do_sample: !params.deterministic,
        },
    }
}

pub fn parse_qa_response(body: &str) -> Result<QaAnswer, InferenceError> {
    // Some deployments wrap the single answer in a list. Branch on the JSON
    // shape first: a struct would otherwise also accept a bare sequence.
    let answer: QaResponse = match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => {
            let first = items
                .into_iter()
                .next()
                .ok_or(InferenceError::EmptyResponse)?;
            serde_json::from_value(first)?
        }
        other @ Value::Object(_) => serde_json::from_value(other)?,
        _ => return Err(InferenceError::EmptyResponse),
    };
    Ok(QaAnswer {
        answer: answer.answer,
        score: answer.score,
    })
}

pub fn parse_summary_response(body: &str) -> Result<String, InferenceError> {
    let response: Vec<SummaryResponse> = serde_json::from_str(body)?;
    response
        .into_iter()
        .next()
        .map(|item| item.summary_text)
        .ok_or(InferenceError::EmptyResponse)
}

#[derive(Debug, Serialize)]
pub struct QaRequest<'a> {
    pub inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
pub struct QaInputs<'a> {
    pub question: &'a str,
    pub context: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SummaryRequest<'a> {
    pub inputs: &'a str,
    pub parameters: SummaryParameters,
}

#[derive(Debug, Serialize)]
pub struct SummaryParameters {
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
}

#[derive(Debug, Deserialize)]
pub struct QaResponse {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub summary_text: String,
}
