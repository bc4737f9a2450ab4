mod ai;
mod app;
mod classifier;
mod config;
mod db;
mod domain;
mod infrastructure;
mod processor;

use std::{
    borrow::Cow,
    io::{self, Write},
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use app::TriageApp;
use domain::{parse_request, DraftRequest, EmailInput, FeedbackRequest};
use infrastructure::{directories, logging};

#[derive(Debug, Parser)]
#[command(name = "mail-triage")]
#[command(about = "Email priority, deadline and summary triage (JSON on stdin, JSON on stdout)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Score urgency from {subject, body, sender}
    Classify,
    /// Find the most likely deadline phrase in {body}
    ExtractDeadline,
    /// Summarize {body}
    Summarize,
    /// Template reply for {priority}
    DraftReply,
    /// Record {texts, labels} training examples
    AddFeedback,
    /// Classify, extract, summarize and draft in one pass
    Process,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let mut bytes = Vec::new();
    if let Err(err) = tokio::io::stdin().read_to_end(&mut bytes).await {
        tracing::warn!(target: "input", error = %err, "failed to read stdin; using defaults");
        bytes.clear();
    }
    let raw = decode_request(&bytes);

    let capabilities = ai::connect(&config.inference);
    let feedback = match cli.command {
        Command::AddFeedback => app::open_feedback_store(&paths).await,
        _ => None,
    };
    let app = TriageApp::new(capabilities, config.summary.max_length, feedback);

    tracing::debug!(target: "app", command = ?cli.command, bytes = raw.len(), "handling request");
    let response = dispatch(&app, cli.command, &raw).await?;
    app.close().await;

    write_response(&response)
}

/// Invalid UTF-8 is replaced rather than rejected so the request still gets
/// an answer.
fn decode_request(bytes: &[u8]) -> Cow<'_, str> {
    let raw = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = raw {
        tracing::warn!(
            target: "input",
            bytes = bytes.len(),
            "request is not valid UTF-8; decoded lossily"
        );
    }
    raw
}

/// Serializes the typed result so fields keep their declared order.
async fn dispatch(app: &TriageApp, command: Command, raw: &str) -> Result<String> {
    let json = match command {
        Command::Classify => {
            let input: EmailInput = parse_request(raw);
            serde_json::to_string(&app.classify(&input))?
        }
        Command::ExtractDeadline => {
            let input: EmailInput = parse_request(raw);
            serde_json::to_string(&app.extract_deadline(&input.body).await)?
        }
        Command::Summarize => {
            let input: EmailInput = parse_request(raw);
            serde_json::to_string(&SummaryResponse {
                summary: app.summarize(&input.body).await,
            })?
        }
        Command::DraftReply => {
            let request: DraftRequest = parse_request(raw);
            serde_json::to_string(&DraftResponse {
                draft: app.draft_reply(&request.priority),
            })?
        }
        Command::AddFeedback => {
            let request: FeedbackRequest = parse_request(raw);
            serde_json::to_string(&app.add_feedback(&request).await)?
        }
        Command::Process => {
            let input: EmailInput = parse_request(raw);
            serde_json::to_string(&app.process(&input).await)?
        }
    };
    Ok(json)
}

#[derive(Serialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Serialize)]
struct DraftResponse {
    draft: String,
}

fn write_response(response: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(response.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::ai::Capabilities;

    fn offline_app() -> TriageApp {
        TriageApp::new(Capabilities::unavailable("offline"), 100, None)
    }

    async fn run(command: Command, raw: &str) -> Value {
        let json = dispatch(&offline_app(), command, raw).await.unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn subcommands_use_kebab_case() {
        let cli = Cli::try_parse_from(["mail-triage", "extract-deadline"]).unwrap();
        assert!(matches!(cli.command, Command::ExtractDeadline));
        assert!(Cli::try_parse_from(["mail-triage", "extract_deadline"]).is_err());
    }

    #[tokio::test]
    async fn classify_empty_request_end_to_end() {
        let json = dispatch(&offline_app(), Command::Classify, "{}").await.unwrap();
        assert_eq!(
            json,
            r#"{"priority":"urgent","confidence":60,"scores":{"urgent":0.0,"normal":0.0,"low":0.0}}"#
        );
    }

    #[tokio::test]
    async fn classify_weekly_update() {
        let raw = r#"{"subject":"Weekly update","body":"Please review the attached document and provide feedback"}"#;
        let value = run(Command::Classify, raw).await;
        assert_eq!(value["priority"], "normal");
        assert_eq!(value["confidence"], 100);
    }

    #[tokio::test]
    async fn invalid_utf8_still_classifies() {
        let raw = decode_request(b"{\"body\":\"caf\xe9 urgent\"}");
        assert!(raw.contains('\u{FFFD}'));

        let value = run(Command::Classify, &raw).await;
        assert_eq!(value["priority"], "urgent");
        assert!(value["confidence"].as_u64().unwrap() >= 85);
    }

    #[tokio::test]
    async fn binary_garbage_gets_default_draft() {
        let raw = decode_request(b"\xff\xfe");
        let garbage = run(Command::DraftReply, &raw).await;
        let normal = run(Command::DraftReply, r#"{"priority":"normal"}"#).await;
        assert_eq!(garbage, normal);
    }

    #[test]
    fn valid_utf8_is_borrowed() {
        assert!(matches!(decode_request(b"{}"), Cow::Borrowed("{}")));
    }

    #[tokio::test]
    async fn deadline_without_engine_is_null() {
        let json = dispatch(&offline_app(), Command::ExtractDeadline, r#"{"body":"due friday"}"#)
            .await
            .unwrap();
        assert_eq!(json, r#"{"deadline":null,"confidence":0.0}"#);
    }

    #[tokio::test]
    async fn draft_reply_defaults_to_normal() {
        let missing = run(Command::DraftReply, "{}").await;
        let normal = run(Command::DraftReply, r#"{"priority":"normal"}"#).await;
        assert_eq!(missing, normal);
    }

    #[tokio::test]
    async fn add_feedback_acknowledges() {
        let raw = r#"{"texts":["server down"],"labels":["urgent"]}"#;
        let json = dispatch(&offline_app(), Command::AddFeedback, raw).await.unwrap();
        assert_eq!(json, r#"{"status":"success","message":"Feedback added"}"#);
    }

    #[tokio::test]
    async fn malformed_input_still_answers() {
        let value = run(Command::Summarize, "{{{").await;
        assert_eq!(value, serde_json::json!({"summary": ""}));
    }

    #[tokio::test]
    async fn process_keeps_section_order() {
        let json = dispatch(&offline_app(), Command::Process, "{}").await.unwrap();
        let positions: Vec<usize> = ["\"classification\"", "\"deadline\"", "\"summary\"", "\"draft\""]
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
