use std::{env, time::Duration};

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, InferenceConfig, LoggingConfig, SummaryConfig,
};

pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_QA_MODEL: &str = "distilbert-base-cased-distilled-squad";
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let enabled = match env::var("INFERENCE_ENABLED") {
            Ok(value) => parse_flag("INFERENCE_ENABLED", &value)?,
            Err(_) => true,
        };

        let inference = InferenceConfig {
            enabled,
            api_url: env::var("INFERENCE_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string()),
            api_key: env::var("INFERENCE_API_KEY").ok().filter(|v| !v.is_empty()),
            qa_model: env::var("QA_MODEL").unwrap_or_else(|_| DEFAULT_QA_MODEL.to_string()),
            summarization_model: env::var("SUMMARIZATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_SUMMARIZATION_MODEL.to_string()),
            timeout: Duration::from_millis(parse_num("INFERENCE_TIMEOUT_MS").unwrap_or(30_000)),
        };

        let summary = SummaryConfig {
            max_length: parse_num("SUMMARY_MAX_LENGTH")
                .map(|v| v as usize)
                .unwrap_or(100),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            feedback_db_filename: env::var("FEEDBACK_DB_FILENAME")
                .unwrap_or_else(|_| "feedback.db".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            inference,
            summary,
            directories,
            logging,
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_num(key: &str) -> Option<u64> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
}
