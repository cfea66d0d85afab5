//! Runtime configuration from environment variables

use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Path to the UCI engine binary.
    pub stockfish_path: String,

    /// Time budget per position evaluation, in milliseconds.
    pub eval_time_ms: u64,

    /// Centipawn delta below which a move counts as a blunder.
    pub blunder_threshold: i32,

    /// Credential for the advice service. Advice stays disabled when unset.
    pub openai_api_key: Option<String>,

    /// Chat model used for advice.
    pub advice_model: String,

    /// Base URL of the advice API.
    pub advice_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            stockfish_path: env::var("STOCKFISH_PATH")
                .unwrap_or_else(|_| "stockfish".to_string()),
            eval_time_ms: env::var("EVAL_TIME_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            blunder_threshold: env::var("BLUNDER_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(-200),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            advice_model: env::var("ADVICE_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            advice_base_url: env::var("ADVICE_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        }
    }
}
