//! Chat-completion client for the coaching side channel.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::AdviceError;

const SYSTEM_PROMPT: &str = "You are a chess coach providing advice to a player.";

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

pub struct AdviceClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AdviceClient {
    pub fn new(config: &Config) -> Result<Self, AdviceError> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or(AdviceError::MissingCredential)?;

        let client = Client::builder()
            .user_agent("ChessMentor/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.advice_model.clone(),
            base_url: config.advice_base_url.clone(),
        })
    }

    /// Ask the coach about the current position. `last_move` is the most
    /// recent move in UCI form, or "none" at the start of the game.
    pub async fn request_advice(&self, fen: &str, last_move: &str) -> Result<String, AdviceError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(fen, last_move),
                },
            ],
            max_tokens: 150,
            temperature: 0.7,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AdviceError::Status(resp.status()));
        }

        let payload: Value = resp.json().await?;
        match extract_content(&payload) {
            Some(text) => Ok(text),
            None => {
                tracing::warn!("Advice response had no message content");
                Err(AdviceError::Malformed)
            }
        }
    }
}

fn build_prompt(fen: &str, last_move: &str) -> String {
    format!(
        "The current chess position is {fen}. The last move was {last_move}. \
         What advice do you have for the player?"
    )
}

fn extract_content(payload: &Value) -> Option<String> {
    let content = payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()?;
    Some(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let payload: Value = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":" Develop your knights. "}}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_content(&payload),
            Some("Develop your knights.".to_string())
        );
    }

    #[test]
    fn test_extract_content_missing() {
        let payload: Value = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(extract_content(&payload), None);

        let payload: Value = serde_json::from_str(r#"{"error":{"message":"bad key"}}"#).unwrap();
        assert_eq!(extract_content(&payload), None);
    }

    #[test]
    fn test_build_prompt_mentions_position_and_move() {
        let prompt = build_prompt("8/8/8/8/8/8/8/K6k w - - 0 1", "e2e4");
        assert!(prompt.contains("8/8/8/8/8/8/8/K6k w - - 0 1"));
        assert!(prompt.contains("e2e4"));
    }
}
