use async_trait::async_trait;
use chrono::Local;
use serde_json::{Value, json};
use tracing::debug;
use wl_core::{Config, ParseContext, WorklogEntry};

use crate::error::ParseError;
use crate::extract::extract_entries;
use crate::prompt::build_prompt;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_BASE_URL: &str = "https://api.openai.com";
const MAX_TOKENS: u32 = 2000;

/// Port over the completion backend. Both providers build the same prompt,
/// run one completion, and pass the text through the strict extractor.
#[async_trait]
pub trait WorklogParser: Send + Sync {
    async fn parse(
        &self,
        input: &str,
        context: &ParseContext,
    ) -> Result<Vec<WorklogEntry>, ParseError>;
}

/// Selects the concrete backend from the persisted provider tag.
pub fn create_parser(config: &Config) -> Box<dyn WorklogParser> {
    match config.ai_provider {
        wl_core::AiProvider::Anthropic => Box::new(AnthropicParser::new(
            config.ai_api_key.clone(),
            config.model().to_string(),
        )),
        wl_core::AiProvider::OpenAi => Box::new(OpenAiParser::new(
            config.ai_api_key.clone(),
            config.model().to_string(),
        )),
    }
}

fn transport_from(err: reqwest::Error) -> ParseError {
    ParseError::transport(err.status().map(|s| s.as_u16()), err.to_string())
}

async fn check_status(response: reqwest::Response) -> Result<String, ParseError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_from)?;
    if !status.is_success() {
        return Err(ParseError::transport(Some(status.as_u16()), body));
    }
    Ok(body)
}

fn finish(text: &str) -> Result<Vec<WorklogEntry>, ParseError> {
    let entries = extract_entries(text)?;
    if entries.is_empty() {
        return Err(ParseError::EmptyExtraction);
    }
    Ok(entries)
}

pub struct AnthropicParser {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicParser {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, ANTHROPIC_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ParseError> {
        let url = format!("{}/v1/messages", self.base_url);
        debug!(model = %self.model, "sending anthropic completion request");
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()
            .await
            .map_err(transport_from)?;

        let body = check_status(response).await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|_| ParseError::MalformedResponse)?;
        let text = value
            .get("content")
            .and_then(|c| c.get(0))
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(text.to_string())
    }
}

#[async_trait]
impl WorklogParser for AnthropicParser {
    async fn parse(
        &self,
        input: &str,
        context: &ParseContext,
    ) -> Result<Vec<WorklogEntry>, ParseError> {
        let prompt = build_prompt(input, context, Local::now().date_naive());
        let text = self.complete(&prompt).await?;
        finish(&text)
    }
}

pub struct OpenAiParser {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiParser {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, OPENAI_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ParseError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %self.model, "sending openai completion request");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()
            .await
            .map_err(transport_from)?;

        let body = check_status(response).await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|_| ParseError::MalformedResponse)?;
        let text = value
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(text.to_string())
    }
}

#[async_trait]
impl WorklogParser for OpenAiParser {
    async fn parse(
        &self,
        input: &str,
        context: &ParseContext,
    ) -> Result<Vec<WorklogEntry>, ParseError> {
        let prompt = build_prompt(input, context, Local::now().date_naive());
        let text = self.complete(&prompt).await?;
        finish(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_core::AiProvider;

    fn context() -> ParseContext {
        ParseContext {
            project_key: "PROJ".into(),
            aliases: vec![],
            recent_tasks: vec![],
        }
    }

    fn anthropic_body(text: &str) -> String {
        json!({"content": [{"type": "text", "text": text}]}).to_string()
    }

    fn openai_body(text: &str) -> String {
        json!({"choices": [{"message": {"role": "assistant", "content": text}}]}).to_string()
    }

    #[tokio::test]
    async fn test_anthropic_happy_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "sk-test")
            .with_status(200)
            .with_body(anthropic_body(
                r#"[{"activity":"разработка","task":"PROJ-1","hours":3,"date":"2025-06-05"}]"#,
            ))
            .create_async()
            .await;

        let parser =
            AnthropicParser::with_base_url("sk-test".into(), "claude-haiku-4-5".into(), server.url());
        let entries = parser.parse("вчера PROJ-1 разработка 3ч", &context()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].task.as_deref(), Some("PROJ-1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_openai_happy_path() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_body(openai_body(
                r#"[{"activity":"митинг","task":null,"hours":1,"date":"2025-06-06"}]"#,
            ))
            .create_async()
            .await;

        let parser =
            OpenAiParser::with_base_url("sk-test".into(), "gpt-5-mini".into(), server.url());
        let entries = parser.parse("сегодня митинг 1ч", &context()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].task.is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_transport() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_body(r#"{"error":{"type":"authentication_error"}}"#)
            .create_async()
            .await;

        let parser =
            AnthropicParser::with_base_url("bad".into(), "claude-haiku-4-5".into(), server.url());
        let err = parser.parse("x", &context()).await.unwrap_err();
        match err {
            ParseError::Transport { status, .. } => assert_eq!(status, Some(401)),
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_well_formed_but_empty_is_empty_extraction() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(openai_body("[]"))
            .create_async()
            .await;

        let parser = OpenAiParser::with_base_url("k".into(), "gpt-5-mini".into(), server.url());
        let err = parser.parse("???", &context()).await.unwrap_err();
        assert!(matches!(err, ParseError::EmptyExtraction));
    }

    #[tokio::test]
    async fn test_prose_response_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body(anthropic_body("I'm sorry, I can't help with that."))
            .create_async()
            .await;

        let parser =
            AnthropicParser::with_base_url("k".into(), "claude-haiku-4-5".into(), server.url());
        let err = parser.parse("x", &context()).await.unwrap_err();
        assert!(matches!(err, ParseError::MalformedResponse));
    }

    #[test]
    fn test_factory_honors_provider_tag() {
        let mut config = Config {
            jira_url: "https://jira.example.com".into(),
            jira_username: "u".into(),
            jira_password: "p".into(),
            project_key: "PROJ".into(),
            ai_provider: AiProvider::Anthropic,
            ai_api_key: "k".into(),
            ai_model: None,
            lang: wl_core::Lang::Ru,
        };
        // The factory must not panic and must produce a parser for both tags.
        let _ = create_parser(&config);
        config.ai_provider = AiProvider::OpenAi;
        let _ = create_parser(&config);
    }
}
