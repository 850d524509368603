//! OpenAI-compatible chat completion extractor
//!
//! Sends the notes with a strict JSON schema response format and reads the
//! model output from `choices[0].message.content`. Any endpoint speaking the
//! same chat completion protocol can be used by changing `base_url`.

use crate::config::defaults::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::config::ExtractionConfig;
use crate::constants::api::{OPENAI_CHAT_URL, USER_AGENT};
use crate::error::{ExtractionError, Result};
use crate::extract::{parse_payload, Extractor};
use crate::trip::{Extraction, PlaceType};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info};

const SYSTEM_PROMPT: &str = "You are a travel planning assistant that extracts location information from trip notes. You must respond with valid JSON matching the provided schema.";

/// Chat completion extraction backend
#[derive(Debug, Clone)]
pub struct OpenAiExtractor {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl OpenAiExtractor {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: OPENAI_CHAT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    pub fn from_config(config: &ExtractionConfig, api_key: &str) -> Result<Self> {
        let mut extractor = Self::new(api_key, Duration::from_secs(config.timeout_secs))?;
        extractor.base_url = config.base_url.clone();
        extractor.model = config.model.clone();
        extractor.temperature = config.temperature;
        extractor.max_tokens = config.max_tokens;
        Ok(extractor)
    }

    /// Point the extractor at a different chat completion endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Request body for one extraction call
    pub fn request_body(&self, text: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(text) }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "place_extraction",
                    "strict": true,
                    "schema": {
                        "type": "object",
                        "properties": {
                            "destination": { "type": "string" },
                            "places": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "name": { "type": "string" },
                                        "context": { "type": "string" },
                                        "type": { "type": "string" }
                                    },
                                    "required": ["name", "context", "type"],
                                    "additionalProperties": false
                                }
                            }
                        },
                        "required": ["destination", "places"],
                        "additionalProperties": false
                    }
                }
            },
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        })
    }
}

/// User prompt wrapping the notes
pub fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze this travel text and extract location information.

First, identify the PRIMARY DESTINATION (city, region, or country) the user is traveling to or writing about.
Then, extract ONLY places (landmarks, restaurants, hotels, attractions) that are located IN or NEAR that primary destination.

Ignore places in other cities or countries unless they are clearly part of the same trip.

Return JSON in this exact format:
{{
  "destination": "City Name, Country",
  "places": [
    {{
      "name": "Place Name",
      "context": "brief description from text",
      "type": "{}"
    }}
  ]
}}

Choose the most appropriate type for each place.

Text:
{}
"#,
        PlaceType::vocabulary(),
        text
    )
}

/// Classify a non-success HTTP answer from the completion service
pub fn classify_status(status: StatusCode, body: &str) -> ExtractionError {
    let detail = format!("HTTP {}: {}", status, body.chars().take(200).collect::<String>());
    if status == StatusCode::TOO_MANY_REQUESTS || body.contains("rate_limit") {
        ExtractionError::RateLimited(detail)
    } else if status == StatusCode::UNAUTHORIZED || body.contains("invalid_api_key") {
        ExtractionError::AuthConfigError(detail)
    } else {
        ExtractionError::ServiceError(detail)
    }
}

fn classify_transport(err: reqwest::Error) -> ExtractionError {
    if err.is_timeout() {
        ExtractionError::Timeout(err.to_string())
    } else if err.is_connect() {
        ExtractionError::ConnectionFailure(err.to_string())
    } else {
        ExtractionError::ServiceError(err.to_string())
    }
}

/// Pull the model output out of a chat completion envelope
pub fn parse_completion(body: &Value) -> std::result::Result<Extraction, ExtractionError> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| ExtractionError::MalformedResponse("No response content".to_string()))?;

    parse_payload(content)
}

impl Extractor for OpenAiExtractor {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn extract(&self, text: &str) -> std::result::Result<Extraction, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }
        if !self.has_key() {
            return Err(ExtractionError::AuthConfigError(
                "API key is missing".to_string(),
            ));
        }

        info!("Calling {} for place extraction...", self.model);
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| {
                error!("Extraction request failed: {}", e);
                classify_transport(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        if !status.is_success() {
            let err = classify_status(status, &body);
            error!("Extraction service error: {}", err);
            return Err(err);
        }

        let envelope: Value = serde_json::from_str(&body)
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;
        let extraction = parse_completion(&envelope)?;

        info!("Detected destination: {}", extraction.destination);
        debug!("Extracted places: {}", extraction.places.len());
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};

    fn completion(content: &str) -> Value {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
    }

    fn extractor(base: &str) -> OpenAiExtractor {
        OpenAiExtractor::new("sk-test", Duration::from_secs(5))
            .unwrap()
            .with_base_url(format!("{}/v1/chat/completions", base))
    }

    #[test]
    fn test_prompt_contains_vocabulary_and_text() {
        let prompt = build_prompt("Visit Tokyo Tower");
        assert!(prompt.contains("restaurant|bar|cafe|hotel|landmark"));
        assert!(prompt.trim_end().ends_with("Visit Tokyo Tower"));
        assert!(prompt.contains("\"destination\": \"City Name, Country\""));
    }

    #[test]
    fn test_request_body_schema() {
        let e = OpenAiExtractor::new("k", Duration::from_secs(1)).unwrap();
        let body = e.request_body("notes");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["response_format"]["json_schema"]["name"], "place_extraction");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ExtractionError::RateLimited(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, r#"{"error":{"code":"rate_limit_exceeded"}}"#),
            ExtractionError::RateLimited(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, ""),
            ExtractionError::AuthConfigError(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ExtractionError::ServiceError(_)
        ));
    }

    #[test]
    fn test_parse_completion_missing_content() {
        assert!(matches!(
            parse_completion(&json!({ "choices": [] })),
            Err(ExtractionError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_text_makes_no_call() {
        // nothing listens here; a network call would fail differently
        let e = extractor("http://127.0.0.1:1");
        assert_eq!(e.extract("   \n").await, Err(ExtractionError::EmptyInput));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let e = OpenAiExtractor::new("", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            e.extract("Visit Rome").await,
            Err(ExtractionError::AuthConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_against_fake_upstream() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(
                    headers.get("authorization").and_then(|v| v.to_str().ok()),
                    Some("Bearer sk-test")
                );
                assert!(body["messages"][1]["content"]
                    .as_str()
                    .unwrap()
                    .contains("Sukiyabashi Jiro"));
                Json(completion(
                    r#"{"destination": "Tokyo, Japan", "places": [
                        {"name": "Tokyo Tower", "context": "views", "type": "landmark"},
                        {"name": "Sukiyabashi Jiro", "context": "sushi", "type": "restaurant"}
                    ]}"#,
                ))
            }),
        );
        let base = spawn_upstream(router).await;

        let extraction = extractor(&base)
            .extract("Visit Tokyo Tower and eat at Sukiyabashi Jiro")
            .await
            .unwrap();
        assert_eq!(extraction.destination, "Tokyo, Japan");
        let names: Vec<_> = extraction.places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tokyo Tower", "Sukiyabashi Jiro"]);
    }

    #[tokio::test]
    async fn test_malformed_model_output() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(completion("{ this is not json")) }),
        );
        let base = spawn_upstream(router).await;

        let err = extractor(&base).extract("Visit Rome").await.unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_rate_limited_upstream() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    AxumStatus::TOO_MANY_REQUESTS,
                    r#"{"error":{"code":"rate_limit_exceeded"}}"#,
                )
                    .into_response()
            }),
        );
        let base = spawn_upstream(router).await;

        let err = extractor(&base).extract("Visit Rome").await.unwrap_err();
        assert!(matches!(err, ExtractionError::RateLimited(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(completion("[]"))
            }),
        );
        let base = spawn_upstream(router).await;

        let e = OpenAiExtractor::new("sk-test", Duration::from_millis(100))
            .unwrap()
            .with_base_url(format!("{}/v1/chat/completions", base));
        assert!(matches!(
            e.extract("Visit Rome").await,
            Err(ExtractionError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let e = extractor("http://127.0.0.1:1");
        assert!(matches!(
            e.extract("Visit Rome").await,
            Err(ExtractionError::ConnectionFailure(_))
        ));
    }
}
