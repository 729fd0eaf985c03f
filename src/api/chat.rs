//! The chat-session contract and its reqwest-backed Gemini implementation.
//!
//! The controller and the web surface only ever see [`ChatCreator`] and
//! [`ChatSession`], so tests can substitute scripted doubles for the real
//! network client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A stateful conversational handle: one `send` per controller command.
///
/// Implementations perform no retry of their own; retry is always a
/// user-initiated resubmission.
#[async_trait]
pub trait ChatSession: Send {
    async fn send(&mut self, text: &str) -> Result<String, ApiError>;
}

/// Produces a [`ChatSession`] for a model identifier and temperature.
#[async_trait]
pub trait ChatCreator: Send + Sync {
    async fn create(
        &self,
        model: &str,
        temperature: f32,
    ) -> Result<Box<dyn ChatSession>, ApiError>;
}

/// Real client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

#[async_trait]
impl ChatCreator for GeminiClient {
    async fn create(
        &self,
        model: &str,
        temperature: f32,
    ) -> Result<Box<dyn ChatSession>, ApiError> {
        if model.is_empty() {
            return Err(ApiError::SessionCreation("no model selected".to_string()));
        }

        Ok(Box::new(GeminiChatSession {
            http: self.http.clone(),
            url: format!("{}/models/{}:generateContent", self.base_url, model),
            api_key: self.api_key.clone(),
            temperature,
            history: Vec::new(),
        }))
    }
}

struct GeminiChatSession {
    http: Client,
    url: String,
    api_key: String,
    temperature: f32,
    history: Vec<Content>,
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    async fn send(&mut self, text: &str) -> Result<String, ApiError> {
        self.history.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });

        let request = GenerateContentRequest {
            contents: &self.history,
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        debug!(url = %self.url, chars = text.len(), "sending generateContent request");

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::MessageSend(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ApiError::MessageSend(format!(
                "API request failed with status {status}: {error_text}"
            )));
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| ApiError::MessageSend(e.to_string()))?;

        let reply = flatten_response(&parsed)?;

        self.history.push(Content {
            role: "model".to_string(),
            parts: vec![Part {
                text: reply.clone(),
            }],
        });

        Ok(reply)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Concatenated text of all parts of the first candidate. Zero candidates
/// or zero parts is a `NoResponseCandidates` failure, never an empty
/// success.
fn flatten_response(response: &GenerateContentResponse) -> Result<String, ApiError> {
    let content = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .ok_or(ApiError::NoResponseCandidates)?;

    if content.parts.is_empty() {
        return Err(ApiError::NoResponseCandidates);
    }

    let mut text = String::new();
    for part in &content.parts {
        text.push_str(&part.text);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_parts(parts: Vec<&str>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: "model".to_string(),
                    parts: parts
                        .into_iter()
                        .map(|text| Part {
                            text: text.to_string(),
                        })
                        .collect(),
                }),
            }],
        }
    }

    #[test]
    fn flatten_concatenates_parts_of_first_candidate() {
        let response = response_with_parts(vec!["Hello, ", "world."]);
        assert_eq!(flatten_response(&response).unwrap(), "Hello, world.");
    }

    #[test]
    fn flatten_rejects_zero_candidates() {
        let response = GenerateContentResponse { candidates: vec![] };
        assert_eq!(
            flatten_response(&response),
            Err(ApiError::NoResponseCandidates)
        );
    }

    #[test]
    fn flatten_rejects_candidate_without_content() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate { content: None }],
        };
        assert_eq!(
            flatten_response(&response),
            Err(ApiError::NoResponseCandidates)
        );
    }

    #[test]
    fn flatten_rejects_zero_parts() {
        let response = response_with_parts(vec![]);
        assert_eq!(
            flatten_response(&response),
            Err(ApiError::NoResponseCandidates)
        );
    }

    #[test]
    fn response_parses_from_wire_json() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"hi"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(flatten_response(&parsed).unwrap(), "hi");
    }

    #[tokio::test]
    async fn create_rejects_empty_model_identifier() {
        let client = GeminiClient::new("test-key".to_string());
        let err = client.create("", 0.0).await.err().unwrap();
        assert!(matches!(err, ApiError::SessionCreation(_)));
    }
}
