//! Google Gemini translation client

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::TranslationError;
use crate::models::TranslationPayload;

use super::TranslationProvider;

/// Gemini REST endpoint
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: &str, config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl TranslationProvider for GeminiClient {
    async fn translate(
        &self,
        source_text: &str,
        language_code: &str,
        language_name: &str,
    ) -> Result<TranslationPayload, TranslationError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(source_text, language_code, language_name),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: self.temperature,
            },
        };

        tracing::debug!("Requesting {language_code} translation from {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Provider(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslationError::Provider(format!(
                "{status}: {}",
                error_text.trim()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Malformed(format!("unexpected response body: {e}")))?;

        let text = body
            .text()
            .ok_or_else(|| TranslationError::Malformed("response has no text".to_string()))?;

        parse_payload(&text)
    }
}

/// Build the translation prompt
pub fn build_prompt(source_text: &str, language_code: &str, language_name: &str) -> String {
    format!(
        r#"You are an expert in Vedic Sanskrit and translation.
Translate the following Sanskrit verse into {language_name} ({language_code}).

Sanskrit Verse:
"""
{source_text}
"""

Provide the translation in three distinct parts:
1. "Pada (key terms / word meanings)": break down key Sanskrit words from the verse and give their meanings in {language_name}. If no term needs separate analysis, say so briefly.
2. "Padartha (phrase analysis)": explain the meaning of the important phrases of the verse in {language_name}, showing how they build up its literal meaning.
3. "Bhavartha (purport)": give the overall essence or deeper meaning of the verse in {language_name}.

Return the result STRICTLY as a JSON object with this structure:
{{
  "pada": "Meaning of key words.",
  "padartha": "Explanation of phrases.",
  "bhavartha": "Overall essence."
}}

Do not add any text before or after the JSON object and do not wrap it in markdown.
Each field must be a single string suitable for direct display.
"#
    )
}

/// Strip an optional markdown code fence around a response
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    regex_lite::Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$")
        .ok()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(2))
        .map_or(text, |m| m.as_str().trim())
}

/// Parse and validate a model response
pub fn parse_payload(text: &str) -> Result<TranslationPayload, TranslationError> {
    let json = strip_code_fence(text);
    let payload: TranslationPayload =
        serde_json::from_str(json).map_err(|e| TranslationError::Malformed(e.to_string()))?;

    let payload = payload.normalized();
    if payload.is_valid() {
        Ok(payload)
    } else {
        Err(TranslationError::Incomplete)
    }
}

// API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_language_and_verse() {
        let prompt = build_prompt("agnim ile purohitam", "fr", "French");
        assert!(prompt.contains("into French (fr)"));
        assert!(prompt.contains("agnim ile purohitam"));
        assert!(prompt.contains("\"bhavartha\""));
    }

    #[test]
    fn test_parse_fenced_response() {
        let text = "```json\n{\"pada\": \"agni: fire\", \"padartha\": \"I praise Agni\", \"bhavartha\": \"Agni leads\"}\n```";
        let payload = parse_payload(text).unwrap();
        assert_eq!(payload.gloss.as_deref(), Some("agni: fire"));
        assert_eq!(payload.phrase_analysis.as_deref(), Some("I praise Agni"));
        assert_eq!(payload.purport.as_deref(), Some("Agni leads"));
    }

    #[test]
    fn test_parse_bare_response_without_gloss() {
        let payload = parse_payload(r#"  {"padartha": "", "bhavartha": "Truth is one"}  "#).unwrap();
        assert_eq!(payload.gloss, None);
        assert_eq!(payload.phrase_analysis, None);
        assert_eq!(payload.purport.as_deref(), Some("Truth is one"));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert_eq!(
            parse_payload(r#"{"pada": "only words"}"#),
            Err(TranslationError::Incomplete)
        );
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_payload("Sure! Here is the translation"),
            Err(TranslationError::Malformed(_))
        ));
    }

    #[test]
    fn test_strip_code_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence(" {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"bhav"}, {"text": "artha\": \"x\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("{\"bhavartha\": \"x\"}"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn test_endpoint_uses_configured_model() {
        let config = ProviderConfig::default();
        let client = GeminiClient::new("key", &config).unwrap();
        assert_eq!(
            client.endpoint(),
            format!("{API_BASE_URL}/models/{}:generateContent", config.model)
        );
    }
}
