//! Gemini client for natural-language expense extraction
//!
//! Sends the user's text to `models/{model}:generateContent` with a JSON
//! response schema, then parses the returned array into proposals.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::config::ExtractionSettings;
use crate::domain::reminder::date_key;
use crate::domain::result::{Error, Result};
use crate::domain::{ExpenseCategory, NewExpense};
use crate::ports::ExpenseExtractor;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

pub struct GeminiExtractor {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiExtractor {
    pub fn new(settings: &ExtractionSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::extraction(e.to_string()))?;

        Ok(Self {
            client,
            api_key: settings.api_key.trim().to_string(),
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(text: &str, today: NaiveDate) -> JsonValue {
        let categories: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.label()).collect();
        let instruction = format!(
            "You are an expense tracking assistant.\n\
             Extract food-related expenses from the user's natural language input.\n\
             Categorize them into one of the following: {}.\n\
             Return a JSON array of objects.\n\
             If the currency is not specified, assume the user's local currency units (just the number).\n\
             If date is not specified, use today's date: {}.",
            categories.join(", "),
            date_key(today)
        );

        json!({
            "systemInstruction": { "parts": [{ "text": instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "description": { "type": "STRING" },
                            "amount": { "type": "NUMBER" },
                            "date": { "type": "STRING", "description": "YYYY-MM-DD format" },
                            "category": { "type": "STRING", "enum": categories }
                        },
                        "required": ["description", "amount", "date", "category"]
                    }
                }
            }
        })
    }
}

#[async_trait]
impl ExpenseExtractor for GeminiExtractor {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn extract(&self, text: &str, today: NaiveDate) -> Result<Vec<NewExpense>> {
        if !self.is_configured() {
            return Err(Error::config("API Key is missing"));
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(text, today))
            .send()
            .await
            .map_err(|e| Error::extraction(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), body.trim()));
            return Err(Error::extraction(message));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::extraction(format!("Failed to parse model response: {}", e)))?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(Error::extraction(format!("Request blocked: {}", reason)));
        }

        let text = parsed.text();
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let proposals: Vec<NewExpense> = serde_json::from_str(&text)
            .map_err(|e| Error::extraction(format!("Model returned malformed expenses: {}", e)))?;
        debug!(count = proposals.len(), "Extracted expense proposals");
        Ok(proposals)
    }
}
