//! Product description drafting via the Gemini API.
//!
//! The assistant never fails from the caller's point of view: missing
//! credentials and remote errors come back as fixed placeholder text.

mod config;

pub use config::AssistantConfig;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::app::{Result, VintiqueError};

pub const NOT_CONFIGURED_MESSAGE: &str = "API key not configured. Please add your Gemini API key.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "There was an error generating the description. Please try again.";

/// Something that turns keywords into a product description.
#[async_trait]
pub trait Describer {
    async fn generate_description(&self, keywords: &str) -> String;
}

pub fn build_prompt(keywords: &str) -> String {
    format!(
        "Generate a short, elegant, and enticing product description for a piece of vintage lingerie. \
         The description should be romantic and alluring. Use these keywords as inspiration: \"{}\". \
         Keep the description to a maximum of 3 sentences.",
        keywords.trim()
    )
}

pub struct DescriptionAssistant {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl DescriptionAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent("vintique/0.1.0")
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "falling back to default HTTP client");
                Client::new()
            });

        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!("Gemini API key not found; description generation is disabled");
        }

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, api_key: &str, keywords: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!(%url, "requesting description");

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(keywords)),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: GenerateResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(VintiqueError::Other("model returned no text".into()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl Describer for DescriptionAssistant {
    async fn generate_description(&self, keywords: &str) -> String {
        if keywords.trim().is_empty() {
            return String::new();
        }

        let Some(api_key) = self.api_key.as_deref() else {
            return NOT_CONFIGURED_MESSAGE.to_string();
        };

        match self.request(api_key, keywords).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "description generation failed");
                GENERATION_FAILED_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}
