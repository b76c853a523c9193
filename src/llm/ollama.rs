use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::LlmClient;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Only `response` matters; Ollama's timing and context fields are ignored.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Synchronous Ollama client using /api/generate.
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl LlmClient for OllamaClient {
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<Option<String>> {
        let req_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        log::trace!("Ollama request body: {:?}", req_body);

        let url = self.generate_url();
        log::info!("Calling Ollama model {:?} at {url}", self.model);

        let resp = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(&req_body)
            .send()
            .map_err(|e| anyhow!("Error calling Ollama at {url}: {e}"))?
            .error_for_status()
            .map_err(|e| anyhow!("Ollama HTTP error from {url}: {e}"))?;

        let resp_text = resp
            .text()
            .map_err(|e| anyhow!("Failed to read Ollama response body: {e}"))?;

        log::trace!("Ollama raw JSON response: {resp_text}");

        let parsed: GenerateResponse = serde_json::from_str(&resp_text)
            .map_err(|e| anyhow!("Failed to decode Ollama JSON: {e}"))?;

        Ok(parsed.response)
    }
}
