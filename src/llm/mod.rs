pub mod ollama;
pub mod prompt_builder;
mod prompts;

use anyhow::Result;
use std::time::Duration;

/// Trait for talking to an LLM (real or no-op).
pub trait LlmClient: Send + Sync {
    /// Send `prompt` and wait at most `timeout` for the generated text.
    ///
    /// `Ok(None)` means the server answered without any text. Transport,
    /// HTTP and decoding failures come back as `Err`.
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<Option<String>>;
}

/// No-op client for --no-model or model=none. Never produces text.
pub struct NoopClient;

impl LlmClient for NoopClient {
    fn generate(&self, _prompt: &str, _timeout: Duration) -> Result<Option<String>> {
        Ok(None)
    }
}
