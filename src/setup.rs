use anyhow::Result;
use log::debug;
use crate::config::Config;
use crate::llm::LlmClient;
use crate::llm::NoopClient;
use crate::llm::ollama::OllamaClient;

/// Build the LLM client based on CLI + config.
pub fn build_llm_client(cfg: &Config) -> Result<Box<dyn LlmClient>> {
    if cfg.disabled {
        debug!("Using NoopClient (no model calls).");
        return Ok(Box::new(NoopClient));
    }

    debug!("Using OllamaClient with model {} at {}", cfg.model, cfg.endpoint);

    Ok(Box::new(OllamaClient::new(cfg.endpoint.clone(), cfg.model.clone())?))
}
