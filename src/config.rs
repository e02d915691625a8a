use anyhow::{bail, Context, Result};
use std::env;

use crate::model::ModelChoice;

const DEFAULT_MODELS: &str = "llama3,mistral,gemma";

#[derive(Debug, Clone)]
pub struct Settings {
    pub ollama_url: String,
    pub models: Vec<String>,
    pub default_model: String,
    pub bind_address: String,
    pub port: u16,
    pub templates_dir: String,
    pub static_dir: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        // A full URL wins over host/port
        let ollama_url = match lookup("OLLAMA_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url.trim().to_string(),
            None => {
                let host = var("OLLAMA_HOST", "localhost");
                let port: u16 = var("OLLAMA_PORT", "11434")
                    .parse()
                    .context("OLLAMA_PORT must be a port number")?;
                format!("http://{}:{}/api/generate", host, port)
            }
        };

        let models: Vec<String> = var("CHAT_MODELS", DEFAULT_MODELS)
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        if models.is_empty() {
            bail!("CHAT_MODELS lists no models");
        }

        let default_model = var("DEFAULT_MODEL", &models[0]);
        if !models.contains(&default_model) {
            bail!(
                "DEFAULT_MODEL '{}' is not one of CHAT_MODELS ({})",
                default_model,
                models.join(", ")
            );
        }

        let port = var("PORT", "8080")
            .parse()
            .context("PORT must be a port number")?;

        Ok(Self {
            ollama_url,
            models,
            default_model,
            bind_address: var("BIND_ADDRESS", "127.0.0.1"),
            port,
            templates_dir: var("TEMPLATES_DIR", "templates"),
            static_dir: var("STATIC_DIR", "static"),
        })
    }

    pub fn default_choice(&self) -> ModelChoice {
        ModelChoice::Listed(self.default_model.clone())
    }
}
