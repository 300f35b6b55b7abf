use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // Overrides the per-environment log format ("json" or "pretty")
    pub log_format: Option<String>,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Load the demo projects into the stores at startup
    pub seed_data: bool,

    // Research service
    pub research_api_url: String,
    pub research_api_key: Option<String>,

    // Plan generation service
    pub plan_api_url: String,
    pub plan_api_key: Option<String>,
    pub plan_model: String,
    pub plan_max_tokens: u32,

    pub ai_timeout_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_format = non_empty_var("LOG_FORMAT");

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let seed_data = env::var("SEED_DATA")
            .map(|s| !matches!(s.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        // Research service
        let research_api_url =
            endpoint_var("RESEARCH_API_URL", "https://api.perplexity.ai/research")?;
        let research_api_key = non_empty_var("RESEARCH_API_KEY");

        // Plan generation service
        let plan_api_url = endpoint_var("PLAN_API_URL", "https://api.anthropic.com/v1/messages")?;
        let plan_api_key = non_empty_var("PLAN_API_KEY");
        let plan_model =
            env::var("PLAN_MODEL").unwrap_or_else(|_| "claude-3-opus-20240229".to_string());
        let plan_max_tokens = env::var("PLAN_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4000);

        let ai_timeout_seconds = env::var("AI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120); // 2 minutes default for LLM calls

        Ok(Settings {
            env,
            server_addr,
            log_format,
            cors_allow_origins,
            seed_data,
            research_api_url,
            research_api_key,
            plan_api_url,
            plan_api_key,
            plan_model,
            plan_max_tokens,
            ai_timeout_seconds,
        })
    }
}

/// Service endpoints must be absolute http(s) URLs.
fn endpoint_var(key: &str, default: &str) -> Result<String> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    let parsed = url::Url::parse(value.trim())
        .with_context(|| format!("{} is not a valid URL", key))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("{} must use http or https", key);
    }
    Ok(parsed.to_string())
}

/// Credentials are optional: a missing key only degrades the AI features to
/// placeholder output.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
impl Settings {
    /// Settings for router tests; never touches the process environment.
    pub fn for_tests() -> Self {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            log_format: None,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            seed_data: false,
            research_api_url: "http://127.0.0.1:9/research".to_string(),
            research_api_key: None,
            plan_api_url: "http://127.0.0.1:9/v1/messages".to_string(),
            plan_api_key: None,
            plan_model: "test-model".to_string(),
            plan_max_tokens: 512,
            ai_timeout_seconds: 1,
        }
    }
}
