use serde::Deserialize;
use std::collections::HashMap;
use std::env;

use crate::models::Role;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse `PABU_ROLE_MAP` env var.
/// Format: comma-separated `email:role` pairs, e.g.
/// `alice@corp.example:admin,bob@corp.example:manager`
fn parse_role_map() -> HashMap<String, Role> {
    match env::var("PABU_ROLE_MAP") {
        Ok(val) if !val.is_empty() => val
            .split(',')
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, ':');
                let email = parts.next()?.trim();
                let role = parts.next()?.trim();
                if email.is_empty() {
                    tracing::warn!("Invalid role pair '{}' in PABU_ROLE_MAP, skipping", pair);
                    return None;
                }
                match role.parse::<Role>() {
                    Ok(role) => Some((email.to_lowercase(), role)),
                    Err(_) => {
                        tracing::warn!(
                            "Unknown role '{}' for '{}' in PABU_ROLE_MAP, skipping",
                            role,
                            email
                        );
                        None
                    }
                }
            })
            .collect(),
        _ => HashMap::new(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub chat: ChatConfig,
    pub retrieval: RetrievalConfig,
    pub llm: Option<LlmConfig>,
    /// Authoritative email -> role directory, re-applied on every user upsert.
    pub roles: HashMap<String, Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

/// Chat pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Maximum history turns forwarded to the model. 0 keeps the full
    /// conversation; otherwise the oldest turns are dropped first.
    pub history_limit: usize,
    pub default_language: String,
}

/// Document retrieval (RAG) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    pub enabled: bool,
    /// Maximum ranked documents injected into the prompt.
    pub limit: usize,
    /// Characters of document content quoted per excerpt.
    pub excerpt_chars: usize,
}

/// LLM configuration for the chat completion model
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("PABU_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PABU_PORT", 3000),
                api_keys: env::var("PABU_API_KEYS")
                    .map(|keys| keys.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:pabu.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            chat: ChatConfig {
                history_limit: parse_env_or("PABU_CHAT_HISTORY_LIMIT", 0),
                default_language: env::var("PABU_DEFAULT_LANGUAGE")
                    .unwrap_or_else(|_| "en".to_string()),
            },
            retrieval: RetrievalConfig {
                enabled: parse_env_or("PABU_RAG_ENABLED", true),
                limit: parse_env_or("PABU_RAG_LIMIT", 10),
                excerpt_chars: parse_env_or("PABU_RAG_EXCERPT_CHARS", 1000),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 3),
                temperature: parse_env_or("LLM_TEMPERATURE", 0.7),
                max_tokens: parse_env_or("LLM_MAX_TOKENS", 2048),
            }),
            roles: parse_role_map(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio", "groq"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
