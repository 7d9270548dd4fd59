//! Runtime settings for the workflow core.
//!
//! Defaults mirror the backend's tuned values; everything here can be
//! overridden from a TOML file, and secrets additionally from the
//! environment. The keyword tables are policy data, not invariants —
//! callers may replace them wholesale.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AgentError;

/// Supported text-generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Ollama,
    OpenAi,
    DeepSeek,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
            ProviderKind::DeepSeek => "deepseek",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            other => Err(AgentError::config(format!("unknown LLM provider: {}", other))),
        }
    }
}

/// Connection settings for the generation collaborator.
///
/// The concrete client lives outside this crate; these settings exist so
/// that misconfiguration fails at startup rather than mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmProviderSettings {
    pub provider: ProviderKind,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub deepseek_api_key: String,
    pub deepseek_model: String,
}

impl Default for LlmProviderSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2:1b".to_string(),
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_string(),
            deepseek_api_key: String::new(),
            deepseek_model: "deepseek-chat".to_string(),
        }
    }
}

impl LlmProviderSettings {
    /// Pull provider selection and API keys from the environment, when set.
    pub fn apply_env(&mut self) -> Result<(), AgentError> {
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            self.provider = provider.parse()?;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai_api_key = key;
        }
        if let Ok(key) = std::env::var("DEEPSEEK_API_KEY") {
            self.deepseek_api_key = key;
        }
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            self.ollama_base_url = url;
        }
        Ok(())
    }

    /// Fail fast on missing credentials. Called before any workflow is built.
    pub fn validate(&self) -> Result<(), AgentError> {
        match self.provider {
            ProviderKind::Ollama => Ok(()),
            ProviderKind::OpenAi if self.openai_api_key.is_empty() => Err(AgentError::config(
                "OpenAI provider selected but no API key configured",
            )),
            ProviderKind::DeepSeek if self.deepseek_api_key.is_empty() => Err(AgentError::config(
                "DeepSeek provider selected but no API key configured",
            )),
            _ => Ok(()),
        }
    }
}

/// Tunables for the RAG and conversation workflows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Neighbor count for the main retrieval step (wider than generation
    /// needs, so grading has material to filter).
    pub retrieve_k: usize,
    /// Neighbor count for the conversation context retrieval step.
    pub context_k: usize,
    /// Cap on fragments kept by grading, and on the top-N fallback.
    pub max_relevant: usize,
    /// Minimum relevance score a fragment must reach to pass grading.
    pub grade_threshold: f32,
    /// Raw-distance sanity bound for the single-fragment routing probe.
    pub route_probe_bound: f32,
    /// Cap on the deduplicated source list.
    pub max_sources: usize,
    /// Keywords marking document-referencing language.
    pub doc_keywords: Vec<String>,
    /// Keywords marking a greeting.
    pub greeting_keywords: Vec<String>,
    /// Keywords marking a help request.
    pub help_keywords: Vec<String>,
    pub llm: LlmProviderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            retrieve_k: 8,
            context_k: 5,
            max_relevant: 5,
            grade_threshold: 1e-3,
            route_probe_bound: 1.0,
            max_sources: 5,
            doc_keywords: to_strings(&[
                "document",
                "file",
                "uploaded",
                "says",
                "mentioned",
                "according to",
                "in the",
                "from the",
                "based on",
                "what does",
                "find",
                "search",
                "summarize",
                "explain from",
            ]),
            greeting_keywords: to_strings(&[
                "hello",
                "hi",
                "hey",
                "good morning",
                "good evening",
                "howdy",
            ]),
            help_keywords: to_strings(&[
                "help",
                "how do",
                "how can",
                "what can you",
                "capabilities",
            ]),
            llm: LlmProviderSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults for any
    /// missing field, then apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, AgentError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AgentError::config(format!("failed to read {}: {}", path.display(), e)))?;
        let mut settings: Settings = toml::from_str(&raw)
            .map_err(|e| AgentError::config(format!("failed to parse {}: {}", path.display(), e)))?;
        settings.llm.apply_env()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if self.retrieve_k == 0 {
            return Err(AgentError::config("retrieve_k must be at least 1"));
        }
        if self.max_relevant == 0 {
            return Err(AgentError::config("max_relevant must be at least 1"));
        }
        self.llm.validate()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
