//! Provider kind value object

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The HTTP dialect a configured model speaks (Value Object)
///
/// Each kind implies a request body shape, auth header and a default
/// location of the answer text in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions (also Mistral, Groq, DeepSeek, ...)
    #[default]
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// Google Gemini `generateContent`
    Gemini,
    /// Local Ollama `/api/generate`
    Ollama,
    /// Caller-supplied request template
    Custom,
}

impl ProviderKind {
    /// Get the string identifier for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Custom => "custom",
        }
    }

    /// Default answer location inside a decoded response body
    pub fn default_text_field(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "choices[0].message.content",
            ProviderKind::Anthropic => "content[0].text",
            ProviderKind::Gemini => "candidates[0].content.parts[0].text",
            ProviderKind::Ollama => "response",
            ProviderKind::Custom => "text",
        }
    }

    /// Default environment variable holding the API key, if the kind needs one
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::Ollama | ProviderKind::Custom => None,
        }
    }

    /// All known kinds, in display order
    pub fn all() -> [ProviderKind; 5] {
        [
            ProviderKind::OpenAi,
            ProviderKind::Anthropic,
            ProviderKind::Gemini,
            ProviderKind::Ollama,
            ProviderKind::Custom,
        ]
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "open-ai" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "ollama" => Ok(ProviderKind::Ollama),
            "custom" => Ok(ProviderKind::Custom),
            other => Err(DomainError::UnknownProviderKind(other.to_string())),
        }
    }
}

impl Serialize for ProviderKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
