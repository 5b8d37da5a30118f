//! Request templates per provider kind

use multillm_application::Endpoint;
use multillm_domain::ProviderKind;
use serde_json::{Value, json};

/// Marker replaced by the prompt in custom request templates
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default endpoint for a kind; `None` for custom services
pub fn default_url(kind: ProviderKind, model: &str) -> Option<String> {
    match kind {
        ProviderKind::OpenAi => Some("https://api.openai.com/v1/chat/completions".to_string()),
        ProviderKind::Anthropic => Some("https://api.anthropic.com/v1/messages".to_string()),
        ProviderKind::Gemini => Some(format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            model
        )),
        ProviderKind::Ollama => Some("http://localhost:11434/api/generate".to_string()),
        ProviderKind::Custom => None,
    }
}

/// Model id used when a `[[models]]` entry does not name one
pub fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "gpt-4o-mini",
        ProviderKind::Anthropic => "claude-3-5-haiku-latest",
        ProviderKind::Gemini => "gemini-1.5-flash",
        ProviderKind::Ollama => "llama3",
        ProviderKind::Custom => "",
    }
}

/// Request body for a prompt
pub(crate) fn request_body(
    kind: ProviderKind,
    model: &str,
    max_tokens: Option<u32>,
    custom: Option<&Value>,
    prompt: &str,
) -> Value {
    match kind {
        ProviderKind::OpenAi => {
            let mut body = json!({
                "model": model,
                "messages": [{ "role": "user", "content": prompt }],
            });
            if let Some(max_tokens) = max_tokens {
                body["max_tokens"] = json!(max_tokens);
            }
            body
        }
        ProviderKind::Anthropic => json!({
            "model": model,
            "max_tokens": max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": [{ "role": "user", "content": prompt }],
        }),
        ProviderKind::Gemini => {
            let mut body = json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
            });
            if let Some(max_tokens) = max_tokens {
                body["generationConfig"] = json!({ "maxOutputTokens": max_tokens });
            }
            body
        }
        ProviderKind::Ollama => json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
        }),
        ProviderKind::Custom => match custom {
            Some(template) => fill_template(template, prompt),
            None => json!({ "prompt": prompt }),
        },
    }
}

/// Replace every placeholder inside string values of a template
fn fill_template(template: &Value, prompt: &str) -> Value {
    match template {
        Value::String(s) => Value::String(s.replace(PROMPT_PLACEHOLDER, prompt)),
        Value::Array(items) => Value::Array(items.iter().map(|v| fill_template(v, prompt)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), fill_template(v, prompt)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Endpoint with the kind's auth convention applied
pub(crate) fn endpoint(kind: ProviderKind, url: &str, api_key: Option<&str>) -> Endpoint {
    let endpoint = match (kind, api_key) {
        (ProviderKind::Gemini, Some(key)) => {
            let separator = if url.contains('?') { '&' } else { '?' };
            Endpoint::new(format!("{}{}key={}", url, separator, key))
        }
        _ => Endpoint::new(url),
    };

    match (kind, api_key) {
        (ProviderKind::Anthropic, Some(key)) => endpoint
            .with_header("x-api-key", key)
            .with_header("anthropic-version", ANTHROPIC_VERSION),
        (ProviderKind::Anthropic, None) => {
            endpoint.with_header("anthropic-version", ANTHROPIC_VERSION)
        }
        (ProviderKind::OpenAi | ProviderKind::Custom, Some(key)) => {
            endpoint.with_header("Authorization", format!("Bearer {}", key))
        }
        _ => endpoint,
    }
}
