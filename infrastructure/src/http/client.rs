//! Data-driven HTTP model client

use super::templates::{default_model, default_url, endpoint, request_body};
use async_trait::async_trait;
use multillm_application::{Endpoint, GatewayError, ModelClient, ModelSession};
use multillm_domain::{ProviderKind, TextField};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// A model reached over HTTP, described entirely by configuration
#[derive(Clone)]
pub struct HttpModelClient {
    name: String,
    kind: ProviderKind,
    model: String,
    endpoint: Endpoint,
    text_field: TextField,
    max_tokens: Option<u32>,
    template: Option<Value>,
}

impl HttpModelClient {
    /// Client using the kind's default endpoint, model id and text selector
    ///
    /// Custom kinds have no default endpoint; set one with [`with_url`](Self::with_url).
    pub fn new(name: impl Into<String>, kind: ProviderKind) -> Self {
        let model = default_model(kind).to_string();
        let url = default_url(kind, &model).unwrap_or_default();
        Self {
            name: name.into(),
            kind,
            endpoint: endpoint(kind, &url, None),
            model,
            text_field: kind
                .default_text_field()
                .parse()
                .unwrap_or_else(|_| TextField::Key("text".to_string())),
            max_tokens: None,
            template: None,
        }
    }

    /// Use another model id; for Gemini this also moves the default endpoint
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        if let Some(url) = default_url(self.kind, &self.model) {
            self.endpoint = endpoint(self.kind, &url, None);
        }
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint = endpoint(self.kind, &url.into(), None);
        self
    }

    /// Apply the kind's auth convention for `key`. Call after setting the URL.
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.endpoint = endpoint(self.kind, &self.endpoint.url, Some(key));
        self
    }

    pub fn with_text_field(mut self, text_field: TextField) -> Self {
        self.text_field = text_field;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request body template for custom kinds; string values may contain `{prompt}`
    pub fn with_template(mut self, template: Value) -> Self {
        self.template = Some(template);
        self
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl fmt::Debug for HttpModelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // endpoint headers and query may carry secrets
        f.debug_struct("HttpModelClient")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("text_field", &self.text_field.to_string())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_field(&self) -> &TextField {
        &self.text_field
    }

    fn make_query(&self, prompt: &str) -> Value {
        request_body(
            self.kind,
            &self.model,
            self.max_tokens,
            self.template.as_ref(),
            prompt,
        )
    }

    async fn ask(&self, session: &dyn ModelSession, query: &Value) -> Result<String, GatewayError> {
        debug!("POST {} for {}", self.kind.as_str(), self.name);
        session.post_json(&self.endpoint, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_defaults_per_kind() {
        let client = HttpModelClient::new("gpt", ProviderKind::OpenAi);
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.text_field().to_string(), "choices[0].message.content");
        assert_eq!(
            client.endpoint().url,
            "https://api.openai.com/v1/chat/completions"
        );

        let ollama = HttpModelClient::new("llama", ProviderKind::Ollama);
        assert_eq!(ollama.text_field().to_string(), "response");
    }

    #[test]
    fn test_gemini_model_moves_endpoint() {
        let client =
            HttpModelClient::new("gemini", ProviderKind::Gemini).with_model("gemini-2.0-flash");
        assert!(client.endpoint().url.contains("models/gemini-2.0-flash:generateContent"));
    }

    #[test]
    fn test_api_key_applied_after_url() {
        let client = HttpModelClient::new("mistral", ProviderKind::OpenAi)
            .with_url("https://api.mistral.ai/v1/chat/completions")
            .with_api_key("secret");
        assert_eq!(
            client.endpoint().url,
            "https://api.mistral.ai/v1/chat/completions"
        );
        assert_eq!(client.endpoint().headers[0].1, "Bearer secret");
        assert!(!format!("{:?}", client).contains("secret"));
    }

    struct RecordingSession {
        seen: Mutex<Vec<(Endpoint, Value)>>,
    }

    #[async_trait]
    impl ModelSession for RecordingSession {
        async fn post_json(&self, endpoint: &Endpoint, body: &Value) -> Result<String, GatewayError> {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.clone(), body.clone()));
            Ok(r#"{"response":"ok"}"#.to_string())
        }
    }

    #[tokio::test]
    async fn test_ask_posts_query_to_endpoint() {
        let client = HttpModelClient::new("llama", ProviderKind::Ollama);
        let session = RecordingSession {
            seen: Mutex::new(Vec::new()),
        };

        let query = client.make_query("hello");
        let raw = client.ask(&session, &query).await.unwrap();

        assert_eq!(raw, r#"{"response":"ok"}"#);
        let seen = session.seen.lock().unwrap();
        assert_eq!(seen[0].0.url, "http://localhost:11434/api/generate");
        assert_eq!(seen[0].1["prompt"], "hello");
    }
}
