use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::error::ProviderError;
use crate::models::{ChatMessage, GenerationParams};

/// The known-good backend used when routing is unavailable.
#[async_trait]
pub trait FallbackProvider: Send + Sync {
    /// Returns the provider's OpenAI-shaped completion as-is
    async fn generate(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &GenerationParams
    ) -> Result<Value, ProviderError>;
}

#[derive(Serialize)]
struct FallbackRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(flatten)]
    params: &'a GenerationParams
}

pub struct OpenAiFallback {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    timeout: Duration
}

impl OpenAiFallback {

    pub fn new(client: Client, base_url: &str, api_key: Option<SecretString>, timeout: Duration) -> Self {

        OpenAiFallback {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout
        }

    }

}

#[async_trait]
impl FallbackProvider for OpenAiFallback {

    async fn generate(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &GenerationParams
    ) -> Result<Value, ProviderError> {

        let body = FallbackRequest { model, messages, params };

        let mut builder = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(self.timeout)
            .json(&body);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status: status.as_u16(), body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))

    }

}
