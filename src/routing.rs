//! Client side of the external routing decision service
//!
//! The service receives the conversation plus a ranked list of candidate
//! models, picks one, generates the answer with it and returns a session id
//! that later feedback can reference.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::RoutingError;
use crate::models::{ChatMessage, FeedbackRequest, GenerationParams, RoutingResult};

/// Everything the routing service needs for one decision
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "models")]
    pub candidates: Vec<String>,
    #[serde(rename = "default")]
    pub default_model: String,
    #[serde(rename = "timeout")]
    pub timeout_secs: u64,
    #[serde(flatten)]
    pub params: GenerationParams
}

#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Pick a model among `request.candidates` and generate a reply with it
    async fn decide(&self, request: &DecisionRequest) -> Result<RoutingResult, RoutingError>;

    /// Report the quality of an earlier decision
    async fn feedback(&self, feedback: &FeedbackRequest) -> Result<(), RoutingError>;
}

pub struct HttpRoutingClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    timeout: Duration
}

impl HttpRoutingClient {

    pub fn new(client: Client, base_url: &str, api_key: Option<SecretString>, timeout: Duration) -> Self {

        HttpRoutingClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout
        }

    }

    fn post(&self, path: &str) -> Result<RequestBuilder, RoutingError> {

        // without a key every call would bounce, so fail fast into the fallback
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(RoutingError::NotConfigured("NOTDIAMOND_API_KEY is not set"))?;

        Ok(self.client
            .post(format!("{}{}", self.base_url, path))
            .timeout(self.timeout)
            .bearer_auth(api_key.expose_secret()))

    }

}

#[async_trait]
impl RoutingClient for HttpRoutingClient {

    async fn decide(&self, request: &DecisionRequest) -> Result<RoutingResult, RoutingError> {

        let response = self.post("/v2/route")?
            .json(request)
            .send()
            .await?;

        let response = check_status(response).await?;

        response
            .json::<RoutingResult>()
            .await
            .map_err(|e| RoutingError::Decode(e.to_string()))

    }

    async fn feedback(&self, feedback: &FeedbackRequest) -> Result<(), RoutingError> {

        let response = self.post("/v2/feedback")?
            .json(feedback)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())

    }

}

async fn check_status(response: Response) -> Result<Response, RoutingError> {

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RoutingError::Status { status: status.as_u16(), body })

}
