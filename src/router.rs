//! Routing with a single fallback
//!
//! Ask the routing service first. If it fails for any reason (including the
//! timeout), call the fixed fallback provider once. There is no second fallback.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

use crate::error::{ProviderError, RouterError, RoutingError};
use crate::fallback::FallbackProvider;
use crate::formatter::format_routed;
use crate::models::{ChatMessage, CompletionResponse, GenerationParams, RoutingResult};
use crate::normalize::{DEFAULT_CANDIDATES, strip_provider};
use crate::routing::{DecisionRequest, RoutingClient};

/// Where a completion came from
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RouteOutcome {
    Routed(CompletionResponse),
    /// The fallback provider's response, untouched
    Fallback(Value)
}

pub struct RequestRouter {
    routing: Arc<dyn RoutingClient>,
    fallback: Arc<dyn FallbackProvider>,
    default_model: String,
    timeout: Duration
}

impl RequestRouter {

    pub fn new(
        routing: Arc<dyn RoutingClient>,
        fallback: Arc<dyn FallbackProvider>,
        default_model: impl Into<String>,
        timeout: Duration
    ) -> Self {

        RequestRouter {
            routing,
            fallback,
            default_model: default_model.into(),
            timeout
        }

    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// `candidates` should already be normalized; an empty list is replaced
    /// by the default candidates so the routing service never sees one.
    pub async fn route(
        &self,
        messages: Vec<ChatMessage>,
        mut candidates: Vec<String>,
        params: GenerationParams
    ) -> Result<RouteOutcome, RouterError> {

        let started = Instant::now();

        if candidates.is_empty() {
            candidates = DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect();
        }

        let request = DecisionRequest {
            messages,
            candidates,
            default_model: self.default_model.clone(),
            timeout_secs: self.timeout.as_secs(),
            params
        };

        let routing_error = match self.decide(&request).await {
            Ok(result) => {
                tracing::info!(
                    model = %result.chosen_model,
                    session_id = %result.session_id,
                    "routing service selected model"
                );
                return Ok(RouteOutcome::Routed(format_routed(result, started.elapsed())));
            }
            Err(e) => e
        };

        tracing::error!(error = %routing_error, "routing request failed");
        tracing::info!(model = %self.default_model, "falling back to default model");

        match self.generate_fallback(&request.messages, &request.params).await {
            Ok(completion) => Ok(RouteOutcome::Fallback(completion)),
            Err(provider) => {
                tracing::error!(
                    model = %self.default_model,
                    error = %provider,
                    "fallback provider failed"
                );
                Err(RouterError::UpstreamUnavailable { routing: routing_error, provider })
            }
        }

    }

    async fn decide(&self, request: &DecisionRequest) -> Result<RoutingResult, RoutingError> {

        tokio::time::timeout(self.timeout, self.routing.decide(request))
            .await
            .map_err(|_| RoutingError::Timeout(self.timeout.as_secs()))?

    }

    async fn generate_fallback(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams
    ) -> Result<Value, ProviderError> {

        let model = strip_provider(&self.default_model);

        tokio::time::timeout(self.timeout, self.fallback.generate(model, messages, params))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout.as_secs()))?

    }

}
