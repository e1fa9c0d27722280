use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};
use reqwest::Client;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::fallback::OpenAiFallback;
use crate::feedback::FeedbackRecorder;
use crate::handlers;
use crate::logger::log_requests;
use crate::router::RequestRouter;
use crate::routing::HttpRoutingClient;

// shared with every handler; nothing in here is mutated after startup
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RequestRouter>,
    pub feedback: Arc<FeedbackRecorder>
}

impl AppState {

    /// Wire the HTTP collaborators from configuration.
    ///
    /// Both upstreams share one pooled http client.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        let routing = Arc::new(HttpRoutingClient::new(
            http_client.clone(),
            &config.routing_base_url,
            config.routing_api_key.clone(),
            config.timeout
        ));

        let fallback = Arc::new(OpenAiFallback::new(
            http_client,
            &config.fallback_base_url,
            config.fallback_api_key.clone(),
            config.timeout
        ));

        let router = RequestRouter::new(
            routing.clone(),
            fallback,
            config.default_model.clone(),
            config.timeout
        );

        Ok(AppState {
            router: Arc::new(router),
            feedback: Arc::new(FeedbackRecorder::new(routing))
        })

    }

}

pub fn build_app(state: AppState) -> Router {

    // any origin, method and header is allowed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .route("/v1/feedback", post(handlers::submit_feedback))
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(cors)

}
