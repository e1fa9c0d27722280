use std::time::Duration;

use chrono::Utc;

use crate::models::{AssistantMessage, Choice, CompletionResponse, RoutingResult, Usage};

/// Wrap a routing decision in the `chat.completion` envelope.
///
/// The session id doubles as the completion id so clients can send feedback
/// for it later.
pub fn format_routed(result: RoutingResult, routing_time: Duration) -> CompletionResponse {

    format_routed_at(result, routing_time, Utc::now().timestamp())

}

fn format_routed_at(result: RoutingResult, routing_time: Duration, created: i64) -> CompletionResponse {

    CompletionResponse {
        id: result.session_id,
        object: "chat.completion".to_string(),
        created,
        model: result.chosen_model,
        choices: vec![Choice {
            index: 0,
            message: AssistantMessage {
                role: "assistant".to_string(),
                content: result.content
            },
            finish_reason: "stop".to_string()
        }],
        usage: Usage::default(),
        system_fingerprint: None,
        routing_time_seconds: routing_time.as_secs_f64()
    }

}
