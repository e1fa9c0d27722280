use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>
}

/// The `model` field of a request: one name or a ranked list of names.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ModelField {
    Single(String),
    Ranked(Vec<String>)
}

// sampling fields may arrive as explicit `null`; defaults apply in `generation_params`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionRequest {
    pub model: ModelField,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub n: Option<u32>,
    #[serde(default)]
    pub stream: Option<bool>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub presence_penalty: Option<f32>,
    #[serde(default)]
    pub frequency_penalty: Option<f32>,
    #[serde(default)]
    pub user: Option<String>
}

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 1.0;

impl CompletionRequest {

    pub fn wants_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }

    // the subset of sampling knobs both upstreams understand
    pub fn generation_params(&self) -> GenerationParams {

        GenerationParams {
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: self.top_p.unwrap_or(DEFAULT_TOP_P),
            max_tokens: self.max_tokens,
            presence_penalty: self.presence_penalty.unwrap_or(0.0),
            frequency_penalty: self.frequency_penalty.unwrap_or(0.0),
            user: self.user.clone()
        }

    }

}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: None,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            user: None
        }
    }
}

/// What the routing service hands back for one successful decision.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoutingResult {
    pub session_id: String,
    #[serde(rename = "model")]
    pub chosen_model: String,
    pub content: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
    pub system_fingerprint: Option<String>,
    #[serde(rename = "_routing_time")]
    pub routing_time_seconds: f64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: String,
    pub content: String
}

/// Token accounting is not computed; every field stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedbackRequest {
    #[serde(alias = "sessionId")]
    pub session_id: String,
    pub score: f64,
    #[serde(alias = "feedbackType", default = "default_feedback_type")]
    pub feedback_type: String
}

fn default_feedback_type() -> String {
    "quality".to_string()
}

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults_follow_openai() {

        let request: CompletionRequest = serde_json::from_value(json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": "hi"}]
        })).unwrap();

        let params = request.generation_params();

        assert_eq!(request.model, ModelField::Single("gpt-4".to_string()));
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.presence_penalty, 0.0);
        assert_eq!(params.frequency_penalty, 0.0);
        assert_eq!(params.max_tokens, None);
        assert!(!request.wants_stream());

    }

    #[test]
    fn test_null_sampling_fields_take_defaults() {

        let request: CompletionRequest = serde_json::from_value(json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": "hi"}],
            "temperature": null,
            "top_p": null,
            "n": null,
            "stream": null,
            "max_tokens": null,
            "presence_penalty": null,
            "frequency_penalty": null,
            "user": null
        })).unwrap();

        assert_eq!(request.generation_params(), GenerationParams::default());
        assert!(!request.wants_stream());

    }

    #[test]
    fn test_explicit_sampling_values_are_kept() {

        let request: CompletionRequest = serde_json::from_value(json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": "hi"}],
            "temperature": 0.5,
            "presence_penalty": 1.5,
            "stream": true
        })).unwrap();

        let params = request.generation_params();

        assert_eq!(params.temperature, 0.5);
        assert_eq!(params.presence_penalty, 1.5);
        assert!(request.wants_stream());

    }

    #[test]
    fn test_model_list_is_accepted() {

        let request: CompletionRequest = serde_json::from_value(json!({
            "model": ["gpt-4", "anthropic/claude-3"],
            "messages": [{"role": "user", "content": "hi"}]
        })).unwrap();

        assert_eq!(
            request.model,
            ModelField::Ranked(vec!["gpt-4".to_string(), "anthropic/claude-3".to_string()])
        );

    }

    #[test]
    fn test_generation_params_skip_absent_fields() {

        let params = GenerationParams::default();
        let value = serde_json::to_value(&params).unwrap();

        assert!(value.get("max_tokens").is_none());
        assert!(value.get("user").is_none());
        assert_eq!(value["top_p"], 1.0);

    }

    #[test]
    fn test_feedback_accepts_both_casings() {

        let snake: FeedbackRequest = serde_json::from_value(json!({
            "session_id": "s1", "score": 0.5
        })).unwrap();
        let camel: FeedbackRequest = serde_json::from_value(json!({
            "sessionId": "s1", "score": 0.5, "feedbackType": "latency"
        })).unwrap();

        assert_eq!(snake.feedback_type, "quality");
        assert_eq!(camel.session_id, "s1");
        assert_eq!(camel.feedback_type, "latency");

    }

}
