use crate::models::ModelField;

const DEFAULT_PROVIDER: &str = "openai";

/// Candidates offered to the router when the caller names none.
pub const DEFAULT_CANDIDATES: [&str; 3] = [
    "openai/gpt-4-turbo-preview",
    "openai/gpt-3.5-turbo",
    "anthropic/claude-3-sonnet-20240229"
];

/// Turn the request's `model` field into an ordered list of `provider/model` ids.
///
/// Order is preserved since it carries the caller's preference. Blank entries
/// are dropped and an empty result is replaced by [`DEFAULT_CANDIDATES`].
pub fn normalize(model: &ModelField) -> Vec<String> {

    let entries: Vec<&str> = match model {
        ModelField::Single(name) => vec![name.as_str()],
        ModelField::Ranked(names) => names.iter().map(String::as_str).collect()
    };

    let candidates: Vec<String> = entries
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(qualify)
        .collect();

    if candidates.is_empty() {
        return DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect();
    }

    candidates

}

fn qualify(name: &str) -> String {

    if name.contains('/') {
        name.to_string()
    } else {
        format!("{}/{}", DEFAULT_PROVIDER, name)
    }

}

/// Drop the provider prefix, e.g. `openai/gpt-3.5-turbo` -> `gpt-3.5-turbo`.
pub fn strip_provider(model: &str) -> &str {

    model.rsplit('/').next().unwrap_or(model)

}
