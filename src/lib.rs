//! OpenAI-compatible chat completions routed through an external model
//! router, with a single fixed provider as fallback.

pub mod app;
pub mod config;
pub mod error;
pub mod fallback;
pub mod feedback;
pub mod formatter;
pub mod handlers;
pub mod logger;
pub mod models;
pub mod normalize;
pub mod router;
pub mod routing;

pub use app::{AppState, build_app};
pub use config::Config;
