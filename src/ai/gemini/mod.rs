pub mod client;
pub mod content;
pub mod types;
pub mod vision;

pub use client::GeminiHttpClient;
pub use content::GeminiContentClient;
pub use vision::{parse_verdict, GeminiRelevanceClient};
