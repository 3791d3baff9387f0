//! OpenAI completion provider for texpilot.

mod api;
mod converter;
mod provider;

pub use provider::{OpenAIProvider, DEFAULT_API_URL};
