mod client;
pub(crate) mod wire;

pub use client::{GeminiChunkParser, GeminiClient, GEMINI_API_BASE};
