pub mod types;
pub mod traits;
pub mod streaming;
pub mod sse;
pub mod gemini;
pub mod config;

pub use traits::{
    GenerativeClient,
    GenerateRequest, GenerateResponse, GenerateOptions,
    TokenUsage,
};

pub use streaming::{EventStream, StreamEvent};
pub use sse::LineBuffer;
pub use gemini::GeminiClient;
pub use config::{ClientFactory, GeminiConfig, ProviderConfig, DEFAULT_MODEL};
pub use types::{Content, ContentPart, Message, Schema, SchemaType, WebSource};
