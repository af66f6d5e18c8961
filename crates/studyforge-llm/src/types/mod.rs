pub mod content;
pub mod message;
pub mod schema;
pub mod grounding;

pub use content::{Content, ContentPart};
pub use message::Message;
pub use schema::{Schema, SchemaType};
pub use grounding::WebSource;
