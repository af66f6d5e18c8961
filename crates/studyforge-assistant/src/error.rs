use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant not initialized. Please set the API key first.")]
    Uninitialized,

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Remote model error: {0}")]
    Remote(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
