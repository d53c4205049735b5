use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Generation service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response decode failed: {0}")]
    Decode(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RagError>;
