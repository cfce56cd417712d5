use thiserror::Error;

pub type Result<T> = std::result::Result<T, SineError>;

/// Startup and lifecycle failures. The stream callback itself never fails.
#[derive(Error, Debug)]
pub enum SineError {
    #[error("JACK error: {0}")]
    Jack(#[from] jack::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Progress bar error: {0}")]
    Progress(String),
}
