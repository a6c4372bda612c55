use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bidet operations
#[derive(Error, Diagnostic, Debug)]
pub enum BidetError {
    #[error("IO error: {0}")]
    #[diagnostic(code(bidet::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(bidet::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(bidet::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Document error: {message}")]
    #[diagnostic(code(bidet::document))]
    Document { message: String },

    #[error("Image error: {message}")]
    #[diagnostic(code(bidet::image))]
    Image { message: String },

    #[error("{tool} failed: {message}")]
    #[diagnostic(code(bidet::tool))]
    Tool {
        tool: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{tool} did not finish within {seconds}s")]
    #[diagnostic(code(bidet::timeout), help("Raise timeout_secs in the config file"))]
    Timeout { tool: String, seconds: u64 },

    #[error("Interrupted")]
    #[diagnostic(code(bidet::interrupted))]
    Interrupted,
}

impl BidetError {
    /// Shorthand for a configuration error without help text.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BidetError>;
