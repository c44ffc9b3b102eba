use miette::Diagnostic;
use thiserror::Error;

/// Main error type for retint operations
#[derive(Error, Diagnostic, Debug)]
pub enum RetintError {
    #[error("IO error: {0}")]
    #[diagnostic(code(retint::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(retint::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(retint::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(retint::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{tool} is required but was not found")]
    #[diagnostic(code(retint::tool))]
    MissingTool {
        tool: String,
        #[help]
        help: Option<String>,
    },

    #[error("{tool} failed: {message}")]
    #[diagnostic(code(retint::tool))]
    Tool { tool: String, message: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(retint::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Aborted: {message}")]
    #[diagnostic(code(retint::aborted))]
    Aborted { message: String },
}

impl RetintError {
    /// Attach a path to an I/O failure.
    pub fn io(path: &std::path::Path, message: impl std::fmt::Display) -> Self {
        RetintError::Io {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RetintError>;
