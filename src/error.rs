use miette::Diagnostic;
use thiserror::Error;

use crate::export::PipelineKind;

/// Main error type for storeart operations
#[derive(Error, Diagnostic, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    #[diagnostic(code(storeart::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(storeart::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(storeart::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot generate {pipeline}: {message}")]
    #[diagnostic(code(storeart::precondition))]
    Precondition {
        pipeline: PipelineKind,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot generate {pipeline}: {message}")]
    #[diagnostic(
        code(storeart::unresolved),
        help("Fix the image reference in storeart.yaml, then run `storeart check`")
    )]
    Unresolved {
        pipeline: PipelineKind,
        message: String,
    },

    #[error("Failed to decode image '{reference}': {message}")]
    #[diagnostic(code(storeart::decode))]
    Decode { reference: String, message: String },

    #[error("Failed to encode {path}: {message}")]
    #[diagnostic(code(storeart::encode))]
    Encode { path: String, message: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(storeart::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to write archive {name}: {message}")]
    #[diagnostic(code(storeart::archive))]
    Archive { name: String, message: String },
}

impl AssetError {
    /// Whether this error is a failed pipeline precondition (missing logo or screenshots).
    pub fn is_precondition(&self) -> bool {
        matches!(self, AssetError::Precondition { .. })
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;
