use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building fixtures or patching flag files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid polygon name {0:?}: expecting a non-empty name without whitespace")]
    InvalidName(String),

    #[error("polygon {0:?} is already defined in this fixture")]
    DuplicateName(String),

    #[error("undefined ID {0:?}")]
    UndefinedId(String),

    #[error("comment text {0:?} spans more than one line")]
    MultilineComment(String),

    #[error("color channel {0} is outside the range [0, 1]")]
    ColorRange(f64),

    #[error("malformed fixture file at line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("{}: marker {marker:?} not found", .path.display())]
    MarkerNotFound { path: PathBuf, marker: String },

    #[error("{}: line {} expected to contain {marker:?}", .path.display(), .line + 1)]
    MarkerMismatch {
        path: PathBuf,
        line: usize,
        marker: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid fixture plan: {0}")]
    Plan(#[from] serde_json::Error),
}
