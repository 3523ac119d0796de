//! Engine error type.
//!
//! Only conditions the caller must act on are errors. Malformed DSL lines
//! are reported as `ParseWarning` values instead and never abort a load.

use std::path::PathBuf;

use crate::effects::EffectKind;

/// Errors raised by the engine.
#[derive(Debug)]
pub enum EngineError {
    /// A special reached the board engine with an effect it does not apply.
    /// Signals a broken deck file, not a normal-play condition.
    UnsupportedEffect { special: String, kind: EffectKind },
    /// The AI found no legal play for the current hand and board.
    NoPlayFound,
    /// A deck or achievement file the caller asked for does not exist.
    MissingResource { path: PathBuf },
    /// Any other failure reading a resource.
    Io(std::io::Error),
}

impl EngineError {
    /// Map an I/O error on `path`, singling out missing files.
    pub(crate) fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            EngineError::MissingResource { path: path.into() }
        } else {
            EngineError::Io(err)
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::UnsupportedEffect { special, kind } => {
                write!(f, "Special '{}' uses unsupported effect {:?}", special, kind)
            }
            EngineError::NoPlayFound => write!(f, "No legal play found"),
            EngineError::MissingResource { path } => {
                write!(f, "Missing resource: {}", path.display())
            }
            EngineError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            _ => None,
        }
    }
}
