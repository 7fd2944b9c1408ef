use std::{fmt, io};

use thiserror::Error;

/// Errors produced while aligning, styling or emitting a diff
#[derive(Debug, Error)]
pub enum DiffError {
    /// The sequence aligner returned opcodes that do not partition both inputs
    #[error("sequence aligner broke its contract: {detail}")]
    AlignmentContractViolation { detail: String },

    /// Rich (HTML) display was requested where no such display exists
    #[error("display backend `{backend}` is not available")]
    DisplayBackendUnavailable { backend: &'static str },

    /// A style string could not be parsed
    #[error("invalid style {spec:?}: {reason}")]
    InvalidStyle { spec: String, reason: String },

    /// A backend failed while formatting rows
    #[error("formatting rendered rows failed")]
    Format(#[from] fmt::Error),

    /// Writing the rendered output failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DiffError {
    pub(crate) fn contract(detail: impl Into<String>) -> Self {
        Self::AlignmentContractViolation {
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_style(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidStyle {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can degrade to a simpler output instead of failing
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DisplayBackendUnavailable { .. })
    }
}

/// Result type used throughout this crate
pub type Result<T, E = DiffError> = std::result::Result<T, E>;
