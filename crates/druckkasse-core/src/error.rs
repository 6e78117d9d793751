// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Druckkasse.
//
// Every variant is local and recoverable: the intake workflow reports it to the
// user and stays (or returns to) a usable state.

use thiserror::Error;

/// Top-level error type for all Druckkasse operations.
#[derive(Debug, Error)]
pub enum DruckkasseError {
    // -- Intake rejections --
    #[error("unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("file is {size_bytes} bytes, the limit is {max_bytes} bytes")]
    OversizeFile { size_bytes: u64, max_bytes: u64 },

    #[error("document has an estimated {pages} pages, the limit is {max_pages}")]
    OversizedDocument { pages: u32, max_pages: u32 },

    /// Reserved for a real parser; the heuristic estimators never fail.
    #[error("document could not be read: {0}")]
    CorruptDocument(String),

    // -- Workflow --
    #[error("another document is still being analysed")]
    Busy,

    #[error("analysis result discarded because the selection changed")]
    Superseded,

    // -- Payment --
    #[error("payment was declined: {0}")]
    SettlementDeclined(String),

    // -- Platform collaborators --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Storage / serialisation --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DruckkasseError {
    /// Whether this error is a policy rejection of the submitted file (as
    /// opposed to an environmental failure).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType(_) | Self::OversizeFile { .. } | Self::OversizedDocument { .. }
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DruckkasseError>;
