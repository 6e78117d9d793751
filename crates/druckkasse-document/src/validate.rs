// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intake validator: media type allow-list and byte-size ceiling.

use druckkasse_core::IntakePolicy;
use druckkasse_core::error::{DruckkasseError, Result};
use druckkasse_core::types::MediaType;
use tracing::debug;

/// Gatekeeper run before any bytes are read.
///
/// Pure: the verdict depends only on the declared media type and size.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    max_file_bytes: u64,
}

impl Validator {
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    pub fn from_policy(policy: &IntakePolicy) -> Self {
        Self::new(policy.max_file_bytes)
    }

    /// Check a declared media type and size against policy.
    ///
    /// Returns the parsed [`MediaType`] on acceptance. The type check runs
    /// first, so an oversized file of an unsupported type reports
    /// `UnsupportedType`.
    pub fn validate(&self, declared_mime: &str, size_bytes: u64) -> Result<MediaType> {
        let media_type = MediaType::from_mime(declared_mime)
            .ok_or_else(|| DruckkasseError::UnsupportedType(declared_mime.to_owned()))?;
        self.check_size(size_bytes)?;
        debug!(%media_type, size_bytes, "file passed validation");
        Ok(media_type)
    }

    /// Apply the size ceiling alone (used again once the real length is known).
    pub fn check_size(&self, size_bytes: u64) -> Result<()> {
        if size_bytes > self.max_file_bytes {
            return Err(DruckkasseError::OversizeFile {
                size_bytes,
                max_bytes: self.max_file_bytes,
            });
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_policy(&IntakePolicy::default())
    }
}
