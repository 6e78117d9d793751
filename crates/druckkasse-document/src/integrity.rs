// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document fingerprinting: SHA-256 hashing of accepted uploads.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
///
/// Every accepted document carries this digest; log lines use it to correlate
/// intake, payment and print events for the same file.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Short prefix of a digest for log fields.
pub fn short_hash(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
