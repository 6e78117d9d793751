// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// druckkasse-document: Document intake analysis for the Druckkasse kiosk.
//
// Provides byte sources (in-memory or on disk), the intake validator (media
// type allow-list and size ceiling), heuristic page estimation per document
// type, and SHA-256 fingerprinting of accepted documents.

pub mod estimate;
pub mod integrity;
pub mod pdf;
pub mod source;
pub mod validate;

// Re-export the primary structs so callers can use `druckkasse_document::Validator` etc.
pub use estimate::PageEstimator;
pub use integrity::hash_bytes;
pub use source::{ByteSource, FileDescriptor};
pub use validate::Validator;
