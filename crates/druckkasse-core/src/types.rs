// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Druckkasse intake workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::PricingQuote;

/// Accepted input document types. Anything else is rejected at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Pdf,
    Jpeg,
    Png,
    Gif,
    /// Legacy binary Word (`.doc`).
    Doc,
    /// Open XML Word (`.docx`).
    Docx,
}

impl MediaType {
    pub const ALL: [MediaType; 6] = [
        Self::Pdf,
        Self::Jpeg,
        Self::Png,
        Self::Gif,
        Self::Doc,
        Self::Docx,
    ];

    /// Canonical MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Parse a declared MIME type. Case-insensitive; parameters such as
    /// `; charset=binary` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        let essence = essence.to_ascii_lowercase();
        match essence.as_str() {
            "image/jpg" => Some(Self::Jpeg),
            other => Self::ALL.into_iter().find(|t| t.mime_type() == other),
        }
    }

    /// Infer the media type from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Revocable, URL-like reference to a document's bytes, minted by the
/// resource provider.
///
/// Deliberately not `Clone`: whoever holds the handle owns the underlying
/// resource and must give it back to the provider exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceHandle {
    id: Uuid,
    url: String,
}

impl ResourceHandle {
    pub fn new(id: Uuid, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Dereferenceable token handed to viewers and print windows.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Address of the resource, for collaborators that only look it up.
    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef {
            id: self.id,
            url: self.url.clone(),
        }
    }
}

/// Copyable address of a resource. Holding one does not keep the resource
/// alive; lookups through a revoked handle's ref fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    id: Uuid,
    url: String,
}

impl ResourceRef {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// How a page count was arrived at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateMethod {
    /// Structural marker occurrences in a PDF byte stream.
    MarkerScan { markers: usize },
    /// Images always print on a single page.
    SingleImage,
    /// File size divided by an average page size.
    SizeHeuristic { bytes_per_page: u64 },
}

/// Result of page estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEstimate {
    /// Always at least 1.
    pub page_count: u32,
    pub method: EstimateMethod,
    /// Human-readable notes on how the estimate was made.
    pub notes: Vec<String>,
}

/// An accepted, analysed upload.
///
/// Only constructed after validation and estimation have both succeeded, so
/// `page_count >= 1` and `size_bytes` is within policy.
#[derive(Debug)]
pub struct FileRecord {
    pub name: String,
    pub resource_handle: ResourceHandle,
    pub media_type: MediaType,
    pub size_bytes: u64,
    pub page_count: u32,
    /// SHA-256 hex digest of the document bytes.
    pub document_hash: String,
    pub estimate: PageEstimate,
    pub accepted_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn view(&self) -> FileView {
        FileView {
            name: self.name.clone(),
            resource_url: self.resource_handle.url().to_owned(),
            media_type: self.media_type,
            size_bytes: self.size_bytes,
            page_count: self.page_count,
            document_hash: self.document_hash.clone(),
            estimate: self.estimate.clone(),
            accepted_at: self.accepted_at,
        }
    }
}

/// Read-only projection of a [`FileRecord`] for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileView {
    pub name: String,
    pub resource_url: String,
    pub media_type: MediaType,
    pub size_bytes: u64,
    pub page_count: u32,
    pub document_hash: String,
    pub estimate: PageEstimate,
    pub accepted_at: DateTime<Utc>,
}

/// Lifecycle of a single intake session.
#[derive(Debug, Default)]
pub enum WorkflowState {
    #[default]
    Empty,
    Analyzing,
    Ready(FileRecord),
    AwaitingPayment(FileRecord),
    Processing(FileRecord),
    PaidConfirmation(FileRecord),
}

impl WorkflowState {
    pub fn stage(&self) -> WorkflowStage {
        match self {
            Self::Empty => WorkflowStage::Empty,
            Self::Analyzing => WorkflowStage::Analyzing,
            Self::Ready(_) => WorkflowStage::Ready,
            Self::AwaitingPayment(_) => WorkflowStage::AwaitingPayment,
            Self::Processing(_) => WorkflowStage::Processing,
            Self::PaidConfirmation(_) => WorkflowStage::PaidConfirmation,
        }
    }

    /// The held record, in every state that has one.
    pub fn record(&self) -> Option<&FileRecord> {
        match self {
            Self::Empty | Self::Analyzing => None,
            Self::Ready(record)
            | Self::AwaitingPayment(record)
            | Self::Processing(record)
            | Self::PaidConfirmation(record) => Some(record),
        }
    }

    /// Take the held record out, leaving `Empty` behind.
    pub fn take_record(&mut self) -> Option<FileRecord> {
        match std::mem::take(self) {
            Self::Empty => None,
            Self::Analyzing => {
                *self = Self::Analyzing;
                None
            }
            Self::Ready(record)
            | Self::AwaitingPayment(record)
            | Self::Processing(record)
            | Self::PaidConfirmation(record) => Some(record),
        }
    }
}

/// Tag-only mirror of [`WorkflowState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowStage {
    Empty,
    Analyzing,
    Ready,
    AwaitingPayment,
    Processing,
    PaidConfirmation,
}

impl WorkflowStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Analyzing => "analyzing",
            Self::Ready => "ready",
            Self::AwaitingPayment => "awaiting-payment",
            Self::Processing => "processing",
            Self::PaidConfirmation => "paid",
        }
    }
}

/// Everything the presentation layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowView {
    pub stage: WorkflowStage,
    pub file: Option<FileView>,
    pub quote: Option<PricingQuote>,
    /// Most recent recoverable error, cleared by the next successful intent.
    pub last_error: Option<String>,
}

impl WorkflowView {
    pub fn empty() -> Self {
        Self {
            stage: WorkflowStage::Empty,
            file: None,
            quote: None,
            last_error: None,
        }
    }
}
