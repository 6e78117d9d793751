// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the collaborators the intake
// workflow talks to.
//
// The workflow never renders anything itself. It turns bytes into a revocable
// handle, asks a print window to open and print that handle, and asks a
// preview surface to show it. Each of those is a trait so a kiosk shell, a
// browser host, or the headless implementation can stand in.

use druckkasse_core::error::Result;
use druckkasse_core::types::{MediaType, ResourceHandle, ResourceRef};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Unified bridge that groups every collaborator the workflow needs.
pub trait PlatformBridge: ResourceProvider + PrintWindow + PreviewWindow + Send + Sync {
    /// Human-readable platform name (e.g. "Headless", "Kiosk shell").
    fn platform_name(&self) -> &str;
}

/// Turns a byte blob into a dereferenceable, revocable handle.
pub trait ResourceProvider {
    /// Register `bytes` and mint a handle for them.
    fn create(&self, name: &str, media_type: MediaType, bytes: Vec<u8>) -> Result<ResourceHandle>;

    /// Give a handle back. Consumes it, so a handle can only be revoked once.
    /// Revoking an unknown handle is a no-op.
    fn revoke(&self, handle: ResourceHandle);
}

/// Two-stage print facility: open the document in a print-capable window,
/// then print it once the window reports the document has loaded.
pub trait PrintWindow {
    /// Open a window showing the resource at `target`.
    fn open(&self, target: &ResourceRef) -> Result<OpenedDocument>;

    /// Print a previously opened document. Returns Ok(()) when the print
    /// dialog was presented; the user may still cancel it. May block on I/O,
    /// so async callers run it on the blocking pool.
    fn print(&self, document: OpenedDocument) -> Result<()>;
}

/// Opens a handle for viewing, independent of payment.
pub trait PreviewWindow {
    fn open_preview(&self, target: &ResourceRef) -> Result<()>;
}

/// A document opened in a print window.
///
/// `loaded` fires once the window has finished loading the resource. A
/// dropped sender means the window went away before loading.
#[derive(Debug)]
pub struct OpenedDocument {
    pub window_id: Uuid,
    pub url: String,
    pub loaded: oneshot::Receiver<()>,
}

impl OpenedDocument {
    /// Pair a new document with the sender the window uses to report loading.
    pub fn new(url: impl Into<String>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let doc = Self {
            window_id: Uuid::new_v4(),
            url: url.into(),
            loaded: rx,
        };
        (doc, tx)
    }
}
