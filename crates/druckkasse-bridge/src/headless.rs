// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Headless bridge for desktop/CI builds and the command-line kiosk.
//
// Resources live in memory behind `blob:druckkasse/<uuid>` URLs. Print
// windows load instantly; printing optionally spools the document bytes into
// a directory so there is something to hand to `lp` afterwards. Spooling is
// plain blocking file I/O; the workflow calls `print` from the blocking pool.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use druckkasse_core::error::{DruckkasseError, Result};
use druckkasse_core::types::{MediaType, ResourceHandle, ResourceRef};
use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::traits::*;

const URL_PREFIX: &str = "blob:druckkasse/";

#[derive(Debug)]
struct StoredResource {
    name: String,
    media_type: MediaType,
    bytes: Arc<Vec<u8>>,
}

#[derive(Debug, Default)]
struct Inner {
    resources: HashMap<Uuid, StoredResource>,
    /// Print window id -> resource id.
    windows: HashMap<Uuid, Uuid>,
    printed: Vec<String>,
    previewed: Vec<String>,
}

/// In-memory bridge with an optional print spool directory.
#[derive(Debug, Default)]
pub struct HeadlessBridge {
    inner: Mutex<Inner>,
    spool_dir: Option<PathBuf>,
}

impl HeadlessBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every printed document into `dir` as `<resource-id>-<name>`.
    pub fn with_spool_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Mutex::default(),
            spool_dir: Some(dir.into()),
        }
    }

    /// Number of handles created and not yet revoked.
    pub fn live_resources(&self) -> usize {
        self.inner.lock().resources.len()
    }

    /// URLs printed so far, oldest first.
    pub fn printed(&self) -> Vec<String> {
        self.inner.lock().printed.clone()
    }

    /// URLs previewed so far, oldest first.
    pub fn previewed(&self) -> Vec<String> {
        self.inner.lock().previewed.clone()
    }

    fn spool(dir: &Path, id: Uuid, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let file_name = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".into());
        let path = dir.join(format!("{id}-{file_name}"));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

impl PlatformBridge for HeadlessBridge {
    fn platform_name(&self) -> &str {
        "Headless"
    }
}

impl ResourceProvider for HeadlessBridge {
    fn create(&self, name: &str, media_type: MediaType, bytes: Vec<u8>) -> Result<ResourceHandle> {
        let id = Uuid::new_v4();
        let url = format!("{URL_PREFIX}{id}");
        debug!(%id, name, %media_type, bytes = bytes.len(), "resource created");
        self.inner.lock().resources.insert(
            id,
            StoredResource {
                name: name.to_owned(),
                media_type,
                bytes: Arc::new(bytes),
            },
        );
        Ok(ResourceHandle::new(id, url))
    }

    fn revoke(&self, handle: ResourceHandle) {
        let mut inner = self.inner.lock();
        if inner.resources.remove(&handle.id()).is_some() {
            inner.windows.retain(|_, resource| *resource != handle.id());
            debug!(id = %handle.id(), "resource revoked");
        }
    }
}

impl PrintWindow for HeadlessBridge {
    fn open(&self, target: &ResourceRef) -> Result<OpenedDocument> {
        let mut inner = self.inner.lock();
        if !inner.resources.contains_key(&target.id()) {
            return Err(DruckkasseError::Bridge(format!(
                "no resource behind {}",
                target.url()
            )));
        }
        let (doc, loaded) = OpenedDocument::new(target.url());
        inner.windows.insert(doc.window_id, target.id());
        // Nothing to render: the window is loaded as soon as it exists.
        let _ = loaded.send(());
        debug!(window = %doc.window_id, url = target.url(), "print window opened");
        Ok(doc)
    }

    fn print(&self, document: OpenedDocument) -> Result<()> {
        let (resource_id, name, media_type, bytes) = {
            let mut inner = self.inner.lock();
            let resource_id = inner.windows.remove(&document.window_id).ok_or_else(|| {
                DruckkasseError::Bridge(format!("print window {} is closed", document.window_id))
            })?;
            let stored = inner.resources.get(&resource_id).ok_or_else(|| {
                DruckkasseError::Bridge(format!("resource behind {} was revoked", document.url))
            })?;
            let snapshot = (
                resource_id,
                stored.name.clone(),
                stored.media_type,
                Arc::clone(&stored.bytes),
            );
            inner.printed.push(document.url.clone());
            snapshot
        };

        match &self.spool_dir {
            Some(dir) => {
                let path = Self::spool(dir, resource_id, &name, &bytes)?;
                info!(url = %document.url, %media_type, path = %path.display(), "document spooled for printing");
            }
            None => info!(url = %document.url, %media_type, "print dialog presented"),
        }
        Ok(())
    }
}

impl PreviewWindow for HeadlessBridge {
    fn open_preview(&self, target: &ResourceRef) -> Result<()> {
        let mut inner = self.inner.lock();
        let stored = inner.resources.get(&target.id()).ok_or_else(|| {
            DruckkasseError::Bridge(format!("no resource behind {}", target.url()))
        })?;
        info!(url = target.url(), name = %stored.name, "preview opened");
        inner.previewed.push(target.url().to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_revoke_track_live_resources() {
        let bridge = HeadlessBridge::new();
        let a = bridge.create("a.pdf", MediaType::Pdf, vec![1, 2, 3]).expect("create");
        let b = bridge.create("b.png", MediaType::Png, vec![4]).expect("create");
        assert!(a.url().starts_with(URL_PREFIX));
        assert_ne!(a.url(), b.url());
        assert_eq!(bridge.live_resources(), 2);

        bridge.revoke(a);
        assert_eq!(bridge.live_resources(), 1);
        bridge.revoke(b);
        assert_eq!(bridge.live_resources(), 0);
    }

    #[test]
    fn revoking_unknown_handle_is_noop() {
        let bridge = HeadlessBridge::new();
        bridge.revoke(ResourceHandle::new(Uuid::new_v4(), "blob:elsewhere/1"));
        assert_eq!(bridge.live_resources(), 0);
    }

    #[tokio::test]
    async fn open_signals_loaded_then_prints() {
        let bridge = HeadlessBridge::new();
        let handle = bridge.create("a.pdf", MediaType::Pdf, vec![0; 8]).expect("create");

        let mut doc = bridge.open(&handle.to_ref()).expect("open");
        assert_eq!(doc.url, handle.url());
        (&mut doc.loaded).await.expect("loaded");

        bridge.print(doc).expect("print");
        assert_eq!(bridge.printed(), vec![handle.url().to_owned()]);
    }

    #[test]
    fn open_after_revoke_fails() {
        let bridge = HeadlessBridge::new();
        let handle = bridge.create("a.pdf", MediaType::Pdf, vec![0]).expect("create");
        let stale = handle.to_ref();
        bridge.revoke(handle);
        assert!(matches!(bridge.open(&stale), Err(DruckkasseError::Bridge(_))));
        assert!(bridge.open_preview(&stale).is_err());
    }

    #[test]
    fn print_after_revoke_fails() {
        let bridge = HeadlessBridge::new();
        let handle = bridge.create("a.pdf", MediaType::Pdf, vec![0]).expect("create");
        let doc = bridge.open(&handle.to_ref()).expect("open");
        bridge.revoke(handle);
        assert!(bridge.print(doc).is_err());
        assert!(bridge.printed().is_empty());
    }

    #[test]
    fn print_spools_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bridge = HeadlessBridge::with_spool_dir(dir.path().join("spool"));
        let handle = bridge
            .create("../flyer.pdf", MediaType::Pdf, b"%PDF-1.4".to_vec())
            .expect("create");
        let doc = bridge.open(&handle.to_ref()).expect("open");
        bridge.print(doc).expect("print");

        let spooled = dir.path().join("spool").join(format!("{}-flyer.pdf", handle.id()));
        assert_eq!(std::fs::read(spooled).expect("spooled file"), b"%PDF-1.4");
    }

    #[test]
    fn preview_is_recorded() {
        let bridge = HeadlessBridge::new();
        let handle = bridge.create("p.gif", MediaType::Gif, vec![0]).expect("create");
        bridge.open_preview(&handle.to_ref()).expect("preview");
        assert_eq!(bridge.previewed(), vec![handle.url().to_owned()]);
        assert!(bridge.printed().is_empty());
    }
}
