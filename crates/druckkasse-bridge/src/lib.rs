// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckkasse collaborator bridge: resource handles, print windows, and
// previews behind traits, plus the headless implementation used on desktop,
// in CI, and by the command-line kiosk.

pub mod headless;
pub mod traits;

use std::path::PathBuf;
use std::sync::Arc;

pub use headless::HeadlessBridge;
pub use traits::{OpenedDocument, PlatformBridge, PreviewWindow, PrintWindow, ResourceProvider};

/// Build the bridge for this build target.
///
/// Only the headless bridge exists today; `spool_dir` is where it writes
/// printed documents.
pub fn platform_bridge(spool_dir: Option<PathBuf>) -> Arc<dyn PlatformBridge> {
    match spool_dir {
        Some(dir) => Arc::new(HeadlessBridge::with_spool_dir(dir)),
        None => Arc::new(HeadlessBridge::new()),
    }
}
