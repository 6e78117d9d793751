// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: structural marker scanning for page estimation.

pub mod markers;

pub use markers::{count_page_markers, pages_from_markers};
