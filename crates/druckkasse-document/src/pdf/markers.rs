// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF page markers: count page-object type declarations in a raw byte stream
// without building an object graph.
//
// Known accuracy limitation: this is a structural approximation, not a parse.
// Pages inside compressed object streams are invisible to it, and producers
// that write more or fewer type declarations per page than the usual two will
// be over- or undercounted. Callers get a count, never an error.

use std::sync::LazyLock;

use regex::bytes::Regex;

/// `/Type /Page`, with or without whitespace between the two names. Also hits
/// the `/Type /Pages` tree nodes, which is part of what the halving absorbs.
static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)/Type\s*/Page").expect("page marker pattern is valid"));

/// Number of page markers in `bytes` (non-overlapping).
pub fn count_page_markers(bytes: &[u8]) -> usize {
    PAGE_MARKER.find_iter(bytes).count()
}

/// Convert a marker count into a page count: typical producers register two
/// hits per logical page, so halve and round up, never going below one page.
pub fn pages_from_markers(markers: usize) -> u32 {
    let pages = markers.div_ceil(2).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
