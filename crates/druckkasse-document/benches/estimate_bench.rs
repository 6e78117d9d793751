// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for page estimation in the druckkasse-document crate.
// The PDF marker scan is the only estimator whose cost grows with the input,
// so it is measured at the 10 MiB intake ceiling.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use druckkasse_core::types::MediaType;
use druckkasse_document::PageEstimator;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Build a PDF-looking buffer of roughly `target_len` bytes: page dictionaries
/// separated by filler that resembles content streams.
fn synthetic_pdf(target_len: usize) -> Vec<u8> {
    let mut out = b"%PDF-1.7\n".to_vec();
    let page = b"<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] >>\n";
    let filler = [b'x'; 4096];
    while out.len() < target_len {
        out.extend_from_slice(page);
        out.extend_from_slice(&filler);
    }
    out
}

/// Benchmark the marker scan over a buffer at the intake size ceiling.
fn bench_pdf_marker_scan(c: &mut Criterion) {
    let bytes = synthetic_pdf(10 * 1024 * 1024);
    let estimator = PageEstimator::default();

    c.bench_function("pdf_marker_scan (10 MiB)", |b| {
        b.iter(|| {
            let estimate = estimator.estimate(
                MediaType::Pdf,
                Some(black_box(bytes.as_slice())),
                bytes.len() as u64,
            );
            black_box(estimate.page_count);
        });
    });
}

criterion_group!(benches, bench_pdf_marker_scan);
criterion_main!(benches);
