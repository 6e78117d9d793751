// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page estimation: type-specific heuristics that turn a document into a
// printable page count.
//
// - PDF: structural marker scan of the raw bytes (see `pdf::markers`).
// - Images: always one page.
// - Word (legacy and Open XML): file size divided by an average page size.
//
// Estimation never fails and never returns zero. Whether the count is
// acceptable (the page ceiling) is decided by the workflow, not here.

use druckkasse_core::IntakePolicy;
use druckkasse_core::types::{EstimateMethod, MediaType, PageEstimate};
use tracing::{debug, instrument};

use crate::pdf::{count_page_markers, pages_from_markers};

/// Heuristic page counter.
#[derive(Debug, Clone, Copy)]
pub struct PageEstimator {
    word_bytes_per_page: u64,
}

impl PageEstimator {
    pub fn new(word_bytes_per_page: u64) -> Self {
        Self {
            word_bytes_per_page: word_bytes_per_page.max(1),
        }
    }

    pub fn from_policy(policy: &IntakePolicy) -> Self {
        Self::new(policy.word_bytes_per_page)
    }

    /// Estimate the printed page count of a document.
    ///
    /// `bytes` is only consulted for PDFs; a PDF without bytes estimates as a
    /// single page. Word estimates use `size_bytes`.
    #[instrument(skip_all, fields(%media_type, size_bytes = size_bytes))]
    pub fn estimate(
        &self,
        media_type: MediaType,
        bytes: Option<&[u8]>,
        size_bytes: u64,
    ) -> PageEstimate {
        let estimate = match media_type {
            MediaType::Pdf => estimate_pdf(bytes),
            MediaType::Jpeg | MediaType::Png | MediaType::Gif => PageEstimate {
                page_count: 1,
                method: EstimateMethod::SingleImage,
                notes: vec!["Images print on a single page.".into()],
            },
            MediaType::Doc | MediaType::Docx => self.estimate_word(size_bytes),
        };
        debug!(pages = estimate.page_count, method = ?estimate.method, "page estimate");
        estimate
    }

    fn estimate_word(&self, size_bytes: u64) -> PageEstimate {
        let pages = size_bytes.div_ceil(self.word_bytes_per_page).max(1);
        PageEstimate {
            page_count: u32::try_from(pages).unwrap_or(u32::MAX),
            method: EstimateMethod::SizeHeuristic {
                bytes_per_page: self.word_bytes_per_page,
            },
            notes: vec![format!(
                "bytes: {}, bytes_per_page: {}",
                size_bytes, self.word_bytes_per_page
            )],
        }
    }
}

impl Default for PageEstimator {
    fn default() -> Self {
        Self::from_policy(&IntakePolicy::default())
    }
}

fn estimate_pdf(bytes: Option<&[u8]>) -> PageEstimate {
    let Some(bytes) = bytes else {
        return PageEstimate {
            page_count: 1,
            method: EstimateMethod::MarkerScan { markers: 0 },
            notes: vec!["No bytes available; assuming a single page.".into()],
        };
    };

    let markers = count_page_markers(bytes);
    let mut notes = vec![format!("page markers: {markers}")];
    if markers == 0 {
        notes.push("No page markers found; the document may use compressed object streams.".into());
    }
    notes.push("Structural approximation; the printed count may differ.".into());

    PageEstimate {
        page_count: pages_from_markers(markers),
        method: EstimateMethod::MarkerScan { markers },
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MIB: u64 = 10 * 1024 * 1024;

    fn pdf_with_markers(n: usize) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n".to_vec();
        for _ in 0..n {
            out.extend_from_slice(b"<< /Type /Page >>\n");
        }
        out
    }

    #[test]
    fn images_are_always_one_page() {
        let estimator = PageEstimator::default();
        for media_type in [MediaType::Jpeg, MediaType::Png, MediaType::Gif] {
            for size in [0, 1, 5_000_000, TEN_MIB] {
                let est = estimator.estimate(media_type, Some(b"not really an image".as_slice()), size);
                assert_eq!(est.page_count, 1);
                assert_eq!(est.method, EstimateMethod::SingleImage);
            }
            assert_eq!(estimator.estimate(media_type, None, 42).page_count, 1);
        }
    }

    #[test]
    fn word_pages_follow_size() {
        let estimator = PageEstimator::default();
        let cases = [
            (0u64, 1u32),
            (1, 1),
            (256_000, 1),
            (256_001, 2),
            (2_400_000, 10),
            (TEN_MIB, 41),
        ];
        for (size, expected) in cases {
            for media_type in [MediaType::Doc, MediaType::Docx] {
                let est = estimator.estimate(media_type, None, size);
                assert_eq!(est.page_count, expected, "{media_type} at {size} bytes");
                assert_eq!(
                    est.method,
                    EstimateMethod::SizeHeuristic {
                        bytes_per_page: 256_000
                    }
                );
            }
        }
    }

    #[test]
    fn pdf_pages_are_half_the_markers_rounded_up() {
        let estimator = PageEstimator::default();
        for (markers, expected) in [(0usize, 1u32), (1, 1), (2, 1), (5, 3), (100, 50), (101, 51)] {
            let bytes = pdf_with_markers(markers);
            let est = estimator.estimate(MediaType::Pdf, Some(bytes.as_slice()), bytes.len() as u64);
            assert_eq!(est.page_count, expected);
            assert_eq!(est.method, EstimateMethod::MarkerScan { markers });
        }
    }

    #[test]
    fn pdf_without_bytes_is_one_page() {
        let est = PageEstimator::default().estimate(MediaType::Pdf, None, 1000);
        assert_eq!(est.page_count, 1);
    }

    #[test]
    fn markerless_pdf_gets_explanatory_note() {
        let est = PageEstimator::default().estimate(MediaType::Pdf, Some(b"%PDF-1.5 garbage".as_slice()), 16);
        assert_eq!(est.page_count, 1);
        assert!(est.notes.iter().any(|n| n.contains("compressed object streams")));
    }

    #[test]
    fn custom_word_page_size() {
        let est = PageEstimator::new(1000).estimate(MediaType::Docx, None, 2_500);
        assert_eq!(est.page_count, 3);
    }
}
