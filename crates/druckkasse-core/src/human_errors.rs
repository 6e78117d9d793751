// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for kiosk customers.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how the presentation layer shows it.

use crate::error::DruckkasseError;

/// Severity of an error from the customer's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something in the environment hiccuped; trying again may work.
    Transient,
    /// The customer must do something different (pick another file, pay again).
    ActionRequired,
    /// Cannot be fixed from the kiosk.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the customer should try (shown as body text).
    pub suggestion: String,
    /// Whether repeating the same action could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `DruckkasseError` into a `HumanError` fit for the kiosk screen.
pub fn humanize_error(err: &DruckkasseError) -> HumanError {
    match err {
        // -- Intake rejections --
        DruckkasseError::UnsupportedType(detail) => HumanError {
            message: "This type of file can't be printed here.".into(),
            suggestion: format!(
                "Please choose a PDF, a picture (JPEG, PNG or GIF) or a Word document. (File type: {detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DruckkasseError::OversizeFile { max_bytes, .. } => HumanError {
            message: "This file is too big.".into(),
            suggestion: format!(
                "Files can be at most {} MB. Try saving a smaller copy, or split it into parts.",
                max_bytes / (1024 * 1024)
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DruckkasseError::OversizedDocument { pages, max_pages } => HumanError {
            message: "This document has too many pages.".into(),
            suggestion: format!(
                "We estimate {pages} pages, but we can print at most {max_pages} at a time. Try printing it in parts."
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DruckkasseError::CorruptDocument(_) => HumanError {
            message: "There's a problem with this file.".into(),
            suggestion: "The file may be damaged. Try opening it on a computer first to check it works, or choose a different file.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Workflow --
        DruckkasseError::Busy => HumanError {
            message: "We're still looking at your last file.".into(),
            suggestion: "Please wait a moment, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        DruckkasseError::Superseded => HumanError {
            message: "That file was replaced.".into(),
            suggestion: "You picked a different file or cleared the selection while we were counting pages.".into(),
            retriable: false,
            severity: Severity::Transient,
        },

        // -- Payment --
        DruckkasseError::SettlementDeclined(_) => HumanError {
            message: "The payment didn't go through.".into(),
            suggestion: "Nothing was charged. Please try paying again, or use a different payment method.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        // -- Platform --
        DruckkasseError::Bridge(_) => HumanError {
            message: "The print window didn't open.".into(),
            suggestion: "Try again. If this keeps happening, please ask a member of staff.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Configuration --
        DruckkasseError::InvalidConfig(_) => HumanError {
            message: "This kiosk isn't set up correctly.".into(),
            suggestion: "Please ask a member of staff for help.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Storage --
        DruckkasseError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We don't have permission to read that file.".into(),
                    suggestion: "Try copying the file to a different location first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading the file.".into(),
                    suggestion: "Try again. If this keeps happening, choose the file again.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        DruckkasseError::Serialization(_) => HumanError {
            message: "The kiosk had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_asks_for_another_file() {
        let human = humanize_error(&DruckkasseError::UnsupportedType("text/plain".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
        assert!(human.suggestion.contains("text/plain"));
    }

    #[test]
    fn oversize_file_reports_limit_in_megabytes() {
        let human = humanize_error(&DruckkasseError::OversizeFile {
            size_bytes: 10 * 1024 * 1024 + 1,
            max_bytes: 10 * 1024 * 1024,
        });
        assert!(human.suggestion.contains("10 MB"));
    }

    #[test]
    fn oversized_document_names_both_counts() {
        let human = humanize_error(&DruckkasseError::OversizedDocument {
            pages: 51,
            max_pages: 50,
        });
        assert!(human.suggestion.contains("51"));
        assert!(human.suggestion.contains("50"));
    }

    #[test]
    fn declined_payment_is_retriable() {
        let human = humanize_error(&DruckkasseError::SettlementDeclined("insufficient funds".into()));
        assert!(human.retriable);
    }

    #[test]
    fn bad_configuration_needs_staff() {
        let human = humanize_error(&DruckkasseError::InvalidConfig("rate_per_page is negative".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }

    #[test]
    fn missing_file_is_action_required() {
        let err = DruckkasseError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }
}
