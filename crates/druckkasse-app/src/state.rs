// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal rendering of workflow views and errors.

use druckkasse_core::error::DruckkasseError;
use druckkasse_core::human_errors::{Severity, humanize_error};
use druckkasse_core::types::{WorkflowStage, WorkflowView};

/// Banner shown for each stage.
fn headline(stage: WorkflowStage) -> &'static str {
    match stage {
        WorkflowStage::Empty => "Choose a document to print.",
        WorkflowStage::Analyzing => "Counting pages...",
        WorkflowStage::Ready => "Ready to print.",
        WorkflowStage::AwaitingPayment => "Please pay to start printing.",
        WorkflowStage::Processing => "Processing payment...",
        WorkflowStage::PaidConfirmation => "Payment received. Printing now.",
    }
}

/// Render a view as the lines the kiosk screen would show.
pub fn render_view(view: &WorkflowView) -> Vec<String> {
    let mut lines = vec![format!("[{}] {}", view.stage.label(), headline(view.stage))];

    if let Some(file) = &view.file {
        lines.push(format!(
            "  {} ({}, {} bytes)",
            file.name, file.media_type, file.size_bytes
        ));
        lines.push(format!("  estimated pages: {}", file.page_count));
        for note in &file.estimate.notes {
            lines.push(format!("    - {note}"));
        }
    }
    if let Some(quote) = &view.quote {
        lines.push(format!("  price: {quote}"));
    }
    if let Some(error) = &view.last_error {
        lines.push(format!("  ! {error}"));
    }
    lines
}

/// Render an error the way the customer should see it.
pub fn render_error(err: &DruckkasseError) -> String {
    let human = humanize_error(err);
    let tag = match human.severity {
        Severity::Transient => "Try again",
        Severity::ActionRequired => "Action needed",
        Severity::Permanent => "Sorry",
    };
    format!("{tag}: {}\n  {}", human.message, human.suggestion)
}
