// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DruckkasseError, Result};

/// 10 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MAX_PAGES: u32 = 50;
/// 250 KiB of a Word file is assumed to fill one printed page.
pub const DEFAULT_WORD_BYTES_PER_PAGE: u64 = 250 * 1024;
/// Highest accepted per-page rate.
pub const MAX_RATE_PER_PAGE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Intake policy: the limits, rates and timings that drive the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakePolicy {
    /// Largest accepted upload, in bytes.
    pub max_file_bytes: u64,
    /// Largest accepted estimated page count.
    pub max_pages: u32,
    /// Price of one printed page.
    pub rate_per_page: Decimal,
    /// Average size of one page of a Word document.
    pub word_bytes_per_page: u64,
    /// Duration of the simulated payment settlement.
    pub settlement_delay_ms: u64,
    /// How long the "paid" confirmation stays visible before reverting.
    pub confirmation_display_ms: u64,
    /// How long to wait for the print window to report that it has loaded.
    pub print_load_timeout_ms: u64,
}

impl IntakePolicy {
    /// Reject policies a kiosk cannot run with. Loaded configuration files
    /// are checked with this before use.
    pub fn validate(&self) -> Result<()> {
        if self.rate_per_page.is_sign_negative() {
            return Err(DruckkasseError::InvalidConfig(format!(
                "rate_per_page {} is negative",
                self.rate_per_page
            )));
        }
        if self.rate_per_page > MAX_RATE_PER_PAGE {
            return Err(DruckkasseError::InvalidConfig(format!(
                "rate_per_page {} exceeds {MAX_RATE_PER_PAGE}",
                self.rate_per_page
            )));
        }
        if self.max_pages == 0 {
            return Err(DruckkasseError::InvalidConfig("max_pages is 0".into()));
        }
        if self.word_bytes_per_page == 0 {
            return Err(DruckkasseError::InvalidConfig(
                "word_bytes_per_page is 0".into(),
            ));
        }
        Ok(())
    }

    pub fn settlement_delay(&self) -> Duration {
        Duration::from_millis(self.settlement_delay_ms)
    }

    pub fn confirmation_display(&self) -> Duration {
        Duration::from_millis(self.confirmation_display_ms)
    }

    pub fn print_load_timeout(&self) -> Duration {
        Duration::from_millis(self.print_load_timeout_ms)
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_pages: DEFAULT_MAX_PAGES,
            rate_per_page: Decimal::new(400, 2),
            word_bytes_per_page: DEFAULT_WORD_BYTES_PER_PAGE,
            settlement_delay_ms: 2_000,
            confirmation_display_ms: 5_000,
            print_load_timeout_ms: 30_000,
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Limits and timings for document intake.
    pub intake: IntakePolicy,
    /// Open the preview window as soon as a document is ready.
    pub auto_preview: bool,
}
