// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckkasse: Core types, pricing, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod pricing;
pub mod types;

pub use config::{AppConfig, IntakePolicy};
pub use error::DruckkasseError;
pub use pricing::{PricingEngine, PricingQuote};
pub use types::*;
