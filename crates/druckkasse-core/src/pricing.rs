// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pricing: maps an estimated page count to a cost at a flat per-page rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::IntakePolicy;

/// A derived price for one document. Never stored; recomputed from the page
/// count whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingQuote {
    pub page_count: u32,
    pub rate_per_page: Decimal,
    pub total: Decimal,
}

impl std::fmt::Display for PricingQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} page(s) x {:.2} = {:.2}",
            self.page_count, self.rate_per_page, self.total
        )
    }
}

/// Flat-rate pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingEngine {
    rate_per_page: Decimal,
}

impl PricingEngine {
    pub fn new(rate_per_page: Decimal) -> Self {
        Self { rate_per_page }
    }

    pub fn from_policy(policy: &IntakePolicy) -> Self {
        Self::new(policy.rate_per_page)
    }

    /// Price `page_count` pages. Decimal arithmetic keeps the total exact;
    /// a rate too large to multiply saturates instead of panicking.
    pub fn quote(&self, page_count: u32) -> PricingQuote {
        PricingQuote {
            page_count,
            rate_per_page: self.rate_per_page,
            total: Decimal::from(page_count).saturating_mul(self.rate_per_page),
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::from_policy(&IntakePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    #[test]
    fn total_is_pages_times_four() {
        let engine = PricingEngine::default();
        for pages in [1u32, 2, 7, 10, 33, 50] {
            let quote = engine.quote(pages);
            assert_eq!(quote.page_count, pages);
            assert_eq!(quote.total, Decimal::from(pages * 4));
            assert_eq!(quote.total.to_f64(), Some(f64::from(pages) * 4.0));
        }
    }

    #[test]
    fn ten_pages_cost_forty() {
        let quote = PricingEngine::default().quote(10);
        assert_eq!(quote.total, Decimal::new(4000, 2));
        assert_eq!(quote.to_string(), "10 page(s) x 4.00 = 40.00");
    }

    #[test]
    fn custom_rate_is_applied() {
        let engine = PricingEngine::new(Decimal::new(15, 2));
        assert_eq!(engine.quote(3).total, Decimal::new(45, 2));
    }

    #[test]
    fn huge_rate_saturates() {
        let engine = PricingEngine::new(Decimal::MAX);
        assert_eq!(engine.quote(u32::MAX).total, Decimal::MAX);
    }
}
