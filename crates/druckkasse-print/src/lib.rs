// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckkasse print engine: the intake workflow state machine, payment
// settlement, and the hand-off to the print window.

pub mod payment;
pub mod workflow;

pub use payment::{PaymentProvider, PaymentReceipt, SimulatedSettlement};
pub use workflow::IntakeWorkflow;
