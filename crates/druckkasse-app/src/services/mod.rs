// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: wires configuration, the platform bridge, and the payment
// provider into an intake workflow for the command line to drive.

pub mod app_services;
pub mod data_dir;
