// Copyright (c) 2026 Ciphercell Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! ciphercell-core
//!
//! A confidential-state / oracle-request coordinator: the protocol discipline
//! for a host that owns an encrypted value which can only be produced or
//! consumed through state-transitioning operations.
//!
//! This crate implements the core protocol invariants:
//! - ConfidentialCell: a write-once holder for a confidential handle
//! - AccessGuard: explicit read grants per (handle, principal) pair
//! - RequestLedger: correlation ids for outstanding oracle requests
//! - OracleClient: fee-checked request submission and resolution
//! - A declared operation surface split into read-only and transacting
//!   classes, audited at compile time
//!
//! The computation engine and the oracle service are collaborators behind the
//! [`engine::ComputationEngine`] and [`oracle::OracleBoundary`] traits; this
//! crate ships dev backends for both but implements neither the cryptography
//! nor the randomness.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod access;
pub mod cell;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod handle;
pub mod ledger;
pub mod oracle;
pub mod surface;

pub use crate::error::{CiphercellError, CiphercellResult};

pub use crate::coordinator::{Coordinator, CoordinatorConfig, SharedCoordinator};
pub use crate::handle::{ConfidentialHandle, PrincipalId};
pub use crate::ledger::{RequestId, RequestStatus};
