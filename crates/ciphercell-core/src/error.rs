// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::ledger::RequestId;
use crate::oracle::Amount;
use thiserror::Error;

pub type CiphercellResult<T> = Result<T, CiphercellError>;

/// Runtime failures of the coordinator.
///
/// Every variant aborts the attempted operation with no partial state change.
/// A read-only operation reaching a transacting primitive has no variant
/// here: that is rejected at build time by the surface audit in
/// [`crate::surface`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CiphercellError {
    #[error("invalid oracle address: {0}")]
    InvalidOracleAddress(String),

    #[error("confidential cell is already initialized")]
    AlreadyInitialized,

    #[error("confidential cell is not initialized")]
    NotInitialized,

    #[error("computation engine rejected the ciphertext proof")]
    InvalidProof,

    #[error("payment {payment} is below the current oracle fee {fee}")]
    InsufficientFee { payment: Amount, fee: Amount },

    #[error("request id {0} is already registered")]
    DuplicateRequestId(RequestId),

    #[error("request id {0} is not registered")]
    UnknownRequestId(RequestId),

    #[error("request id {0} is already fulfilled")]
    AlreadyFulfilled(RequestId),

    #[error("request id {0} has no oracle result yet")]
    NotYetFulfilled(RequestId),
}
