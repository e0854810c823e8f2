// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

//! Oracle boundary and the fee-checked client in front of it.

use crate::error::{CiphercellError, CiphercellResult};
use crate::handle::{ConfidentialHandle, PrincipalId};
use crate::ledger::{RequestId, RequestLedger, RequestStatus};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Fee and payment unit.
pub type Amount = u128;

/// Validated oracle service address.
///
/// `0x` plus 40 hex characters, not all zero. Anything else refuses
/// coordinator construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleAddress(String);

impl OracleAddress {
    pub fn parse(raw: &str) -> CiphercellResult<Self> {
        let hex_part = raw
            .strip_prefix("0x")
            .ok_or_else(|| invalid_address(raw, "missing 0x prefix"))?;
        if hex_part.len() != 40 {
            return Err(invalid_address(raw, "expected 40 hex characters"));
        }
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_address(raw, "non-hex character"));
        }
        if hex_part.chars().all(|c| c == '0') {
            return Err(invalid_address(raw, "zero address"));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OracleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid_address(raw: &str, reason: &str) -> CiphercellError {
    CiphercellError::InvalidOracleAddress(format!("{raw}: {reason}"))
}

/// The oracle service, as seen from the coordinator.
///
/// `submit_request` mutates oracle-side state and consumes the payment; the
/// returned id is guaranteed fresh by the boundary. `result` is `None` until
/// the oracle has delivered.
pub trait OracleBoundary: Send {
    fn address(&self) -> &str;

    /// Current posted price. Read live at request time, never cached.
    fn current_fee(&self) -> Amount;

    fn submit_request(&mut self, tag: &str, payment: Amount) -> RequestId;

    fn result(&self, id: RequestId) -> Option<ConfidentialHandle>;
}

/// In-memory oracle backend with a fixed address, configurable fee, and
/// monotonic ids. For tests and local development only.
///
/// Fulfillment is out-of-band, as with a real oracle: hold on to the
/// [`DevOracleController`] from [`controller`] and deliver results through
/// it after the boundary has been handed to a coordinator.
///
/// [`controller`]: DevOracle::controller
#[derive(Debug)]
pub struct DevOracle {
    address: String,
    fee: Arc<Mutex<Amount>>,
    next_id: u64,
    results: Arc<Mutex<BTreeMap<RequestId, ConfidentialHandle>>>,
}

/// Out-of-band control half of a [`DevOracle`].
#[derive(Debug, Clone)]
pub struct DevOracleController {
    fee: Arc<Mutex<Amount>>,
    results: Arc<Mutex<BTreeMap<RequestId, ConfidentialHandle>>>,
}

impl DevOracle {
    pub const DEFAULT_ADDRESS: &'static str = "0x00000000000000000000000000000000000000fe";

    pub fn new(fee: Amount) -> Self {
        Self {
            address: Self::DEFAULT_ADDRESS.to_string(),
            fee: Arc::new(Mutex::new(fee)),
            next_id: 1,
            results: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn controller(&self) -> DevOracleController {
        DevOracleController {
            fee: Arc::clone(&self.fee),
            results: Arc::clone(&self.results),
        }
    }
}

impl DevOracleController {
    pub fn set_fee(&self, fee: Amount) {
        *self.fee.lock() = fee;
    }

    /// Deliver a result for `id`, deriving the confidential handle from the
    /// supplied entropy bytes the way the engine would.
    pub fn fulfill(&self, id: RequestId, entropy: &[u8]) -> ConfidentialHandle {
        let mut hasher = Sha256::new();
        hasher.update(b"ciphercell/dev-oracle/result/v1");
        hasher.update(id.raw().to_be_bytes());
        hasher.update(entropy);
        let handle = ConfidentialHandle::from_digest(hasher.finalize().into());
        self.results.lock().insert(id, handle);
        handle
    }
}

impl OracleBoundary for DevOracle {
    fn address(&self) -> &str {
        &self.address
    }

    fn current_fee(&self) -> Amount {
        *self.fee.lock()
    }

    fn submit_request(&mut self, _tag: &str, _payment: Amount) -> RequestId {
        let id = RequestId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn result(&self, id: RequestId) -> Option<ConfidentialHandle> {
        self.results.lock().get(&id).copied()
    }
}

/// Fee-checked front for an [`OracleBoundary`].
///
/// Owns the boundary; the [`RequestLedger`] is passed in per call so the
/// coordinator keeps a single ledger across components.
#[derive(Debug)]
pub struct OracleClient<B> {
    address: OracleAddress,
    boundary: B,
}

impl<B: OracleBoundary> OracleClient<B> {
    /// Wrap a boundary, validating its address up front.
    /// [`CiphercellError::InvalidOracleAddress`] here is construction-time
    /// fatal for the whole coordinator.
    pub fn new(boundary: B) -> CiphercellResult<Self> {
        let address = OracleAddress::parse(boundary.address())?;
        Ok(Self { address, boundary })
    }

    pub fn address(&self) -> &OracleAddress {
        &self.address
    }

    /// Submit a request for the oracle.
    ///
    /// The fee is quoted live and checked before the boundary is invoked, so
    /// a rejected request consumes nothing and retains no funds. On success
    /// the boundary-assigned id is registered as `Pending` and returned.
    pub fn request(
        &mut self,
        ledger: &mut RequestLedger,
        tag: &str,
        payment: Amount,
        requester: PrincipalId,
    ) -> CiphercellResult<RequestId> {
        let fee = self.boundary.current_fee();
        if payment < fee {
            return Err(CiphercellError::InsufficientFee { payment, fee });
        }
        let id = self.boundary.submit_request(tag, payment);
        ledger.register(id, requester, tag)?;
        tracing::info!(id = %id, tag, fee = %fee, "oracle request submitted");
        Ok(id)
    }

    /// Consume a delivered result.
    ///
    /// Ledger checks run first so a stale or foreign id never reaches the
    /// boundary; the boundary is only asked for ids this ledger knows as
    /// `Pending`.
    pub fn resolve(
        &mut self,
        ledger: &mut RequestLedger,
        id: RequestId,
    ) -> CiphercellResult<ConfidentialHandle> {
        match ledger.status_of(id) {
            None => return Err(CiphercellError::UnknownRequestId(id)),
            Some(RequestStatus::Fulfilled) => {
                return Err(CiphercellError::AlreadyFulfilled(id))
            }
            Some(RequestStatus::Pending) => {}
        }
        let handle = self
            .boundary
            .result(id)
            .ok_or(CiphercellError::NotYetFulfilled(id))?;
        ledger.mark_fulfilled(id)?;
        tracing::info!(id = %id, handle = %handle.fingerprint(), "oracle request resolved");
        Ok(handle)
    }
}
