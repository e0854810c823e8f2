// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

//! Composition root: one coordinator instance owns the cell, the access
//! guard, the request ledger, and the oracle client, with the computation
//! engine and oracle boundaries injected at construction. There is no
//! ambient or static state.

use crate::access::AccessGuard;
use crate::cell::ConfidentialCell;
use crate::engine::ComputationEngine;
use crate::error::{CiphercellError, CiphercellResult};
use crate::handle::{ConfidentialHandle, PrincipalId};
use crate::ledger::{RequestId, RequestLedger, RequestStatus};
use crate::oracle::{Amount, OracleAddress, OracleBoundary, OracleClient};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Identity of the cell's own execution context; granted access to the
    /// cell's handle on `initialize`.
    pub cell_principal: PrincipalId,
    /// On successful `resolve`, grant the original requester access to the
    /// result handle.
    pub grant_requester_on_resolve: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            cell_principal: PrincipalId::new("cell"),
            grant_requester_on_resolve: true,
        }
    }
}

/// Confidential-state / oracle-request coordinator.
///
/// Transacting operations take `&mut self`; read-only operations take
/// `&self`. The borrow checker therefore enforces the operation classes:
/// a read-only entry point holding `&Coordinator` cannot reach
/// `materialize`, `request_entropy`, or any other transacting primitive.
///
/// ```compile_fail
/// use ciphercell_core::coordinator::Coordinator;
/// use ciphercell_core::engine::DevEngine;
/// use ciphercell_core::handle::PrincipalId;
/// use ciphercell_core::oracle::DevOracle;
///
/// fn read_only_view(c: &Coordinator<DevEngine, DevOracle>) {
///     let _ = c.materialize(&PrincipalId::new("viewer"));
/// }
/// ```
#[derive(Debug)]
pub struct Coordinator<E, B> {
    cfg: CoordinatorConfig,
    engine: E,
    cell: ConfidentialCell,
    guard: AccessGuard,
    ledger: RequestLedger,
    oracle: OracleClient<B>,
}

impl<E: ComputationEngine, B: OracleBoundary> Coordinator<E, B> {
    /// Build a coordinator around the injected boundaries. Fails with
    /// [`CiphercellError::InvalidOracleAddress`] when the oracle boundary
    /// advertises a malformed address; nothing is constructed in that case.
    pub fn new(engine: E, boundary: B, cfg: CoordinatorConfig) -> CiphercellResult<Self> {
        let oracle = OracleClient::new(boundary)?;
        Ok(Self {
            cfg,
            engine,
            cell: ConfidentialCell::new(),
            guard: AccessGuard::new(),
            ledger: RequestLedger::new(),
            oracle,
        })
    }

    // --- transacting surface ---

    /// Convert external ciphertext into the cell's confidential value.
    ///
    /// At most once per coordinator: a second call fails with
    /// [`CiphercellError::AlreadyInitialized`] and changes nothing. A proof
    /// the engine rejects fails with [`CiphercellError::InvalidProof`],
    /// also with no state change.
    pub fn initialize(&mut self, ciphertext: &[u8], proof: &[u8]) -> CiphercellResult<()> {
        if self.cell.is_initialized() {
            return Err(CiphercellError::AlreadyInitialized);
        }
        let handle = self.engine.from_external(ciphertext, proof)?;
        self.cell.install(handle)?;
        self.engine.allow(handle, &self.cfg.cell_principal);
        self.guard.grant(handle, self.cfg.cell_principal.clone());
        tracing::info!(
            handle = %handle.fingerprint(),
            engine = self.engine.engine_name(),
            "confidential cell initialized"
        );
        Ok(())
    }

    /// Hand out the cell's handle. Fails with
    /// [`CiphercellError::NotInitialized`] before `initialize`. Whether
    /// `caller` may decrypt the handle off-system is a separate question
    /// answered by [`is_granted`].
    ///
    /// [`is_granted`]: Coordinator::is_granted
    pub fn materialize(&mut self, caller: &PrincipalId) -> CiphercellResult<ConfidentialHandle> {
        let handle = self.cell.materialize()?;
        tracing::debug!(handle = %handle.fingerprint(), caller = %caller, "handle materialized");
        Ok(handle)
    }

    /// Submit an entropy request to the oracle. The payment is checked
    /// against the live fee quote before anything is consumed; on success
    /// the fresh correlation id is registered as `Pending` and returned
    /// immediately. Fulfillment arrives through a later [`resolve`] call.
    ///
    /// [`resolve`]: Coordinator::resolve
    pub fn request_entropy(
        &mut self,
        tag: &str,
        payment: Amount,
        requester: PrincipalId,
    ) -> CiphercellResult<RequestId> {
        self.oracle.request(&mut self.ledger, tag, payment, requester)
    }

    /// Consume a delivered oracle result: marks the ledger `Fulfilled`,
    /// grants the original requester access when configured, and returns the
    /// result handle.
    pub fn resolve(&mut self, id: RequestId) -> CiphercellResult<ConfidentialHandle> {
        let handle = self.oracle.resolve(&mut self.ledger, id)?;
        if self.cfg.grant_requester_on_resolve {
            if let Some(record) = self.ledger.record(id) {
                let requester = record.requester.clone();
                self.engine.allow(handle, &requester);
                self.guard.grant(handle, requester);
            }
        }
        Ok(handle)
    }

    /// Grant `principal` read access to the cell's value, both engine-side
    /// and in the guard. Fails with [`CiphercellError::NotInitialized`]
    /// before `initialize`.
    pub fn grant(&mut self, principal: PrincipalId) -> CiphercellResult<()> {
        let handle = self.cell.materialize()?;
        self.engine.allow(handle, &principal);
        self.guard.grant(handle, principal.clone());
        tracing::debug!(handle = %handle.fingerprint(), principal = %principal, "access granted");
        Ok(())
    }

    /// Withdraw a guard-side grant for the cell's value. The engine boundary
    /// offers no disallow, so engine-side permission is out of scope here.
    pub fn revoke(&mut self, principal: &PrincipalId) -> CiphercellResult<()> {
        let handle = self.cell.materialize()?;
        self.guard.revoke(handle, principal);
        tracing::debug!(handle = %handle.fingerprint(), principal = %principal, "access revoked");
        Ok(())
    }

    // --- read-only surface ---

    pub fn is_initialized(&self) -> bool {
        self.cell.is_initialized()
    }

    pub fn oracle_address(&self) -> &OracleAddress {
        self.oracle.address()
    }

    pub fn status_of(&self, id: RequestId) -> Option<RequestStatus> {
        self.ledger.status_of(id)
    }

    pub fn is_granted(&self, handle: ConfidentialHandle, principal: &PrincipalId) -> bool {
        self.guard.is_granted(handle, principal)
    }

    pub fn ledger_snapshot(&self) -> serde_json::Value {
        self.ledger.snapshot()
    }
}

/// Shared coordinator for callers outside a single-owner context.
///
/// One `RwLock` per coordinator serializes all transacting operations;
/// read-only queries run concurrently under the read lock and observe a
/// consistent snapshot. Closures passed to [`read`] receive a shared
/// reference, so invoking a transacting operation from a read-only entry
/// point does not compile:
///
/// ```compile_fail
/// use ciphercell_core::coordinator::SharedCoordinator;
/// use ciphercell_core::engine::DevEngine;
/// use ciphercell_core::handle::PrincipalId;
/// use ciphercell_core::oracle::DevOracle;
///
/// fn illegal(shared: &SharedCoordinator<DevEngine, DevOracle>) {
///     shared.read(|c| c.materialize(&PrincipalId::new("viewer")).ok());
/// }
/// ```
///
/// [`read`]: SharedCoordinator::read
pub struct SharedCoordinator<E, B> {
    inner: Arc<RwLock<Coordinator<E, B>>>,
}

impl<E, B> Clone for SharedCoordinator<E, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: ComputationEngine, B: OracleBoundary> SharedCoordinator<E, B> {
    pub fn new(coordinator: Coordinator<E, B>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(coordinator)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Coordinator<E, B>) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn transact<R>(&self, f: impl FnOnce(&mut Coordinator<E, B>) -> R) -> R {
        f(&mut self.inner.write())
    }
}
