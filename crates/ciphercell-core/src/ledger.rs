// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

//! Correlation ledger for outstanding oracle requests.

use crate::error::{CiphercellError, CiphercellResult};
use crate::handle::PrincipalId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Correlation identifier assigned by the oracle boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: RequestId,
    pub requester: PrincipalId,
    pub tag: String,
    pub status: RequestStatus,
}

/// Table of every oracle request this coordinator has submitted.
///
/// A record exists from the moment a request is accepted until forever; there
/// is no expiry, so an unfulfilled request stays `Pending` and remains
/// visible in [`snapshot`].
///
/// [`snapshot`]: RequestLedger::snapshot
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RequestLedger {
    records: BTreeMap<RequestId, RequestRecord>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly issued id as `Pending`. Fails with
    /// [`CiphercellError::DuplicateRequestId`] if the id was seen before; the
    /// existing record is untouched.
    pub fn register(
        &mut self,
        id: RequestId,
        requester: PrincipalId,
        tag: &str,
    ) -> CiphercellResult<()> {
        if self.records.contains_key(&id) {
            return Err(CiphercellError::DuplicateRequestId(id));
        }
        self.records.insert(
            id,
            RequestRecord {
                id,
                requester,
                tag: tag.to_string(),
                status: RequestStatus::Pending,
            },
        );
        Ok(())
    }

    /// Transition a record to `Fulfilled`, exactly once per id.
    pub fn mark_fulfilled(&mut self, id: RequestId) -> CiphercellResult<()> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(CiphercellError::UnknownRequestId(id))?;
        if record.status == RequestStatus::Fulfilled {
            return Err(CiphercellError::AlreadyFulfilled(id));
        }
        record.status = RequestStatus::Fulfilled;
        Ok(())
    }

    pub fn status_of(&self, id: RequestId) -> Option<RequestStatus> {
        self.records.get(&id).map(|r| r.status)
    }

    pub fn record(&self, id: RequestId) -> Option<&RequestRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deterministic JSON dump of all records, ordered by id.
    pub fn snapshot(&self) -> Value {
        let records: Vec<Value> = self
            .records
            .values()
            .map(|r| {
                json!({
                    "id": r.id,
                    "requester": r.requester,
                    "tag": r.tag,
                    "status": match r.status {
                        RequestStatus::Pending => "pending",
                        RequestStatus::Fulfilled => "fulfilled",
                    },
                })
            })
            .collect();
        json!({ "requests": records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requester() -> PrincipalId {
        PrincipalId::new("requester")
    }

    #[test]
    fn register_then_status_is_pending() {
        let mut ledger = RequestLedger::new();
        ledger.register(RequestId::new(1), requester(), "x").unwrap();
        assert_eq!(
            ledger.status_of(RequestId::new(1)),
            Some(RequestStatus::Pending)
        );
        assert_eq!(ledger.status_of(RequestId::new(2)), None);
    }

    #[test]
    fn duplicate_id_is_rejected_without_overwrite() {
        let mut ledger = RequestLedger::new();
        ledger.register(RequestId::new(7), requester(), "first").unwrap();
        let err = ledger
            .register(RequestId::new(7), PrincipalId::new("other"), "second")
            .unwrap_err();
        assert_eq!(err, CiphercellError::DuplicateRequestId(RequestId::new(7)));
        let record = ledger.record(RequestId::new(7)).unwrap();
        assert_eq!(record.tag, "first");
        assert_eq!(record.requester, requester());
    }

    #[test]
    fn fulfillment_happens_exactly_once() {
        let mut ledger = RequestLedger::new();
        let id = RequestId::new(3);
        assert_eq!(
            ledger.mark_fulfilled(id).unwrap_err(),
            CiphercellError::UnknownRequestId(id)
        );
        ledger.register(id, requester(), "x").unwrap();
        ledger.mark_fulfilled(id).unwrap();
        assert_eq!(ledger.status_of(id), Some(RequestStatus::Fulfilled));
        assert_eq!(
            ledger.mark_fulfilled(id).unwrap_err(),
            CiphercellError::AlreadyFulfilled(id)
        );
    }

    #[test]
    fn snapshot_is_ordered_by_id() {
        let mut ledger = RequestLedger::new();
        ledger.register(RequestId::new(9), requester(), "b").unwrap();
        ledger.register(RequestId::new(2), requester(), "a").unwrap();
        ledger.mark_fulfilled(RequestId::new(2)).unwrap();
        let snap = ledger.snapshot();
        let requests = snap["requests"].as_array().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0]["id"], 2);
        assert_eq!(requests[0]["status"], "fulfilled");
        assert_eq!(requests[1]["id"], 9);
        assert_eq!(requests[1]["status"], "pending");
    }
}
