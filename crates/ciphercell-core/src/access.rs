// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::handle::{ConfidentialHandle, PrincipalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read grants per (handle, principal) pair.
///
/// A handle is readable by a principal iff a grant for that pair is present;
/// absence means denied, never implicit. Grant and revoke are idempotent.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AccessGuard {
    grants: BTreeSet<(ConfidentialHandle, PrincipalId)>,
}

impl AccessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, handle: ConfidentialHandle, principal: PrincipalId) {
        self.grants.insert((handle, principal));
    }

    pub fn revoke(&mut self, handle: ConfidentialHandle, principal: &PrincipalId) {
        self.grants.remove(&(handle, principal.clone()));
    }

    pub fn is_granted(&self, handle: ConfidentialHandle, principal: &PrincipalId) -> bool {
        self.grants.contains(&(handle, principal.clone()))
    }

    pub fn grant_count(&self) -> usize {
        self.grants.len()
    }
}
