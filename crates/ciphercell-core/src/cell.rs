// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::error::{CiphercellError, CiphercellResult};
use crate::handle::ConfidentialHandle;
use serde::{Deserialize, Serialize};

/// Write-once holder for a confidential handle.
///
/// The cell starts empty and is mutated exactly once by [`install`]. The
/// initialized flag is `handle.is_some()`, so "initialized iff a handle is
/// stored" holds structurally and never reverts.
///
/// [`install`]: ConfidentialCell::install
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConfidentialCell {
    handle: Option<ConfidentialHandle>,
}

impl ConfidentialCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    /// Store the handle produced by engine conversion. Fails with
    /// [`CiphercellError::AlreadyInitialized`] on a second call, leaving the
    /// stored handle untouched.
    pub fn install(&mut self, handle: ConfidentialHandle) -> CiphercellResult<()> {
        if self.handle.is_some() {
            return Err(CiphercellError::AlreadyInitialized);
        }
        self.handle = Some(handle);
        Ok(())
    }

    /// Hand the stored handle out.
    ///
    /// Takes `&mut self` although nothing in the cell changes: exposing a
    /// confidential handle is state-affecting at the engine level, so this
    /// operation is transacting and must not be reachable from a read-only
    /// entry point. The borrow requirement is what enforces that.
    pub fn materialize(&mut self) -> CiphercellResult<ConfidentialHandle> {
        self.handle.ok_or(CiphercellError::NotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{dev_proof, ComputationEngine, DevEngine};

    fn handle(payload: &[u8]) -> ConfidentialHandle {
        DevEngine
            .from_external(payload, &dev_proof(payload))
            .unwrap()
    }

    #[test]
    fn starts_uninitialized() {
        let mut cell = ConfidentialCell::new();
        assert!(!cell.is_initialized());
        assert_eq!(
            cell.materialize().unwrap_err(),
            CiphercellError::NotInitialized
        );
    }

    #[test]
    fn install_is_write_once() {
        let mut cell = ConfidentialCell::new();
        let first = handle(b"first");
        cell.install(first).unwrap();
        assert!(cell.is_initialized());

        let err = cell.install(handle(b"second")).unwrap_err();
        assert_eq!(err, CiphercellError::AlreadyInitialized);
        // Failed second install leaves the original handle in place.
        assert_eq!(cell.materialize().unwrap(), first);
    }

    #[test]
    fn materialize_returns_the_installed_handle() {
        let mut cell = ConfidentialCell::new();
        let h = handle(b"value");
        cell.install(h).unwrap();
        assert_eq!(cell.materialize().unwrap(), h);
        assert_eq!(cell.materialize().unwrap(), h);
    }
}
