//! Computation engine boundary.
//!
//! The engine is a black box that converts externally supplied ciphertext
//! into internal confidential handles and tracks engine-side read
//! permissions. The coordinator never sees plaintext; everything it holds is
//! a [`ConfidentialHandle`].

use crate::error::{CiphercellError, CiphercellResult};
use crate::handle::{ConfidentialHandle, PrincipalId};
use sha2::{Digest, Sha256};

pub trait ComputationEngine: Send + Sync {
    fn engine_name(&self) -> &'static str;

    /// Convert external ciphertext plus a validity proof into an internal
    /// handle. Rejects with [`CiphercellError::InvalidProof`] when the proof
    /// does not check out; no handle is issued in that case.
    fn from_external(
        &self,
        ciphertext: &[u8],
        proof: &[u8],
    ) -> CiphercellResult<ConfidentialHandle>;

    /// Record engine-side permission for `principal` to read the value
    /// behind `handle`. Idempotent.
    fn allow(&self, handle: ConfidentialHandle, principal: &PrincipalId);
}

/// Development engine with a checkable stand-in proof scheme.
///
/// The "proof" accepted here is the SHA-256 digest of the ciphertext, which
/// exercises the accept/reject paths without any real cryptography. Handles
/// are domain-tagged digests so distinct ciphertexts map to distinct handles.
///
/// NOT a confidential-computation engine; for tests and local development
/// only.
#[derive(Debug, Default, Clone)]
pub struct DevEngine;

const HANDLE_DOMAIN_TAG: &[u8] = b"ciphercell/dev-engine/handle/v1";

impl ComputationEngine for DevEngine {
    fn engine_name(&self) -> &'static str {
        "dev"
    }

    fn from_external(
        &self,
        ciphertext: &[u8],
        proof: &[u8],
    ) -> CiphercellResult<ConfidentialHandle> {
        let expected = Sha256::digest(ciphertext);
        if proof != expected.as_slice() {
            return Err(CiphercellError::InvalidProof);
        }
        let mut hasher = Sha256::new();
        hasher.update(HANDLE_DOMAIN_TAG);
        hasher.update(ciphertext);
        let digest: [u8; 32] = hasher.finalize().into();
        Ok(ConfidentialHandle::from_digest(digest))
    }

    fn allow(&self, handle: ConfidentialHandle, principal: &PrincipalId) {
        tracing::debug!(
            handle = %handle.fingerprint(),
            principal = %principal,
            "engine-side allow"
        );
    }
}

/// Derive the dev proof for a ciphertext. Test helper for callers of
/// [`DevEngine`].
pub fn dev_proof(ciphertext: &[u8]) -> Vec<u8> {
    Sha256::digest(ciphertext).to_vec()
}
