// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a confidential value held by the computation engine.
///
/// The handle is a reference, not the secret: it can be passed, granted, or
/// materialized through blessed operations, but its payload is never
/// inspectable through this type. Only the engine that issued it can turn it
/// back into plaintext, and only for principals holding an access grant.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfidentialHandle([u8; 32]);

impl ConfidentialHandle {
    /// Engine-internal constructor. Callers outside the engine boundary
    /// obtain handles only from `from_external` or oracle resolution.
    pub(crate) fn from_digest(digest: [u8; 32]) -> Self {
        Self(digest)
    }

    /// Short hex prefix for log correlation.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl fmt::Debug for ConfidentialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfidentialHandle({})", self.fingerprint())
    }
}

/// Identity of a caller or execution context.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
