// Copyright (c) 2026 Ciphercell Contributors
// SPDX-License-Identifier: Apache-2.0

//! Declared operation surface and its compile-time classification audit.
//!
//! Every public coordinator operation is tagged [`OpClass::ReadOnly`] or
//! [`OpClass::Transacting`]. An operation may be read-only only if it never
//! materializes a confidential handle, never calls the oracle boundary, and
//! never mutates coordinator state. The table below declares each operation's
//! effects, and a `const` assertion rejects any read-only entry carrying an
//! effect flag, so a misclassified surface does not build.
//!
//! Declaring an illegal surface is itself a build failure:
//!
//! ```compile_fail
//! use ciphercell_core::surface::{surface_is_sound, OpClass, OpSpec};
//!
//! const BAD: &[OpSpec] = &[OpSpec {
//!     name: "peek_handle",
//!     class: OpClass::ReadOnly,
//!     materializes_handle: true,
//!     calls_oracle: false,
//!     mutates_state: false,
//! }];
//! const _: () = assert!(surface_is_sound(BAD));
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    ReadOnly,
    Transacting,
}

/// One declared operation with its classification and effect flags.
#[derive(Debug, Clone, Copy)]
pub struct OpSpec {
    pub name: &'static str,
    pub class: OpClass,
    /// Moves a confidential handle out of its owning cell or returns one.
    pub materializes_handle: bool,
    /// Calls into the oracle boundary (including the fee quote).
    pub calls_oracle: bool,
    /// Mutates the cell, the access guard, or the request ledger.
    pub mutates_state: bool,
}

const fn op(
    name: &'static str,
    class: OpClass,
    materializes_handle: bool,
    calls_oracle: bool,
    mutates_state: bool,
) -> OpSpec {
    OpSpec {
        name,
        class,
        materializes_handle,
        calls_oracle,
        mutates_state,
    }
}

/// The coordinator's public surface, one entry per method on
/// [`crate::coordinator::Coordinator`].
pub const COORDINATOR_SURFACE: &[OpSpec] = &[
    op("initialize", OpClass::Transacting, false, false, true),
    op("materialize", OpClass::Transacting, true, false, false),
    op("request_entropy", OpClass::Transacting, false, true, true),
    op("resolve", OpClass::Transacting, true, true, true),
    op("grant", OpClass::Transacting, false, false, true),
    op("revoke", OpClass::Transacting, false, false, true),
    op("is_initialized", OpClass::ReadOnly, false, false, false),
    op("oracle_address", OpClass::ReadOnly, false, false, false),
    op("status_of", OpClass::ReadOnly, false, false, false),
    op("is_granted", OpClass::ReadOnly, false, false, false),
    op("ledger_snapshot", OpClass::ReadOnly, false, false, false),
];

/// True iff the operation's effects permit the read-only class.
pub const fn read_only_safe(op: &OpSpec) -> bool {
    !op.materializes_handle && !op.calls_oracle && !op.mutates_state
}

/// True iff no read-only entry carries a transacting effect.
pub const fn surface_is_sound(ops: &[OpSpec]) -> bool {
    let mut i = 0;
    while i < ops.len() {
        if matches!(ops[i].class, OpClass::ReadOnly) && !read_only_safe(&ops[i]) {
            return false;
        }
        i += 1;
    }
    true
}

// The audit itself: a read-only operation with a transacting effect is a
// build failure, not a runtime error.
const _: () = assert!(
    surface_is_sound(COORDINATOR_SURFACE),
    "read-only operation reaches a transacting primitive"
);

pub fn find(name: &str) -> Option<&'static OpSpec> {
    COORDINATOR_SURFACE.iter().find(|o| o.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_names_are_unique() {
        for (i, a) in COORDINATOR_SURFACE.iter().enumerate() {
            for b in &COORDINATOR_SURFACE[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn every_effectful_op_is_transacting() {
        for op in COORDINATOR_SURFACE {
            if op.materializes_handle || op.calls_oracle || op.mutates_state {
                assert_eq!(op.class, OpClass::Transacting, "{}", op.name);
            }
        }
    }

    #[test]
    fn materialization_and_oracle_calls_are_never_read_only() {
        let materialize = find("materialize").unwrap();
        assert_eq!(materialize.class, OpClass::Transacting);
        let request = find("request_entropy").unwrap();
        assert_eq!(request.class, OpClass::Transacting);
        assert!(!read_only_safe(materialize));
        assert!(!read_only_safe(request));
    }

    #[test]
    fn read_only_queries_are_declared() {
        for name in ["is_initialized", "oracle_address", "status_of", "is_granted"] {
            let op = find(name).unwrap();
            assert_eq!(op.class, OpClass::ReadOnly);
            assert!(read_only_safe(op));
        }
    }
}
