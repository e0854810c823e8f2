use ciphercell_core::oracle::DevOracle;
use ciphercell_core::{CiphercellError, Coordinator, CoordinatorConfig, PrincipalId};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn coordinator(fee: u128) -> Coordinator<ciphercell_core::engine::DevEngine, DevOracle> {
    Coordinator::new(
        ciphercell_core::engine::DevEngine,
        DevOracle::new(fee),
        CoordinatorConfig::default(),
    )
    .expect("construct")
}

proptest! {
    // Underpayment is always rejected with the live quote and registers
    // nothing, regardless of how the shortfall is distributed.
    #[test]
    fn underpayment_never_registers(fee in 1u128..1_000_000, shortfall in 1u128..1_000_000) {
        let payment = fee.saturating_sub(shortfall);
        let mut c = coordinator(fee);
        let err = c
            .request_entropy("tag", payment, PrincipalId::new("requester"))
            .unwrap_err();
        prop_assert_eq!(err, CiphercellError::InsufficientFee { payment, fee });
        prop_assert_eq!(c.ledger_snapshot()["requests"].as_array().map(Vec::len), Some(0));
    }

    // Every accepted request yields an id never seen before on this
    // coordinator, and each is Pending immediately after acceptance.
    #[test]
    fn accepted_requests_get_fresh_ids(count in 1usize..64, fee in 0u128..1_000) {
        let mut c = coordinator(fee);
        let mut seen = BTreeSet::new();
        for i in 0..count {
            let requester = PrincipalId::new(format!("requester-{i}"));
            let id = c.request_entropy("tag", fee, requester).expect("request");
            prop_assert_eq!(c.status_of(id), Some(ciphercell_core::RequestStatus::Pending));
            prop_assert!(seen.insert(id), "id {} repeated", id);
        }
        prop_assert_eq!(seen.len(), count);
    }

    // Overpayment is never a reason to reject.
    #[test]
    fn overpayment_is_accepted(fee in 0u128..1_000, extra in 0u128..1_000) {
        let mut c = coordinator(fee);
        let id = c
            .request_entropy("tag", fee + extra, PrincipalId::new("requester"))
            .expect("request");
        prop_assert!(c.status_of(id).is_some());
    }
}
