//! Property-based tests for store reconciliation
//!
//! Tests invariants:
//! - Per-type counts equal a filter over `items` after any mutation sequence
//! - Counts per type always sum to the total
//! - Ids stay unique
//! - Update never moves entries; remove keeps relative order

use std::collections::HashSet;

use proptest::prelude::*;

use crate::core::reserves::{Reserve, ReserveType, StoreState};
use crate::tests::common::reserve;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_type() -> impl Strategy<Value = ReserveType> {
    prop_oneof![
        Just(ReserveType::Bonus),
        Just(ReserveType::Resource),
        Just(ReserveType::Mech),
        Just(ReserveType::Tactical),
    ]
}

/// Ids come from a small pool so updates/removes often hit cached entries.
fn arb_id() -> impl Strategy<Value = String> {
    (0u8..12).prop_map(|n| format!("r{n}"))
}

fn arb_reserve() -> impl Strategy<Value = Reserve> {
    (arb_id(), arb_type()).prop_map(|(id, t)| reserve(&id, t))
}

#[derive(Debug, Clone)]
enum Op {
    Load(Vec<Reserve>),
    Create(Reserve),
    Update(String, ReserveType),
    Remove(String),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => prop::collection::vec(arb_reserve(), 0..8).prop_map(|items| {
            // Server lists never repeat an id.
            let mut seen = HashSet::new();
            Op::Load(items.into_iter().filter(|r| seen.insert(r.id.clone())).collect())
        }),
        3 => arb_reserve().prop_map(Op::Create),
        3 => (arb_id(), arb_type()).prop_map(|(id, t)| Op::Update(id, t)),
        2 => arb_id().prop_map(Op::Remove),
    ]
}

fn apply(state: &mut StoreState, op: Op) {
    match op {
        Op::Load(items) => state.apply_loaded(items),
        Op::Create(r) => state.apply_created(r),
        Op::Update(id, t) => {
            state.apply_updated(&id, reserve(&id, t));
        }
        Op::Remove(id) => {
            state.apply_removed(&id);
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: derived counts match the items after any mutation sequence
    #[test]
    fn prop_counts_match_items(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut state = StoreState::default();
        for op in ops {
            apply(&mut state, op);
        }

        for t in ReserveType::ALL {
            let expected = state.items.iter().filter(|r| r.reserve_type == t).count();
            prop_assert_eq!(state.count_of(t), expected);
        }
        prop_assert_eq!(
            state.bonus_reserves() + state.resource_reserves()
                + state.mech_reserves() + state.tactical_reserves(),
            state.total_reserves()
        );
    }

    /// Property: ids remain unique in the cache
    #[test]
    fn prop_ids_unique(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut state = StoreState::default();
        for op in ops {
            apply(&mut state, op);
        }

        let unique: HashSet<&str> = state.items.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(unique.len(), state.items.len());
    }

    /// Property: update replaces exactly one position or nothing
    #[test]
    fn prop_update_preserves_positions(
        items in prop::collection::vec(arb_reserve(), 0..10),
        id in arb_id(),
        t in arb_type(),
    ) {
        let mut state = StoreState::default();
        for r in items {
            state.apply_created(r);
        }
        let before = state.items.clone();
        let hit = state.apply_updated(&id, reserve(&id, t));

        prop_assert_eq!(state.items.len(), before.len());
        for (idx, (old, new)) in before.iter().zip(&state.items).enumerate() {
            if hit && old.id == id {
                prop_assert_eq!(new.reserve_type, t, "position {} not replaced", idx);
            } else {
                prop_assert_eq!(old, new);
            }
        }
    }

    /// Property: remove drops exactly the matching entry and keeps order
    #[test]
    fn prop_remove_keeps_relative_order(
        items in prop::collection::vec(arb_reserve(), 0..10),
        id in arb_id(),
    ) {
        let mut state = StoreState::default();
        for r in items {
            state.apply_created(r);
        }
        let expected: Vec<Reserve> =
            state.items.iter().filter(|r| r.id != id).cloned().collect();

        state.apply_removed(&id);
        prop_assert_eq!(state.items, expected);
    }
}
