//! Shared proptest strategies for record stacks and scopes.
//!
//! Stacks are generated the way producers build them: one representative
//! per action (no event keys, always labeled), zero or more sub-records
//! (sometimes unlabeled bookkeeping, small association maps), statuses
//! contiguous at the action level with an applied prefix.

use proptest::prelude::*;
use strata_history::{ActionRecord, ApplyStatus, ReviewStatus, Scope};

pub static EVENT_POOL: [&str; 4] = ["e1", "e2", "e3", "e4"];

type ChildSpec = (bool, Vec<(&'static str, bool)>);

fn arb_child_spec() -> impl Strategy<Value = ChildSpec> + Clone {
    (
        any::<bool>(),
        prop::collection::vec(
            (prop::sample::select(&EVENT_POOL[..]), any::<bool>()),
            0..3,
        ),
    )
}

fn arb_action_spec() -> impl Strategy<Value = Vec<ChildSpec>> + Clone {
    prop::collection::vec(arb_child_spec(), 0..3)
}

pub fn arb_stack() -> impl Strategy<Value = Vec<ActionRecord>> + Clone {
    prop::collection::vec(arb_action_spec(), 0..8)
        .prop_flat_map(|specs| {
            let actions = specs.len();
            (Just(specs), 0..=actions)
        })
        .prop_map(|(specs, applied_count)| assemble(&specs, applied_count))
}

pub fn arb_scope() -> impl Strategy<Value = Scope> + Clone {
    prop_oneof![
        Just(Scope::global()),
        prop::sample::select(&EVENT_POOL[..]).prop_map(|event| Scope::event_scoped(event)),
        prop::sample::select(&EVENT_POOL[..])
            .prop_map(|event| Scope::event_scoped(event).with_status(event, ReviewStatus::Complete)),
    ]
}

fn assemble(specs: &[Vec<ChildSpec>], applied_count: usize) -> Vec<ActionRecord> {
    let mut records = Vec::new();
    for (action_index, children) in specs.iter().enumerate() {
        let applied = action_index < applied_count;
        let action_id = format!("a{action_index}");

        let mut representative =
            ActionRecord::new(format!("r{action_index}-0"), action_id.clone(), 1_700_000_000)
                .with_text("Change", format!("action {action_index}"));
        if !applied {
            representative.status = ApplyStatus::NotApplied;
        }
        records.push(representative);

        for (child_index, (has_label, associations)) in children.iter().enumerate() {
            let mut child = ActionRecord::new(
                format!("r{action_index}-{}", child_index + 1),
                action_id.clone(),
                1_700_000_000,
            );
            if *has_label {
                child = child.with_text("Change", format!("sub-change {child_index}"));
            }
            for (event, active) in associations {
                child = child.with_event(*event, *active);
            }
            if !applied {
                child.status = ApplyStatus::NotApplied;
            }
            records.push(child);
        }
    }
    records
}
