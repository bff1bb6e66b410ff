//! Property-based invariant tests for the sequence state machine.
//!
//! 1. `start` followed by N `next` calls reaches `Finished` after visiting
//!    every step once, in order.
//! 2. After `dismiss`, every navigation call is a no-op.
//! 3. `go_to` with an out-of-range index fails and leaves the state alone.
//! 4. Under any operation sequence, the running index stays in `0..N` and
//!    every returned transition matches the recorded event stream.

use proptest::prelude::*;
use spotlight_sequence::{
    DialogContent, SequenceController, SequenceError, SequenceEvent, SequenceState, StepConfig,
};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Next,
    Previous,
    Dismiss,
    GoTo(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        4 => Just(Op::Next),
        2 => Just(Op::Previous),
        1 => Just(Op::Dismiss),
        2 => (0usize..12).prop_map(Op::GoTo),
    ]
}

fn controller(n: usize) -> SequenceController {
    let mut c = SequenceController::new();
    for i in 0..n {
        c.register(i, StepConfig::new(), Box::new(|_| DialogContent::new("step")))
            .unwrap();
    }
    c
}

// ═══════════════════════════════════════════════════════════════════════
// 1–3. Walks
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_visits_every_step_then_finishes(n in 1usize..20) {
        let mut c = controller(n);
        c.start().unwrap();
        let mut visited = vec![0];
        for _ in 0..n {
            let t = c.next().unwrap();
            if let SequenceState::Running(i) = t.to {
                visited.push(i);
            }
        }
        prop_assert_eq!(visited, (0..n).collect::<Vec<_>>());
        prop_assert_eq!(c.state(), SequenceState::Finished);
        prop_assert!(c.next().is_none());
    }

    #[test]
    fn dismiss_freezes_the_run(n in 1usize..10, advance in 0usize..10, target in 0usize..10) {
        let mut c = controller(n);
        c.start().unwrap();
        for _ in 0..advance.min(n - 1) {
            c.next();
        }
        prop_assert!(c.dismiss().is_some());
        prop_assert!(c.next().is_none());
        prop_assert!(c.previous().is_none());
        prop_assert!(c.dismiss().is_none());
        prop_assert_eq!(c.go_to(target), Err(SequenceError::NotRunning));
        prop_assert_eq!(c.state(), SequenceState::Dismissed);
    }

    #[test]
    fn invalid_go_to_keeps_state(n in 1usize..10, at in 0usize..10, beyond in 0usize..10) {
        let mut c = controller(n);
        c.start().unwrap();
        let at = at.min(n - 1);
        c.go_to(at).unwrap();
        let bad = n + beyond;
        prop_assert_eq!(
            c.go_to(bad),
            Err(SequenceError::InvalidIndex { index: bad, count: n })
        );
        prop_assert_eq!(c.state(), SequenceState::Running(at));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Arbitrary operation sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_ops_preserve_invariants(
        n in 1usize..8,
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut c = controller(n);
        let mut transitions = Vec::new();
        for op in ops {
            let before = c.state();
            let result = match op {
                Op::Start => c.start().ok(),
                Op::Next => c.next(),
                Op::Previous => c.previous(),
                Op::Dismiss => c.dismiss(),
                Op::GoTo(i) => c.go_to(i).ok(),
            };
            match result {
                Some(t) => {
                    prop_assert_eq!(t.from, before);
                    prop_assert_eq!(t.to, c.state());
                    transitions.push(t);
                }
                None => prop_assert_eq!(c.state(), before),
            }
            if let SequenceState::Running(i) = c.state() {
                prop_assert!(i < n);
            }
        }
        let events = c.drain_events();
        prop_assert_eq!(events.len(), transitions.len());
        for (event, t) in events.iter().zip(&transitions) {
            prop_assert_eq!(*event, SequenceEvent::from(*t));
        }
    }
}
