//! Property-based tests for the subject/observer notification contract.
//!
//! Random attach/detach/set_state sequences are replayed against a
//! `ConcreteSubject` and a plain `Vec` model of the observer sequence.
//! For any such sequence:
//!
//! 1. After set_state(v), every attached observer has cached v.
//! 2. Updates per set_state equal the attachments, in attachment order.
//! 3. Observers not attached at the time are never invoked.
//! 4. Detach removes only the first occurrence; detaching an absent
//!    observer is a no-op.
//! 5. N attachments of one observer yield N updates per change.
//! 6. Reading state() never notifies and always returns the last value set.

mod common;

use common::*;
use observer_core::{ConcreteSubject, Subject, SubjectExt};
use proptest::prelude::*;
use std::sync::Arc;

const POOL: usize = 5;

#[derive(Debug, Clone)]
enum Op {
    Attach(usize),
    Detach(usize),
    SetState(i64),
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..POOL).prop_map(Op::Attach),
        2 => (0..POOL).prop_map(Op::Detach),
        3 => any::<i64>().prop_map(Op::SetState),
    ]
}

fn op_sequence(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 0..=max_len)
}

fn pool(subject: &Arc<ConcreteSubject>, log: &UpdateLog) -> Vec<Arc<RecordingObserver>> {
    (0..POOL)
        .map(|i| RecordingObserver::detached(subject, &format!("o{}", i), log))
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Random sequences agree with the Vec model
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn random_sequences_match_model(ops in op_sequence(40)) {
        let subject = ConcreteSubject::shared();
        let log = UpdateLog::new();
        let observers = pool(&subject, &log);

        let mut model: Vec<usize> = Vec::new();
        let mut expected_calls = [0usize; POOL];
        let mut expected_cached = [0i64; POOL];

        for op in &ops {
            match *op {
                Op::Attach(i) => {
                    subject.attach(observers[i].clone());
                    model.push(i);
                }
                Op::Detach(i) => {
                    subject.detach_observer(&observers[i]);
                    if let Some(pos) = model.iter().position(|&m| m == i) {
                        model.remove(pos);
                    }
                }
                Op::SetState(v) => {
                    log.clear();
                    subject.set_state(v);

                    prop_assert_eq!(subject.state(), v);

                    let expected: Vec<(String, i64)> = model
                        .iter()
                        .map(|&i| (format!("o{}", i), v))
                        .collect();
                    prop_assert_eq!(log.entries(), expected);

                    for &i in &model {
                        expected_calls[i] += 1;
                        expected_cached[i] = v;
                    }
                }
            }

            prop_assert_eq!(subject.observer_count(), model.len());
            let expected_names: Vec<String> =
                model.iter().map(|&i| format!("o{}", i)).collect();
            prop_assert_eq!(subject.observer_names(), expected_names);

            for (i, observer) in observers.iter().enumerate() {
                prop_assert_eq!(observer.calls(), expected_calls[i], "o{} call count", i);
                prop_assert_eq!(observer.cached(), expected_cached[i], "o{} cached state", i);
                prop_assert_eq!(subject.has_observer(observer), model.contains(&i));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. N attachments yield N updates per change
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn n_attachments_yield_n_updates(
        n in 0usize..=8,
        states in proptest::collection::vec(any::<i64>(), 1..=5),
    ) {
        let subject = ConcreteSubject::shared();
        let log = UpdateLog::new();
        let observer = RecordingObserver::detached(&subject, "dup", &log);

        for _ in 0..n {
            subject.attach(observer.clone());
        }

        for &v in &states {
            subject.set_state(v);
        }

        prop_assert_eq!(observer.calls(), n * states.len());
        prop_assert_eq!(log.entries().len(), n * states.len());
        if n > 0 {
            prop_assert_eq!(observer.cached(), states[states.len() - 1]);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. state() is a pure read
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn state_reads_are_idempotent(v in any::<i64>(), reads in 1usize..=10) {
        let subject = ConcreteSubject::shared();
        let log = UpdateLog::new();
        let observer = RecordingObserver::attach(&subject, "reader", &log);

        subject.set_state(v);

        for _ in 0..reads {
            prop_assert_eq!(subject.state(), v);
        }
        prop_assert_eq!(observer.calls(), 1);
        prop_assert_eq!(log.entries(), vec![("reader".to_string(), v)]);
    }
}
