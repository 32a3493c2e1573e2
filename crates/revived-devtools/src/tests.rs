use std::cell::RefCell;
use std::rc::Rc;

use revived_core::*;
use serde_json::{Value, json};
use web_time::Duration;

use crate::*;

fn echo(_: Value, a: &Action) -> Value {
    json!(a.action_type().as_str())
}

fn inspected(capacity: usize) -> (Store<Value>, InspectorHandle) {
    let clock = StepClock::new(Duration::from_millis(2));
    let (root, handle) = Inspector::with_clock(echo, capacity, Box::new(clock));
    (Store::new(root), handle)
}

#[test]
fn test_summary() {
    let (store, handle) = inspected(DEFAULT_CAPACITY);
    store.dispatch(Action::new("ping")).unwrap();

    insta::assert_snapshot!(handle.summary(), @"actions: 2  |  reduce: 2.00 ms  |  last: ping");
}

#[test]
fn test_records_track_changes() {
    let (store, handle) = inspected(DEFAULT_CAPACITY);
    store.dispatch(Action::new("ping")).unwrap();
    store.dispatch(Action::new("ping")).unwrap();

    let records = handle.records();
    let changed: Vec<(u64, &str, bool)> = records
        .iter()
        .map(|r| (r.seq, r.action_type.as_str(), r.changed))
        .collect();
    assert_eq!(
        changed,
        vec![(0, "init", true), (1, "ping", true), (2, "ping", false)]
    );
}

#[test]
fn test_log_evicts_oldest() {
    let (store, handle) = inspected(2);
    for t in ["a", "b", "c"] {
        store.dispatch(Action::new(t)).unwrap();
    }

    let seqs: Vec<u64> = handle.records().iter().map(|r| r.seq).collect();
    assert_eq!(seqs, vec![2, 3]);
    assert_eq!(handle.metrics().dispatched, 4);
}

#[test]
fn test_zero_capacity_keeps_metrics_only() {
    let (store, handle) = inspected(0);
    store.dispatch(Action::new("a")).unwrap();

    assert!(handle.records().is_empty());
    assert_eq!(handle.metrics().last_action.as_deref(), Some("a"));
}

#[test]
fn test_disabled_inspector_still_reduces() {
    let (store, handle) = inspected(DEFAULT_CAPACITY);
    handle.set_enabled(false);
    store.dispatch(Action::new("quiet")).unwrap();

    assert_eq!(store.get_state(), json!("quiet"));
    assert_eq!(handle.records().len(), 1);

    handle.toggle();
    assert!(handle.is_enabled());
    store.dispatch(Action::new("loud")).unwrap();
    assert_eq!(handle.records().len(), 2);
}

#[test]
fn test_clear() {
    let (store, handle) = inspected(DEFAULT_CAPACITY);
    store.dispatch(Action::new("a")).unwrap();
    handle.clear();

    assert!(handle.records().is_empty());
    assert_eq!(handle.metrics().dispatched, 0);
    insta::assert_snapshot!(handle.summary(), @"actions: 0  |  reduce: 0.00 ms");

    store.dispatch(Action::new("b")).unwrap();
    let records = handle.records();
    assert_eq!(records[0].seq, 0);
    assert_eq!(handle.metrics().dispatched, 1);
}

#[test]
fn test_discarded_reduce_is_not_counted() {
    let slot: Rc<RefCell<Option<WeakStore<Value>>>> = Rc::new(RefCell::new(None));
    let nesting = {
        let slot = slot.clone();
        move |_: Value, a: &Action| {
            if a.action_type() == "nest"
                && let Some(store) = slot.borrow().as_ref().and_then(WeakStore::upgrade)
            {
                let _ = store.dispatch(Action::new("inner"));
            }
            json!(a.action_type().as_str())
        }
    };
    let clock = StepClock::new(Duration::from_millis(2));
    let (root, handle) = Inspector::with_clock(nesting, DEFAULT_CAPACITY, Box::new(clock));
    let store = Store::new(root);
    *slot.borrow_mut() = Some(store.downgrade());
    handle.attach(&store);

    assert!(store.dispatch(Action::new("nest")).is_err());
    assert_eq!(store.get_state(), json!("init"));

    let records: Vec<(u64, String, bool, bool)> = handle
        .records()
        .into_iter()
        .map(|r| (r.seq, r.action_type, r.changed, r.discarded))
        .collect();
    assert_eq!(
        records,
        vec![
            (0, "init".to_owned(), true, false),
            (1, "nest".to_owned(), false, true),
        ]
    );
    assert_eq!(handle.metrics().dispatched, 1);
    insta::assert_snapshot!(handle.summary(), @"actions: 1  |  reduce: 2.00 ms  |  last: init");

    store.dispatch(Action::new("ping")).unwrap();
    assert!(!handle.records()[2].discarded);
    assert_eq!(handle.metrics().dispatched, 2);
}

#[test]
fn test_json_export() {
    let (store, handle) = inspected(1);
    store.dispatch(Action::new("ping")).unwrap();

    insta::assert_snapshot!(handle.to_json().unwrap(), @r#"
    [
      {
        "seq": 1,
        "action_type": "ping",
        "reduce_ms": 2.0,
        "changed": true,
        "discarded": false
      }
    ]
    "#);
}
