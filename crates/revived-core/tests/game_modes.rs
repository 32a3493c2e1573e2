//! A game store built from three reducer modules: the game module owns the
//! whole tree, while the building and attack modules each own one subtree.
//!
//! ```text
//! {
//!     "current_mode": "building" | "attack",
//!     "building_mode": { "building": .., "target": .., "is_building": .. },
//!     "attack_mode": { "target": .., "is_attacking": .. }
//! }
//! ```

use revived_core::*;
use serde_json::{Value, json};

const BUILDING_CHANGE: ActionType = ActionType::from_static("building_change");
const BUILDING_TARGET_CHANGE: ActionType = ActionType::from_static("building_target_change");
const BUILDING_STARTED: ActionType = ActionType::from_static("building_started");
const BUILDING_FINISHED: ActionType = ActionType::from_static("building_finished");

const ATTACK_TARGET_CHANGE: ActionType = ActionType::from_static("attack_target_change");
const ATTACK_STARTED: ActionType = ActionType::from_static("attack_started");
const ATTACK_FINISHED: ActionType = ActionType::from_static("attack_finished");

const GAME_MODE_CHANGE: ActionType = ActionType::from_static("mode_change");

fn set(mut prev: Value, key: &str, value: Value) -> Value {
    prev.put_subtree(key, value);
    prev
}

fn copy_field(field: &'static str) -> impl Fn(Value, &Action) -> Value {
    move |prev, a| {
        let v = a.get(field).cloned().unwrap_or(Value::Null);
        set(prev, field, v)
    }
}

fn building_module() -> ReducerModule<Value> {
    ReducerModule::new()
        .on(BUILDING_CHANGE, copy_field("building"))
        .on(BUILDING_TARGET_CHANGE, copy_field("target"))
        .on(BUILDING_STARTED, |prev, _| set(prev, "is_building", json!(true)))
        .on(BUILDING_FINISHED, |prev, _| {
            set(prev, "is_building", json!(false))
        })
}

fn attack_module() -> ReducerModule<Value> {
    ReducerModule::new()
        .on(ATTACK_TARGET_CHANGE, copy_field("target"))
        .on(ATTACK_STARTED, |prev, _| set(prev, "is_attacking", json!(true)))
        .on(ATTACK_FINISHED, |prev, _| {
            set(prev, "is_attacking", json!(false))
        })
}

fn game_module() -> ReducerModule<Value> {
    ReducerModule::new()
        .on(GAME_MODE_CHANGE, |_, a| {
            json!({
                "current_mode": a.get("mode").cloned().unwrap_or(Value::Null),
                "building_mode": {},
                "attack_mode": {},
            })
        })
        .on(INIT, |_, _| {
            json!({
                "current_mode": "attack",
                "building_mode": {},
                "attack_mode": {},
            })
        })
}

fn game_store() -> Store<Value> {
    Store::new(
        combine_reducers()
            .top(game_module())
            .key("building_mode", building_module())
            .key("attack_mode", attack_module()),
    )
}

#[test]
fn test_revived_integration() {
    let store = game_store();
    let mode_change = action_creator(GAME_MODE_CHANGE, |mode: &str| {
        Some(payload([("mode", json!(mode))]))
    });
    let building_change = action_creator(BUILDING_CHANGE, |b: &str| {
        Some(payload([("building", json!(b))]))
    });
    let building_target_change = action_creator(BUILDING_TARGET_CHANGE, |t: &str| {
        Some(payload([("target", json!(t))]))
    });
    let attack_target_change = action_creator(ATTACK_TARGET_CHANGE, |t: &str| {
        Some(payload([("target", json!(t))]))
    });

    assert_eq!(
        store.get_state(),
        json!({ "current_mode": "attack", "building_mode": {}, "attack_mode": {} })
    );

    store.dispatch(mode_change.create("building")).unwrap();
    assert_eq!(
        store.get_state(),
        json!({ "current_mode": "building", "building_mode": {}, "attack_mode": {} })
    );

    store.dispatch(building_change.create("turret")).unwrap();
    store.dispatch(building_target_change.create("turret1")).unwrap();
    store.dispatch(Action::new(BUILDING_STARTED)).unwrap();
    assert_eq!(
        store.get_state(),
        json!({
            "current_mode": "building",
            "building_mode": { "building": "turret", "target": "turret1", "is_building": true },
            "attack_mode": {},
        })
    );

    store.dispatch(Action::new(BUILDING_FINISHED)).unwrap();
    assert_eq!(store.get_state()["building_mode"]["is_building"], json!(false));

    store.dispatch(mode_change.create("attack")).unwrap();
    assert_eq!(
        store.get_state(),
        json!({ "current_mode": "attack", "building_mode": {}, "attack_mode": {} })
    );

    store.dispatch(attack_target_change.create("zombie1")).unwrap();
    store.dispatch(Action::new(ATTACK_STARTED)).unwrap();
    assert_eq!(
        store.get_state(),
        json!({
            "current_mode": "attack",
            "building_mode": {},
            "attack_mode": { "target": "zombie1", "is_attacking": true },
        })
    );

    store.dispatch(Action::new(ATTACK_FINISHED)).unwrap();
    assert_eq!(
        store.get_state(),
        json!({
            "current_mode": "attack",
            "building_mode": {},
            "attack_mode": { "target": "zombie1", "is_attacking": false },
        })
    );
}

#[test]
fn test_unrelated_actions_leave_state_alone() {
    let store = game_store();
    let before = store.get_state();
    store.dispatch(Action::new("nobody_listens")).unwrap();
    assert_eq!(store.get_state(), before);
}

#[test]
fn test_selector_over_subtree() {
    let store = game_store();
    let is_attacking = store.select(|s: &Value| s["attack_mode"]["is_attacking"] == json!(true));

    assert!(!is_attacking.get());
    store.dispatch(Action::new(ATTACK_STARTED)).unwrap();
    assert!(is_attacking.get());
}
