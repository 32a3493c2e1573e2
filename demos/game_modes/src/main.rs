use anyhow::Context;
use revived_core::*;
use revived_devtools::Inspector;
use serde_json::{Value, json};

const MODE_CHANGE: ActionType = ActionType::from_static("mode_change");
const BUILDING_CHANGE: ActionType = ActionType::from_static("building_change");
const BUILDING_STARTED: ActionType = ActionType::from_static("building_started");
const ATTACK_TARGET_CHANGE: ActionType = ActionType::from_static("attack_target_change");

fn with(mut prev: Value, key: &str, value: Value) -> Value {
    prev.put_subtree(key, value);
    prev
}

fn root_reducer() -> CombinedReducer<Value> {
    let game = ReducerModule::new()
        .on(INIT, |_, _| {
            json!({ "current_mode": "attack", "building_mode": {}, "attack_mode": {} })
        })
        .on(MODE_CHANGE, |_, a| {
            json!({
                "current_mode": a.get("mode").cloned().unwrap_or(Value::Null),
                "building_mode": {},
                "attack_mode": {},
            })
        });
    let building = ReducerModule::new()
        .on(BUILDING_CHANGE, |prev, a| {
            with(prev, "building", a.get("building").cloned().unwrap_or(Value::Null))
        })
        .on(BUILDING_STARTED, |prev, _| with(prev, "is_building", json!(true)));
    let attack = ReducerModule::new().on(ATTACK_TARGET_CHANGE, |prev, a| {
        with(prev, "target", a.get("target").cloned().unwrap_or(Value::Null))
    });

    combine_reducers()
        .top(game)
        .key("building_mode", building)
        .key("attack_mode", attack)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (root, inspector) = Inspector::new(root_reducer());
    let store = Store::new(root);
    inspector.attach(&store);

    let weak = store.downgrade();
    let _log_changes = store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            store.read_state(|s| log::info!("state: {s}"));
        }
    });

    let actions = [
        Action::new(MODE_CHANGE).with("mode", "building"),
        Action::new(BUILDING_CHANGE).with("building", "turret"),
        Action::new(BUILDING_STARTED),
        Action::new(MODE_CHANGE).with("mode", "attack"),
        Action::new(ATTACK_TARGET_CHANGE).with("target", "zombie1"),
    ];
    for action in actions {
        let name = action.action_type().to_string();
        store
            .dispatch(action)
            .with_context(|| format!("dispatching '{name}'"))?;
    }

    let state = store.read_state(|s| serde_json::to_string_pretty(s))?;
    println!("{state}");
    log::info!("{}", inspector.summary());
    Ok(())
}
