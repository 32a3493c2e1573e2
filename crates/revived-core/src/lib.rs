//! # Actions, Reducers, and the Store
//!
//! Revived is a small predictable state container. There are three main pieces:
//!
//! - `Action` — a typed, payload‑carrying description of something that happened.
//! - `Reducer` — a pure `(state, &action) -> state` transition.
//! - `Store` — the single holder of state, which runs the root reducer on
//!   `dispatch` and notifies subscribers.
//!
//! ## Actions
//!
//! Action types are plain names. Declare them as constants and build actions
//! directly or through an action creator:
//!
//! ```rust
//! use revived_core::*;
//!
//! const BUILDING_CHANGE: ActionType = ActionType::from_static("building_change");
//!
//! let building_change = action_creator(BUILDING_CHANGE, |building: &str| {
//!     Some(payload([("building", serde_json::json!(building))]))
//! });
//!
//! let a = building_change.create("turret");
//! assert_eq!(a.action_type(), &BUILDING_CHANGE);
//! assert_eq!(a.get("building"), Some(&serde_json::json!("turret")));
//! ```
//!
//! ## Reducers
//!
//! Any `Fn(S, &Action) -> S` is a reducer. `create_reducer` narrows one to a
//! single action type, `ReducerModule` groups typed reducers that share a
//! subtree, and `combine_reducers` assembles the tree:
//!
//! ```rust
//! use revived_core::*;
//! use serde_json::{Value, json};
//!
//! const STARTED: ActionType = ActionType::from_static("started");
//!
//! let attack = ReducerModule::new().on(STARTED, |mut prev: Value, _: &Action| {
//!     prev["is_attacking"] = json!(true);
//!     prev
//! });
//!
//! let root = combine_reducers().key("attack_mode", attack);
//! let next = root.reduce(json!({}), &Action::new(STARTED));
//! assert_eq!(next, json!({ "attack_mode": { "is_attacking": true } }));
//! ```
//!
//! ## Store and subscriptions
//!
//! ```rust
//! use revived_core::*;
//! use serde_json::{Value, json};
//! use std::{cell::Cell, rc::Rc};
//!
//! let store = Store::new(|_: Value, a: &Action| json!(a.action_type().as_str()));
//! assert_eq!(store.get_state(), json!("init"));
//!
//! let seen = Rc::new(Cell::new(0));
//! let unsubscribe = store.subscribe({
//!     let seen = seen.clone();
//!     move || seen.set(seen.get() + 1)
//! });
//!
//! store.dispatch(Action::new("ping")).unwrap();
//! unsubscribe.run();
//! store.dispatch(Action::new("pong")).unwrap();
//! assert_eq!(seen.get(), 1);
//! assert_eq!(store.get_state(), json!("pong"));
//! ```
//!
//! Dispatching from inside a reducer is refused with
//! `StoreError::DispatchInReducer`; dispatching from inside a subscriber is fine.

pub mod action;
pub mod error;
pub mod prelude;
pub mod reducer;
pub mod selector;
pub mod state;
pub mod store;
pub mod subscription;

pub use action::*;
pub use error::*;
pub use prelude::*;
pub use reducer::*;
pub use selector::*;
pub use state::*;
pub use store::*;
pub use subscription::*;
