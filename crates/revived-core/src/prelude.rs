pub use crate::action::{Action, ActionCreator, ActionType, Payload, action_creator, payload};
pub use crate::error::StoreError;
pub use crate::reducer::{
    CombinedReducer, Reducer, ReducerModule, Subtree, TypedReducer, combine_reducers,
    create_reducer,
};
pub use crate::selector::Selector;
pub use crate::state::{Holder, StateHolder};
pub use crate::store::{INIT, Store, WeakStore, init};
pub use crate::subscription::{Subscriber, Unsubscribe};
