//! # Reducers
//!
//! A reducer computes the next state from the previous one and an action.
//! It must not mutate anything it does not own, perform side effects, or
//! call non‑pure functions: given the same arguments it returns the same
//! state.
//!
//! Every `Fn(S, &Action) -> S` closure is a [`Reducer`]. Three combinators
//! build bigger reducers out of smaller ones, and each result is again a
//! reducer, so they nest freely:
//!
//! - [`create_reducer`] — runs only for one action type.
//! - [`ReducerModule`] — a group of typed reducers over the same state,
//!   applied in registration order.
//! - [`combine_reducers`] — top‑level reducers over the whole state, then
//!   keyed reducers that each own one subtree of it.

use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::action::{Action, ActionType};

pub trait Reducer<S>: 'static {
    fn reduce(&self, state: S, action: &Action) -> S;
}

impl<S, F> Reducer<S> for F
where
    F: Fn(S, &Action) -> S + 'static,
{
    fn reduce(&self, state: S, action: &Action) -> S {
        self(state, action)
    }
}

type ReducerList<S> = SmallVec<[Box<dyn Reducer<S>>; 4]>;

/// Reducer that only handles one action type and passes every other action
/// through untouched.
pub struct TypedReducer<F> {
    action_type: ActionType,
    f: F,
}

impl<F> TypedReducer<F> {
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }
}

impl<S, F> Reducer<S> for TypedReducer<F>
where
    F: Fn(S, &Action) -> S + 'static,
{
    fn reduce(&self, state: S, action: &Action) -> S {
        if action.is(&self.action_type) {
            (self.f)(state, action)
        } else {
            state
        }
    }
}

pub fn create_reducer<S, F>(action_type: impl Into<ActionType>, f: F) -> TypedReducer<F>
where
    F: Fn(S, &Action) -> S + 'static,
{
    TypedReducer {
        action_type: action_type.into(),
        f,
    }
}

/// A group of typed reducers that all handle the same piece of state.
///
/// Behaves exactly like [`combine_reducers`] over the same typed reducers as
/// top‑level entries; it only saves the boilerplate.
pub struct ReducerModule<S: 'static> {
    reducers: ReducerList<S>,
}

impl<S: 'static> Default for ReducerModule<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> ReducerModule<S> {
    pub fn new() -> Self {
        Self {
            reducers: SmallVec::new(),
        }
    }

    pub fn on<F>(mut self, action_type: impl Into<ActionType>, f: F) -> Self
    where
        F: Fn(S, &Action) -> S + 'static,
    {
        self.register(action_type, f);
        self
    }

    pub fn register<F>(&mut self, action_type: impl Into<ActionType>, f: F) -> &mut Self
    where
        F: Fn(S, &Action) -> S + 'static,
    {
        self.reducers.push(Box::new(create_reducer(action_type, f)));
        self
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S: 'static> Reducer<S> for ReducerModule<S> {
    fn reduce(&self, state: S, action: &Action) -> S {
        self.reducers
            .iter()
            .fold(state, |next, r| r.reduce(next, action))
    }
}

/// State that can be split into named subtrees of the same type.
pub trait Subtree: Sized {
    /// Removes and returns the subtree under `key`; a missing key yields the
    /// "absent" value of the type.
    fn take_subtree(&mut self, key: &str) -> Self;

    fn put_subtree(&mut self, key: &str, value: Self);
}

impl Subtree for Value {
    fn take_subtree(&mut self, key: &str) -> Self {
        match self {
            Value::Object(map) => map.remove(key).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    fn put_subtree(&mut self, key: &str, value: Self) {
        match self {
            Value::Object(map) => {
                map.insert(key.to_owned(), value);
            }
            Value::Null => {
                let mut map = Map::new();
                map.insert(key.to_owned(), value);
                *self = Value::Object(map);
            }
            _ => {
                log::warn!(
                    "put_subtree: state is not an object ({}); replacing it to hold key '{}'",
                    kind(self),
                    key
                );
                let mut map = Map::new();
                map.insert(key.to_owned(), value);
                *self = Value::Object(map);
            }
        }
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Top‑level reducers over the whole state followed by keyed reducers, each
/// of which sees only its own subtree.
pub struct CombinedReducer<S: 'static> {
    top: ReducerList<S>,
    keyed: Vec<(String, Box<dyn Reducer<S>>)>,
}

pub fn combine_reducers<S: 'static>() -> CombinedReducer<S> {
    CombinedReducer {
        top: SmallVec::new(),
        keyed: Vec::new(),
    }
}

impl<S: 'static> CombinedReducer<S> {
    /// Adds a reducer that receives the whole state.
    pub fn top(mut self, reducer: impl Reducer<S>) -> Self {
        self.top.push(Box::new(reducer));
        self
    }

    /// Adds a reducer that receives only the subtree under `key`.
    pub fn key(mut self, key: impl Into<String>, reducer: impl Reducer<S>) -> Self
    where
        S: Subtree,
    {
        self.keyed.push((key.into(), Box::new(reducer)));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keyed.iter().map(|(k, _)| k.as_str())
    }
}

impl<S: Subtree + 'static> Reducer<S> for CombinedReducer<S> {
    fn reduce(&self, state: S, action: &Action) -> S {
        let mut next = self
            .top
            .iter()
            .fold(state, |next, r| r.reduce(next, action));
        for (key, r) in &self.keyed {
            let sub = next.take_subtree(key);
            let sub = r.reduce(sub, action);
            next.put_subtree(key, sub);
        }
        next
    }
}
