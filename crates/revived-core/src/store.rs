//! # The store
//!
//! [`Store`] is the one place the application state lives. It
//!
//! - holds the state, readable through [`Store::get_state`] / [`Store::read_state`];
//! - updates it only through [`Store::dispatch`], which runs the root reducer;
//! - registers listeners through [`Store::subscribe`] or [`Store::subscriber`]
//!   and removes them through the returned [`Unsubscribe`].
//!
//! Use a single store per application and split the data handling with
//! reducer composition instead of adding stores.
//!
//! `Store` is a cheap, cloneable handle. A subscriber that needs to read the
//! store should capture a [`WeakStore`] (from [`Store::downgrade`]): a strong
//! handle captured by a subscriber keeps the store alive through its own
//! subscriber table.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};

use crate::action::{Action, ActionType};
use crate::error::{Result, StoreError};
use crate::reducer::Reducer;
use crate::state::{Holder, StateHolder};
use crate::subscription::{Subscriber, Unsubscribe};

/// Dispatched once when a store is created. Reducers build the initial state
/// of their subtree when they see it.
pub const INIT: ActionType = ActionType::from_static("init");

pub fn init() -> Action {
    Action::new(INIT)
}

new_key_type! {
    pub struct SubscriberKey;
}

pub struct Store<S: 'static> {
    inner: Rc<StoreInner<S>>,
}

impl<S: 'static> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct StoreInner<S: 'static> {
    state: RefCell<S>,
    reducer: RefCell<Rc<dyn Reducer<S>>>,
    subscribers: RefCell<SlotMap<SubscriberKey, Rc<dyn Fn()>>>,
    version: Cell<u64>,
    reducing: Cell<bool>,
    // set when a reducer tried to dispatch during the current reduce
    refused: Cell<bool>,
}

// Clears the reducing flag even if the reducer unwinds.
struct ReducingGuard<'a>(&'a Cell<bool>);

impl<'a> ReducingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for ReducingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<S: Clone + 'static> Store<S> {
    /// Creates a store starting from `S::default()` and dispatches [`init`].
    pub fn new(reducer: impl Reducer<S>) -> Self
    where
        S: Default,
    {
        Self::with_state(reducer, S::default())
    }

    /// Creates a store starting from `state` and dispatches [`init`].
    pub fn with_state(reducer: impl Reducer<S>, state: S) -> Self {
        let reducer: Rc<dyn Reducer<S>> = Rc::new(reducer);
        let store = Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(state),
                reducer: RefCell::new(reducer),
                subscribers: RefCell::new(SlotMap::with_key()),
                version: Cell::new(0),
                reducing: Cell::new(false),
                refused: Cell::new(false),
            }),
        };
        log::debug!("store: dispatching {INIT}");
        if let Err(err) = store.dispatch(init()) {
            log::warn!("store: {INIT} failed: {err}");
        }
        store
    }

    pub fn from_holder<H>() -> Self
    where
        H: StateHolder<State = S>,
    {
        Self::with_state(Holder::<H>::new(), H::initial_state())
    }

    pub fn get_state(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Dispatches an action: runs the root reducer, stores the result and
    /// calls every subscriber registered at that moment, in no particular
    /// order.
    ///
    /// Fails with [`StoreError::DispatchInReducer`] when called from inside a
    /// reducer. The outer dispatch that was running that reducer then fails
    /// too and its result is discarded.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        let inner = &self.inner;
        if inner.reducing.get() {
            log::warn!(
                "store: refusing to dispatch '{}' from inside a reducer",
                action.action_type()
            );
            inner.refused.set(true);
            return Err(StoreError::DispatchInReducer);
        }
        log::trace!("store: dispatch '{}'", action.action_type());

        let reducer = inner.reducer.borrow().clone();
        let prev = self.get_state();
        inner.refused.set(false);
        let next = {
            let _guard = ReducingGuard::enter(&inner.reducing);
            reducer.reduce(prev, &action)
        };
        if inner.refused.replace(false) {
            return Err(StoreError::DispatchInReducer);
        }

        *inner.state.borrow_mut() = next;
        inner.version.set(inner.version.get().wrapping_add(1));
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        // snapshot: subscribers may (un)subscribe or dispatch while we iterate
        let subscribers: Vec<Rc<dyn Fn()>> =
            self.inner.subscribers.borrow().values().cloned().collect();
        for callback in subscribers {
            callback();
        }
    }
}

impl<S: 'static> Store<S> {
    /// Reads the state without cloning it. `f` must not dispatch.
    pub fn read_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.inner.state.borrow();
        f(&*state)
    }

    /// Number of state updates applied so far, [`init`] included.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn is_reducing(&self) -> bool {
        self.inner.reducing.get()
    }

    /// True while a reduce is running whose result the store will discard,
    /// because a reducer tried to [`dispatch`](Store::dispatch) during it.
    pub fn dispatch_refused(&self) -> bool {
        self.inner.refused.get()
    }

    /// Subscribes `callback` to state changes. It is called with no arguments
    /// after every dispatch.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Unsubscribe {
        self.subscribe_rc(Rc::new(callback))
    }

    /// Like [`Store::subscribe`], but keeps the callback and its
    /// [`Unsubscribe`] together.
    pub fn subscriber(&self, callback: impl Fn() + 'static) -> Subscriber {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        let unsubscribe = self.subscribe_rc(callback.clone());
        Subscriber::new(callback, unsubscribe)
    }

    fn subscribe_rc(&self, callback: Rc<dyn Fn()>) -> Unsubscribe {
        let key = self.inner.subscribers.borrow_mut().insert(callback);
        let weak: Weak<StoreInner<S>> = Rc::downgrade(&self.inner);
        Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().remove(key);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Swaps the root reducer. Nothing is dispatched.
    pub fn replace_reducer(&self, reducer: impl Reducer<S>) -> Result<()> {
        if self.inner.reducing.get() {
            return Err(StoreError::ReplaceInReducer);
        }
        log::debug!("store: replacing root reducer");
        let reducer: Rc<dyn Reducer<S>> = Rc::new(reducer);
        *self.inner.reducer.borrow_mut() = reducer;
        Ok(())
    }

    pub fn downgrade(&self) -> WeakStore<S> {
        WeakStore(Rc::downgrade(&self.inner))
    }
}

/// Non‑owning handle to a [`Store`].
pub struct WeakStore<S: 'static>(Weak<StoreInner<S>>);

impl<S: 'static> Clone for WeakStore<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S: 'static> WeakStore<S> {
    pub fn upgrade(&self) -> Option<Store<S>> {
        self.0.upgrade().map(|inner| Store { inner })
    }
}
