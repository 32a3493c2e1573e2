use std::cell::RefCell;

use crate::store::Store;

/// A memoized read of the store state.
///
/// The cached value is tagged with the store version it was computed at and
/// recomputed lazily on the first `get` after a dispatch, so it is never
/// stale, even when read from another subscriber.
pub struct Selector<S: 'static, T> {
    store: Store<S>,
    select: Box<dyn Fn(&S) -> T>,
    cached: RefCell<Option<(u64, T)>>,
}

impl<S: Clone + 'static> Store<S> {
    pub fn select<T, F>(&self, f: F) -> Selector<S, T>
    where
        T: Clone,
        F: Fn(&S) -> T + 'static,
    {
        Selector {
            store: self.clone(),
            select: Box::new(f),
            cached: RefCell::new(None),
        }
    }
}

impl<S: 'static, T: Clone> Selector<S, T> {
    pub fn get(&self) -> T {
        let version = self.store.version();
        if let Some((at, v)) = self.cached.borrow().as_ref()
            && *at == version
        {
            return v.clone();
        }
        let v = self.store.read_state(|s| (self.select)(s));
        *self.cached.borrow_mut() = Some((version, v.clone()));
        v
    }

    pub fn invalidate(&self) {
        *self.cached.borrow_mut() = None;
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }
}
