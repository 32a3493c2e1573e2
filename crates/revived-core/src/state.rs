use std::marker::PhantomData;

use crate::action::Action;
use crate::reducer::Reducer;

// State holder pattern
pub trait StateHolder: 'static {
    type State: Clone;

    fn initial_state() -> Self::State;
    fn reduce(state: Self::State, action: &Action) -> Self::State;
}

/// Adapts a [`StateHolder`] to [`Reducer`].
pub struct Holder<H>(PhantomData<fn() -> H>);

impl<H> Holder<H> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<H> Default for Holder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: StateHolder> Reducer<H::State> for Holder<H> {
    fn reduce(&self, state: H::State, action: &Action) -> H::State {
        H::reduce(state, action)
    }
}
