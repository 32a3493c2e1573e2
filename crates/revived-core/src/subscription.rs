use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Removes a subscription when run.
///
/// Cloning shares the same underlying removal; it is not tied to `Drop`, so a
/// dropped handle leaves the subscription in place.
#[derive(Clone)]
pub struct Unsubscribe(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Unsubscribe {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_done(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("done", &self.is_done())
            .finish()
    }
}

/// A subscribed callback bundled with the handle that unsubscribes it.
#[derive(Clone)]
pub struct Subscriber {
    callback: Rc<dyn Fn()>,
    unsubscribe: Unsubscribe,
}

impl Subscriber {
    pub(crate) fn new(callback: Rc<dyn Fn()>, unsubscribe: Unsubscribe) -> Self {
        Self {
            callback,
            unsubscribe,
        }
    }

    /// Calls the wrapped callback directly, outside of any dispatch.
    pub fn call(&self) {
        (self.callback)()
    }

    pub fn unsubscribe(&self) -> &Unsubscribe {
        &self.unsubscribe
    }
}
