//! Dispatch inspector for Revived stores.
//!
//! Wrap the root reducer with [`Inspector::new`] before handing it to the
//! store; the returned [`InspectorHandle`] exposes the action log and timing
//! metrics:
//!
//! ```rust
//! use revived_core::*;
//! use revived_devtools::Inspector;
//! use serde_json::{Value, json};
//!
//! let (root, inspector) = Inspector::new(|_: Value, a: &Action| json!(a.action_type().as_str()));
//! let store = Store::new(root);
//! store.dispatch(Action::new("ping")).unwrap();
//!
//! assert_eq!(inspector.metrics().dispatched, 2); // init + ping
//! assert_eq!(inspector.records().last().unwrap().action_type, "ping");
//! ```
//!
//! Call [`InspectorHandle::attach`] once the store exists so that reduces the
//! store throws away are told apart from committed ones.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use revived_core::{Action, Reducer, Store};
use serde::Serialize;
use web_time::{Duration, Instant};

pub const DEFAULT_CAPACITY: usize = 256;

pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that moves forward by `step` every time it is read.
pub struct StepClock {
    t: Cell<Instant>,
    step: Duration,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            t: Cell::new(Instant::now()),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Instant {
        let t = self.t.get();
        self.t.set(t + self.step);
        t
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionRecord {
    pub seq: u64,
    pub action_type: String,
    pub reduce_ms: f32,
    pub changed: bool,
    /// The store threw this result away; see [`InspectorHandle::attach`].
    pub discarded: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Metrics {
    pub dispatched: u64,
    pub reduce_ms_smooth: f32,
    pub last_action: Option<String>,
}

struct Log {
    enabled: bool,
    capacity: usize,
    next_seq: u64,
    records: VecDeque<ActionRecord>,
    metrics: Metrics,
    refused: Option<Box<dyn Fn() -> bool>>,
}

impl Log {
    fn push(&mut self, action_type: String, reduce_ms: f32, changed: bool, discarded: bool) {
        let seq = self.next_seq;
        self.next_seq += 1;

        if discarded {
            log::debug!("inspector: '{action_type}' was discarded by the store");
            self.record(ActionRecord {
                seq,
                action_type,
                reduce_ms,
                changed: false,
                discarded: true,
            });
            return;
        }

        let m = &mut self.metrics;
        m.dispatched += 1;
        // simple EMA
        let a = 0.2;
        m.reduce_ms_smooth = if m.dispatched == 1 {
            reduce_ms
        } else {
            (1.0 - a) * m.reduce_ms_smooth + a * reduce_ms
        };
        m.last_action = Some(action_type.clone());

        self.record(ActionRecord {
            seq,
            action_type,
            reduce_ms,
            changed,
            discarded: false,
        });
    }

    fn record(&mut self, record: ActionRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    fn refused(&self) -> bool {
        self.refused.as_ref().is_some_and(|refused| refused())
    }
}

/// Read side of an [`Inspector`]. Cheap to clone.
#[derive(Clone)]
pub struct InspectorHandle {
    log: Rc<RefCell<Log>>,
}

impl InspectorHandle {
    pub fn is_enabled(&self) -> bool {
        self.log.borrow().enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.log.borrow_mut().enabled = enabled;
    }

    pub fn toggle(&self) {
        let mut log = self.log.borrow_mut();
        log.enabled = !log.enabled;
    }

    pub fn clear(&self) {
        let mut log = self.log.borrow_mut();
        log.records.clear();
        log.metrics = Metrics::default();
        log.next_seq = 0;
    }

    /// Links the log to the store that owns the inspected reducer, so reduces
    /// the store discards are marked as such instead of counted.
    pub fn attach<S: 'static>(&self, store: &Store<S>) {
        let store = store.downgrade();
        self.log.borrow_mut().refused = Some(Box::new(move || {
            store.upgrade().is_some_and(|s| s.dispatch_refused())
        }));
    }

    pub fn records(&self) -> Vec<ActionRecord> {
        self.log.borrow().records.iter().cloned().collect()
    }

    pub fn metrics(&self) -> Metrics {
        self.log.borrow().metrics.clone()
    }

    pub fn summary(&self) -> String {
        let log = self.log.borrow();
        let m = &log.metrics;
        let mut lines = vec![
            format!("actions: {}", m.dispatched),
            format!("reduce: {:.2} ms", m.reduce_ms_smooth),
        ];
        if let Some(last) = &m.last_action {
            lines.push(format!("last: {last}"));
        }
        lines.join("  |  ")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let log = self.log.borrow();
        serde_json::to_string_pretty(&log.records)
    }
}

/// Reducer wrapper that records every action it reduces.
pub struct Inspector<R> {
    reducer: R,
    clock: Box<dyn Clock>,
    log: Rc<RefCell<Log>>,
}

impl<R> Inspector<R> {
    pub fn new(reducer: R) -> (Self, InspectorHandle) {
        Self::with_capacity(reducer, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(reducer: R, capacity: usize) -> (Self, InspectorHandle) {
        Self::with_clock(reducer, capacity, Box::new(SystemClock))
    }

    pub fn with_clock(
        reducer: R,
        capacity: usize,
        clock: Box<dyn Clock>,
    ) -> (Self, InspectorHandle) {
        let log = Rc::new(RefCell::new(Log {
            enabled: true,
            capacity,
            next_seq: 0,
            records: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            metrics: Metrics::default(),
            refused: None,
        }));
        let handle = InspectorHandle { log: log.clone() };
        (
            Self {
                reducer,
                clock,
                log,
            },
            handle,
        )
    }
}

impl<S, R> Reducer<S> for Inspector<R>
where
    S: Clone + PartialEq + 'static,
    R: Reducer<S>,
{
    fn reduce(&self, state: S, action: &Action) -> S {
        if !self.log.borrow().enabled {
            return self.reducer.reduce(state, action);
        }
        let prev = state.clone();
        let start = self.clock.now();
        let next = self.reducer.reduce(state, action);
        let elapsed = self.clock.now().saturating_duration_since(start);
        let reduce_ms = elapsed.as_micros() as f32 / 1000.0;
        log::trace!(
            "inspector: '{}' reduced in {reduce_ms:.3} ms",
            action.action_type()
        );
        let discarded = self.log.borrow().refused();
        self.log.borrow_mut().push(
            action.action_type().to_string(),
            reduce_ms,
            next != prev,
            discarded,
        );
        next
    }
}

#[cfg(test)]
mod tests;
