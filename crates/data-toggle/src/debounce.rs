//! Trailing-edge debouncing
//!
//! A burst of calls collapses into one invocation of the wrapped callback,
//! `delay_ms` after the last call of the burst, with that call's argument.
//! Every call cancels the pending timer and schedules a fresh one.

use std::cell::Cell;
use std::rc::Rc;
use toggle_dom::{Document, TimerId};

/// Something that can run a task later
pub trait Scheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) -> TimerId;
    fn cancel(&self, id: TimerId);
}

impl Scheduler for Document {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) -> TimerId {
        self.set_timeout(delay_ms, task)
    }

    fn cancel(&self, id: TimerId) {
        self.clear_timeout(id);
    }
}

/// Debouncing adapter around a callback
pub struct Debouncer<S, A> {
    state: Rc<DebounceState<S, A>>,
}

struct DebounceState<S, A> {
    scheduler: S,
    delay_ms: u64,
    pending: Cell<Option<TimerId>>,
    callback: Box<dyn Fn(A)>,
}

impl<S: Scheduler + 'static, A: 'static> Debouncer<S, A> {
    pub fn new(scheduler: S, delay_ms: u64, callback: impl Fn(A) + 'static) -> Self {
        Self {
            state: Rc::new(DebounceState {
                scheduler,
                delay_ms,
                pending: Cell::new(None),
                callback: Box::new(callback),
            }),
        }
    }

    /// Restart the quiet period; `arg` replaces any earlier pending argument
    pub fn call(&self, arg: A) {
        if let Some(previous) = self.state.pending.take() {
            self.state.scheduler.cancel(previous);
        }

        let state = Rc::clone(&self.state);
        let id = self.state.scheduler.schedule(
            self.state.delay_ms,
            Box::new(move || {
                state.pending.set(None);
                (state.callback)(arg);
            }),
        );
        self.state.pending.set(Some(id));
    }

    /// Whether a trailing invocation is scheduled
    pub fn is_pending(&self) -> bool {
        self.state.pending.get().is_some()
    }

    pub fn delay_ms(&self) -> u64 {
        self.state.delay_ms
    }
}

impl<S, A> Clone for Debouncer<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}
