//! Trailing-edge debounce over a host [`Scheduler`].
//!
//! Each [`Debounced`] owns exactly one timer. Every [`Debounced::call`]
//! replaces the pending arguments and restarts the timer, so a burst of calls
//! collapses into one run `wait_ms` after the last call, with that call's
//! arguments.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{Scheduler, Timer};

/// A debounced wrapper around `FnMut(A)`.
pub struct Debounced<A> {
    timer: Box<dyn Timer>,
    pending: Rc<RefCell<Option<A>>>,
    fire: Rc<dyn Fn()>,
    wait_ms: u32,
}

impl<A: 'static> Debounced<A> {
    pub fn new<S, F>(scheduler: &S, wait_ms: u32, callback: F) -> Self
    where
        S: Scheduler + ?Sized,
        F: FnMut(A) + 'static,
    {
        let pending: Rc<RefCell<Option<A>>> = Rc::new(RefCell::new(None));
        let callback = RefCell::new(callback);
        let slot = Rc::clone(&pending);
        let fire: Rc<dyn Fn()> = Rc::new(move || {
            let args = slot.borrow_mut().take();
            if let Some(args) = args {
                if let Ok(mut f) = callback.try_borrow_mut() {
                    (*f)(args);
                }
            }
        });
        let on_timeout = Rc::clone(&fire);
        let timer = scheduler.timer(Box::new(move || on_timeout()));
        Self {
            timer,
            pending,
            fire,
            wait_ms,
        }
    }

    /// Schedule a run with `args`, cancelling any pending run.
    pub fn call(&self, args: A) {
        *self.pending.borrow_mut() = Some(args);
        self.timer.arm(self.wait_ms);
    }

    /// Drop the pending run, if any.
    pub fn cancel(&self) {
        self.timer.cancel();
        self.pending.borrow_mut().take();
    }

    /// Run the pending call now instead of waiting.
    pub fn flush(&self) {
        self.timer.cancel();
        (self.fire)();
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }
}
