//! Page timing logged to the console during local development.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::host::{EventKind, Host, Target};

/// Milestones measured from navigation start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PageTiming {
    /// When the page effects were installed.
    pub dom_ready_ms: Option<f64>,
    /// When the window `load` event fired.
    pub load_ms: Option<f64>,
}

impl PageTiming {
    /// Time between effects being installed and the page finishing loading.
    pub fn ready_to_load_ms(&self) -> Option<f64> {
        Some(self.load_ms? - self.dom_ready_ms?)
    }
}

/// Handle for the performance logger.
pub struct PerfLog {
    timing: Rc<RefCell<PageTiming>>,
}

impl PerfLog {
    /// Log a [`PageTiming`] record when the window finishes loading.
    pub fn install<H: Host + 'static>(host: &Rc<H>) -> Self {
        let timing = Rc::new(RefCell::new(PageTiming::default()));
        let weak = Rc::downgrade(host);
        let record = Rc::clone(&timing);
        host.listen(
            Target::Window,
            EventKind::Load,
            Box::new(move |_| {
                let Some(host) = weak.upgrade() else {
                    return;
                };
                let snapshot = {
                    let mut t = record.borrow_mut();
                    t.load_ms = Some(host.now_ms());
                    *t
                };
                match serde_json::to_string(&snapshot) {
                    Ok(json) => log::info!("page timing {json}"),
                    Err(e) => log::warn!("page timing serialization error: {e}"),
                }
            }),
        );
        log::debug!("performance logging enabled");
        Self { timing }
    }

    pub fn mark_dom_ready(&self, now_ms: f64) {
        self.timing.borrow_mut().dom_ready_ms = Some(now_ms);
    }

    pub fn timing(&self) -> PageTiming {
        *self.timing.borrow()
    }
}
