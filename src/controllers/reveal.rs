//! Reveal-on-scroll: elements gain the active class once they enter the
//! viewport band and keep it for the rest of the page's life.

use std::rc::Rc;

use crate::config::FxConfig;
use crate::debounce::Debounced;
use crate::error::Result;
use crate::geometry::is_partially_in_viewport;
use crate::host::{Dom, EventKind, Host, Target};

/// Handle for the installed reveal controller.
pub struct RevealOnScroll {
    tagged: usize,
}

impl RevealOnScroll {
    /// Tag every member of the configured groups as revealable, reveal what is
    /// already in view, then re-check on debounced scroll.
    ///
    /// # Errors
    /// Never fails today; kept fallible like the other controllers.
    pub fn install<H: Host + 'static>(host: &Rc<H>, config: &FxConfig) -> Result<Self> {
        let revealable = &config.classes.revealable;
        let mut tagged = 0;
        for group in &config.selectors.reveal_groups {
            for el in host.query_all(group) {
                host.add_class(&el, revealable);
                tagged += 1;
            }
        }

        let selector = format!(".{revealable}");
        let active = config.classes.active.clone();
        let offset = config.thresholds.reveal_offset;

        reveal_visible(host.as_ref(), &selector, &active, offset);

        let weak = Rc::downgrade(host);
        let tick = Debounced::new(
            host.as_ref(),
            config.timings.reveal_scroll_debounce_ms,
            move |()| {
                if let Some(host) = weak.upgrade() {
                    reveal_visible(host.as_ref(), &selector, &active, offset);
                }
            },
        );
        host.listen(
            Target::Window,
            EventKind::Scroll,
            Box::new(move |_| tick.call(())),
        );

        Ok(Self { tagged })
    }

    /// Number of elements tagged revealable at install time.
    pub fn tagged(&self) -> usize {
        self.tagged
    }
}

/// Add `active_class` to every element matching `selector` that is partially
/// in view. Returns how many elements were newly revealed.
///
/// Elements out of view are left untouched: the marker is never removed.
pub fn reveal_visible<D: Dom + ?Sized>(
    dom: &D,
    selector: &str,
    active_class: &str,
    offset: f64,
) -> usize {
    let viewport = dom.viewport();
    let mut newly = 0;
    for el in dom.query_all(selector) {
        if dom.has_class(&el, active_class) {
            continue;
        }
        if is_partially_in_viewport(&dom.bounding_rect(&el), viewport, offset) {
            dom.add_class(&el, active_class);
            newly += 1;
        }
    }
    if newly > 0 {
        log::debug!("revealed {newly} element(s)");
    }
    newly
}
