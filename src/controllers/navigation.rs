//! Header scroll state and offset-aware in-page anchor scrolling.

use std::cell::Cell;
use std::rc::Rc;

use super::anchor_id;
use crate::config::FxConfig;
use crate::debounce::Debounced;
use crate::error::Result;
use crate::host::{EventKind, Host, ScrollBehavior, Target};

/// Visual state of the site header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderState {
    #[default]
    Unscrolled,
    Scrolled,
}

impl HeaderState {
    /// State for a scroll offset; the threshold itself is still unscrolled.
    pub fn for_offset(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            Self::Scrolled
        } else {
            Self::Unscrolled
        }
    }
}

/// Handle for the installed navigation controller.
pub struct Navigation {
    header_state: Rc<Cell<HeaderState>>,
    intercepted_links: usize,
}

impl Navigation {
    /// Watch scrolling for the header state and take over in-page link clicks.
    ///
    /// # Errors
    /// Never fails today; kept fallible like the other controllers.
    pub fn install<H: Host + 'static>(host: &Rc<H>, config: &FxConfig) -> Result<Self> {
        let header_state = Rc::new(Cell::new(HeaderState::Unscrolled));
        let header = host.query(&config.selectors.header);

        if let Some(header) = header.clone() {
            let weak = Rc::downgrade(host);
            let state = Rc::clone(&header_state);
            let class = config.classes.header_scrolled.clone();
            let threshold = config.thresholds.nav_scrolled;
            let update = Debounced::new(
                host.as_ref(),
                config.timings.nav_scroll_debounce_ms,
                move |()| {
                    let Some(host) = weak.upgrade() else {
                        return;
                    };
                    let next = HeaderState::for_offset(host.scroll_y(), threshold);
                    match next {
                        HeaderState::Scrolled => host.add_class(&header, &class),
                        HeaderState::Unscrolled => host.remove_class(&header, &class),
                    }
                    state.set(next);
                },
            );
            host.listen(
                Target::Window,
                EventKind::Scroll,
                Box::new(move |_| update.call(())),
            );
        } else {
            log::debug!("no header matches {:?}", config.selectors.header);
        }

        let links = host.query_all(&config.selectors.anchor_links);
        for link in &links {
            let weak = Rc::downgrade(host);
            let header = header.clone();
            let link_for_handler = link.clone();
            host.listen(
                Target::Element(link),
                EventKind::Click,
                Box::new(move |event| {
                    event.prevent_default();
                    let Some(host) = weak.upgrade() else {
                        return;
                    };
                    let href = host
                        .attribute(&link_for_handler, "href")
                        .unwrap_or_default();
                    let Some(target) = anchor_id(&href).and_then(|id| host.element_by_id(id))
                    else {
                        log::debug!("anchor {href:?} has no target; ignoring click");
                        return;
                    };
                    let header_height = header
                        .as_ref()
                        .map_or(0.0, |h| host.offset_height(h));
                    let top = host.offset_top(&target) - header_height;
                    host.scroll_to(top, ScrollBehavior::Smooth);
                }),
            );
        }

        Ok(Self {
            header_state,
            intercepted_links: links.len(),
        })
    }

    pub fn header_state(&self) -> HeaderState {
        self.header_state.get()
    }

    /// Number of in-page links whose clicks are intercepted.
    pub fn intercepted_links(&self) -> usize {
        self.intercepted_links
    }
}
