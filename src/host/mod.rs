//! Host environment abstraction.
//!
//! Every page effect talks to the document through these traits instead of
//! `web_sys` directly:
//! - [`Dom`] covers element queries, geometry reads and style/class writes
//! - [`EventSource`] registers typed event handlers
//! - [`Scheduler`] hands out reusable one-shot timers
//!
//! [`WebHost`] implements them over the real browser DOM (wasm32 only) and
//! [`HeadlessPage`] over an in-memory document used by tests and benches.

mod event;
mod headless;
pub mod selector;
#[cfg(target_arch = "wasm32")]
mod web;

pub use event::{Event, EventKind, Target};
pub use headless::{ElementBuilder, HeadlessPage, NodeId, ScrollRequest};
#[cfg(target_arch = "wasm32")]
pub use web::WebHost;

use crate::error::Result;
use crate::geometry::{Rect, ViewportSize};

/// Animation mode for programmatic scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Read and write access to the live document.
pub trait Dom {
    /// Handle to one element. Cheap to clone.
    type Element: Clone + 'static;

    /// All elements matching `selector`, in document order.
    ///
    /// A malformed selector matches nothing.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    /// Bounding box relative to the viewport.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;
    /// Distance from the top of the document.
    fn offset_top(&self, element: &Self::Element) -> f64;
    fn offset_height(&self, element: &Self::Element) -> f64;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<()>;

    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    /// Inline style value, `None` when unset.
    fn style(&self, element: &Self::Element, property: &str) -> Option<String>;

    fn set_text(&self, element: &Self::Element, text: &str);
    fn create_element(&self, tag: &str) -> Result<Self::Element>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<()>;
    /// Insert `child` before the current first child of `parent`.
    fn prepend_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<()>;
    /// Add a `<style>` block to the document head.
    fn inject_css(&self, css: &str) -> Result<()>;

    /// Activate an element as if it was clicked.
    fn click(&self, element: &Self::Element);
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    fn scroll_y(&self) -> f64;
    fn viewport(&self) -> ViewportSize;
    fn hostname(&self) -> String;
    /// True while the document is still being parsed.
    fn is_loading(&self) -> bool;
    /// High-resolution time since navigation start.
    fn now_ms(&self) -> f64;
}

/// Handler invoked for each dispatched event.
pub type Handler = Box<dyn FnMut(&Event)>;

/// Observer registration for DOM events.
///
/// Handlers for the same target and kind run in registration order and live
/// for the rest of the page; there is no unsubscribe.
pub trait EventSource: Dom {
    fn listen(&self, target: Target<'_, Self::Element>, kind: EventKind, handler: Handler);
}

/// One reusable timer slot bound to a fixed callback.
///
/// At most one run is pending at a time; arming again replaces it.
pub trait Timer {
    fn arm(&self, delay_ms: u32);
    fn cancel(&self);
    fn is_pending(&self) -> bool;
}

/// Source of timers.
pub trait Scheduler {
    fn timer(&self, callback: Box<dyn FnMut()>) -> Box<dyn Timer>;
}

/// Everything a page effect needs from its environment.
pub trait Host: EventSource + Scheduler {}

impl<T: EventSource + Scheduler> Host for T {}

/// Host names on which performance logging is enabled.
pub const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];

/// True for the loopback host names used during local development.
pub fn is_loopback(hostname: &str) -> bool {
    LOOPBACK_HOSTS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(hostname))
}
