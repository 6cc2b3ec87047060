//! Event model shared by all hosts.

use std::cell::Cell;

/// DOM event types the page effects subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Click,
    MouseEnter,
    MouseLeave,
    MouseMove,
    KeyDown,
    DomContentLoaded,
    Load,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Click => "click",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::MouseMove => "mousemove",
            Self::KeyDown => "keydown",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::Load => "load",
        }
    }
}

/// Where a handler is attached.
#[derive(Debug)]
pub enum Target<'a, E> {
    Window,
    Document,
    Element(&'a E),
}

/// Snapshot of the event context handed to handlers.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    client_x: f64,
    client_y: f64,
    key: Option<String>,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            client_x: 0.0,
            client_y: 0.0,
            key: None,
            default_prevented: Cell::new(false),
        }
    }

    /// Attach pointer coordinates (viewport space).
    #[must_use]
    pub fn with_pointer(mut self, client_x: f64, client_y: f64) -> Self {
        self.client_x = client_x;
        self.client_y = client_y;
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn client_x(&self) -> f64 {
        self.client_x
    }

    pub fn client_y(&self) -> f64 {
        self.client_y
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Suppress the browser's default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
