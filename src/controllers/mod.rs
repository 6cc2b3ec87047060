//! Page effects, one module per behavior.
//!
//! Each controller is installed once against a [`Host`](crate::host::Host)
//! and returns a small handle owning its state. Event handlers hold the host
//! weakly so dropping the host tears nothing down twice.

pub mod accessibility;
pub mod active_section;
pub mod cards;
pub mod navigation;
pub mod perf;
pub mod reveal;
pub mod scroll_top;
pub mod typing_cursor;

pub use accessibility::Accessibility;
pub use active_section::ActiveSection;
pub use cards::CardTilt;
pub use navigation::{HeaderState, Navigation};
pub use perf::{PageTiming, PerfLog};
pub use reveal::RevealOnScroll;
pub use scroll_top::ScrollTopButton;
pub use typing_cursor::TypingCursor;

/// Id referenced by an in-page link (`"#about"` -> `"about"`).
///
/// `None` for external links and for a bare `"#"`.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
