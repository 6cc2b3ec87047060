//! Blinking text cursor appended to the code display after a delay.

use std::rc::Rc;

use crate::config::FxConfig;
use crate::error::Result;
use crate::host::{Host, Timer};

/// Keyframes driving the cursor blink: visible for the first half of each
/// one-second cycle, hidden for the second.
pub const BLINK_KEYFRAMES: &str =
    "@keyframes blink { 0%, 50% { opacity: 1; } 51%, 100% { opacity: 0; } }";

pub const CURSOR_GLYPH: &str = "|";

/// Handle for the one-shot cursor effect.
pub struct TypingCursor {
    timer: Option<Box<dyn Timer>>,
}

impl TypingCursor {
    /// Schedule the cursor injection, or do nothing if the page has no code
    /// display element.
    ///
    /// # Errors
    /// Never fails at install time; injection failures are logged when the
    /// timer fires.
    pub fn install<H: Host + 'static>(host: &Rc<H>, config: &FxConfig) -> Result<Self> {
        let Some(code) = host.query(&config.selectors.code_display) else {
            log::debug!(
                "no code display matches {:?}; cursor skipped",
                config.selectors.code_display
            );
            return Ok(Self { timer: None });
        };

        let weak = Rc::downgrade(host);
        let class = config.classes.typing_cursor.clone();
        let mut done = false;
        let timer = host.timer(Box::new(move || {
            if done {
                return;
            }
            done = true;
            let Some(host) = weak.upgrade() else {
                return;
            };
            if let Err(e) = inject_cursor(host.as_ref(), &code, &class) {
                log::warn!("typing cursor: {e}");
            }
        }));
        timer.arm(config.timings.cursor_inject_delay_ms);

        Ok(Self { timer: Some(timer) })
    }

    /// True until the cursor has been injected.
    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| t.is_pending())
    }

    /// False when the page had no code display to decorate.
    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }
}

fn inject_cursor<H: Host + ?Sized>(host: &H, code: &H::Element, class: &str) -> Result<()> {
    let cursor = host.create_element("span")?;
    host.add_class(&cursor, class);
    host.set_text(&cursor, CURSOR_GLYPH);
    host.set_style(&cursor, "animation", "blink 1s infinite");
    host.append_child(code, &cursor)?;
    host.inject_css(BLINK_KEYFRAMES)
}
