//! Floating scroll-to-top button.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::FxConfig;
use crate::debounce::Debounced;
use crate::error::{PortfolioFxError, Result};
use crate::host::{Dom, EventKind, Host, ScrollBehavior, Target};

const BUTTON_LABEL: &str = "\u{2191}";

const BASE_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("bottom", "30px"),
    ("right", "30px"),
    ("width", "50px"),
    ("height", "50px"),
    ("border-radius", "50%"),
    ("border", "none"),
    ("background", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
    ("color", "white"),
    ("font-size", "24px"),
    ("cursor", "pointer"),
    ("z-index", "1000"),
    ("transition", "all 0.3s ease"),
    ("box-shadow", "0 4px 15px rgba(102, 126, 234, 0.4)"),
];

const HOVER_STYLE: &[(&str, &str)] = &[
    ("transform", "translateY(-5px)"),
    ("box-shadow", "0 8px 25px rgba(102, 126, 234, 0.6)"),
];

const REST_STYLE: &[(&str, &str)] = &[
    ("transform", "translateY(0)"),
    ("box-shadow", "0 4px 15px rgba(102, 126, 234, 0.4)"),
];

fn apply<D: Dom + ?Sized>(dom: &D, el: &D::Element, style: &[(&str, &str)]) {
    for (property, value) in style {
        dom.set_style(el, property, value);
    }
}

fn set_visible<D: Dom + ?Sized>(dom: &D, el: &D::Element, visible: bool) {
    if visible {
        dom.set_style(el, "opacity", "1");
        dom.set_style(el, "visibility", "visible");
    } else {
        dom.set_style(el, "opacity", "0");
        dom.set_style(el, "visibility", "hidden");
    }
}

/// Visibility rule: shown strictly past the threshold, in either direction.
pub fn should_show(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Handle for the installed scroll-to-top button.
pub struct ScrollTopButton<E> {
    button: E,
    visible: Rc<Cell<bool>>,
}

impl<E: Clone + 'static> ScrollTopButton<E> {
    /// Create the (hidden) button, append it to the body and wire it up.
    ///
    /// # Errors
    /// Fails if the page has no body or the button cannot be created.
    pub fn install<H>(host: &Rc<H>, config: &FxConfig) -> Result<Self>
    where
        H: Host<Element = E> + 'static,
    {
        let body = host
            .body()
            .ok_or_else(|| PortfolioFxError::Dom("document has no body".to_string()))?;
        let button = host.create_element("button")?;
        host.add_class(&button, &config.classes.scroll_top_button);
        host.set_attribute(&button, "aria-label", "Scroll to top")?;
        host.set_text(&button, BUTTON_LABEL);
        apply(host.as_ref(), &button, BASE_STYLE);
        set_visible(host.as_ref(), &button, false);
        host.append_child(&body, &button)?;

        let visible = Rc::new(Cell::new(false));

        let weak = Rc::downgrade(host);
        let state = Rc::clone(&visible);
        let target = button.clone();
        let threshold = config.thresholds.scroll_top_visible;
        let update = Debounced::new(
            host.as_ref(),
            config.timings.scroll_top_debounce_ms,
            move |()| {
                let Some(host) = weak.upgrade() else {
                    return;
                };
                let show = should_show(host.scroll_y(), threshold);
                set_visible(host.as_ref(), &target, show);
                state.set(show);
            },
        );
        host.listen(
            Target::Window,
            EventKind::Scroll,
            Box::new(move |_| update.call(())),
        );

        let weak = Rc::downgrade(host);
        host.listen(
            Target::Element(&button),
            EventKind::Click,
            Box::new(move |_| {
                if let Some(host) = weak.upgrade() {
                    host.scroll_to(0.0, ScrollBehavior::Smooth);
                }
            }),
        );

        for (kind, style) in [
            (EventKind::MouseEnter, HOVER_STYLE),
            (EventKind::MouseLeave, REST_STYLE),
        ] {
            let weak = Rc::downgrade(host);
            let target = button.clone();
            host.listen(
                Target::Element(&button),
                kind,
                Box::new(move |_| {
                    if let Some(host) = weak.upgrade() {
                        apply(host.as_ref(), &target, style);
                    }
                }),
            );
        }

        Ok(Self { button, visible })
    }

    pub fn button(&self) -> &E {
        &self.button
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}
