//! Browser host backed by `web_sys`.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, Window};

use super::event::{Event, EventKind, Target};
use super::{Dom, EventSource, Handler, ScrollBehavior, Scheduler, Timer};
use crate::error::{PortfolioFxError, Result};
use crate::geometry::{Rect, ViewportSize};

fn dom_err(context: &str, err: &JsValue) -> PortfolioFxError {
    PortfolioFxError::Dom(format!("{context}: {err:?}"))
}

/// The live browser window and document.
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// # Errors
    /// Returns [`PortfolioFxError::NoDocument`] outside a browser window.
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(PortfolioFxError::NoDocument)?;
        let document = window.document().ok_or(PortfolioFxError::NoDocument)?;
        Ok(Self { window, document })
    }

    fn event_from_web(kind: EventKind, event: &web_sys::Event) -> Event {
        let mut ours = Event::new(kind);
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            ours = ours.with_pointer(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        }
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            ours = ours.with_key(key.key());
        }
        ours
    }
}

impl Dom for WebHost {
    type Element = HtmlElement;

    fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("querySelectorAll({selector:?}) failed: {e:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }

    fn bounding_rect(&self, element: &HtmlElement) -> Rect {
        let r = element.get_bounding_client_rect();
        Rect::new(r.top(), r.left(), r.width(), r.height())
    }

    fn offset_top(&self, element: &HtmlElement) -> f64 {
        f64::from(element.offset_top())
    }

    fn offset_height(&self, element: &HtmlElement) -> f64 {
        f64::from(element.offset_height())
    }

    fn attribute(&self, element: &HtmlElement, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &HtmlElement, name: &str, value: &str) -> Result<()> {
        element
            .set_attribute(name, value)
            .map_err(|e| dom_err("setAttribute", &e))
    }

    fn add_class(&self, element: &HtmlElement, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &HtmlElement, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn has_class(&self, element: &HtmlElement, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_style(&self, element: &HtmlElement, property: &str, value: &str) {
        let _ = element.style().set_property(property, value);
    }

    fn style(&self, element: &HtmlElement, property: &str) -> Option<String> {
        element
            .style()
            .get_property_value(property)
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn set_text(&self, element: &HtmlElement, text: &str) {
        element.set_text_content(Some(text));
    }

    fn create_element(&self, tag: &str) -> Result<HtmlElement> {
        self.document
            .create_element(tag)
            .map_err(|e| dom_err("createElement", &e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PortfolioFxError::Dom(format!("<{tag}> is not an HTML element")))
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| dom_err("appendChild", &e))
    }

    fn prepend_child(&self, parent: &HtmlElement, child: &HtmlElement) -> Result<()> {
        let first = parent.first_child();
        parent
            .insert_before(child, first.as_ref())
            .map(|_| ())
            .map_err(|e| dom_err("insertBefore", &e))
    }

    fn inject_css(&self, css: &str) -> Result<()> {
        let head = self.document.head().ok_or(PortfolioFxError::NoDocument)?;
        let style = self
            .document
            .create_element("style")
            .map_err(|e| dom_err("createElement", &e))?;
        style.set_text_content(Some(css));
        head.append_child(&style)
            .map(|_| ())
            .map_err(|e| dom_err("appendChild", &e))
    }

    fn click(&self, element: &HtmlElement) {
        element.click();
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport(&self) -> ViewportSize {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        ViewportSize::new(width, height)
    }

    fn hostname(&self) -> String {
        self.window.location().hostname().unwrap_or_default()
    }

    fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn now_ms(&self) -> f64 {
        match self.window.performance() {
            Some(perf) => perf.now(),
            None => js_sys::Date::now(),
        }
    }
}

impl EventSource for WebHost {
    fn listen(&self, target: Target<'_, HtmlElement>, kind: EventKind, mut handler: Handler) {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let ours = Self::event_from_web(kind, &event);
            handler(&ours);
            if ours.default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let callback = closure.as_ref().unchecked_ref();
        let added = match target {
            Target::Window => self
                .window
                .add_event_listener_with_callback(kind.as_str(), callback),
            Target::Document => self
                .document
                .add_event_listener_with_callback(kind.as_str(), callback),
            Target::Element(el) => el.add_event_listener_with_callback(kind.as_str(), callback),
        };
        if let Err(e) = added {
            log::warn!("addEventListener({}) failed: {e:?}", kind.as_str());
            return;
        }
        // Listeners live as long as the page.
        closure.forget();
    }
}

/// `setTimeout` slot reusing one JS closure across re-arms.
struct WebTimer {
    window: Window,
    closure: Closure<dyn FnMut()>,
    handle: Rc<Cell<Option<i32>>>,
}

impl Timer for WebTimer {
    fn arm(&self, delay_ms: u32) {
        self.cancel();
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.closure.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(id) => self.handle.set(Some(id)),
            Err(e) => {
                log::warn!("setTimeout failed: {e:?}");
                self.handle.set(None);
            }
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }

    fn is_pending(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl Drop for WebTimer {
    fn drop(&mut self) {
        // The JS side must never call into a dropped closure.
        self.cancel();
    }
}

impl Scheduler for WebHost {
    fn timer(&self, mut callback: Box<dyn FnMut()>) -> Box<dyn Timer> {
        let handle = Rc::new(Cell::new(None));
        let fired = Rc::clone(&handle);
        let closure = Closure::wrap(Box::new(move || {
            fired.set(None);
            callback();
        }) as Box<dyn FnMut()>);
        Box::new(WebTimer {
            window: self.window.clone(),
            closure,
            handle,
        })
    }
}
