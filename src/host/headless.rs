//! In-memory document for running page effects off-browser.
//!
//! `HeadlessPage` keeps a flat node arena with explicit layout boxes, an
//! ordered listener table and a virtual clock. Nothing happens on its own:
//! tests drive it with [`HeadlessPage::user_scroll`], pointer and key helpers,
//! and [`HeadlessPage::advance`] to fire due timers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::event::{Event, EventKind, Target};
use super::selector::{self, SelectorTarget};
use super::{Dom, EventSource, Handler, ScrollBehavior, Scheduler, Timer};
use crate::error::{PortfolioFxError, Result};
use crate::geometry::{Rect, ViewportSize};

/// Handle to a node in a [`HeadlessPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A recorded programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Layout box in document coordinates.
#[derive(Debug, Clone, Copy, Default)]
struct LayoutBox {
    top: f64,
    left: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Default)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    text: String,
    layout: LayoutBox,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Borrowed view used for selector matching.
#[derive(Clone, Copy)]
struct NodeRef<'a> {
    nodes: &'a [Node],
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    fn new(nodes: &'a [Node], id: NodeId) -> Option<Self> {
        nodes.get(id.0).map(|node| Self { nodes, node })
    }
}

impl<'a> SelectorTarget for NodeRef<'a> {
    fn local_name(&self) -> &str {
        &self.node.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.node.attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.node.classes.iter().any(|c| c == class)
    }

    fn parent(&self) -> Option<Self> {
        NodeRef::new(self.nodes, self.node.parent?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKey {
    Window,
    Document,
    Node(NodeId),
}

impl TargetKey {
    fn from_target(target: &Target<'_, NodeId>) -> Self {
        match target {
            Target::Window => Self::Window,
            Target::Document => Self::Document,
            Target::Element(id) => Self::Node(**id),
        }
    }
}

struct Listener {
    target: TargetKey,
    kind: EventKind,
    handler: Rc<RefCell<Handler>>,
}

struct TimerSlot {
    callback: RefCell<Box<dyn FnMut()>>,
    armed: Cell<Option<u64>>,
}

struct Scheduled {
    seq: u64,
    due: f64,
    slot: Rc<TimerSlot>,
}

#[derive(Default)]
struct TimerQueue {
    now: f64,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    fn remove(&mut self, seq: u64) {
        self.pending.retain(|s| s.seq != seq);
    }

    /// Pop the earliest timer due at or before `limit` (ties by arm order).
    fn pop_due(&mut self, limit: f64) -> Option<Scheduled> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= limit)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))?;
        Some(self.pending.swap_remove(idx))
    }
}

struct HeadlessTimer {
    queue: Weak<RefCell<TimerQueue>>,
    slot: Rc<TimerSlot>,
}

impl Timer for HeadlessTimer {
    fn arm(&self, delay_ms: u32) {
        self.cancel();
        let Some(queue) = self.queue.upgrade() else {
            return;
        };
        let mut q = queue.borrow_mut();
        let seq = q.next_seq;
        q.next_seq += 1;
        let due = q.now + f64::from(delay_ms);
        q.pending.push(Scheduled {
            seq,
            due,
            slot: Rc::clone(&self.slot),
        });
        self.slot.armed.set(Some(seq));
    }

    fn cancel(&self) {
        if let Some(seq) = self.slot.armed.take() {
            if let Some(queue) = self.queue.upgrade() {
                queue.borrow_mut().remove(seq);
            }
        }
    }

    fn is_pending(&self) -> bool {
        self.slot.armed.get().is_some()
    }
}

impl Drop for HeadlessTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// In-memory document implementing [`Dom`], [`EventSource`] and [`Scheduler`].
pub struct HeadlessPage {
    nodes: RefCell<Vec<Node>>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    listeners: RefCell<Vec<Listener>>,
    timers: Rc<RefCell<TimerQueue>>,
    scroll_y: Cell<f64>,
    viewport: Cell<ViewportSize>,
    hostname: RefCell<String>,
    loading: Cell<bool>,
    scroll_requests: RefCell<Vec<ScrollRequest>>,
    navigations: RefCell<Vec<String>>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    /// A parsed, empty `<html><head/><body/></html>` document.
    pub fn new() -> Self {
        let mut nodes = vec![Node::new("html"), Node::new("head"), Node::new("body")];
        let root = NodeId(0);
        let head = NodeId(1);
        let body = NodeId(2);
        if let Some(html) = nodes.get_mut(0) {
            html.children = vec![head, body];
        }
        for id in [head, body] {
            if let Some(node) = nodes.get_mut(id.0) {
                node.parent = Some(root);
            }
        }
        Self {
            nodes: RefCell::new(nodes),
            root,
            head,
            body,
            listeners: RefCell::new(Vec::new()),
            timers: Rc::new(RefCell::new(TimerQueue::default())),
            scroll_y: Cell::new(0.0),
            viewport: Cell::new(ViewportSize::default()),
            hostname: RefCell::new("example.com".to_string()),
            loading: Cell::new(false),
            scroll_requests: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_viewport(self, width: f64, height: f64) -> Self {
        self.viewport.set(ViewportSize::new(width, height));
        self
    }

    #[must_use]
    pub fn with_hostname(self, hostname: &str) -> Self {
        *self.hostname.borrow_mut() = hostname.to_string();
        self
    }

    /// Start in the "still parsing" state; see [`HeadlessPage::finish_parsing`].
    #[must_use]
    pub fn loading(self) -> Self {
        self.loading.set(true);
        self
    }

    pub fn head_node(&self) -> NodeId {
        self.head
    }

    pub fn body_node(&self) -> NodeId {
        self.body
    }

    /// Append a new `tag` element under `parent`.
    pub fn append(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        let mut node = Node::new(tag);
        node.parent = Some(parent);
        nodes.push(node);
        if let Some(p) = nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    /// Start building an element under `parent`.
    pub fn element(&self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        ElementBuilder {
            page: self,
            id: self.append(parent, tag),
        }
    }

    /// Place a node at document coordinates.
    pub fn set_layout(&self, node: NodeId, top: f64, left: f64, width: f64, height: f64) {
        self.with_node_mut(node, |n| {
            n.layout = LayoutBox {
                top,
                left,
                width,
                height,
            };
        });
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.with_node(node, |n| n.tag.clone())
    }

    pub fn text(&self, node: NodeId) -> String {
        self.with_node(node, |n| n.text.clone()).unwrap_or_default()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.with_node(node, |n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.with_node(node, |n| n.classes.clone())
            .unwrap_or_default()
    }

    /// Text of every `<style>` block in the head.
    pub fn stylesheets(&self) -> Vec<String> {
        let nodes = self.nodes.borrow();
        let Some(head) = nodes.get(self.head.0) else {
            return Vec::new();
        };
        head.children
            .iter()
            .filter_map(|id| nodes.get(id.0))
            .filter(|n| n.tag == "style")
            .map(|n| n.text.clone())
            .collect()
    }

    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.scroll_requests.borrow().clone()
    }

    /// Hash navigations that ran as a default action (not prevented).
    pub fn default_navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    /// Set the scroll position as the user would and fire `scroll` on window.
    pub fn user_scroll(&self, y: f64) {
        self.scroll_y.set(y);
        self.dispatch(Target::Window, Event::new(EventKind::Scroll));
    }

    pub fn pointer_enter(&self, node: NodeId, client_x: f64, client_y: f64) -> Event {
        self.dispatch(
            Target::Element(&node),
            Event::new(EventKind::MouseEnter).with_pointer(client_x, client_y),
        )
    }

    pub fn pointer_move(&self, node: NodeId, client_x: f64, client_y: f64) -> Event {
        self.dispatch(
            Target::Element(&node),
            Event::new(EventKind::MouseMove).with_pointer(client_x, client_y),
        )
    }

    pub fn pointer_leave(&self, node: NodeId) -> Event {
        self.dispatch(Target::Element(&node), Event::new(EventKind::MouseLeave))
    }

    /// Dispatch `click` on `node` and run the anchor default action unless a
    /// handler prevented it.
    pub fn simulate_click(&self, node: NodeId) -> Event {
        let event = self.dispatch(Target::Element(&node), Event::new(EventKind::Click));
        if !event.default_prevented() {
            let href = self.with_node(node, |n| {
                if n.tag == "a" {
                    n.attr("href").map(str::to_string)
                } else {
                    None
                }
            });
            if let Some(href) = href.flatten().filter(|h| h.starts_with('#')) {
                self.navigations.borrow_mut().push(href);
            }
        }
        event
    }

    pub fn key_down(&self, node: NodeId, key: &str) -> Event {
        self.dispatch(
            Target::Element(&node),
            Event::new(EventKind::KeyDown).with_key(key),
        )
    }

    /// Leave the loading state and fire `DOMContentLoaded` on the document.
    pub fn finish_parsing(&self) {
        self.loading.set(false);
        self.dispatch(Target::Document, Event::new(EventKind::DomContentLoaded));
    }

    /// Fire `load` on the window.
    pub fn finish_loading(&self) {
        self.dispatch(Target::Window, Event::new(EventKind::Load));
    }

    /// Run every handler registered for `target` and `event.kind()` in
    /// registration order, returning the event for inspection.
    pub fn dispatch(&self, target: Target<'_, NodeId>, event: Event) -> Event {
        let key = TargetKey::from_target(&target);
        let handlers: Vec<Rc<RefCell<Handler>>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target == key && l.kind == event.kind())
            .map(|l| Rc::clone(&l.handler))
            .collect();
        for handler in handlers {
            // A handler re-dispatching its own event is skipped, not re-entered.
            if let Ok(mut h) = handler.try_borrow_mut() {
                (*h)(&event);
            }
        }
        event
    }

    pub fn listener_count(&self, target: Target<'_, NodeId>, kind: EventKind) -> usize {
        let key = TargetKey::from_target(&target);
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.target == key && l.kind == kind)
            .count()
    }

    /// Move the virtual clock forward, firing due timers in order.
    pub fn advance(&self, ms: f64) {
        let limit = self.timers.borrow().now + ms;
        loop {
            let next = self.timers.borrow_mut().pop_due(limit);
            let Some(scheduled) = next else {
                break;
            };
            self.timers.borrow_mut().now = scheduled.due;
            if scheduled.slot.armed.get() == Some(scheduled.seq) {
                scheduled.slot.armed.set(None);
            }
            let mut callback = scheduled.slot.callback.borrow_mut();
            (*callback)();
        }
        self.timers.borrow_mut().now = limit;
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().pending.len()
    }

    fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&Node) -> R) -> Option<R> {
        self.nodes.borrow().get(id.0).map(f)
    }

    fn with_node_mut<R>(&self, id: NodeId, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
        self.nodes.borrow_mut().get_mut(id.0).map(f)
    }

    /// Nodes in document (pre-)order.
    fn document_order(&self) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut order = Vec::with_capacity(nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = nodes.get(id.0) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn detach(&self, child: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(parent) = nodes.get(child.0).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = nodes.get_mut(parent.0) {
            p.children.retain(|c| *c != child);
        }
    }

    fn insert_child(&self, parent: NodeId, child: NodeId, at_front: bool) -> Result<()> {
        if self.with_node(parent, |_| ()).is_none() || self.with_node(child, |_| ()).is_none() {
            return Err(PortfolioFxError::Dom("unknown node".to_string()));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(PortfolioFxError::Dom(
                "cannot insert a node into itself".to_string(),
            ));
        }
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        if let Some(p) = nodes.get_mut(parent.0) {
            if at_front {
                p.children.insert(0, child);
            } else {
                p.children.push(child);
            }
        }
        if let Some(c) = nodes.get_mut(child.0) {
            c.parent = Some(parent);
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = nodes.get(node.0).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }
}

impl Dom for HeadlessPage {
    type Element = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(list) = selector::parse(selector) else {
            log::warn!("malformed selector {selector:?}");
            return Vec::new();
        };
        let order = self.document_order();
        let nodes = self.nodes.borrow();
        order
            .into_iter()
            .filter(|id| *id != self.root)
            .filter(|id| NodeRef::new(&nodes, *id).is_some_and(|n| list.matches(&n)))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let order = self.document_order();
        let nodes = self.nodes.borrow();
        order
            .into_iter()
            .find(|n| nodes.get(n.0).and_then(|node| node.attr("id")) == Some(id))
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        let scroll_y = self.scroll_y.get();
        self.with_node(*element, |n| {
            Rect::new(
                n.layout.top - scroll_y,
                n.layout.left,
                n.layout.width,
                n.layout.height,
            )
        })
        .unwrap_or_default()
    }

    fn offset_top(&self, element: &NodeId) -> f64 {
        self.with_node(*element, |n| n.layout.top).unwrap_or(0.0)
    }

    fn offset_height(&self, element: &NodeId) -> f64 {
        self.with_node(*element, |n| n.layout.height)
            .unwrap_or(0.0)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.with_node(*element, |n| {
            if name == "class" {
                (!n.classes.is_empty()).then(|| n.classes.join(" "))
            } else {
                n.attr(name).map(str::to_string)
            }
        })
        .flatten()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<()> {
        self.with_node_mut(*element, |n| {
            if name == "class" {
                n.classes = value.split_whitespace().map(str::to_string).collect();
                return;
            }
            if let Some(slot) = n.attributes.iter_mut().find(|(k, _)| k == name) {
                slot.1 = value.to_string();
            } else {
                n.attributes.push((name.to_string(), value.to_string()));
            }
        })
        .ok_or_else(|| PortfolioFxError::Dom(format!("unknown node {element:?}")))
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        self.with_node_mut(*element, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        self.with_node_mut(*element, |n| n.classes.retain(|c| c != class));
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.with_node(*element, |n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        self.with_node_mut(*element, |n| {
            if let Some(slot) = n.style.iter_mut().find(|(k, _)| k == property) {
                slot.1 = value.to_string();
            } else {
                n.style.push((property.to_string(), value.to_string()));
            }
        });
    }

    fn style(&self, element: &NodeId, property: &str) -> Option<String> {
        self.with_node(*element, |n| {
            n.style
                .iter()
                .find(|(k, _)| k == property)
                .map(|(_, v)| v.clone())
        })
        .flatten()
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.with_node_mut(*element, |n| n.text = text.to_string());
    }

    fn create_element(&self, tag: &str) -> Result<NodeId> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(PortfolioFxError::Dom(format!("invalid tag name {tag:?}")));
        }
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node::new(tag));
        Ok(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.insert_child(*parent, *child, false)
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.insert_child(*parent, *child, true)
    }

    fn inject_css(&self, css: &str) -> Result<()> {
        let style = self.create_element("style")?;
        self.set_text(&style, css);
        self.append_child(&self.head, &style)
    }

    fn click(&self, element: &NodeId) {
        self.simulate_click(*element);
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests
            .borrow_mut()
            .push(ScrollRequest { top, behavior });
        self.scroll_y.set(top.max(0.0));
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport.get()
    }

    fn hostname(&self) -> String {
        self.hostname.borrow().clone()
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn now_ms(&self) -> f64 {
        self.timers.borrow().now
    }
}

impl EventSource for HeadlessPage {
    fn listen(&self, target: Target<'_, NodeId>, kind: EventKind, handler: Handler) {
        self.listeners.borrow_mut().push(Listener {
            target: TargetKey::from_target(&target),
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
    }
}

impl Scheduler for HeadlessPage {
    fn timer(&self, callback: Box<dyn FnMut()>) -> Box<dyn Timer> {
        Box::new(HeadlessTimer {
            queue: Rc::downgrade(&self.timers),
            slot: Rc::new(TimerSlot {
                callback: RefCell::new(callback),
                armed: Cell::new(None),
            }),
        })
    }
}

/// Fluent construction of one element; see [`HeadlessPage::element`].
pub struct ElementBuilder<'a> {
    page: &'a HeadlessPage,
    id: NodeId,
}

impl<'a> ElementBuilder<'a> {
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.page.add_class(&self.id, c);
        }
        self
    }

    #[must_use]
    pub fn attr(self, name: &str, value: &str) -> Self {
        let _ = self.page.set_attribute(&self.id, name, value);
        self
    }

    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.page.set_text(&self.id, text);
        self
    }

    /// Full-width block at `top` with the given height.
    #[must_use]
    pub fn at(self, top: f64, height: f64) -> Self {
        let width = self.page.viewport.get().width;
        self.page.set_layout(self.id, top, 0.0, width, height);
        self
    }

    #[must_use]
    pub fn layout(self, top: f64, left: f64, width: f64, height: f64) -> Self {
        self.page.set_layout(self.id, top, left, width, height);
        self
    }

    pub fn build(self) -> NodeId {
        self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_query_in_document_order() {
        let page = HeadlessPage::new();
        let body = page.body_node();
        let nav = page.element(body, "nav").class("nav-links").build();
        let a1 = page.element(nav, "a").attr("href", "#one").build();
        let section = page.element(body, "section").id("one").build();
        let a2 = page.element(section, "a").attr("href", "#two").build();

        assert_eq!(page.query_all("a[href^=\"#\"]"), vec![a1, a2]);
        assert_eq!(page.query_all(".nav-links a"), vec![a1]);
        assert_eq!(page.element_by_id("one"), Some(section));
        assert!(page.query_all("a[").is_empty());
    }

    #[test]
    fn test_bounding_rect_tracks_scroll() {
        let page = HeadlessPage::new().with_viewport(1000.0, 800.0);
        let div = page.element(page.body_node(), "div").at(1200.0, 300.0).build();
        assert_eq!(page.bounding_rect(&div).top, 1200.0);
        page.user_scroll(1000.0);
        assert_eq!(page.bounding_rect(&div).top, 200.0);
        assert_eq!(page.offset_top(&div), 1200.0);
    }

    #[test]
    fn test_prepend_and_append_order() {
        let page = HeadlessPage::new();
        let body = page.body_node();
        let existing = page.append(body, "main");
        let first = page.create_element("a").unwrap();
        let last = page.create_element("button").unwrap();
        page.prepend_child(&body, &first).unwrap();
        page.append_child(&body, &last).unwrap();
        assert_eq!(page.children(body), vec![first, existing, last]);
        assert!(page.append_child(&first, &body).is_err());
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let page = HeadlessPage::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = Rc::clone(&log);
            page.listen(
                Target::Window,
                EventKind::Scroll,
                Box::new(move |_| log.borrow_mut().push(i)),
            );
        }
        page.user_scroll(10.0);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_timer_rearm_replaces_pending_run() {
        let page = HeadlessPage::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let timer = page.timer(Box::new(move || counter.set(counter.get() + 1)));

        timer.arm(50);
        page.advance(30.0);
        timer.arm(50);
        page.advance(30.0);
        assert_eq!(fired.get(), 0);
        assert!(timer.is_pending());
        page.advance(20.0);
        assert_eq!(fired.get(), 1);
        assert!(!timer.is_pending());
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let page = HeadlessPage::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let a_log = Rc::clone(&order);
        let b_log = Rc::clone(&order);
        let a = page.timer(Box::new(move || a_log.borrow_mut().push("a")));
        let b = page.timer(Box::new(move || b_log.borrow_mut().push("b")));
        a.arm(100);
        b.arm(10);
        page.advance(200.0);
        assert_eq!(*order.borrow(), vec!["b", "a"]);
        assert_eq!(page.now_ms(), 200.0);
    }

    #[test]
    fn test_unprevented_anchor_click_navigates() {
        let page = HeadlessPage::new();
        let a = page.element(page.body_node(), "a").attr("href", "#top").build();
        page.simulate_click(a);
        assert_eq!(page.default_navigations(), vec!["#top".to_string()]);
    }

    #[test]
    fn test_inject_css_lands_in_head() {
        let page = HeadlessPage::new();
        page.inject_css("body { margin: 0; }").unwrap();
        assert_eq!(page.stylesheets(), vec!["body { margin: 0; }".to_string()]);
    }
}
