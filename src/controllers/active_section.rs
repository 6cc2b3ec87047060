//! Highlights the navigation link for the section under the scroll position.
//!
//! Each tick recomputes the answer from scratch: every nav link loses the
//! active class, then the link for the winning section (if any) regains it.
//! When sections overlap, the last match in document order wins; when the
//! probe falls in a gap, no link is active.

use std::cell::RefCell;
use std::rc::Rc;

use super::anchor_id;
use crate::config::FxConfig;
use crate::debounce::Debounced;
use crate::error::Result;
use crate::host::{Dom, EventKind, Host, Target};

/// Vertical extent of one identified page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open containment: `[top, top + height)`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// The section containing `scroll_y + probe_offset`, last match winning.
pub fn current_section(
    spans: &[SectionSpan],
    scroll_y: f64,
    probe_offset: f64,
) -> Option<&SectionSpan> {
    let probe = scroll_y + probe_offset;
    spans.iter().rev().find(|s| s.contains(probe))
}

/// Read section spans from the document.
pub fn section_spans<D: Dom + ?Sized>(dom: &D, selector: &str) -> Vec<SectionSpan> {
    dom.query_all(selector)
        .iter()
        .filter_map(|el| {
            let id = dom.attribute(el, "id").filter(|id| !id.is_empty())?;
            Some(SectionSpan::new(id, dom.offset_top(el), dom.offset_height(el)))
        })
        .collect()
}

/// Run one highlight pass and return the id of the active section.
pub fn highlight<D: Dom + ?Sized>(
    dom: &D,
    config: &FxConfig,
    scroll_y: f64,
) -> Option<String> {
    let spans = section_spans(dom, &config.selectors.sections);
    let current = current_section(&spans, scroll_y, config.thresholds.section_probe_offset)
        .map(|s| s.id.clone());

    let active = &config.classes.active;
    for link in dom.query_all(&config.selectors.nav_links) {
        dom.remove_class(&link, active);
        let href = dom.attribute(&link, "href").unwrap_or_default();
        if current.is_some() && anchor_id(&href) == current.as_deref() {
            dom.add_class(&link, active);
        }
    }
    current
}

/// Handle for the installed active-section tracker.
pub struct ActiveSection {
    current: Rc<RefCell<Option<String>>>,
}

impl ActiveSection {
    /// # Errors
    /// Never fails today; kept fallible like the other controllers.
    pub fn install<H: Host + 'static>(host: &Rc<H>, config: &FxConfig) -> Result<Self> {
        let current = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(host);
        let state = Rc::clone(&current);
        let tick_config = config.clone();
        let tick = Debounced::new(
            host.as_ref(),
            config.timings.active_section_debounce_ms,
            move |()| {
                let Some(host) = weak.upgrade() else {
                    return;
                };
                let id = highlight(host.as_ref(), &tick_config, host.scroll_y());
                *state.borrow_mut() = id;
            },
        );
        host.listen(
            Target::Window,
            EventKind::Scroll,
            Box::new(move |_| tick.call(())),
        );

        Ok(Self { current })
    }

    /// Id of the section highlighted by the latest tick.
    pub fn current(&self) -> Option<String> {
        self.current.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn adjacent() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("hero", 0.0, 300.0),
            SectionSpan::new("about", 300.0, 300.0),
            SectionSpan::new("projects", 600.0, 300.0),
        ]
    }

    #[test_case(0.0 => Some("hero".to_string()) ; "top of page")]
    #[test_case(199.0 => Some("hero".to_string()) ; "just before boundary")]
    #[test_case(200.0 => Some("about".to_string()) ; "boundary belongs to next")]
    #[test_case(350.0 => Some("about".to_string()) ; "middle of second")]
    #[test_case(500.0 => Some("projects".to_string()) ; "third")]
    #[test_case(800.0 => None ; "past the last section")]
    fn test_adjacent_sections(scroll_y: f64) -> Option<String> {
        current_section(&adjacent(), scroll_y, 100.0).map(|s| s.id.clone())
    }

    #[test]
    fn test_first_section_without_offset() {
        let spans = adjacent();
        assert_eq!(
            current_section(&spans, 0.0, 0.0).map(|s| s.id.as_str()),
            Some("hero")
        );
    }

    #[test]
    fn test_overlap_last_match_wins() {
        let spans = vec![
            SectionSpan::new("a", 0.0, 500.0),
            SectionSpan::new("b", 200.0, 500.0),
        ];
        assert_eq!(
            current_section(&spans, 250.0, 0.0).map(|s| s.id.as_str()),
            Some("b")
        );
    }

    #[test]
    fn test_gap_matches_nothing() {
        let spans = vec![
            SectionSpan::new("a", 0.0, 100.0),
            SectionSpan::new("b", 300.0, 100.0),
        ];
        assert!(current_section(&spans, 150.0, 0.0).is_none());
    }
}
