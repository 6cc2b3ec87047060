//! Navigation highlighting for the section under the scroll position.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_precision_loss
)]

mod common;

use common::portfolio;
use portfolio_fx::controllers::active_section::{highlight, section_spans, SectionSpan};
use portfolio_fx::controllers::ActiveSection;
use portfolio_fx::host::{Dom, HeadlessPage};
use portfolio_fx::FxConfig;
use std::rc::Rc;
use test_case::test_case;

#[test]
fn test_spans_read_in_document_order() {
    let p = portfolio();
    let spans = section_spans(p.page.as_ref(), "section[id]");
    assert_eq!(
        spans,
        vec![
            SectionSpan::new("hero", 0.0, 600.0),
            SectionSpan::new("about", 600.0, 600.0),
            SectionSpan::new("projects", 1200.0, 800.0),
            SectionSpan::new("contact", 2000.0, 600.0),
        ]
    );
}

#[test_case(0.0, Some(0) ; "top highlights hero")]
#[test_case(499.0, Some(0) ; "probe just inside hero")]
#[test_case(500.0, Some(1) ; "probe on about boundary")]
#[test_case(550.0, Some(1) ; "about")]
#[test_case(1950.0, Some(3) ; "contact")]
#[test_case(2550.0, None ; "past the page")]
fn test_tick_highlights_one_link(scroll_y: f64, expected: Option<usize>) {
    let p = portfolio();
    let tracker = ActiveSection::install(&p.page, &FxConfig::default()).unwrap();

    p.scroll_and_settle(scroll_y);

    let expected_links: Vec<_> = expected.map(|i| p.nav_links[i]).into_iter().collect();
    assert_eq!(p.active_nav_links(), expected_links);
    assert_eq!(
        tracker.current(),
        expected.map(|i| ["hero", "about", "projects", "contact"][i].to_string())
    );
}

#[test]
fn test_highlight_moves_between_links() {
    let p = portfolio();
    ActiveSection::install(&p.page, &FxConfig::default()).unwrap();

    p.scroll_and_settle(550.0);
    assert_eq!(p.active_nav_links(), vec![p.nav_links[1]]);

    p.scroll_and_settle(1300.0);
    assert_eq!(p.active_nav_links(), vec![p.nav_links[2]]);

    p.scroll_and_settle(3000.0);
    assert!(p.active_nav_links().is_empty());
}

#[test]
fn test_nothing_happens_before_first_scroll() {
    let p = portfolio();
    let tracker = ActiveSection::install(&p.page, &FxConfig::default()).unwrap();
    assert!(p.active_nav_links().is_empty());
    assert_eq!(tracker.current(), None);
}

#[test]
fn test_single_pass_clears_stale_marks() {
    let p = portfolio();
    let config = FxConfig::default();
    assert_eq!(highlight(p.page.as_ref(), &config, 1300.0).as_deref(), Some("projects"));
    assert_eq!(highlight(p.page.as_ref(), &config, 0.0).as_deref(), Some("hero"));
    assert_eq!(p.active_nav_links(), vec![p.nav_links[0]]);
}

#[test]
fn test_three_adjacent_sections_at_350() {
    let page = Rc::new(HeadlessPage::new());
    let body = page.body_node();
    let nav = page.element(body, "nav").class("nav-links").build();
    let links: Vec<_> = ["one", "two", "three"]
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let _ = page
                .element(body, "section")
                .id(id)
                .at(i as f64 * 300.0, 300.0)
                .build();
            page.element(nav, "a").attr("href", &format!("#{id}")).build()
        })
        .collect();
    ActiveSection::install(&page, &FxConfig::default()).unwrap();

    page.user_scroll(350.0);
    page.advance(50.0);

    let active: Vec<_> = links
        .iter()
        .copied()
        .filter(|l| page.has_class(l, "active"))
        .collect();
    assert_eq!(active, vec![links[1]]);
}
