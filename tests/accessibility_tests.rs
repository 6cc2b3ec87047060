//! Skip link and keyboard activation of navigation links.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

mod common;

use common::{portfolio, HEADER_HEIGHT};
use portfolio_fx::controllers::accessibility::SKIP_LINK_TEXT;
use portfolio_fx::controllers::{Accessibility, Navigation};
use portfolio_fx::host::Dom;
use portfolio_fx::FxConfig;

#[test]
fn test_skip_link_is_first_in_body() {
    let p = portfolio();
    let a11y = Accessibility::install(&p.page, &FxConfig::default()).unwrap();
    let skip = *a11y.skip_link();

    assert_eq!(p.page.children(p.page.body_node()).first(), Some(&skip));
    assert_eq!(p.page.attribute(&skip, "href").as_deref(), Some("#hero"));
    assert!(p.page.has_class(&skip, "skip-link"));
    assert_eq!(p.page.text(skip), SKIP_LINK_TEXT);
    assert_eq!(a11y.keyboard_links(), 4);
}

#[test]
fn test_skip_link_keeps_default_navigation() {
    let p = portfolio();
    let config = FxConfig::default();
    Navigation::install(&p.page, &config).unwrap();
    let a11y = Accessibility::install(&p.page, &config).unwrap();

    let event = p.page.simulate_click(*a11y.skip_link());
    assert!(!event.default_prevented());
    assert_eq!(p.page.default_navigations(), vec!["#hero".to_string()]);
}

#[test]
fn test_enter_activates_nav_link() {
    let p = portfolio();
    let config = FxConfig::default();
    Navigation::install(&p.page, &config).unwrap();
    Accessibility::install(&p.page, &config).unwrap();

    let event = p.page.key_down(p.nav_links[3], "Enter");
    assert!(event.default_prevented());
    let requests = p.page.scroll_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].top, 2000.0 - HEADER_HEIGHT);
    assert!(p.page.default_navigations().is_empty());
}

#[test]
fn test_other_keys_are_ignored() {
    let p = portfolio();
    let config = FxConfig::default();
    Navigation::install(&p.page, &config).unwrap();
    Accessibility::install(&p.page, &config).unwrap();

    for key in ["Tab", " ", "a", "Escape"] {
        let event = p.page.key_down(p.nav_links[1], key);
        assert!(!event.default_prevented());
    }
    assert!(p.page.scroll_requests().is_empty());
}

#[test]
fn test_custom_skip_target() {
    let p = portfolio();
    let config = FxConfig {
        skip_link_target: "#about".to_string(),
        ..FxConfig::default()
    };
    let a11y = Accessibility::install(&p.page, &config).unwrap();
    assert_eq!(
        p.page.attribute(a11y.skip_link(), "href").as_deref(),
        Some("#about")
    );
}
