//! Boot sequencing: readiness gating, install order and local perf logging.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

mod common;

use common::{build, portfolio};
use portfolio_fx::host::{Dom, EventKind, HeadlessPage, Target};
use portfolio_fx::{boot, FxConfig};

#[test]
fn test_ready_document_installs_immediately() {
    let p = portfolio();
    let page = boot(&p.page, FxConfig::default()).unwrap();

    assert!(page.is_ready());
    let effects = page.effects();
    let effects = effects.as_ref().unwrap();
    assert!(effects.navigation.is_some());
    assert!(effects.reveal.is_some());
    assert_eq!(effects.cards.as_ref().map(|c| c.cards()), Some(3));
    assert!(effects.typing_cursor.as_ref().unwrap().is_scheduled());
    assert!(effects.scroll_top.is_some());
    assert!(effects.active_section.is_some());
    assert!(effects.accessibility.is_some());
}

#[test]
fn test_loading_document_waits_for_dom_content_loaded() {
    let p = build(HeadlessPage::new().loading());
    let page = boot(&p.page, FxConfig::default()).unwrap();

    assert!(!page.is_ready());
    assert!(p.page.query_all(".scroll-to-top").is_empty());
    assert_eq!(
        p.page.listener_count(Target::Document, EventKind::DomContentLoaded),
        1
    );

    p.page.finish_parsing();
    assert!(page.is_ready());
    assert_eq!(p.page.query_all(".scroll-to-top").len(), 1);
}

#[test]
fn test_dom_content_loaded_installs_once() {
    let p = build(HeadlessPage::new().loading());
    let _page = boot(&p.page, FxConfig::default()).unwrap();

    p.page.finish_parsing();
    p.page.finish_parsing();

    assert_eq!(p.page.query_all(".scroll-to-top").len(), 1);
    assert_eq!(p.page.query_all(".skip-link").len(), 1);
}

#[test]
fn test_skip_link_is_not_intercepted() {
    let p = portfolio();
    let page = boot(&p.page, FxConfig::default()).unwrap();
    let effects = page.effects();
    let effects = effects.as_ref().unwrap();

    // Installed after navigation, so the skip link keeps its default action.
    assert_eq!(effects.navigation.as_ref().unwrap().intercepted_links(), 5);
    let skip = *effects.accessibility.as_ref().unwrap().skip_link();
    p.page.simulate_click(skip);
    assert_eq!(p.page.default_navigations(), vec!["#hero".to_string()]);
}

#[test]
fn test_effects_run_together_on_scroll() {
    let p = portfolio();
    let page = boot(&p.page, FxConfig::default()).unwrap();

    p.scroll_and_settle(1300.0);

    assert!(p.page.has_class(&p.header, "scrolled"));
    assert_eq!(p.active_nav_links(), vec![p.nav_links[2]]);
    assert!(p.cards.iter().all(|c| p.page.has_class(c, "active")));
    let effects = page.effects();
    let effects = effects.as_ref().unwrap();
    assert!(effects.scroll_top.as_ref().unwrap().is_visible());
    assert_eq!(
        effects.active_section.as_ref().unwrap().current().as_deref(),
        Some("projects")
    );
}

#[test]
fn test_perf_logging_only_on_loopback() {
    let remote = portfolio();
    let page = boot(&remote.page, FxConfig::default()).unwrap();
    assert!(page.timing().is_none());
    assert_eq!(remote.page.listener_count(Target::Window, EventKind::Load), 0);

    for host in ["localhost", "127.0.0.1", "[::1]"] {
        let local = build(HeadlessPage::new().with_hostname(host));
        let page = boot(&local.page, FxConfig::default()).unwrap();
        assert!(page.timing().is_some(), "{host}");
    }
}

#[test]
fn test_page_timing_recorded() {
    let p = build(HeadlessPage::new().with_hostname("localhost").loading());
    let page = boot(&p.page, FxConfig::default()).unwrap();

    p.page.advance(120.0);
    p.page.finish_parsing();
    p.page.advance(200.0);
    p.page.finish_loading();

    let timing = page.timing().unwrap();
    assert_eq!(timing.dom_ready_ms, Some(120.0));
    assert_eq!(timing.load_ms, Some(320.0));
    assert_eq!(timing.ready_to_load_ms(), Some(200.0));
}

#[test]
fn test_invalid_config_is_rejected_before_boot() {
    let err = FxConfig::from_json(r#"{ "thresholds": { "tilt_damping": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("tilt_damping"));
}

#[test]
fn test_boot_rejects_invalid_config_without_installing() {
    let p = portfolio();
    let mut config = FxConfig::default();
    config.thresholds.tilt_damping = 0.0;

    let err = boot(&p.page, config).err().unwrap();
    assert!(err.to_string().contains("tilt_damping"));

    // No card handlers, so a pointer move cannot write a NaN tilt.
    assert_eq!(
        p.page.listener_count(Target::Element(&p.cards[0]), EventKind::MouseMove),
        0
    );
    p.page.pointer_move(p.cards[0], 100.0, 1250.0);
    assert_eq!(p.page.style(&p.cards[0], "transform"), None);
    assert!(p.page.query_all(".scroll-to-top").is_empty());
}

#[test]
fn test_boot_rejects_empty_class_name() {
    let p = portfolio();
    let mut config = FxConfig::default();
    config.classes.revealable = String::new();

    assert!(boot(&p.page, config).is_err());
    assert!(p.page.query_all(".project-card.active").is_empty());
    assert_eq!(p.page.listener_count(Target::Window, EventKind::Scroll), 0);
}
