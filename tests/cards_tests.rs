//! Project card lift and tilt.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

mod common;

use common::portfolio;
use portfolio_fx::controllers::cards::{FULL_REST_TRANSFORM, LIFT_TRANSFORM};
use portfolio_fx::controllers::CardTilt;
use portfolio_fx::host::{Dom, EventKind, Target};
use portfolio_fx::FxConfig;

fn transform(p: &common::Portfolio, card: usize) -> Option<String> {
    p.page.style(&p.cards[card], "transform")
}

#[test]
fn test_every_card_gets_four_handlers() {
    let p = portfolio();
    let tilt = CardTilt::install(&p.page, &FxConfig::default()).unwrap();
    assert_eq!(tilt.cards(), 3);
    for card in &p.cards {
        assert_eq!(p.page.listener_count(Target::Element(card), EventKind::MouseEnter), 1);
        assert_eq!(p.page.listener_count(Target::Element(card), EventKind::MouseMove), 1);
        assert_eq!(p.page.listener_count(Target::Element(card), EventKind::MouseLeave), 2);
    }
}

#[test]
fn test_enter_lifts_card() {
    let p = portfolio();
    CardTilt::install(&p.page, &FxConfig::default()).unwrap();

    p.page.pointer_enter(p.cards[0], 0.0, 0.0);
    assert_eq!(transform(&p, 0).as_deref(), Some(LIFT_TRANSFORM));
    assert_eq!(transform(&p, 1), None);
}

#[test]
fn test_move_over_center_is_flat() {
    let p = portfolio();
    CardTilt::install(&p.page, &FxConfig::default()).unwrap();

    // Card 0 spans x 100..400, y 1250..1500 at scroll 0.
    p.page.pointer_move(p.cards[0], 250.0, 1375.0);
    assert_eq!(
        transform(&p, 0).as_deref(),
        Some("translateY(-10px) rotateX(0deg) rotateY(0deg)")
    );
}

#[test]
fn test_move_uses_viewport_relative_rect() {
    let p = portfolio();
    CardTilt::install(&p.page, &FxConfig::default()).unwrap();
    p.page.user_scroll(1000.0);

    // Top-left corner of card 0, now 250px from the viewport top.
    p.page.pointer_move(p.cards[0], 100.0, 250.0);
    assert_eq!(
        transform(&p, 0).as_deref(),
        Some("translateY(-10px) rotateX(-2.5deg) rotateY(3deg)")
    );
}

#[test]
fn test_leave_ends_in_full_reset() {
    let p = portfolio();
    CardTilt::install(&p.page, &FxConfig::default()).unwrap();

    p.page.pointer_enter(p.cards[2], 150.0, 1600.0);
    p.page.pointer_move(p.cards[2], 120.0, 1560.0);
    p.page.pointer_leave(p.cards[2]);
    assert_eq!(transform(&p, 2).as_deref(), Some(FULL_REST_TRANSFORM));
}

#[test]
fn test_custom_damping() {
    let p = portfolio();
    let mut config = FxConfig::default();
    config.thresholds.tilt_damping = 25.0;
    CardTilt::install(&p.page, &config).unwrap();

    p.page.pointer_move(p.cards[0], 100.0, 1250.0);
    assert_eq!(
        transform(&p, 0).as_deref(),
        Some("translateY(-10px) rotateX(-5deg) rotateY(6deg)")
    );
}
