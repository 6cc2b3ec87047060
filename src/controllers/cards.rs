//! Pointer-driven lift and 3D tilt on project cards.
//!
//! Handlers are registered per card in this order: enter, leave, move,
//! leave. Both leave handlers fire; the second one (full three-part reset)
//! runs last and is the state a card ends in.

use std::rc::Rc;

use crate::config::FxConfig;
use crate::error::Result;
use crate::geometry::Rect;
use crate::host::{EventKind, Host, Target};

pub const LIFT_TRANSFORM: &str = "translateY(-10px)";
pub const REST_TRANSFORM: &str = "translateY(0)";
pub const FULL_REST_TRANSFORM: &str = "translateY(0) rotateX(0) rotateY(0)";

/// Tilt angles in degrees for a pointer at `(client_x, client_y)` over `rect`.
///
/// `rotate_x` follows the vertical offset from the card center, `rotate_y`
/// the horizontal offset mirrored, both divided by `damping`.
pub fn tilt_angles(rect: &Rect, client_x: f64, client_y: f64, damping: f64) -> (f64, f64) {
    let x = client_x - rect.left;
    let y = client_y - rect.top;
    let (center_x, center_y) = rect.local_center();
    let rotate_x = (y - center_y) / damping;
    let rotate_y = (center_x - x) / damping;
    (rotate_x, rotate_y)
}

pub fn tilt_transform(rect: &Rect, client_x: f64, client_y: f64, damping: f64) -> String {
    let (rotate_x, rotate_y) = tilt_angles(rect, client_x, client_y, damping);
    format!("{LIFT_TRANSFORM} rotateX({rotate_x}deg) rotateY({rotate_y}deg)")
}

/// Handle for the installed card controller.
pub struct CardTilt {
    cards: usize,
}

impl CardTilt {
    /// # Errors
    /// Never fails today; kept fallible like the other controllers.
    pub fn install<H: Host + 'static>(host: &Rc<H>, config: &FxConfig) -> Result<Self> {
        let cards = host.query_all(&config.selectors.project_cards);
        let damping = config.thresholds.tilt_damping;

        for card in &cards {
            let set_transform = |value: &'static str| {
                let weak = Rc::downgrade(host);
                let card = card.clone();
                Box::new(move |_: &crate::host::Event| {
                    if let Some(host) = weak.upgrade() {
                        host.set_style(&card, "transform", value);
                    }
                })
            };

            host.listen(
                Target::Element(card),
                EventKind::MouseEnter,
                set_transform(LIFT_TRANSFORM),
            );
            host.listen(
                Target::Element(card),
                EventKind::MouseLeave,
                set_transform(REST_TRANSFORM),
            );

            let weak = Rc::downgrade(host);
            let tilted = card.clone();
            host.listen(
                Target::Element(card),
                EventKind::MouseMove,
                Box::new(move |event| {
                    let Some(host) = weak.upgrade() else {
                        return;
                    };
                    let rect = host.bounding_rect(&tilted);
                    let transform =
                        tilt_transform(&rect, event.client_x(), event.client_y(), damping);
                    host.set_style(&tilted, "transform", &transform);
                }),
            );

            host.listen(
                Target::Element(card),
                EventKind::MouseLeave,
                set_transform(FULL_REST_TRANSFORM),
            );
        }

        Ok(Self {
            cards: cards.len(),
        })
    }

    pub fn cards(&self) -> usize {
        self.cards
    }
}
