//! Viewport geometry: bounding rectangles and visibility predicates.
//!
//! The predicates are pure functions over a snapshot of layout state. They
//! never cache; callers take a fresh [`Rect`] and [`ViewportSize`] from the
//! host on every tick.

/// Bounding rectangle in viewport coordinates (the shape of `DOMRect`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Center point `(x, y)` relative to the rectangle's own top-left corner.
    pub fn local_center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Inner size of the browser window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Default band trimmed from the viewport for partial visibility.
pub const DEFAULT_REVEAL_OFFSET: f64 = 100.0;

/// True iff the whole rectangle lies inside `[0, width] x [0, height]`.
pub fn is_in_viewport(rect: &Rect, viewport: ViewportSize) -> bool {
    rect.top >= 0.0
        && rect.left >= 0.0
        && rect.bottom() <= viewport.height
        && rect.right() <= viewport.width
}

/// True iff any part of the rectangle lies inside the vertical band
/// `[offset, height - offset]`. The horizontal axis is ignored.
pub fn is_partially_in_viewport(rect: &Rect, viewport: ViewportSize, offset: f64) -> bool {
    rect.top <= viewport.height - offset && rect.bottom() >= offset
}
