//! Geometry primitives used by the interaction layer.
//!
//! The sidebar lays items out top to bottom, so only the vertical axis carries
//! meaning for reordering. Coordinates follow a flipped (y-down) convention:
//! the first item starts at `y = 0` and `y` grows toward the last item.

/// A 2D point in sidebar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// An interval along the sidebar's main (vertical) axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    /// Top edge.
    pub start: f32,
    /// Height of the span.
    pub extent: f32,
}

impl Span {
    /// Create a span starting at `start` covering `extent` units.
    #[inline]
    pub const fn new(start: f32, extent: f32) -> Self {
        Self { start, extent }
    }

    /// Bottom edge.
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.extent
    }

    /// Vertical midline.
    #[inline]
    pub fn mid(&self) -> f32 {
        self.start + self.extent / 2.0
    }

    /// Whether `y` lies inside the span (top inclusive, bottom exclusive).
    #[inline]
    pub fn contains(&self, y: f32) -> bool {
        y >= self.start && y < self.end()
    }
}
