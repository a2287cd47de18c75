//! Plane geometry value types.
//!
//! The arena uses a continuous 2D coordinate space. Points travel over the
//! wire as `[x, y]` pairs, so [`Point`] serializes to and from a two-element
//! array.

use serde::{Deserialize, Serialize};

/// A point (or displacement vector) in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum, used to advance a position by a velocity.
    #[must_use]
    pub fn offset(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }

    /// Vector from `self` to `to`.
    #[must_use]
    pub fn delta_to(self, to: Point) -> Self {
        Self::new(to.x - self.x, to.y - self.y)
    }

    /// Length of this point taken as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > f64::EPSILON && len.is_finite() {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Scale by a scalar.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Axis-aligned rectangle.
///
/// Built from the four corner vertices the server sends for boundary objects,
/// so callers never index into the vertex list themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Smallest x covered.
    pub min_x: f64,
    /// Largest x covered.
    pub max_x: f64,
    /// Smallest y covered.
    pub min_y: f64,
    /// Largest y covered.
    pub max_y: f64,
}

impl Rect {
    /// Bounding rectangle of a vertex list.
    ///
    /// Returns `None` for an empty list or when any vertex is not finite.
    #[must_use]
    pub fn from_vertices(vertices: &[Point]) -> Option<Self> {
        let first = vertices.first()?;
        let mut rect = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for v in vertices {
            if !v.x.is_finite() || !v.y.is_finite() {
                return None;
            }
            rect.min_x = rect.min_x.min(v.x);
            rect.max_x = rect.max_x.max(v.x);
            rect.min_y = rect.min_y.min(v.y);
            rect.max_y = rect.max_y.max(v.y);
        }
        Some(rect)
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check whether a point lies inside or on the edge.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Shrink every edge inward by `margin`.
    ///
    /// An axis narrower than twice the margin collapses onto its center line
    /// instead of inverting.
    #[must_use]
    pub fn inset(&self, margin: f64) -> Self {
        let shrink = |lo: f64, hi: f64| {
            if hi - lo > 2.0 * margin {
                (lo + margin, hi - margin)
            } else {
                let mid = (lo + hi) / 2.0;
                (mid, mid)
            }
        };
        let horizontal = shrink(self.min_x, self.max_x);
        let vertical = shrink(self.min_y, self.max_y);
        Self {
            min_x: horizontal.0,
            max_x: horizontal.1,
            min_y: vertical.0,
            max_y: vertical.1,
        }
    }

    /// Nearest point inside the rectangle.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
        )
    }
}
