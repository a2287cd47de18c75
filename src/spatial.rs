//! Spatial queries over arena points.

use crate::geometry::Point;

/// Euclidean distance between two points.
#[must_use]
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.delta_to(b).length()
}

/// Direction from `from` to `to` in degrees.
///
/// 0° points along +x and angles grow toward +y. The result is in
/// (−180°, 180°]; `atan2`'s −180° is folded onto 180°.
#[must_use]
pub fn bearing_degrees(from: Point, to: Point) -> f64 {
    let d = from.delta_to(to);
    let degrees = d.y.atan2(d.x).to_degrees();
    if degrees <= -180.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// The winner of a [`nearest`] search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<T> {
    /// The chosen candidate.
    pub item: T,
    /// Its location.
    pub point: Point,
    /// Distance from the search origin.
    pub distance: f64,
}

/// Find the candidate closest to `from` among those accepted by `predicate`.
///
/// Candidates are `(item, point)` pairs. Ties keep the first candidate
/// encountered, so the iteration order of `candidates` decides them.
#[must_use]
pub fn nearest<T, I, P>(candidates: I, from: Point, mut predicate: P) -> Option<Nearest<T>>
where
    I: IntoIterator<Item = (T, Point)>,
    P: FnMut(&T) -> bool,
{
    let mut best: Option<Nearest<T>> = None;
    for (item, point) in candidates {
        if !predicate(&item) {
            continue;
        }
        let d = distance(from, point);
        if d.is_nan() || best.as_ref().is_some_and(|current| d >= current.distance) {
            continue;
        }
        best = Some(Nearest {
            item,
            point,
            distance: d,
        });
    }
    best
}

/// Approximate line-of-sight test.
///
/// Returns `false` (blocked) when `obstacle` lies within `buffer` of the
/// infinite line through `p1` and `p2`, using the cross-product form of the
/// point-to-line distance. The obstacle is a point and the line is not cut
/// at `p1`/`p2`, so an obstacle behind either end still blocks. With
/// `p1 == p2` the distance to `p1` is used.
#[must_use]
pub fn segment_clears(p1: Point, p2: Point, obstacle: Point, buffer: f64) -> bool {
    let line = p1.delta_to(p2);
    let len = line.length();
    let off_line = if len > f64::EPSILON {
        let to_obstacle = p1.delta_to(obstacle);
        (line.x * to_obstacle.y - line.y * to_obstacle.x).abs() / len
    } else {
        distance(p1, obstacle)
    };
    off_line > buffer
}
