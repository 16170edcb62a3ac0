//! Geometry helpers for ambulance movement
//!
//! The ambulance travels along the infinite line through its current
//! position and the next node. One tick of travel covers `speed` units,
//! so the reachable positions are the intersections of that line with
//! the circle of radius `speed` centered on the current position.

use super::types::Point;

/// Euclidean distance between two points
pub fn distance(a: &Point, b: &Point) -> f64 {
    a.distance(b)
}

/// The two intersection points of the circle of `radius` around
/// `position` with the line through `position` and `target`.
///
/// Parametrizing the line as `position + t * (target - position)` and
/// substituting into the circle equation gives the quadratic
/// `a*t^2 + b*t + c = 0` with `a = |target - position|^2`, `b = 0`,
/// `c = -radius^2`. Both roots lie on the correct bearing; the caller
/// disambiguates direction by distance to the target.
///
/// The discriminant is positive whenever `target != position`, but
/// floating-point round-off is guarded: a non-positive discriminant
/// collapses to the single clamped root `-b / 2a`.
pub fn circle_line_roots(position: &Point, target: &Point, radius: f64) -> (Point, Point) {
    let dx = target.x - position.x;
    let dy = target.y - position.y;

    let a = dx * dx + dy * dy;
    let b = 0.0;
    let c = -(radius * radius);
    let discriminant = b * b - 4.0 * a * c;

    if discriminant <= 0.0 {
        // Degenerate: target coincides with position (or round-off).
        // Clamp to the single root instead of producing NaN.
        let t = if a > 0.0 { -b / (2.0 * a) } else { 0.0 };
        let root = Point::new(position.x + t * dx, position.y + t * dy);
        return (root, root);
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    let t2 = (-b - sqrt_disc) / (2.0 * a);

    (
        Point::new(position.x + t1 * dx, position.y + t1 * dy),
        Point::new(position.x + t2 * dx, position.y + t2 * dy),
    )
}

/// Advance one tick of travel from `position` toward `target`.
///
/// Picks whichever root of [`circle_line_roots`] ends up closer to the
/// target, i.e. the one that makes progress rather than moving away.
pub fn step_toward(position: &Point, target: &Point, radius: f64) -> Point {
    let (first, second) = circle_line_roots(position, target, radius);

    if first.distance(target) <= second.distance(target) {
        first
    } else {
        second
    }
}
