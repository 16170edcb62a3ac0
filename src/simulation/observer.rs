//! Renderer boundary for the simulation core
//!
//! External display layers consume route and position updates as pure
//! data through this trait; they get no write access back into the
//! core's state. All methods default to no-ops so implementors only
//! override what they care about.

use super::types::Point;

/// Callbacks invoked by the ambulance as it plans and moves.
pub trait RouteObserver {
    /// A fresh best path was selected; `path` is the ordered node
    /// sequence starting at the current position.
    fn route_planned(&mut self, _path: &[Point]) {}

    /// The ambulance position changed (after every step, including the
    /// snap onto a node).
    fn position_updated(&mut self, _position: Point) {}

    /// The ambulance arrived at a node: the displayed path highlight is
    /// stale and the map should be refreshed (congestion has changed).
    fn node_reached(&mut self, _node: Point) {}
}

/// A [`RouteObserver`] that does nothing. Use when driving the
/// simulation without a display.
pub struct NoopObserver;

impl RouteObserver for NoopObserver {}
