//! Core types for the ambulance simulation
//!
//! Standalone types shared by the road map and the ambulance agent.

use ordered_float::OrderedFloat;

/// A 2D point in the simulation plane.
///
/// Doubles as the identity of a map node (node coordinates are unique)
/// and as the continuous position of the ambulance between nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Hashable key for coordinate-indexed lookups
    pub fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Costs of a candidate path through the network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathMetrics {
    /// Sum of edge weights along the path
    pub distance_cost: f64,
    /// Sum of node congestion values, destination excluded
    pub congestion_cost: u32,
}

/// Relative weight of (normalized) travel distance in path scoring
pub const PATH_COST_WEIGHT: f64 = 0.5;

/// Relative weight of accumulated congestion in path scoring
pub const TRAFFIC_WEIGHT: f64 = 2.0;

/// Upper bound of the per-node congestion range
pub const MAX_CONGESTION: u8 = 100;

/// Upper bound accepted for the ambulance speed
pub const MAX_SPEED: f64 = 200.0;

/// Simulated duration of one full geometric step
pub const TICK_DURATION: f64 = 1.0;
