//! Headless ambulance simulation core
//!
//! Contains the road network, route selection, and ambulance movement
//! logic, independent of any display layer. A simulation is a single
//! [`RoadMap`] plus a single [`Ambulance`], driven by [`SimWorld`].

mod ambulance;
mod geometry;
mod loader;
mod observer;
mod road_map;
mod types;
mod world;

pub use ambulance::{Ambulance, DriveOutcome};
pub use geometry::{circle_line_roots, distance, step_toward};
pub use loader::load_road_map;
pub use observer::{NoopObserver, RouteObserver};
pub use road_map::{MapNode, RoadMap};
pub use types::{
    PathMetrics, Point, MAX_CONGESTION, MAX_SPEED, PATH_COST_WEIGHT, TICK_DURATION, TRAFFIC_WEIGHT,
};
pub use world::{InstantPacer, RealtimePacer, SimWorld, TimePacer};
