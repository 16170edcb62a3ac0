//! Ambulance movement logic
//!
//! The ambulance re-plans its route at every intersection it reaches,
//! then advances along the chosen road one geometric step per tick,
//! snapping exactly onto the node for the final partial step.

use anyhow::{bail, Result};
use log::{debug, info};

use super::geometry;
use super::observer::RouteObserver;
use super::road_map::RoadMap;
use super::types::{Point, MAX_SPEED, TICK_DURATION};

/// Result of one movement step indicating what the driver should do
#[derive(Debug, Clone)]
pub enum DriveOutcome {
    /// The ambulance moved; wait `elapsed` simulated time, then resume
    Moved { elapsed: f64 },
    /// The ambulance is at its destination; `route` is the realized
    /// sequence of nodes visited, source included
    Arrived { route: Vec<Point> },
}

/// An ambulance navigating the road map toward a destination
#[derive(Debug, Clone)]
pub struct Ambulance {
    pub speed: f64,
    pub source: Point,
    pub destination: Point,
    /// Continuous position, not restricted to node coordinates
    pub position: Point,
    /// The currently active plan, replaced at every intersection
    best_path: Vec<Point>,
    /// Immediate sub-goal: the next node along the plan
    next_node: Option<Point>,
    /// Nodes visited so far: source plus every chosen next node
    route_taken: Vec<Point>,
}

impl Ambulance {
    /// Create an ambulance, validating its configuration against the map.
    ///
    /// Speed must be positive and at most 200, source and destination
    /// must differ and both must be nodes of the map. Violations are
    /// surfaced immediately and never recovered.
    pub fn new(road_map: &RoadMap, speed: f64, source: Point, destination: Point) -> Result<Self> {
        if speed <= 0.0 {
            bail!("Speed must be a positive number, got {}", speed);
        }
        if speed > MAX_SPEED {
            bail!("Speed must be {} or less, got {}", MAX_SPEED, speed);
        }
        if source == destination {
            bail!("Source and destination cannot be the same ({})", source);
        }
        if !road_map.contains(&source) {
            bail!("Source {} is not a node of the road map", source);
        }
        if !road_map.contains(&destination) {
            bail!("Destination {} is not a node of the road map", destination);
        }

        Ok(Self {
            speed,
            source,
            destination,
            position: source,
            best_path: Vec::new(),
            next_node: None,
            route_taken: vec![source],
        })
    }

    /// Whether the ambulance has reached its destination
    pub fn is_arrived(&self) -> bool {
        self.position == self.destination
    }

    /// The currently active plan (empty before the first step)
    pub fn best_path(&self) -> &[Point] {
        &self.best_path
    }

    /// The nodes visited so far
    pub fn route_taken(&self) -> &[Point] {
        &self.route_taken
    }

    /// The active plan as a list of road segments, for renderers
    pub fn path_edges(&self) -> Vec<(Point, Point)> {
        self.best_path
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// Advance the ambulance by one movement.
    ///
    /// Plans a fresh route when no sub-goal is active, then performs a
    /// single position update: either the final partial step onto the
    /// next node (snap, elapsed `remaining / speed`) or one full
    /// geometric step along the road (elapsed exactly one tick). On
    /// node arrival the map's congestion is refreshed and the next call
    /// re-plans from the current position.
    ///
    /// Fails when no route to the destination exists under the current
    /// topology; the trip cannot proceed and the error propagates.
    pub fn step(
        &mut self,
        road_map: &mut RoadMap,
        observer: &mut dyn RouteObserver,
    ) -> Result<DriveOutcome> {
        if self.is_arrived() {
            info!("Journey complete. Path taken: {:?}", self.route_taken);
            return Ok(DriveOutcome::Arrived {
                route: self.route_taken.clone(),
            });
        }

        let next_node = match self.next_node {
            Some(node) => node,
            None => self.plan(road_map, observer)?,
        };

        let remaining = geometry::distance(&self.position, &next_node);

        if remaining <= self.speed {
            // Final partial step: snap exactly onto the node
            let elapsed = remaining / self.speed;
            self.position = next_node;
            observer.position_updated(self.position);

            // Node reached: clear the displayed path, refresh traffic,
            // and force a re-plan on the next step
            observer.node_reached(next_node);
            road_map.update_congestion();
            self.next_node = None;

            debug!("Reached node {} after {:.3} time units", next_node, elapsed);
            Ok(DriveOutcome::Moved { elapsed })
        } else {
            // One full tick of travel along the road
            self.position = geometry::step_toward(&self.position, &next_node, self.speed);
            observer.position_updated(self.position);

            debug!("Moved to {}", self.position);
            Ok(DriveOutcome::Moved {
                elapsed: TICK_DURATION,
            })
        }
    }

    /// Re-plan from the current position and pick the next sub-goal.
    fn plan(&mut self, road_map: &RoadMap, observer: &mut dyn RouteObserver) -> Result<Point> {
        let best_path = road_map.select_best_path(&self.position, &self.destination)?;

        // An empty or single-node path means the destination is
        // unreachable; indexing into it would be the latent crash of a
        // naive implementation, so abort the trip explicitly instead.
        if best_path.len() < 2 {
            bail!(
                "No route from {} to {}; trip aborted",
                self.position,
                self.destination
            );
        }

        observer.route_planned(&best_path);

        let next_node = best_path[1];
        self.route_taken.push(next_node);
        self.best_path = best_path;
        self.next_node = Some(next_node);
        Ok(next_node)
    }
}
