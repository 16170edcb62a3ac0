//! Simulation driver tying the road map and the ambulance together
//!
//! Owns the simulated clock and drives the ambulance step by step,
//! delegating time pacing to an external [`TimePacer`].

use anyhow::Result;

use super::ambulance::{Ambulance, DriveOutcome};
use super::observer::RouteObserver;
use super::road_map::RoadMap;
use super::types::Point;

/// Scheduler boundary: "advance simulated time by `duration`, then
/// resume". The core never paces itself against the wall clock.
pub trait TimePacer {
    fn wait(&mut self, duration: f64);
}

/// Runs the simulation as fast as possible (tests, headless batch runs)
pub struct InstantPacer;

impl TimePacer for InstantPacer {
    fn wait(&mut self, _duration: f64) {}
}

/// Paces simulated time against the wall clock, scaled by `factor`
/// (0.1 means one simulated time unit takes 0.1 wall-clock seconds).
pub struct RealtimePacer {
    pub factor: f64,
}

impl TimePacer for RealtimePacer {
    fn wait(&mut self, duration: f64) {
        let seconds = duration * self.factor;
        if seconds > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(seconds));
        }
    }
}

/// The main simulation world
pub struct SimWorld {
    pub road_map: RoadMap,
    pub ambulance: Ambulance,

    /// Accumulated simulated time
    pub time: f64,
}

impl SimWorld {
    pub fn new(road_map: RoadMap, ambulance: Ambulance) -> Self {
        Self {
            road_map,
            ambulance,
            time: 0.0,
        }
    }

    /// Advance the simulation by one ambulance movement.
    pub fn step(&mut self, observer: &mut dyn RouteObserver) -> Result<DriveOutcome> {
        let outcome = self.ambulance.step(&mut self.road_map, observer)?;
        if let DriveOutcome::Moved { elapsed } = outcome {
            self.time += elapsed;
        }
        Ok(outcome)
    }

    /// Drive the ambulance until it arrives, pacing each movement
    /// through `pacer`. Returns the realized route.
    pub fn run(
        &mut self,
        pacer: &mut dyn TimePacer,
        observer: &mut dyn RouteObserver,
    ) -> Result<Vec<Point>> {
        loop {
            match self.step(observer)? {
                DriveOutcome::Moved { elapsed } => pacer.wait(elapsed),
                DriveOutcome::Arrived { route } => return Ok(route),
            }
        }
    }

    /// Build the built-in demo world: a ten-intersection network named
    /// after Kathmandu locations, with a connected topology offering
    /// several alternative routes between most pairs.
    pub fn create_demo_world(
        speed: f64,
        from: &str,
        to: &str,
        seed: Option<u64>,
    ) -> Result<Self> {
        let road_map = match seed {
            Some(seed) => demo_road_map(RoadMap::new_with_seed(seed))?,
            None => demo_road_map(RoadMap::new())?,
        };

        let source = road_map
            .find_node_by_name(from)
            .ok_or_else(|| anyhow::anyhow!("Unknown location: {}", from))?;
        let destination = road_map
            .find_node_by_name(to)
            .ok_or_else(|| anyhow::anyhow!("Unknown location: {}", to))?;

        let ambulance = Ambulance::new(&road_map, speed, source, destination)?;
        Ok(Self::new(road_map, ambulance))
    }
}

/// Populate a map with the demo network.
fn demo_road_map(mut map: RoadMap) -> Result<RoadMap> {
    let locations: [(&str, f64, f64, u8); 10] = [
        ("Pulchowk", 0.0, 0.0, 25),
        ("Patan", 2.0, -2.0, 40),
        ("Gwarko", 5.0, -3.0, 15),
        ("Thapathali", 1.0, 2.0, 60),
        ("Maitighar", 3.0, 3.0, 70),
        ("Baneswor", 6.0, 4.0, 55),
        ("RNAC", 2.0, 4.0, 35),
        ("Balaju", 0.0, 7.0, 20),
        ("Kapan", 5.0, 8.0, 30),
        ("Chabel", 7.0, 7.0, 45),
    ];

    for (name, x, y, congestion) in locations {
        map.add_node(Point::new(x, y), congestion, name)?;
    }

    let roads = [
        ("Pulchowk", "Patan"),
        ("Patan", "Gwarko"),
        ("Patan", "Maitighar"),
        ("Pulchowk", "Thapathali"),
        ("Thapathali", "Maitighar"),
        ("Thapathali", "RNAC"),
        ("RNAC", "Maitighar"),
        ("RNAC", "Balaju"),
        ("Balaju", "Kapan"),
        ("Maitighar", "Kapan"),
        ("Maitighar", "Baneswor"),
        ("Gwarko", "Baneswor"),
        ("Baneswor", "Chabel"),
        ("Kapan", "Chabel"),
    ];

    for (a, b) in roads {
        let a = map
            .find_node_by_name(a)
            .ok_or_else(|| anyhow::anyhow!("Demo map node {} missing", a))?;
        let b = map
            .find_node_by_name(b)
            .ok_or_else(|| anyhow::anyhow!("Demo map node {} missing", b))?;
        map.add_road(a, b)?;
    }

    Ok(map)
}
