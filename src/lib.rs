//! Ambulance Simulation Library
//!
//! Simulates an ambulance navigating a congested road network, re-planning
//! its route at every intersection. Runs headless; display layers attach
//! through the [`simulation::RouteObserver`] boundary.

pub mod simulation;
