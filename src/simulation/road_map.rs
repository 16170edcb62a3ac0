//! Road network graph with live traffic congestion
//!
//! Owns the undirected road graph and implements the multi-criteria
//! path selection: exhaustive simple-path enumeration scored by a
//! weighted blend of travel distance and per-node congestion.

use anyhow::{bail, Context, Result};
use log::warn;
use ordered_float::OrderedFloat;
use petgraph::algo::{all_simple_paths, has_path_connecting};
use petgraph::graph::{NodeIndex, UnGraph};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::collections::HashMap;

use super::types::{PathMetrics, Point, MAX_CONGESTION, PATH_COST_WEIGHT, TRAFFIC_WEIGHT};

/// Node payload: an intersection on the map
#[derive(Debug, Clone)]
pub struct MapNode {
    pub position: Point,
    /// Traffic load at this intersection, 0..=100
    pub congestion: u8,
    pub name: String,
}

/// The road network with mutable per-node congestion.
///
/// Structure (nodes and roads) is fixed after construction; only
/// congestion values change over the lifetime of a simulation.
pub struct RoadMap {
    /// Underlying undirected graph; edge weights are road lengths
    graph: UnGraph<MapNode, f64>,

    /// Maps node coordinates to their indices in the graph
    node_lookup: HashMap<(OrderedFloat<f64>, OrderedFloat<f64>), NodeIndex>,

    /// Scoring weight applied to normalized path distance
    path_cost_weight: f64,

    /// Scoring weight applied to accumulated congestion
    traffic_weight: f64,

    /// Optional seeded RNG for reproducible congestion updates
    rng: Option<StdRng>,
}

impl Default for RoadMap {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadMap {
    fn new_internal(rng: Option<StdRng>) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_lookup: HashMap::new(),
            path_cost_weight: PATH_COST_WEIGHT,
            traffic_weight: TRAFFIC_WEIGHT,
            rng,
        }
    }

    pub fn new() -> Self {
        Self::new_internal(None)
    }

    /// Create a RoadMap with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(Some(StdRng::seed_from_u64(seed)))
    }

    /// Override the default scoring weights
    pub fn set_score_weights(&mut self, path_cost_weight: f64, traffic_weight: f64) {
        self.path_cost_weight = path_cost_weight;
        self.traffic_weight = traffic_weight;
    }

    /// Add an intersection to the map.
    ///
    /// Coordinates are the node identity; adding the same coordinates
    /// twice is rejected. Congestion must be within 0..=100.
    pub fn add_node(&mut self, position: Point, congestion: u8, name: &str) -> Result<()> {
        if congestion > MAX_CONGESTION {
            bail!(
                "Congestion {} for node {} is outside 0..={}",
                congestion,
                position,
                MAX_CONGESTION
            );
        }
        if self.node_lookup.contains_key(&position.key()) {
            bail!("Duplicate node at {}", position);
        }

        let index = self.graph.add_node(MapNode {
            position,
            congestion,
            name: name.to_string(),
        });
        self.node_lookup.insert(position.key(), index);
        Ok(())
    }

    /// Add a road between two existing nodes.
    ///
    /// The weight is fixed to the Euclidean distance between the
    /// endpoints and never changes afterwards. Self-loops and parallel
    /// roads are rejected.
    pub fn add_road(&mut self, a: Point, b: Point) -> Result<f64> {
        let a_index = self.node_index(&a)?;
        let b_index = self.node_index(&b)?;

        if a_index == b_index {
            bail!("Road from {} to itself is not allowed", a);
        }
        if self.graph.find_edge(a_index, b_index).is_some() {
            bail!("Road between {} and {} already exists", a, b);
        }

        let weight = a.distance(&b);
        self.graph.add_edge(a_index, b_index, weight);
        Ok(weight)
    }

    fn node_index(&self, position: &Point) -> Result<NodeIndex> {
        self.node_lookup
            .get(&position.key())
            .copied()
            .with_context(|| format!("Node {} not found in road map", position))
    }

    /// Whether the given coordinates are a node of the map
    pub fn contains(&self, position: &Point) -> bool {
        self.node_lookup.contains_key(&position.key())
    }

    /// Look up a node's coordinates by its display name
    pub fn find_node_by_name(&self, name: &str) -> Option<Point> {
        self.graph
            .node_weights()
            .find(|node| node.name == name)
            .map(|node| node.position)
    }

    /// Current congestion at a node
    pub fn congestion_at(&self, position: &Point) -> Result<u8> {
        let index = self.node_index(position)?;
        Ok(self.graph[index].congestion)
    }

    /// Set the congestion at a node (used when priming test scenarios)
    pub fn set_congestion(&mut self, position: &Point, congestion: u8) -> Result<()> {
        if congestion > MAX_CONGESTION {
            bail!("Congestion {} is outside 0..={}", congestion, MAX_CONGESTION);
        }
        let index = self.node_index(position)?;
        self.graph[index].congestion = congestion;
        Ok(())
    }

    /// Randomize traffic congestion across the whole map.
    ///
    /// Every node is redrawn independently and uniformly from 0..=100;
    /// each call is independent of prior values.
    pub fn update_congestion(&mut self) {
        match &mut self.rng {
            Some(rng) => {
                for node in self.graph.node_weights_mut() {
                    node.congestion = rng.random_range(0..=MAX_CONGESTION);
                }
            }
            None => {
                let mut rng = rand::rng();
                for node in self.graph.node_weights_mut() {
                    node.congestion = rng.random_range(0..=MAX_CONGESTION);
                }
            }
        }
    }

    /// Number of nodes in the map
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of roads in the map
    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes of the map (used by renderers)
    pub fn nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.graph.node_weights()
    }

    /// All roads of the map as (endpoint, endpoint, length) triples
    pub fn roads(&self) -> impl Iterator<Item = (Point, Point, f64)> + '_ {
        self.graph.edge_indices().map(|edge| {
            let (a, b) = self
                .graph
                .edge_endpoints(edge)
                .expect("edge index from iteration is valid");
            (self.graph[a].position, self.graph[b].position, self.graph[edge])
        })
    }

    /// Enumerate every simple path between two nodes.
    ///
    /// Returns an empty collection (after logging a warning) when the
    /// nodes are in different connected components. Paths are sorted
    /// into lexicographic coordinate order so downstream tie-breaks are
    /// deterministic regardless of graph-internal visit order.
    ///
    /// Complexity is exponential in the branching factor; the map sizes
    /// this engine targets stay in the tens of nodes.
    pub fn enumerate_simple_paths(
        &self,
        source: &Point,
        destination: &Point,
    ) -> Result<Vec<Vec<Point>>> {
        let source_index = self.node_index(source)?;
        let destination_index = self.node_index(destination)?;

        if !has_path_connecting(&self.graph, source_index, destination_index, None) {
            warn!("No path exists between {} and {}", source, destination);
            return Ok(Vec::new());
        }

        let mut paths: Vec<Vec<Point>> =
            all_simple_paths::<Vec<NodeIndex>, _, std::hash::RandomState>(
                &self.graph,
                source_index,
                destination_index,
                0,
                None,
            )
                .map(|path| {
                    path.into_iter()
                        .map(|index| self.graph[index].position)
                        .collect()
                })
                .collect();

        paths.sort_by_key(|path| path.iter().map(Point::key).collect::<Vec<_>>());
        Ok(paths)
    }

    /// Compute the distance and congestion costs of a path.
    ///
    /// Distance is the sum of the weights of the traversed roads;
    /// congestion is summed over every node except the destination.
    pub fn score_path(&self, path: &[Point]) -> Result<PathMetrics> {
        let mut distance_cost = 0.0;
        let mut congestion_cost: u32 = 0;

        for pair in path.windows(2) {
            let a_index = self.node_index(&pair[0])?;
            let b_index = self.node_index(&pair[1])?;
            let edge = self
                .graph
                .find_edge(a_index, b_index)
                .with_context(|| format!("No road between {} and {}", pair[0], pair[1]))?;

            distance_cost += self.graph[edge];
            congestion_cost += u32::from(self.graph[a_index].congestion);
        }

        Ok(PathMetrics {
            distance_cost,
            congestion_cost,
        })
    }

    /// Select the best path between two nodes under current traffic.
    ///
    /// Every candidate's distance cost is normalized against the
    /// maximum candidate distance (the longest path always maps to
    /// exactly 100), then blended with its congestion cost:
    ///
    /// `total = path_cost_weight * normalized + traffic_weight * congestion`
    ///
    /// The path with the minimum total wins; ties go to the first
    /// minimal path in canonical enumeration order. Returns an empty
    /// path when the nodes are not connected — callers must not index
    /// into the result without checking.
    pub fn select_best_path(&self, source: &Point, destination: &Point) -> Result<Vec<Point>> {
        let paths = self.enumerate_simple_paths(source, destination)?;
        if paths.is_empty() {
            // Enumeration already warned; the empty path carries the signal
            return Ok(Vec::new());
        }

        let mut scored = Vec::with_capacity(paths.len());
        for path in paths {
            let metrics = self.score_path(&path)?;
            scored.push((path, metrics));
        }

        let max_distance = scored
            .iter()
            .map(|(_, metrics)| OrderedFloat(metrics.distance_cost))
            .max()
            .expect("candidate list is non-empty")
            .into_inner();

        let mut best: Option<(Vec<Point>, f64)> = None;
        for (path, metrics) in scored {
            let normalized = (metrics.distance_cost / max_distance) * 100.0;
            let total = self.path_cost_weight * normalized
                + self.traffic_weight * f64::from(metrics.congestion_cost);

            match &best {
                Some((_, best_total)) if total >= *best_total => {}
                _ => best = Some((path, total)),
            }
        }

        Ok(best.expect("at least one candidate was scored").0)
    }
}
