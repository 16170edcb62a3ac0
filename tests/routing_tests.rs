//! Road map and path selection tests

use ambulance_sim::simulation::{load_road_map, Point, RoadMap, SimWorld, MAX_CONGESTION};

/// Four-node diamond: two candidate routes from S to D, one short but
/// congested, one longer but clear.
fn diamond_map() -> (RoadMap, Point, Point, Point, Point) {
    let mut map = RoadMap::new_with_seed(42);

    let s = Point::new(0.0, 0.0);
    let n1 = Point::new(3.0, 4.0);
    let n2 = Point::new(0.0, 5.0);
    let d = Point::new(6.0, 8.0);

    map.add_node(s, 0, "S").unwrap();
    map.add_node(n1, 80, "N1").unwrap();
    map.add_node(n2, 10, "N2").unwrap();
    map.add_node(d, 0, "D").unwrap();

    map.add_road(s, n1).unwrap();
    map.add_road(n1, d).unwrap();
    map.add_road(s, n2).unwrap();
    map.add_road(n2, d).unwrap();

    (map, s, n1, n2, d)
}

#[test]
fn test_distance_symmetry() {
    let a = Point::new(1.5, -2.0);
    let b = Point::new(-4.0, 7.25);
    assert_eq!(a.distance(&b), b.distance(&a));

    let c = Point::new(0.0, 0.0);
    assert_eq!(a.distance(&c), c.distance(&a));
    assert_eq!(c.distance(&c), 0.0);
}

#[test]
fn test_road_weight_is_euclidean_distance() {
    let (map, _s, _n1, _n2, _d) = diamond_map();

    let weights: Vec<f64> = map.roads().map(|(_, _, weight)| weight).collect();
    assert_eq!(weights.len(), 4);

    // S-N1, N1-D and S-N2 are all length 5
    assert_eq!(
        weights.iter().filter(|w| (**w - 5.0).abs() < 1e-12).count(),
        3
    );
    // N2-D is sqrt(45)
    assert!(weights
        .iter()
        .any(|w| (*w - 45.0_f64.sqrt()).abs() < 1e-12));
}

#[test]
fn test_congestion_bounds_after_update() {
    let (mut map, s, n1, n2, d) = diamond_map();

    for _ in 0..5 {
        map.update_congestion();
        for node in [s, n1, n2, d] {
            assert!(map.congestion_at(&node).unwrap() <= MAX_CONGESTION);
        }
    }
}

#[test]
fn test_path_cost_additivity() {
    let (map, s, n1, _, d) = diamond_map();

    let metrics = map.score_path(&[s, n1, d]).unwrap();
    assert!((metrics.distance_cost - 10.0).abs() < 1e-12);
    // Congestion sums S (0) and N1 (80); the destination is excluded
    assert_eq!(metrics.congestion_cost, 80);
}

#[test]
fn test_congestion_cost_excludes_destination() {
    let (mut map, s, _, n2, d) = diamond_map();
    map.set_congestion(&d, 100).unwrap();

    let metrics = map.score_path(&[s, n2, d]).unwrap();
    assert_eq!(metrics.congestion_cost, 10);
}

#[test]
fn test_enumerates_all_simple_paths() {
    let (map, s, n1, n2, d) = diamond_map();

    let paths = map.enumerate_simple_paths(&s, &d).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&vec![s, n1, d]));
    assert!(paths.contains(&vec![s, n2, d]));
}

#[test]
fn test_enumeration_on_branching_network() {
    let world = SimWorld::create_demo_world(2.0, "Pulchowk", "Chabel", Some(5)).unwrap();
    let source = world.road_map.find_node_by_name("Pulchowk").unwrap();
    let destination = world.road_map.find_node_by_name("Chabel").unwrap();

    let paths = world
        .road_map
        .enumerate_simple_paths(&source, &destination)
        .unwrap();

    // The demo network offers many alternatives between far corners
    assert!(paths.len() > 2);
    for path in &paths {
        assert_eq!(*path.first().unwrap(), source);
        assert_eq!(*path.last().unwrap(), destination);
        // Simple: no node repeats within a path
        for (i, node) in path.iter().enumerate() {
            assert!(!path[i + 1..].contains(node));
        }
    }
}

#[test]
fn test_selects_low_traffic_route_over_shorter_one() {
    let (map, s, _, n2, d) = diamond_map();

    // S->N1->D: distance 10, congestion 80, total ~202.7
    // S->N2->D: distance ~11.708, congestion 10, total 70
    let best = map.select_best_path(&s, &d).unwrap();
    assert_eq!(best, vec![s, n2, d]);
}

#[test]
fn test_selection_is_deterministic_between_congestion_updates() {
    let (map, s, _, _, d) = diamond_map();

    let first = map.select_best_path(&s, &d).unwrap();
    let second = map.select_best_path(&s, &d).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_score_weights_override() {
    let (mut map, s, n1, _, d) = diamond_map();

    // Distance only: the geometrically shorter route wins despite traffic
    map.set_score_weights(1.0, 0.0);
    let best = map.select_best_path(&s, &d).unwrap();
    assert_eq!(best, vec![s, n1, d]);
}

#[test]
fn test_no_path_between_disconnected_components() {
    let mut map = RoadMap::new();

    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(10.0, 10.0);
    let d = Point::new(11.0, 10.0);

    map.add_node(a, 0, "A").unwrap();
    map.add_node(b, 0, "B").unwrap();
    map.add_node(c, 0, "C").unwrap();
    map.add_node(d, 0, "D").unwrap();
    map.add_road(a, b).unwrap();
    map.add_road(c, d).unwrap();

    assert!(map.enumerate_simple_paths(&a, &c).unwrap().is_empty());
    assert!(map.select_best_path(&a, &c).unwrap().is_empty());
}

#[test]
fn test_structural_invariants_rejected() {
    let mut map = RoadMap::new();
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 1.0);

    map.add_node(a, 10, "A").unwrap();
    map.add_node(b, 10, "B").unwrap();

    // Duplicate coordinates are the node identity
    assert!(map.add_node(a, 0, "A2").is_err());
    // Congestion outside 0..=100
    assert!(map.add_node(Point::new(2.0, 2.0), 101, "C").is_err());
    // Self-loops and parallel roads
    assert!(map.add_road(a, a).is_err());
    map.add_road(a, b).unwrap();
    assert!(map.add_road(a, b).is_err());
    assert!(map.add_road(b, a).is_err());
}

#[test]
fn test_unknown_node_is_an_error() {
    let (map, s, _, _, _) = diamond_map();
    let stranger = Point::new(99.0, 99.0);

    assert!(map.select_best_path(&s, &stranger).is_err());
    assert!(map.enumerate_simple_paths(&stranger, &s).is_err());
    assert!(map.congestion_at(&stranger).is_err());
}

#[test]
fn test_demo_world_lookup_by_name() {
    let world = SimWorld::create_demo_world(2.0, "Pulchowk", "Chabel", Some(1)).unwrap();

    assert_eq!(world.road_map.node_count(), 10);
    assert_eq!(world.road_map.road_count(), 14);
    assert_eq!(
        world.road_map.find_node_by_name("Maitighar"),
        Some(Point::new(3.0, 3.0))
    );
    assert_eq!(world.road_map.find_node_by_name("Nowhere"), None);
}

#[test]
fn test_load_road_map_from_csv() {
    let dir = std::env::temp_dir().join("ambulance_sim_loader_test");
    std::fs::create_dir_all(&dir).unwrap();

    let points = dir.join("points.csv");
    let roads = dir.join("roads.csv");
    std::fs::write(
        &points,
        "x,y,congestion,name\n0,0,25,Alpha\n3,4,50,Bravo\n6,8,10,Charlie\n",
    )
    .unwrap();
    std::fs::write(&roads, "label,x1,y1,x2,y2\nR1,0,0,3,4\nR2,3,4,6,8\n").unwrap();

    let map = load_road_map(&points, &roads, Some(3)).unwrap();
    assert_eq!(map.node_count(), 3);
    assert_eq!(map.road_count(), 2);
    assert_eq!(map.find_node_by_name("Bravo"), Some(Point::new(3.0, 4.0)));
    assert_eq!(map.congestion_at(&Point::new(3.0, 4.0)).unwrap(), 50);

    let metrics = map
        .score_path(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 8.0),
        ])
        .unwrap();
    assert!((metrics.distance_cost - 10.0).abs() < 1e-12);
}

#[test]
fn test_load_road_map_missing_file() {
    let missing = std::path::Path::new("/nonexistent/points.csv");
    let also_missing = std::path::Path::new("/nonexistent/roads.csv");
    assert!(load_road_map(missing, also_missing, None).is_err());
}
