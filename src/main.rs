use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use ambulance_sim::simulation::{
    load_road_map, Ambulance, InstantPacer, Point, RealtimePacer, RouteObserver, SimWorld,
};

#[derive(Parser)]
#[command(name = "ambulance_sim")]
#[command(about = "Ambulance dispatch simulation over a congested road network")]
struct Cli {
    /// Name of the starting location
    #[arg(long, default_value = "Pulchowk")]
    from: String,

    /// Name of the destination location
    #[arg(long, default_value = "Kapan")]
    to: String,

    /// Ambulance speed in map units per tick
    #[arg(long, default_value = "2.0")]
    speed: f64,

    /// Points CSV file (x,y,congestion,name); requires --roads
    #[arg(long, requires = "roads")]
    points: Option<PathBuf>,

    /// Roads CSV file (label,x1,y1,x2,y2); requires --points
    #[arg(long, requires = "points")]
    roads: Option<PathBuf>,

    /// Seed for reproducible congestion updates
    #[arg(long)]
    seed: Option<u64>,

    /// Wall-clock seconds per simulated time unit
    #[arg(long, default_value = "0.1")]
    realtime_factor: f64,

    /// Run without wall-clock pacing
    #[arg(long)]
    fast: bool,
}

/// Logs route and position updates as the simulation progresses
struct LogObserver;

impl RouteObserver for LogObserver {
    fn route_planned(&mut self, path: &[Point]) {
        info!("Planned route: {:?}", path);
    }

    fn position_updated(&mut self, position: Point) {
        debug!("Ambulance at {}", position);
    }

    fn node_reached(&mut self, node: Point) {
        info!("Reached {}; refreshing traffic conditions", node);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut world = match (&cli.points, &cli.roads) {
        (Some(points), Some(roads)) => {
            let road_map = load_road_map(points, roads, cli.seed)?;
            let source = road_map
                .find_node_by_name(&cli.from)
                .ok_or_else(|| anyhow::anyhow!("Unknown location: {}", cli.from))?;
            let destination = road_map
                .find_node_by_name(&cli.to)
                .ok_or_else(|| anyhow::anyhow!("Unknown location: {}", cli.to))?;
            let ambulance = Ambulance::new(&road_map, cli.speed, source, destination)?;
            SimWorld::new(road_map, ambulance)
        }
        _ => SimWorld::create_demo_world(cli.speed, &cli.from, &cli.to, cli.seed)?,
    };

    println!(
        "Dispatching ambulance from {} to {} (speed {}, {} nodes, {} roads)",
        cli.from,
        cli.to,
        cli.speed,
        world.road_map.node_count(),
        world.road_map.road_count()
    );

    let mut observer = LogObserver;
    let route = if cli.fast {
        world.run(&mut InstantPacer, &mut observer)?
    } else {
        let mut pacer = RealtimePacer {
            factor: cli.realtime_factor,
        };
        world.run(&mut pacer, &mut observer)?
    };

    println!("Journey complete in {:.2} time units", world.time);
    println!(
        "Path taken: {}",
        route
            .iter()
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    Ok(())
}
