use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use speedroute::osm::FileFormat;
use speedroute::{Coordinate, Mode};

#[derive(Debug, thiserror::Error)]
#[error("{nodes} + {ways}: {source}")]
struct GraphLoadError {
    nodes: PathBuf,
    ways: PathBuf,
    source: speedroute::osm::Error,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Xml => FileFormat::Xml,
            Format::XmlGz => FileFormat::XmlGz,
            Format::XmlBz2 => FileFormat::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file with nodes
    nodes_file: PathBuf,

    /// The path to the OSM file with ways (may be the same as the nodes file)
    ways_file: PathBuf,

    /// Latitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lat: f64,

    /// Longitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lon: f64,

    /// Latitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lat: f64,

    /// Longitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lon: f64,

    /// Find the fastest path (using speed limits) instead of the shortest one
    #[arg(long)]
    fast: bool,

    /// Format of the input files, guessed from their content if not provided
    #[arg(long, value_enum)]
    format: Option<Format>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let options = speedroute::osm::Options {
        profile: &speedroute::osm::CAR_PROFILE,
        file_format: cli.format.map_or(FileFormat::Unknown, FileFormat::from),
    };
    let g = speedroute::osm::load_graph_from_files(&options, &cli.nodes_file, &cli.ways_file)
        .map_err(|source| GraphLoadError {
            nodes: cli.nodes_file.clone(),
            ways: cli.ways_file.clone(),
            source,
        })?;
    log::info!("loaded graph with {} nodes", g.len());

    let mode = if cli.fast {
        Mode::ShortestTime
    } else {
        Mode::ShortestDistance
    };

    let path = speedroute::find_path(
        &g,
        Coordinate::new(cli.start_lat, cli.start_lon),
        Coordinate::new(cli.end_lat, cli.end_lon),
        mode,
        speedroute::DEFAULT_STEP_LIMIT,
    )?;

    let path = match path {
        Some(path) => path,
        None => {
            log::warn!("no {} path between the given points", mode);
            println!("{{\"type\": \"FeatureCollection\", \"features\": []}}");
            return Ok(());
        }
    };

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut positions = path.iter().peekable();
    while let Some(position) = positions.next() {
        let suffix = if positions.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", position.lon, position.lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}
