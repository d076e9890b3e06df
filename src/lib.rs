// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

//! Shortest-distance and fastest-time routing over [OpenStreetMap](https://www.openstreetmap.org/)
//! road data.
//!
//! OSM ways and nodes are converted into a directed graph whose edges carry speed limits
//! (see [osm::Profile] for how road classifications map to speeds). Queries between two
//! arbitrary positions are first snapped to the closest graph nodes, and then answered
//! with A* (shortest distance) or Dijkstra (shortest expected travel time).
//!
//! # Example
//!
//! ```no_run
//! let options = speedroute::osm::Options {
//!     profile: &speedroute::osm::CAR_PROFILE,
//!     file_format: speedroute::osm::FileFormat::Unknown,
//! };
//! let g = speedroute::osm::load_graph_from_files(
//!     &options,
//!     "path/to/cambridge.osm",
//!     "path/to/cambridge.osm",
//! ).expect("failed to load cambridge.osm");
//!
//! let origin = speedroute::Coordinate::new(42.355, -71.1009);
//! let destination = speedroute::Coordinate::new(42.3612, -71.092);
//! match speedroute::shortest_time_path(&g, origin, destination) {
//!     Ok(Some(path)) => println!("Path: {:?}", path),
//!     Ok(None) => println!("No path"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod distance;
mod graph;
mod kd;
pub mod osm;
mod search;

pub use distance::earth_distance;
pub use graph::Graph;
pub use kd::KDTree;
pub use osm::{build_graph, BuildError};
pub use search::{
    find_path, find_route, shortest_distance_path, shortest_time_path, CostModel, Mode, Path,
    SearchError, ShortestDistance, ShortestTime, DEFAULT_STEP_LIMIT,
};

/// A position on Earth, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Represents an element of the [Graph]: an OSM node which is part of at least
/// one routable way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub position: Coordinate,
}

/// Represents an outgoing (one-way) connection from a specific [Node].
///
/// `speed_limit` is expressed in miles per hour, and is always finite and positive.
///
/// `to` might not have a known position (if the OSM data references a node without
/// providing it). Users must silently ignore such edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: i64,
    pub speed_limit: f64,
}
