// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

mod best_first;
mod cost;
mod error;

pub use best_first::find_route;
pub use cost::{CostModel, Mode, ShortestDistance, ShortestTime};
pub use error::{SearchError, DEFAULT_STEP_LIMIT};

use crate::{Coordinate, Graph};

/// Ordered sequence of positions along a route, from the node closest to the origin
/// to the node closest to the destination (both inclusive).
pub type Path = Vec<Coordinate>;

/// Finds the cheapest path between two arbitrary positions, according to the provided [Mode].
///
/// Both positions are first resolved to the closest nodes with [Graph::find_nearest_node],
/// then [find_route] is used to find the route between them.
///
/// Returns `Ok(None)` if the destination is not reachable from the origin.
pub fn find_path(
    g: &Graph,
    origin: Coordinate,
    destination: Coordinate,
    mode: Mode,
    step_limit: usize,
) -> Result<Option<Path>, SearchError> {
    let from = g.find_nearest_node(origin).ok_or(SearchError::EmptyGraph)?;
    let to = g
        .find_nearest_node(destination)
        .ok_or(SearchError::EmptyGraph)?;
    log::debug!("{} route from node {} to node {}", mode, from.id, to.id);

    let route = match mode {
        Mode::ShortestDistance => find_route(g, from.id, to.id, &ShortestDistance, step_limit)?,
        Mode::ShortestTime => find_route(g, from.id, to.id, &ShortestTime, step_limit)?,
    };

    route
        .map(|ids| {
            ids.into_iter()
                .map(|id| {
                    g.get_node(id)
                        .map(|nd| nd.position)
                        .ok_or(SearchError::InvalidReference(id))
                })
                .collect::<Result<Path, _>>()
        })
        .transpose()
}

/// Returns the shortest path (in terms of distance) between two positions,
/// or `Ok(None)` if there is no such path.
pub fn shortest_distance_path(
    g: &Graph,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<Option<Path>, SearchError> {
    find_path(g, origin, destination, Mode::ShortestDistance, usize::MAX)
}

/// Returns the fastest path (in terms of expected travel time, taking speed limits
/// into account) between two positions, or `Ok(None)` if there is no such path.
pub fn shortest_time_path(
    g: &Graph,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<Option<Path>, SearchError> {
    find_path(g, origin, destination, Mode::ShortestTime, usize::MAX)
}
