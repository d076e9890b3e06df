// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{CostModel, SearchError};
use crate::{Edge, Graph};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: i64,
    came_from: Option<i64>,
    cost: f64,
    score: f64,
    seq: u64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores (and earlier insertions, on ties) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn reconstruct_path(came_from: &HashMap<i64, i64>, mut last: i64) -> Vec<i64> {
    let mut path = vec![last];

    while let Some(&nd) = came_from.get(&last) {
        path.push(nd);
        last = nd;
    }

    path.reverse();
    path
}

/// Runs a best-first search to find the cheapest route between two nodes
/// in the provided graph, as measured by the provided [CostModel].
///
/// With [ShortestDistance](super::ShortestDistance) this is the
/// [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm), with
/// [ShortestTime](super::ShortestTime) (no heuristic) this is
/// [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
///
/// Returns the sequence of node ids from `from_id` to `to_id` (inclusive),
/// or `None` if `to_id` is not reachable from `from_id`.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [SearchError::StepLimitExceeded]. Concluding that no route exists requires
/// expanding all nodes accessible from the start, which may be time-consuming
/// on large datasets. The recommended value is [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_route<C: CostModel + ?Sized>(
    g: &Graph,
    from_id: i64,
    to_id: i64,
    model: &C,
    step_limit: usize,
) -> Result<Option<Vec<i64>>, SearchError> {
    let to_node = g
        .get_node(to_id)
        .ok_or(SearchError::InvalidReference(to_id))?;
    let from_node = g
        .get_node(from_id)
        .ok_or(SearchError::InvalidReference(from_id))?;

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut finalized: HashSet<i64> = HashSet::default();
    let mut seq: u64 = 0;
    let mut steps: usize = 0;

    queue.push(QueueItem {
        at: from_id,
        came_from: None,
        cost: 0.0,
        score: 0.0,
        seq,
    });

    while let Some(item) = queue.pop() {
        // Stale entries are left in the queue when a node is reached multiple times,
        // only the cheapest one may finalize the node.
        if !finalized.insert(item.at) {
            continue;
        }

        if let Some(before) = item.came_from {
            came_from.insert(item.at, before);
        }

        if item.at == to_id {
            log::debug!(
                "route {} -> {} found after {} steps, cost {}",
                from_id,
                to_id,
                steps,
                item.cost,
            );
            return Ok(Some(reconstruct_path(&came_from, to_id)));
        }

        steps += 1;
        if steps > step_limit {
            return Err(SearchError::StepLimitExceeded);
        }

        // Position of the current node is known: the start node was checked above,
        // and only positioned neighbors are pushed into the queue.
        let at = match g.get_node(item.at) {
            Some(nd) => nd.position,
            None => continue,
        };

        for &Edge {
            to: neighbor_id,
            speed_limit,
        } in g.get_edges(item.at)
        {
            if finalized.contains(&neighbor_id) {
                continue;
            }

            // Check if the referred node has a known position
            if let Some(neighbor) = g.get_node(neighbor_id) {
                let neighbor_cost = item.cost + model.edge_cost(at, neighbor.position, speed_limit);
                seq += 1;
                queue.push(QueueItem {
                    at: neighbor_id,
                    came_from: Some(item.at),
                    cost: neighbor_cost,
                    score: neighbor_cost + model.heuristic(neighbor.position, to_node.position),
                    seq,
                });
            }
        }
    }

    log::debug!(
        "no route {} ({:?}) -> {} ({:?}) after {} steps",
        from_id,
        from_node.position,
        to_id,
        to_node.position,
        steps,
    );
    Ok(None)
}
