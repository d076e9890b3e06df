// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Coordinate};

/// Describes what a path search minimizes.
///
/// `edge_cost` must be non-negative, and `heuristic` must never overestimate the
/// cheapest remaining cost to the target, otherwise returned paths may not be optimal.
pub trait CostModel {
    /// Cost of traversing an edge between two positions with the given speed limit (mph).
    fn edge_cost(&self, from: Coordinate, to: Coordinate, speed_limit: f64) -> f64;

    /// Lower bound of the cost from `at` to `target`.
    fn heuristic(&self, at: Coordinate, target: Coordinate) -> f64;
}

/// Minimizes the traveled distance, in miles. Uses the crow-flies distance to
/// the target as the heuristic, which turns the search into A*.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortestDistance;

impl CostModel for ShortestDistance {
    #[inline]
    fn edge_cost(&self, from: Coordinate, to: Coordinate, _speed_limit: f64) -> f64 {
        earth_distance(from, to)
    }

    #[inline]
    fn heuristic(&self, at: Coordinate, target: Coordinate) -> f64 {
        earth_distance(at, target)
    }
}

/// Minimizes the expected travel time, in hours, assuming every edge is driven
/// at its speed limit.
///
/// No heuristic is used (the search degenerates to Dijkstra's algorithm):
/// the remaining distance alone is not a lower bound of the remaining time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortestTime;

impl CostModel for ShortestTime {
    #[inline]
    fn edge_cost(&self, from: Coordinate, to: Coordinate, speed_limit: f64) -> f64 {
        earth_distance(from, to) / speed_limit
    }

    #[inline]
    fn heuristic(&self, _at: Coordinate, _target: Coordinate) -> f64 {
        0.0
    }
}

/// Selects one of the built-in [CostModels](CostModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// See [ShortestDistance].
    ShortestDistance,

    /// See [ShortestTime].
    ShortestTime,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShortestDistance => write!(f, "shortest distance"),
            Self::ShortestTime => write!(f, "shortest time"),
        }
    }
}
