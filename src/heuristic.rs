use crate::error::PlanError;
use crate::problem::Problem;
use crate::stat::Stats;

use serde::{Serialize, Serializer};
use std::fmt;

// `Infinite` means the goal cannot be reached; it orders after every finite cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cost {
    Finite(usize),
    Infinite,
}

impl Cost {
    pub fn is_finite(&self) -> bool {
        matches!(self, Cost::Finite(_))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cost::Finite(cost) => write!(f, "{cost}"),
            Cost::Infinite => f.write_str("inf"),
        }
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cost::Finite(cost) => serializer.serialize_u64(*cost as u64),
            Cost::Infinite => serializer.serialize_str("inf"),
        }
    }
}

pub trait Heuristic {
    fn name(&self) -> &'static str;

    fn estimate(&self, problem: &Problem, state: &str, stats: &mut Stats)
        -> Result<Cost, PlanError>;
}

#[derive(Debug, Clone, Copy)]
pub struct LevelSum {
    pub serial: bool,
}

impl Heuristic for LevelSum {
    fn name(&self) -> &'static str {
        "levelsum"
    }

    fn estimate(
        &self,
        problem: &Problem,
        state: &str,
        stats: &mut Stats,
    ) -> Result<Cost, PlanError> {
        let pg = problem.planning_graph(state, self.serial)?;
        stats.record_graph(&pg);
        Ok(pg.h_levelsum(&problem.goal))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IgnorePreconditions;

impl Heuristic for IgnorePreconditions {
    fn name(&self) -> &'static str {
        "ignore-preconditions"
    }

    fn estimate(
        &self,
        problem: &Problem,
        state: &str,
        _stats: &mut Stats,
    ) -> Result<Cost, PlanError> {
        problem.h_ignore_preconditions(state)
    }
}

pub const HEURISTICS: [&str; 2] = ["levelsum", "ignore-preconditions"];

pub fn from_name(name: &str, serial: bool) -> Option<Box<dyn Heuristic>> {
    match name {
        "levelsum" => Some(Box::new(LevelSum { serial })),
        "ignore-preconditions" => Some(Box::new(IgnorePreconditions)),
        _ => None,
    }
}
