mod catalogue;
mod mutex;
mod node;

pub use catalogue::{noop_actions, ActionCatalogue, ActionKey, CatalogueEntry};
pub use node::{ActionId, ActionNode, Level, LevelId, PgNode, Relations, StateId, StateNode};

use crate::common::{FluentState, Literal};
use crate::error::PlanError;
use crate::heuristic::Cost;

use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// A leveled planning graph built for one state.
///
/// Literal level `i` and literal level `i + 1` are joined by action level `i`.
/// The graph is built completely by [`PlanningGraph::new`] and is read-only
/// afterwards; build a new one for every state.
#[derive(Debug)]
pub struct PlanningGraph {
    fs: FluentState,
    serial: bool,
    s_levels: Vec<Level<StateNode>>,
    a_levels: Vec<Level<ActionNode>>,
}

impl PlanningGraph {
    #[instrument(skip_all, name = "planning_graph", fields(serial = serial, actions = catalogue.len()), level = "debug")]
    pub fn new(
        catalogue: &ActionCatalogue,
        state: FluentState,
        serial: bool,
    ) -> Result<Self, PlanError> {
        let mut pg = PlanningGraph {
            fs: state,
            serial,
            s_levels: Vec::new(),
            a_levels: Vec::new(),
        };
        pg.create_graph(catalogue)?;
        Ok(pg)
    }

    fn create_graph(&mut self, catalogue: &ActionCatalogue) -> Result<(), PlanError> {
        if !self.s_levels.is_empty() || !self.a_levels.is_empty() {
            return Err(PlanError::InvalidState);
        }

        // S0 holds the state itself and has no mutexes.
        let mut s0 = Level::default();
        for literal in self.fs.literals() {
            s0.insert(StateNode::new(literal));
        }
        self.s_levels.push(s0);

        let mut level = 0;
        loop {
            self.add_action_level(level, catalogue);
            let a_mutexes =
                mutex::update_a_mutex(&mut self.a_levels[level], &self.s_levels[level], self.serial);
            level += 1;
            self.add_literal_level(level);
            let s_mutexes =
                mutex::update_s_mutex(&mut self.s_levels[level], &self.a_levels[level - 1]);
            debug!("level {level}: {a_mutexes} action mutexes, {s_mutexes} literal mutexes");

            if self.s_levels[level].same_nodes(&self.s_levels[level - 1]) {
                break;
            }
        }

        debug!("leveled after {level} action levels");
        Ok(())
    }

    fn add_action_level(&mut self, level: usize, catalogue: &ActionCatalogue) {
        let current_s_nodes = &mut self.s_levels[level];
        let mut a_level = Level::default();

        for entry in catalogue.iter() {
            if !entry.prenodes().iter().all(|p| current_s_nodes.contains(p)) {
                continue;
            }
            let (a_id, inserted) = a_level.insert(ActionNode::new(Arc::clone(entry)));
            if !inserted {
                continue;
            }
            for prenode in entry.prenodes() {
                if let Some(s_id) = current_s_nodes.find(prenode) {
                    current_s_nodes.node_mut(s_id).relations.children.insert(a_id);
                    a_level.node_mut(a_id).relations.parents.insert(s_id);
                }
            }
        }

        debug!(
            "added {} action nodes out of {} to A{level}",
            a_level.len(),
            catalogue.len()
        );
        self.a_levels.push(a_level);
    }

    fn add_literal_level(&mut self, level: usize) {
        let parent_a_nodes = &mut self.a_levels[level - 1];
        let mut s_level = Level::default();
        let mut total = 0;

        for (index, parent_a_node) in parent_a_nodes.nodes.iter_mut().enumerate() {
            let a_id = ActionId::from_index(index);
            for effnode in parent_a_node.entry.effnodes() {
                let (s_id, _) = s_level.insert(StateNode::new(effnode.clone()));
                s_level.node_mut(s_id).relations.parents.insert(a_id);
                parent_a_node.relations.children.insert(s_id);
                total += 1;
            }
        }

        debug!(
            "added {} unique literal nodes out of {total} effects to S{level}",
            s_level.len()
        );
        trace!(
            "S{level}: {:?}",
            s_level
                .iter()
                .map(|(_, node)| node.literal().to_string())
                .collect::<Vec<_>>()
        );
        self.s_levels.push(s_level);
    }

    pub fn s_levels(&self) -> &[Level<StateNode>] {
        &self.s_levels
    }

    pub fn a_levels(&self) -> &[Level<ActionNode>] {
        &self.a_levels
    }

    pub fn literal_level(&self, literal: &Literal) -> Option<usize> {
        self.s_levels
            .iter()
            .position(|level| level.contains(literal))
    }

    /// Sum over `goal` of the earliest level at which each literal appears.
    ///
    /// Assumes the goal literals are independent, so it is not admissible
    /// when they interact. Infinite if some literal never appears.
    pub fn h_levelsum(&self, goal: &[Literal]) -> Cost {
        let mut level_sum = 0;
        for literal in goal {
            match self.literal_level(literal) {
                Some(level) => level_sum += level,
                None => {
                    debug!("goal literal {literal} unreachable");
                    return Cost::Infinite;
                }
            }
        }
        Cost::Finite(level_sum)
    }
}
