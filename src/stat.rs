use crate::graph::PlanningGraph;
use crate::heuristic::Cost;

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub heuristic: String,
    pub state: String,
    pub cost: Cost,
    pub literal_levels: usize,
    pub action_levels: usize,
    pub literal_nodes: usize,
    pub action_nodes: usize,
    pub literal_mutexes: usize,
    pub action_mutexes: usize,
    pub time_us: u64,
}

impl Stats {
    pub fn new(heuristic: &str, state: &str) -> Self {
        Stats {
            heuristic: heuristic.to_string(),
            state: state.to_string(),
            cost: Cost::Finite(0),
            literal_levels: 0,
            action_levels: 0,
            literal_nodes: 0,
            action_nodes: 0,
            literal_mutexes: 0,
            action_mutexes: 0,
            time_us: 0,
        }
    }

    pub(crate) fn record_graph(&mut self, pg: &PlanningGraph) {
        self.literal_levels = pg.s_levels().len();
        self.action_levels = pg.a_levels().len();
        self.literal_nodes = pg.s_levels().iter().map(|level| level.len()).sum();
        self.action_nodes = pg.a_levels().iter().map(|level| level.len()).sum();
        self.literal_mutexes = pg.s_levels().iter().map(|level| level.mutex_pairs()).sum();
        self.action_mutexes = pg.a_levels().iter().map(|level| level.mutex_pairs()).sum();
    }

    pub fn print(&self) {
        info!(
            "State {} {} {} Time(microseconds) {:?} Levels {:?}/{:?} Nodes {:?}/{:?} Mutex pairs {:?}/{:?}",
            self.state,
            self.heuristic,
            self.cost,
            self.time_us,
            self.literal_levels,
            self.action_levels,
            self.literal_nodes,
            self.action_nodes,
            self.literal_mutexes,
            self.action_mutexes
        );
    }
}
