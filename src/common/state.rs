use super::{Fluent, Literal};
use crate::error::PlanError;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluentState {
    #[serde(default)]
    pub pos: Vec<Fluent>,
    #[serde(default)]
    pub neg: Vec<Fluent>,
}

impl FluentState {
    pub fn new(pos: Vec<Fluent>, neg: Vec<Fluent>) -> Self {
        FluentState { pos, neg }
    }

    // Closed world: anything not listed in `self.pos` counts as false.
    pub fn holds(&self, pos: &[Fluent], neg: &[Fluent]) -> bool {
        let truths: HashSet<&Fluent> = self.pos.iter().collect();
        pos.iter().all(|f| truths.contains(f)) && !neg.iter().any(|f| truths.contains(f))
    }

    pub fn holds_literal(&self, literal: &Literal) -> bool {
        self.pos.contains(&literal.fluent) == literal.is_pos
    }

    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.pos
            .iter()
            .map(|f| Literal::pos(f.clone()))
            .chain(self.neg.iter().map(|f| Literal::neg(f.clone())))
    }
}

pub fn encode_state(state: &FluentState, state_map: &[Fluent]) -> String {
    let truths: HashSet<&Fluent> = state.pos.iter().collect();
    state_map
        .iter()
        .map(|f| if truths.contains(f) { 'T' } else { 'F' })
        .collect()
}

pub fn decode_state(state: &str, state_map: &[Fluent]) -> Result<FluentState, PlanError> {
    let found = state.chars().count();
    if found != state_map.len() {
        return Err(PlanError::StateLength {
            expected: state_map.len(),
            found,
        });
    }

    let mut decoded = FluentState::default();
    for (value, fluent) in state.chars().zip(state_map) {
        match value {
            'T' => decoded.pos.push(fluent.clone()),
            'F' => decoded.neg.push(fluent.clone()),
            other => return Err(PlanError::InvalidStateValue(other)),
        }
    }
    Ok(decoded)
}
