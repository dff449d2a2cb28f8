use super::{Fluent, Literal};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundAction {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub precond_pos: Vec<Fluent>,
    #[serde(default)]
    pub precond_neg: Vec<Fluent>,
    #[serde(default)]
    pub effect_add: Vec<Fluent>,
    #[serde(default)]
    pub effect_rem: Vec<Fluent>,
}

impl GroundAction {
    pub fn new(
        name: &str,
        args: &[&str],
        (precond_pos, precond_neg): (Vec<Fluent>, Vec<Fluent>),
        (effect_add, effect_rem): (Vec<Fluent>, Vec<Fluent>),
    ) -> Self {
        GroundAction {
            name: name.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            precond_pos,
            precond_neg,
            effect_add,
            effect_rem,
        }
    }

    pub fn noop_pos(fluent: &Fluent) -> Self {
        Self::new(
            "Noop_pos",
            &[fluent.as_str()],
            (vec![fluent.clone()], Vec::new()),
            (vec![fluent.clone()], Vec::new()),
        )
    }

    pub fn noop_neg(fluent: &Fluent) -> Self {
        Self::new(
            "Noop_neg",
            &[fluent.as_str()],
            (Vec::new(), vec![fluent.clone()]),
            (Vec::new(), vec![fluent.clone()]),
        )
    }

    pub fn precond_literals(&self) -> BTreeSet<Literal> {
        self.precond_pos
            .iter()
            .map(|f| Literal::new(f.clone(), true))
            .chain(self.precond_neg.iter().map(|f| Literal::new(f.clone(), false)))
            .collect()
    }

    pub fn effect_literals(&self) -> BTreeSet<Literal> {
        self.effect_add
            .iter()
            .map(|f| Literal::new(f.clone(), true))
            .chain(self.effect_rem.iter().map(|f| Literal::new(f.clone(), false)))
            .collect()
    }
}

impl fmt::Display for GroundAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(", "))
    }
}
