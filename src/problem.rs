use crate::common::{decode_state, encode_state, Fluent, FluentState, GroundAction, Literal};
use crate::error::PlanError;
use crate::graph::{ActionCatalogue, PlanningGraph};
use crate::heuristic::Cost;

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use tracing::debug;

/// A STRIPS problem over a fixed catalogue of fluents.
///
/// States are encoded as one `T`/`F` per entry of `state_map`, which lists the
/// initially true fluents followed by the initially false ones.
#[derive(Debug, Clone)]
pub struct Problem {
    pub name: String,
    pub state_map: Vec<Fluent>,
    pub initial: String,
    pub goal: Vec<Literal>,
    pub actions_list: Vec<GroundAction>,
    catalogue: ActionCatalogue,
}

#[derive(Debug, Deserialize)]
struct ProblemYaml {
    name: String,
    initial: FluentState,
    goal: Vec<String>,
    #[serde(default)]
    actions: Vec<GroundAction>,
}

impl Problem {
    pub fn new(
        name: &str,
        initial: FluentState,
        goal: Vec<Literal>,
        actions_list: Vec<GroundAction>,
    ) -> Self {
        let state_map: Vec<Fluent> = initial.pos.iter().chain(&initial.neg).cloned().collect();
        let initial = encode_state(&initial, &state_map);
        let catalogue = ActionCatalogue::new(&actions_list, &state_map);
        Problem {
            name: name.to_string(),
            state_map,
            initial,
            goal,
            actions_list,
            catalogue,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let parsed: ProblemYaml = serde_yaml::from_str(yaml)?;
        Self::from_parsed(parsed)
    }

    pub fn load_from_yaml(path: &str) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open problem {path}"))?;
        let reader = BufReader::new(file);
        let parsed: ProblemYaml = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse problem {path}"))?;
        Self::from_parsed(parsed)
    }

    fn from_parsed(parsed: ProblemYaml) -> anyhow::Result<Self> {
        let goal = parsed
            .goal
            .iter()
            .map(|literal| literal.parse())
            .collect::<Result<Vec<Literal>, PlanError>>()?;
        let problem = Self::new(&parsed.name, parsed.initial, goal, parsed.actions);
        problem.validate()?;
        Ok(problem)
    }

    // Every fluent appears once in `state_map`, and goals and actions only
    // mention fluents from it.
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut fluents = HashSet::new();
        for fluent in &self.state_map {
            if !fluents.insert(fluent) {
                return Err(PlanError::DuplicateFluent(fluent.to_string()));
            }
        }

        let goal_fluents = self.goal.iter().map(|literal| &literal.fluent);
        let action_fluents = self.actions_list.iter().flat_map(|action| {
            action
                .precond_pos
                .iter()
                .chain(&action.precond_neg)
                .chain(&action.effect_add)
                .chain(&action.effect_rem)
        });
        match goal_fluents
            .chain(action_fluents)
            .find(|fluent| !fluents.contains(fluent))
        {
            Some(fluent) => Err(PlanError::UnknownFluent(fluent.to_string())),
            None => Ok(()),
        }
    }

    pub fn catalogue(&self) -> &ActionCatalogue {
        &self.catalogue
    }

    pub fn decode(&self, state: &str) -> Result<FluentState, PlanError> {
        decode_state(state, &self.state_map)
    }

    pub fn actions(&self, state: &str) -> Result<Vec<&GroundAction>, PlanError> {
        let fs = self.decode(state)?;
        Ok(self
            .actions_list
            .iter()
            .filter(|action| fs.holds(&action.precond_pos, &action.precond_neg))
            .collect())
    }

    pub fn result(&self, state: &str, action: &GroundAction) -> Result<String, PlanError> {
        let old_state = self.decode(state)?;
        let mut new_state = FluentState::default();
        for fluent in old_state.pos {
            if !action.effect_rem.contains(&fluent) {
                new_state.pos.push(fluent);
            }
        }
        for fluent in &action.effect_add {
            if !new_state.pos.contains(fluent) {
                new_state.pos.push(fluent.clone());
            }
        }
        Ok(encode_state(&new_state, &self.state_map))
    }

    pub fn goal_test(&self, state: &str) -> Result<bool, PlanError> {
        let fs = self.decode(state)?;
        Ok(self.goal.iter().all(|literal| fs.holds_literal(literal)))
    }

    pub fn planning_graph(&self, state: &str, serial: bool) -> Result<PlanningGraph, PlanError> {
        PlanningGraph::new(&self.catalogue, self.decode(state)?, serial)
    }

    pub fn h_levelsum(&self, state: &str, serial: bool) -> Result<Cost, PlanError> {
        Ok(self.planning_graph(state, serial)?.h_levelsum(&self.goal))
    }

    pub fn h_ignore_preconditions(&self, state: &str) -> Result<Cost, PlanError> {
        let fs = self.decode(state)?;
        let count = self
            .goal
            .iter()
            .filter(|literal| !fs.holds_literal(literal))
            .count();
        debug!("{count} goal literals unsatisfied in {state}");
        Ok(Cost::Finite(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::have_cake;

    #[test]
    fn test_have_cake_transitions() {
        let problem = have_cake();
        assert_eq!(problem.initial, "TF");
        assert!(!problem.goal_test("TF").unwrap());

        let actions = problem.actions("TF").unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].to_string(), "Eat(Cake)");

        let eaten = problem.result("TF", actions[0]).unwrap();
        assert_eq!(eaten, "FT");

        let actions = problem.actions(&eaten).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].to_string(), "Bake(Cake)");
        let baked = problem.result(&eaten, actions[0]).unwrap();
        assert_eq!(baked, "TT");
        assert!(problem.goal_test(&baked).unwrap());
    }

    #[test]
    fn test_heuristics() {
        let problem = have_cake();
        assert_eq!(problem.h_levelsum("TF", true), Ok(Cost::Finite(1)));
        assert_eq!(problem.h_levelsum("TT", true), Ok(Cost::Finite(0)));
        assert_eq!(problem.h_ignore_preconditions("TF"), Ok(Cost::Finite(1)));
        assert_eq!(problem.h_ignore_preconditions("FF"), Ok(Cost::Finite(2)));
        assert!(problem.h_levelsum("TFT", true).is_err());
    }

    #[test]
    fn test_load_from_yaml() {
        let problem = Problem::load_from_yaml("problems/have_cake.yaml").unwrap();
        let builtin = have_cake();

        assert_eq!(problem.name, "have_cake");
        assert_eq!(problem.state_map, builtin.state_map);
        assert_eq!(problem.initial, builtin.initial);
        assert_eq!(problem.goal, builtin.goal);
        assert_eq!(problem.actions_list, builtin.actions_list);
        assert_eq!(problem.catalogue().len(), builtin.catalogue().len());
    }

    #[test]
    fn test_negative_goal_from_yaml() {
        let problem = Problem::from_yaml_str(
            r#"
name: diet
initial:
  pos: [Have(Cake)]
  neg: []
goal: ["~Have(Cake)"]
actions:
  - name: Eat
    args: [Cake]
    precond_pos: [Have(Cake)]
    effect_rem: [Have(Cake)]
"#,
        )
        .unwrap();
        assert_eq!(problem.goal, vec![Literal::neg("Have(Cake)")]);
        assert_eq!(problem.h_levelsum("T", true), Ok(Cost::Finite(1)));
        assert_eq!(problem.h_levelsum("F", true), Ok(Cost::Finite(0)));
    }

    #[test]
    fn test_invalid_goal_in_yaml() {
        let result = Problem::from_yaml_str(
            r#"
name: broken
initial:
  pos: [A]
goal: ["~"]
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_fluent_rejected() {
        let result = Problem::from_yaml_str(
            r#"
name: twice
initial:
  pos: [X]
  neg: [X]
goal: [X]
"#,
        );
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<PlanError>(),
            Some(&PlanError::DuplicateFluent("X".to_string()))
        );
    }

    #[test]
    fn test_unknown_fluent_rejected() {
        let result = Problem::from_yaml_str(
            r#"
name: stray_goal
initial:
  pos: [X]
goal: ["~Y"]
"#,
        );
        assert_eq!(
            result.unwrap_err().downcast_ref::<PlanError>(),
            Some(&PlanError::UnknownFluent("Y".to_string()))
        );

        let result = Problem::from_yaml_str(
            r#"
name: stray_effect
initial:
  pos: [X]
goal: [X]
actions:
  - name: MakeZ
    precond_pos: [X]
    effect_add: [Z]
"#,
        );
        assert_eq!(
            result.unwrap_err().downcast_ref::<PlanError>(),
            Some(&PlanError::UnknownFluent("Z".to_string()))
        );
    }
}
