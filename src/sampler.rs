use anyhow::{anyhow, Context, Result};
use rand::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;

use crate::config::Config;
use crate::problem::Problem;

pub fn generate_states_randomly<R: Rng + ?Sized>(
    problem: &Problem,
    num_states: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    let num_fluents = problem.state_map.len();
    let available = u32::try_from(num_fluents)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .unwrap_or(usize::MAX);
    if available < num_states {
        return Err(anyhow!(
            "Only {available} distinct states exist over {num_fluents} fluents, {num_states} requested"
        ));
    }

    let mut states = Vec::with_capacity(num_states);
    let mut used_states = HashSet::new();
    while states.len() < num_states {
        let state: String = (0..num_fluents)
            .map(|_| if rng.gen_bool(0.5) { 'T' } else { 'F' })
            .collect();
        if used_states.insert(state.clone()) {
            states.push(state);
        }
    }

    info!("Generate {} states for {}", states.len(), problem.name);
    Ok(states)
}

// Explicit states first, then the states file, then random ones. Falls back
// to the initial state. Every state is checked before any is evaluated.
pub fn collect_states(problem: &Problem, config: &Config) -> Result<Vec<String>> {
    let mut states = config.states.clone();
    if let Some(states_path) = &config.states_path {
        states.extend(
            load_states_from_yaml(states_path)
                .with_context(|| format!("error with states file: {states_path}"))?,
        );
    }
    if config.num_states > 0 {
        let mut rng = StdRng::seed_from_u64(config.seed);
        states.extend(generate_states_randomly(problem, config.num_states, &mut rng)?);
    }
    if states.is_empty() {
        states.push(problem.initial.clone());
    }

    for state in &states {
        problem
            .decode(state)
            .with_context(|| format!("invalid state {state} for {}", problem.name))?;
    }
    Ok(states)
}

pub fn load_states_from_yaml(path: &str) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let states = serde_yaml::from_reader(reader)?;
    Ok(states)
}

pub fn write_states_to_yaml(path: &str, states: &[String]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    let yaml_data = serde_yaml::to_string(&states)?;
    writer.write_all(yaml_data.as_bytes())?;

    Ok(())
}
