use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;

use crate::domain::BUILTIN_PROBLEMS;
use crate::heuristic::HEURISTICS;

#[derive(Parser, Debug)]
#[command(
    name = "Rust GraphPlan",
    about = "Planning graph construction and level-sum heuristic for STRIPS problems.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Built-in problem to evaluate")]
    pub problem: Option<String>,

    #[arg(long, help = "Path to a YAML problem file")]
    pub problem_path: Option<String>,

    #[arg(long, help = "Encoded state (one T/F per fluent) to evaluate")]
    pub state: Vec<String>,

    #[arg(long, help = "Path to a YAML list of encoded states to evaluate")]
    pub states_path: Option<String>,

    #[arg(long, help = "Number of random states to evaluate")]
    pub num_states: Option<usize>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Heuristic to use: levelsum or ignore-preconditions")]
    pub heuristic: Option<String>,

    #[arg(
        long,
        help = "Allow several non-persistence actions per level",
        default_value_t = false
    )]
    pub parallel: bool,

    #[arg(long, help = "Path to append JSON statistics to")]
    pub output_path: Option<String>,

    #[arg(long, help = "Log filter, overridden by RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub problem: Option<String>,
    pub problem_path: Option<String>,
    pub states: Vec<String>,
    pub states_path: Option<String>,
    pub num_states: usize,
    pub seed: u64,
    pub heuristic: String,
    pub serial: bool,
    pub output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            problem: Some("have_cake".to_string()),
            problem_path: None,
            states: Vec::new(),
            states_path: None,
            num_states: 0,
            seed: 0,
            heuristic: "levelsum".to_string(),
            serial: true,
            output_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(problem) = &cli.problem {
            self.problem = Some(problem.clone());
            self.problem_path = None;
        }
        if let Some(problem_path) = &cli.problem_path {
            self.problem_path = Some(problem_path.clone());
            self.problem = None;
        }
        if !cli.state.is_empty() {
            self.states = cli.state.clone();
        }
        if let Some(states_path) = &cli.states_path {
            self.states_path = Some(states_path.clone());
        }
        if let Some(num_states) = cli.num_states {
            self.num_states = num_states;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(heuristic) = &cli.heuristic {
            self.heuristic = heuristic.clone();
        }
        if cli.parallel {
            self.serial = false;
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match (&self.problem, &self.problem_path) {
            (Some(_), Some(_)) => {
                return Err(anyhow!("Specify either a problem or a problem path, not both"))
            }
            (None, None) => return Err(anyhow!("No problem specified")),
            (Some(problem), None) if !BUILTIN_PROBLEMS.contains(&problem.as_str()) => {
                return Err(anyhow!(
                    "Unknown problem {problem}, expected one of {BUILTIN_PROBLEMS:?}"
                ))
            }
            _ => {}
        }

        if !HEURISTICS.contains(&self.heuristic.as_str()) {
            return Err(anyhow!(
                "Unknown heuristic {}, expected one of {HEURISTICS:?}",
                self.heuristic
            ));
        }

        if let Some(state) = self
            .states
            .iter()
            .find(|state| state.chars().any(|c| c != 'T' && c != 'F'))
        {
            return Err(anyhow!("Encoded state must only contain T and F, got {state}"));
        }
        Ok(())
    }
}
