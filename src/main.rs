use graphplan_rust::config::{Cli, Config};
use graphplan_rust::domain;
use graphplan_rust::heuristic;
use graphplan_rust::problem::Problem;
use graphplan_rust::sampler::collect_states;
use graphplan_rust::stat::Stats;

use anyhow::{anyhow, Context};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let problem = match (&config.problem, &config.problem_path) {
        (_, Some(path)) => Problem::load_from_yaml(path)?,
        (Some(name), None) => domain::builtin(name)?,
        (None, None) => return Err(anyhow!("No problem specified")),
    };
    info!(
        "Problem {}: {} fluents, {} ground actions, goal {:?}",
        problem.name,
        problem.state_map.len(),
        problem.actions_list.len(),
        problem.goal.iter().map(|g| g.to_string()).collect::<Vec<_>>()
    );

    let states = collect_states(&problem, &config)?;

    let heuristic = heuristic::from_name(&config.heuristic, config.serial)
        .ok_or_else(|| anyhow!("Unknown heuristic {}", config.heuristic))?;

    let mut output = match &config.output_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("error opening output file: {path}"))?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    for state in &states {
        let mut stats = Stats::new(heuristic.name(), state);
        let start = Instant::now();
        stats.cost = heuristic
            .estimate(&problem, state, &mut stats)
            .with_context(|| format!("cannot evaluate state {state}"))?;
        stats.time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        stats.print();

        if let Some(writer) = output.as_mut() {
            serde_json::to_writer(&mut *writer, &stats)?;
            writeln!(writer)?;
        }
    }

    if let Some(mut writer) = output {
        writer.flush()?;
    }
    Ok(())
}
