pub mod common;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod problem;
pub mod sampler;
pub mod stat;
