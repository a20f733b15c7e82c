use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// JSON or YAML file holding the input object.
    #[arg(long)]
    pub inputs: Option<PathBuf>,
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set_inputs: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ConcurrencyArgs {
    /// Fan-out elements run at once; 1 keeps them sequential.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub fan_out_concurrency: u32,
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_concurrency: u32,
    #[arg(long = "max-concurrency-tool", value_name = "NAME=N")]
    pub max_concurrency_tool: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsTarget {
    None,
    Stdout,
    Stderr,
}
