use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a catalog and check its structure.
    Validate {
        #[arg(env = "TOOLFLOW_CATALOG")]
        catalog: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the workflows a catalog declares.
    Workflows {
        #[arg(env = "TOOLFLOW_CATALOG")]
        catalog: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the tools a catalog declares.
    Tools {
        #[arg(env = "TOOLFLOW_CATALOG")]
        catalog: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Invoke a single tool.
    Tool {
        name: String,
        #[arg(env = "TOOLFLOW_CATALOG")]
        catalog: PathBuf,
        #[command(flatten)]
        inputs: InputArgs,
        #[command(flatten)]
        concurrency: ConcurrencyArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a workflow.
    Run {
        #[arg(env = "TOOLFLOW_CATALOG")]
        catalog: PathBuf,
        /// Defaults to the catalog's only workflow.
        #[arg(long)]
        workflow: Option<String>,
        #[command(flatten)]
        inputs: InputArgs,
        /// Print one result fragment per line as it becomes available.
        #[arg(long)]
        stream: bool,
        #[arg(long, value_enum, default_value_t = EventsTarget::None)]
        events: EventsTarget,
        /// Report run counters when the workflow finishes.
        #[arg(long)]
        metrics: bool,
        #[command(flatten)]
        concurrency: ConcurrencyArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
