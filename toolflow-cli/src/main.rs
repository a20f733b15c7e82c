use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "toolflow", version, about = "Schema-checked tool workflows")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Validate { catalog, output } => {
            cmd::validate::validate_cmd(&catalog, output).await
        }
        Command::Workflows { catalog, output } => {
            cmd::workflows::workflows_cmd(&catalog, output).await
        }
        Command::Tools { catalog, output } => cmd::tools::tools_cmd(&catalog, output).await,
        Command::Tool {
            catalog,
            name,
            inputs,
            concurrency,
            output,
        } => cmd::tool::tool_cmd(&catalog, &name, inputs, concurrency, output).await,
        Command::Run {
            catalog,
            workflow,
            inputs,
            stream,
            events,
            metrics,
            concurrency,
            output,
        } => {
            cmd::run::run_cmd(
                &catalog,
                workflow.as_deref(),
                inputs,
                stream,
                events,
                metrics,
                concurrency,
                output,
            )
            .await
        }
    }
}
