use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod output;

use commands::new;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "sprout")]
#[command(version = VERSION)]
#[command(about = "CLI tool for scaffolding new Python package projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project skeleton at the destination path
    New(new::NewArgs),
    /// List available commands (alias for --help)
    List,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::List) {
        let mut cmd = Cli::command();
        cmd.print_help().expect("Failed to print help");
        println!();
        return std::process::ExitCode::SUCCESS;
    }

    let (json_result, exit_code) = commands::run_json(cli.command);
    output::print_json_result(json_result).ok();

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
