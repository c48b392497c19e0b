//! `sdkgen` command line front end.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod common;
mod generate;
mod inspect;

#[derive(Parser, Debug)]
#[command(
    name = "sdkgen",
    version,
    about = "Generate SDK client sources from an API model"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate and write SDK sources
    Generate(generate::GenerateArgs),
    /// Print type reference counts of one generation pass
    Inspect(inspect::InspectArgs),
}

fn main() {
    init_tracing();
    std::process::exit(run_cli(std::env::args().collect()));
}

fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(&args),
            Some(Commands::Inspect(args)) => inspect::run(&args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    // SDKGEN_LOG takes a plain level ("debug") applied to the sdkgen crates,
    // or a full filter spec like "sdkgen_core=trace"
    let filter = match std::env::var("SDKGEN_LOG") {
        Ok(level) if is_plain_level(&level) => log_filter(&level),
        Ok(spec) => spec,
        Err(_) => log_filter("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn log_filter(level: &str) -> String {
    let crate_root = module_path!();
    format!("{crate_root}={level},sdkgen_core={level}")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
