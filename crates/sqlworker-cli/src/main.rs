//! sqlworker CLI
//!
//! Hosts one SQL worker over stdin/stdout, one JSON message per line

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sqlworker")]
#[command(about = "sqlworker - embedded SQL database behind a message channel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a worker, reading messages from stdin and writing responses to stdout
    Serve(commands::serve::ServeArgs),
    /// Print where the engine payload would be fetched from
    Resolve(commands::resolve::ResolveArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
