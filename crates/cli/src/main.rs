//! Shelf CLI - editorial tooling for product shelves.
//!
//! # Usage
//!
//! ```bash
//! # Validate a shelves file
//! shelf-cli validate shelves.yaml
//!
//! # Print the search variables of each shelf
//! shelf-cli variables shelves.yaml --shelf home-deals
//!
//! # List sort orders
//! shelf-cli orderings
//!
//! # Print the page-builder schema
//! shelf-cli schema
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shelf-cli")]
#[command(author, version, about = "Product shelf CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a shelves file
    Validate {
        /// Path to the shelves YAML file
        file: PathBuf,
    },
    /// Print the search variables each shelf sends
    Variables {
        /// Path to the shelves YAML file
        file: PathBuf,

        /// Only this shelf
        #[arg(short, long)]
        shelf: Option<String>,
    },
    /// List the accepted sort orders
    Orderings,
    /// Print the page-builder schema as JSON
    Schema,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Validate { file } => {
            let report = commands::shelves::validate(&file)?;
            for warning in &report.warnings {
                tracing::warn!("{warning}");
            }
            println!(
                "{}: {} shelves, {} warnings",
                file.display(),
                report.shelves,
                report.warnings.len()
            );
        }
        Commands::Variables { file, shelf } => {
            println!("{}", commands::shelves::variables(&file, shelf.as_deref())?);
        }
        Commands::Orderings => println!("{}", commands::catalog::orderings()),
        Commands::Schema => println!("{}", commands::catalog::schema()?),
    }
    Ok(())
}
