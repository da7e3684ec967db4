//! Command-line front end for the `multisport_workouts` library.

mod cli;
pub mod commands;
mod config;
mod error;

use std::io::Write;

use multisport_workouts::garmin::GarminExportOptions;

pub use cli::{Cli, Commands, OutputArgs};
pub use config::{DEFAULT_LOG_FILTER, LOG_LEVEL_ENV, LogConfig};
pub use error::{CliError, CliResult};

/// Dispatch a parsed command line, writing JSON results to `stdout` unless
/// an output file is given.
pub async fn run<W: Write>(cli: Cli, stdout: &mut W) -> CliResult<()> {
    match cli.command {
        Commands::Export {
            input,
            name,
            sport,
            description,
            output,
        } => {
            let mut options = GarminExportOptions::new(name, sport);
            options.description = description;
            commands::export(&input, options, &output, stdout).await
        }
        Commands::Summary { input, output } => commands::summary(&input, &output, stdout),
        Commands::Convert {
            input,
            discipline,
            output,
        } => commands::convert(&input, discipline, &output, stdout),
        Commands::Schema { output } => commands::schema(&output, stdout),
    }
}
