//! CLI command definitions.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::error::Result;

/// Session command arguments.
#[derive(Debug, Args)]
pub struct SessionCommand {
    /// Replay commands from a file instead of reading the terminal
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print the final board as JSON when the session ends
    #[arg(short, long)]
    pub json: bool,

    /// Don't colour the status column
    #[arg(long)]
    pub no_color: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl ConfigCommand {
    /// Run the command against the file at `config_path` (or the default path).
    ///
    /// Only `show` needs a loadable configuration; `path` never reads the file.
    ///
    /// # Errors
    ///
    /// Returns the load or validation error for `show` and `validate`, or an
    /// I/O error if writing fails.
    pub fn run<W: Write>(self, config_path: Option<PathBuf>, out: &mut W) -> Result<()> {
        match self {
            Self::Show { json } => {
                let config = Config::load_from(config_path)?;
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
                } else {
                    write_config(&config, out)?;
                }
            }
            Self::Path => {
                let path = config_path.unwrap_or_else(Config::default_config_path);
                writeln!(out, "{}", path.display())?;
            }
            Self::Validate { file } => {
                let path = file
                    .or(config_path)
                    .unwrap_or_else(Config::default_config_path);
                writeln!(out, "Validating configuration: {}", path.display())?;
                Config::load_from(Some(path))?;
                writeln!(out, "Configuration is valid.")?;
            }
        }
        Ok(())
    }
}

fn write_config<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    writeln!(out, "Current Configuration")?;
    writeln!(out, "=====================")?;
    writeln!(out)?;
    writeln!(out, "[Registry]")?;
    writeln!(
        out,
        "  Strict departure time: {}",
        config.registry.strict_departure_time
    )?;
    match config.registry.flight_limit() {
        Some(limit) => writeln!(out, "  Max flights:           {limit}")?,
        None => writeln!(out, "  Max flights:           unlimited")?,
    }
    writeln!(out)?;
    writeln!(out, "[Display]")?;
    writeln!(out, "  Color:                 {}", config.display.color)?;
    writeln!(out, "  Echo table:            {}", config.display.echo_table)?;
    writeln!(out, "  Empty message:         {}", config.display.empty_message)?;
    writeln!(out)?;
    writeln!(out, "[Session]")?;
    writeln!(out, "  Prompt:                {:?}", config.session.prompt)?;
    writeln!(out, "  Stop on error:         {}", config.session.stop_on_error)?;
    writeln!(
        out,
        "  Validation hints:      {}",
        config.session.show_validation_hints
    )?;
    Ok(())
}
