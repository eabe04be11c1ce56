//! A running flight board session.
//!
//! The session reads one line per user action, handles it to completion,
//! and writes the result before reading the next line.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::command::{parse_line, Command, Outcome, SessionInput, HELP};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::registry::FlightRegistry;
use crate::render;

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The input ran out.
    EndOfInput,
    /// The user asked to quit.
    Quit,
}

/// Owns the registry for the lifetime of one session.
#[derive(Debug)]
pub struct Session {
    registry: FlightRegistry,
    config: Config,
    interactive: bool,
    input_errors: usize,
}

impl Session {
    /// Create a session with an empty board.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            registry: FlightRegistry::from_config(&config.registry),
            config,
            interactive: false,
            input_errors: 0,
        }
    }

    /// Print a prompt before each line.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// The registry.
    #[must_use]
    pub fn registry(&self) -> &FlightRegistry {
        &self.registry
    }

    /// Number of lines rejected as bad input so far.
    #[must_use]
    pub fn input_errors(&self) -> usize {
        self.input_errors
    }

    /// Process lines from `input` until it runs out or the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails, or on the first input
    /// error when `session.stop_on_error` is set.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<SessionEnd> {
        info!(interactive = self.interactive, "Session started");
        self.prompt(out)?;

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            match self.handle_line(&line, out) {
                Ok(Some(end)) => {
                    info!(flights = self.registry.len(), "Session ended by user");
                    return Ok(end);
                }
                Ok(None) => {}
                Err(err) if err.is_input_error() => {
                    self.input_errors += 1;
                    if self.config.session.stop_on_error {
                        return Err(Error::Script {
                            line: line_no,
                            source: Box::new(err),
                        });
                    }
                    if !self.interactive {
                        warn!(line = line_no, error = %err, "Skipping bad input");
                    }
                    writeln!(out, "error: {err}")?;
                }
                Err(err) => return Err(err),
            }
            self.prompt(out)?;
        }

        info!(flights = self.registry.len(), "Session ended at end of input");
        Ok(SessionEnd::EndOfInput)
    }

    /// Handle one line. Returns `Some` when the session should end.
    ///
    /// # Errors
    ///
    /// Returns an input error if the line can't be parsed, or an I/O error
    /// if writing fails.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Option<SessionEnd>> {
        match parse_line(line)? {
            SessionInput::Empty => {}
            SessionInput::Command(command) => self.handle_command(command, out)?,
            SessionInput::List => self.write_board(out)?,
            SessionInput::Show => write!(out, "{}", render::render_draft(self.registry.draft()))?,
            SessionInput::Help => writeln!(out, "{HELP}")?,
            SessionInput::Quit => return Ok(Some(SessionEnd::Quit)),
        }
        Ok(None)
    }

    fn handle_command<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        debug!(?command, "Applying command");
        let outcome = self.registry.execute(command);

        match &outcome {
            Outcome::DraftUpdated(_) | Outcome::DraftCleared => {}
            Outcome::Added(id) => {
                if let Some(flight) = self.registry.get(*id) {
                    writeln!(out, "added #{id} {}", flight.flight_number)?;
                }
            }
            // Rejections stay quiet unless hints are turned on
            Outcome::Rejected { missing } => {
                if self.config.session.show_validation_hints {
                    let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
                    writeln!(out, "not added, missing: {}", names.join(", "))?;
                }
            }
            Outcome::Full { limit } => {
                if self.config.session.show_validation_hints {
                    writeln!(out, "not added, board is full ({limit} flights)")?;
                }
            }
            Outcome::Deleted(id) => writeln!(out, "deleted #{id}")?,
            Outcome::StatusChanged { id, status } => writeln!(out, "#{id} is now {status}")?,
            Outcome::NotFound(id) => debug!(%id, "No flight with this id"),
        }

        if outcome.changed_board() && self.config.display.echo_table {
            self.write_board(out)?;
        }
        Ok(())
    }

    fn write_board<W: Write>(&self, out: &mut W) -> Result<()> {
        let flights = self.registry.flights();
        write!(out, "{}", render::render_table(flights, &self.config.display))?;
        if !flights.is_empty() {
            write!(out, "{}", render::render_summary(&self.registry.counts()))?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.interactive {
            write!(out, "{}", self.config.session.prompt)?;
            out.flush()?;
        }
        Ok(())
    }
}
