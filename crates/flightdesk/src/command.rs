//! Commands that change the registry, and the line syntax that produces them.
//!
//! A session reads one line per user action:
//!
//! ```text
//! set flightNumber QR902
//! set destination London
//! set departureTime 14:30
//! set status On Time
//! add
//! status 1 Delayed
//! delete 1
//! ```

use crate::error::{Error, Result};
use crate::flight::{DraftField, FlightId, FlightStatus};

/// A change to the registry or its draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set one draft field.
    SetField {
        /// Field to set.
        field: DraftField,
        /// New text; empty clears the field.
        value: String,
    },
    /// Submit the draft.
    Submit,
    /// Remove a flight.
    Delete {
        /// Flight to remove.
        id: FlightId,
    },
    /// Change a flight's status.
    UpdateStatus {
        /// Flight to change.
        id: FlightId,
        /// New status.
        status: FlightStatus,
    },
    /// Reset the draft to empty.
    Clear,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A draft field was set.
    DraftUpdated(DraftField),
    /// The draft became a new flight.
    Added(FlightId),
    /// The draft was incomplete; nothing changed.
    Rejected {
        /// Fields that are empty or unusable.
        missing: Vec<DraftField>,
    },
    /// The board is at its configured limit; nothing changed.
    Full {
        /// The limit.
        limit: usize,
    },
    /// A flight was removed.
    Deleted(FlightId),
    /// A flight's status changed.
    StatusChanged {
        /// The flight.
        id: FlightId,
        /// Its new status.
        status: FlightStatus,
    },
    /// No flight has this id; nothing changed.
    NotFound(FlightId),
    /// The draft was reset.
    DraftCleared,
}

impl Outcome {
    /// Check if the board changed.
    #[must_use]
    pub fn changed_board(&self) -> bool {
        matches!(
            self,
            Self::Added(_) | Self::Deleted(_) | Self::StatusChanged { .. }
        )
    }
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Nothing to do (blank line or comment).
    Empty,
    /// A registry command.
    Command(Command),
    /// Print the board.
    List,
    /// Print the draft.
    Show,
    /// Print usage.
    Help,
    /// End the session.
    Quit,
}

/// Usage text for the line syntax.
pub const HELP: &str = "\
commands:
  set <field> [value]     set a draft field (flightNumber, destination, departureTime, status)
  add                     add the draft to the board
  clear                   reset the draft
  status <id> <status>    change a flight's status (On Time, Delayed, Cancelled)
  delete <id>             remove a flight
  list                    show the board
  draft                   show the draft
  help                    show this text
  quit                    end the session";

/// Parse one line of session input.
///
/// # Errors
///
/// Returns an input error for an unknown verb, unknown field, bad id,
/// unknown status, or missing argument.
pub fn parse_line(line: &str) -> Result<SessionInput> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(SessionInput::Empty);
    }

    let (verb, rest) = split_word(line);
    let input = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(Error::invalid_input("usage: set <field> [value]"));
            }
            SessionInput::Command(Command::SetField {
                field: field.parse()?,
                value: value.to_string(),
            })
        }
        "add" | "submit" => {
            expect_no_args(verb, rest)?;
            SessionInput::Command(Command::Submit)
        }
        "clear" => {
            expect_no_args(verb, rest)?;
            SessionInput::Command(Command::Clear)
        }
        "delete" | "del" | "rm" => {
            let (id, extra) = split_word(rest);
            if id.is_empty() {
                return Err(Error::invalid_input("usage: delete <id>"));
            }
            expect_no_args(verb, extra)?;
            SessionInput::Command(Command::Delete { id: id.parse()? })
        }
        "status" => {
            let (id, status) = split_word(rest);
            if id.is_empty() || status.is_empty() {
                return Err(Error::invalid_input("usage: status <id> <status>"));
            }
            SessionInput::Command(Command::UpdateStatus {
                id: id.parse()?,
                status: status.parse()?,
            })
        }
        "list" | "ls" => SessionInput::List,
        "draft" | "show" => SessionInput::Show,
        "help" | "?" => SessionInput::Help,
        "quit" | "exit" => SessionInput::Quit,
        other => {
            return Err(Error::invalid_input(format!(
                "unknown command '{other}' (try 'help')"
            )))
        }
    };
    Ok(input)
}

/// Split off the first whitespace-delimited word; the rest is trimmed.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn expect_no_args(verb: &str, rest: &str) -> Result<()> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "'{verb}' takes no arguments, got '{rest}'"
        )))
    }
}
