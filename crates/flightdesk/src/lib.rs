//! `flightdesk` - An in-memory flight board
//!
//! This library holds the flight registry (the board plus the pending draft),
//! the commands that change it, and the session loop and text rendering used
//! by the `flightdesk` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod flight;
pub mod logging;
pub mod registry;
pub mod render;
pub mod session;

pub use command::{Command, Outcome};
pub use config::Config;
pub use error::{Error, Result};
pub use flight::{DraftEntry, DraftField, FlightId, FlightRecord, FlightStatus};
pub use logging::init_logging;
pub use registry::FlightRegistry;
pub use session::Session;
