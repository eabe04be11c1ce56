//! Core flight types for flightdesk.
//!
//! Defines the record stored on the board, the fixed status vocabulary and
//! the draft entry the user fills in before submitting.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a flight record, unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(u64);

impl FlightId {
    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FlightId {
    type Err = Error;

    /// Accepts decimal digits with an optional single leading `#`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_input(format!("'{s}' is not a flight id")));
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::invalid_input(format!("'{s}' is not a flight id")))
    }
}

/// Status of a flight. Any status may change to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    /// Departing as scheduled.
    #[serde(rename = "On Time")]
    OnTime,
    /// Departing late.
    Delayed,
    /// Not departing.
    Cancelled,
}

impl FlightStatus {
    /// All statuses, in the order they are offered to the user.
    pub const ALL: [FlightStatus; 3] = [Self::OnTime, Self::Delayed, Self::Cancelled];

    /// The label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Delayed => "Delayed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FlightStatus {
    type Err = Error;

    /// Accepts the labels in any case. "On Time" may also be written with
    /// a hyphen, an underscore or no separator.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "on time" | "on-time" | "on_time" | "ontime" => Ok(Self::OnTime),
            "delayed" => Ok(Self::Delayed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(Error::invalid_status(s.trim())),
        }
    }
}

/// A flight on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Assigned by the registry when the record is created.
    pub id: FlightId,
    /// Flight number, e.g. `QR902`.
    pub flight_number: String,
    /// Destination, e.g. `London`.
    pub destination: String,
    /// Departure time as entered, normally `HH:MM`.
    pub departure_time: String,
    /// Current status.
    pub status: FlightStatus,
    /// When the record was added.
    pub created_at: DateTime<Utc>,
}

/// One of the four fields of a draft entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// Flight number.
    FlightNumber,
    /// Destination.
    Destination,
    /// Departure time.
    DepartureTime,
    /// Status selection.
    Status,
}

impl DraftField {
    /// All fields, in form order.
    pub const ALL: [DraftField; 4] = [
        Self::FlightNumber,
        Self::Destination,
        Self::DepartureTime,
        Self::Status,
    ];

    /// The form name of this field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FlightNumber => "flightNumber",
            Self::Destination => "destination",
            Self::DepartureTime => "departureTime",
            Self::Status => "status",
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flightnumber" | "flight_number" | "flight-number" | "flight" => {
                Ok(Self::FlightNumber)
            }
            "destination" | "dest" => Ok(Self::Destination),
            "departuretime" | "departure_time" | "departure-time" | "departure" => {
                Ok(Self::DepartureTime)
            }
            "status" => Ok(Self::Status),
            _ => Err(Error::unknown_field(s.trim())),
        }
    }
}

/// The pending, not yet submitted entry.
///
/// Every field holds the raw text the user entered. An empty `status` means
/// nothing has been selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEntry {
    /// Flight number text.
    pub flight_number: String,
    /// Destination text.
    pub destination: String,
    /// Departure time text.
    pub departure_time: String,
    /// Status selection text.
    pub status: String,
}

impl DraftEntry {
    /// Create an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this draft with one field replaced.
    #[must_use]
    pub fn with(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Replace one field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Current text of one field.
    #[must_use]
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FlightNumber => &self.flight_number,
            DraftField::Destination => &self.destination,
            DraftField::DepartureTime => &self.departure_time,
            DraftField::Status => &self.status,
        }
    }

    /// Check if every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Parse the status selection, if one has been made.
    #[must_use]
    pub fn selected_status(&self) -> Option<FlightStatus> {
        self.status.parse().ok()
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::FlightNumber => &mut self.flight_number,
            DraftField::Destination => &mut self.destination,
            DraftField::DepartureTime => &mut self.departure_time,
            DraftField::Status => &mut self.status,
        }
    }
}
