//! The flight registry.
//!
//! [`FlightRegistry`] owns the board (an insertion-ordered list of
//! [`FlightRecord`]s) and the draft the user is filling in. Its mutation
//! methods never fail: a draft that doesn't pass validation is left as it is,
//! and an id that matches nothing is ignored.
//!
//! Invariants held at all times:
//! - every record id is unique, and ids are never handed out twice
//! - no record has an empty flight number, destination or departure time
//! - every record's status is a [`FlightStatus`]

use chrono::Utc;
use regex::Regex;
use tracing::{debug, trace};

use crate::command::{Command, Outcome};
use crate::config::RegistryConfig;
use crate::flight::{DraftEntry, DraftField, FlightId, FlightRecord, FlightStatus};

/// 24-hour `HH:MM`.
const DEPARTURE_TIME_PATTERN: &str = r"^([01][0-9]|2[0-3]):[0-5][0-9]$";

/// Extra checks applied on submit, on top of the required fields.
#[derive(Debug, Clone, Default)]
pub struct SubmitRules {
    departure_time: Option<Regex>,
    max_flights: Option<usize>,
}

impl SubmitRules {
    /// Build rules from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the built-in departure time pattern fails to compile.
    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        let departure_time = config.strict_departure_time.then(|| {
            Regex::new(DEPARTURE_TIME_PATTERN).expect("Invalid departure time pattern")
        });
        Self {
            departure_time,
            max_flights: config.flight_limit(),
        }
    }

    fn accepts(&self, draft: &DraftEntry, field: DraftField) -> bool {
        let value = draft.get(field).trim();
        if value.is_empty() {
            return false;
        }
        match field {
            DraftField::Status => value.parse::<FlightStatus>().is_ok(),
            DraftField::DepartureTime => self
                .departure_time
                .as_ref()
                .map_or(true, |re| re.is_match(value)),
            DraftField::FlightNumber | DraftField::Destination => true,
        }
    }
}

/// Why a submit was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// These draft fields are empty or unusable.
    Missing(Vec<DraftField>),
    /// The board already holds the configured number of flights.
    Full(usize),
}

/// Number of flights in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Flights on time.
    pub on_time: usize,
    /// Flights delayed.
    pub delayed: usize,
    /// Flights cancelled.
    pub cancelled: usize,
}

impl StatusCounts {
    /// Count for one status.
    #[must_use]
    pub fn get(&self, status: FlightStatus) -> usize {
        match status {
            FlightStatus::OnTime => self.on_time,
            FlightStatus::Delayed => self.delayed,
            FlightStatus::Cancelled => self.cancelled,
        }
    }

    /// Total number of flights.
    #[must_use]
    pub fn total(&self) -> usize {
        self.on_time + self.delayed + self.cancelled
    }
}

/// In-memory board of flights plus the pending draft.
#[derive(Debug, Clone)]
pub struct FlightRegistry {
    flights: Vec<FlightRecord>,
    draft: DraftEntry,
    /// Last id handed out; 0 before the first record.
    last_id: u64,
    rules: SubmitRules,
}

impl Default for FlightRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightRegistry {
    /// Create an empty registry with no extra submit rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(SubmitRules::default())
    }

    /// Create an empty registry with the given submit rules.
    #[must_use]
    pub fn with_rules(rules: SubmitRules) -> Self {
        Self {
            flights: Vec::new(),
            draft: DraftEntry::new(),
            last_id: 0,
            rules,
        }
    }

    /// Create an empty registry configured from `[registry]` settings.
    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_rules(SubmitRules::from_config(config))
    }

    /// All flights, in the order they were added.
    #[must_use]
    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    /// Look up a flight by id.
    #[must_use]
    pub fn get(&self, id: FlightId) -> Option<&FlightRecord> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// Number of flights on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Check if the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// The pending draft.
    #[must_use]
    pub fn draft(&self) -> &DraftEntry {
        &self.draft
    }

    /// Number of flights per status.
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        self.flights
            .iter()
            .fold(StatusCounts::default(), |mut counts, f| {
                match f.status {
                    FlightStatus::OnTime => counts.on_time += 1,
                    FlightStatus::Delayed => counts.delayed += 1,
                    FlightStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }

    /// Draft fields that would make a submit fail, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| !self.rules.accepts(&self.draft, *field))
            .collect()
    }

    /// Set one draft field. Never validates, never fails.
    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        trace!(field = %field, value = %value, "Draft field updated");
        self.draft.set(field, value);
    }

    /// Reset the draft to empty.
    pub fn clear_draft(&mut self) {
        self.draft = DraftEntry::new();
    }

    /// Submit the draft.
    ///
    /// When every required field is present the draft becomes a new record
    /// at the end of the board, the draft is reset, and the new id is
    /// returned. Otherwise nothing changes and `None` is returned.
    pub fn submit_draft(&mut self) -> Option<FlightId> {
        self.try_submit().ok()
    }

    /// Submit the draft, reporting why it was turned down.
    ///
    /// State changes are exactly those of [`submit_draft`](Self::submit_draft).
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the draft is incomplete or the board is
    /// full; the registry and draft are left unchanged.
    pub fn try_submit(&mut self) -> Result<FlightId, Rejection> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "Draft rejected");
            return Err(Rejection::Missing(missing));
        }

        if let Some(limit) = self.rules.max_flights {
            if self.flights.len() >= limit {
                debug!(limit, "Draft rejected, board is full");
                return Err(Rejection::Full(limit));
            }
        }

        // Status was accepted above, so it parses
        let Some(status) = self.draft.selected_status() else {
            return Err(Rejection::Missing(vec![DraftField::Status]));
        };

        let id = self.next_id();
        let draft = std::mem::take(&mut self.draft);
        let record = FlightRecord {
            id,
            flight_number: draft.flight_number.trim().to_string(),
            destination: draft.destination.trim().to_string(),
            departure_time: draft.departure_time.trim().to_string(),
            status,
            created_at: Utc::now(),
        };

        debug!(%id, flight = %record.flight_number, "Flight added");
        self.flights.push(record);
        Ok(id)
    }

    /// Remove the flight with this id.
    ///
    /// Returns whether a flight was removed. Remaining flights keep their order.
    pub fn delete_flight(&mut self, id: FlightId) -> bool {
        let before = self.flights.len();
        self.flights.retain(|f| f.id != id);
        let removed = self.flights.len() != before;
        if removed {
            debug!(%id, "Flight deleted");
        } else {
            debug!(%id, "Delete ignored, no such flight");
        }
        removed
    }

    /// Change the status of the flight with this id.
    ///
    /// Only the status changes; returns whether a flight matched.
    pub fn update_status(&mut self, id: FlightId, status: FlightStatus) -> bool {
        match self.flights.iter_mut().find(|f| f.id == id) {
            Some(flight) => {
                debug!(%id, from = %flight.status, to = %status, "Status changed");
                flight.status = status;
                true
            }
            None => {
                debug!(%id, "Status change ignored, no such flight");
                false
            }
        }
    }

    /// Run one command against this registry.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::SetField { field, value } => {
                self.update_draft_field(field, value);
                Outcome::DraftUpdated(field)
            }
            Command::Submit => match self.try_submit() {
                Ok(id) => Outcome::Added(id),
                Err(Rejection::Missing(missing)) => Outcome::Rejected { missing },
                Err(Rejection::Full(limit)) => Outcome::Full { limit },
            },
            Command::Delete { id } => {
                if self.delete_flight(id) {
                    Outcome::Deleted(id)
                } else {
                    Outcome::NotFound(id)
                }
            }
            Command::UpdateStatus { id, status } => {
                if self.update_status(id, status) {
                    Outcome::StatusChanged { id, status }
                } else {
                    Outcome::NotFound(id)
                }
            }
            Command::Clear => {
                self.clear_draft();
                Outcome::DraftCleared
            }
        }
    }

    /// Consume the old state and return the new one with what happened.
    #[must_use]
    pub fn apply(mut self, command: Command) -> (Self, Outcome) {
        let outcome = self.execute(command);
        (self, outcome)
    }

    fn next_id(&mut self) -> FlightId {
        self.last_id += 1;
        FlightId::new(self.last_id)
    }
}
