//! Text output for the board and the draft.

use std::fmt::Write as _;

use crate::config::DisplayConfig;
use crate::error::Result;
use crate::flight::{DraftEntry, DraftField, FlightRecord, FlightStatus};
use crate::registry::StatusCounts;

const HEADERS: [&str; 5] = ["#", "Flight", "Destination", "Departure", "Status"];

const ANSI_RESET: &str = "\x1b[0m";

/// Visual treatment of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Rendered green.
    Good,
    /// Rendered orange (yellow on a terminal).
    Warning,
    /// Rendered red.
    Critical,
}

impl StatusTone {
    /// ANSI escape that starts this tone, bold.
    #[must_use]
    pub const fn ansi(self) -> &'static str {
        match self {
            Self::Good => "\x1b[1;32m",
            Self::Warning => "\x1b[1;33m",
            Self::Critical => "\x1b[1;31m",
        }
    }
}

impl From<FlightStatus> for StatusTone {
    fn from(status: FlightStatus) -> Self {
        match status {
            FlightStatus::OnTime => Self::Good,
            FlightStatus::Delayed => Self::Warning,
            FlightStatus::Cancelled => Self::Critical,
        }
    }
}

/// Render the board as a table.
#[must_use]
pub fn render_table(flights: &[FlightRecord], display: &DisplayConfig) -> String {
    if flights.is_empty() {
        return format!("{}\n", display.empty_message);
    }

    let rows: Vec<[String; 5]> = flights
        .iter()
        .map(|f| {
            [
                f.id.to_string(),
                f.flight_number.clone(),
                f.destination.clone(),
                f.departure_time.clone(),
                f.status.label().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths, None);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    for (row, flight) in rows.iter().zip(flights) {
        let tone = display.color.then(|| StatusTone::from(flight.status));
        push_row(&mut out, row, &widths, tone);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5], tone: Option<StatusTone>) {
    let last = cells.len() - 1;
    let mut parts = Vec::with_capacity(cells.len());
    for (i, (cell, width)) in cells.iter().zip(widths.iter().copied()).enumerate() {
        let padded = if i == last {
            cell.clone()
        } else {
            format!("{cell:<width$}")
        };
        match tone {
            Some(tone) if i == last => parts.push(format!("{}{padded}{ANSI_RESET}", tone.ansi())),
            _ => parts.push(padded),
        }
    }
    let _ = writeln!(out, "{}", parts.join(" | "));
}

/// Render a one-line summary of the board.
#[must_use]
pub fn render_summary(counts: &StatusCounts) -> String {
    let parts: Vec<String> = FlightStatus::ALL
        .iter()
        .map(|s| format!("{} {}", counts.get(*s), s.label()))
        .collect();
    format!("{} flights ({})\n", counts.total(), parts.join(", "))
}

/// Render the draft, one field per line.
#[must_use]
pub fn render_draft(draft: &DraftEntry) -> String {
    let width = DraftField::ALL
        .iter()
        .map(|f| f.name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for field in DraftField::ALL {
        let value = draft.get(field);
        let value = if value.is_empty() { "(empty)" } else { value };
        let _ = writeln!(out, "{:<width$}  {value}", field.name());
    }
    out
}

/// Render the board as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(flights: &[FlightRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(flights)?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::flight::FlightId;

    fn record(id: u64, number: &str, status: FlightStatus) -> FlightRecord {
        FlightRecord {
            id: FlightId::new(id),
            flight_number: number.to_string(),
            destination: "London".to_string(),
            departure_time: "14:30".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    fn plain() -> DisplayConfig {
        DisplayConfig {
            color: false,
            ..DisplayConfig::default()
        }
    }

    #[test]
    fn test_status_tone_mapping() {
        assert_eq!(StatusTone::from(FlightStatus::OnTime), StatusTone::Good);
        assert_eq!(StatusTone::from(FlightStatus::Delayed), StatusTone::Warning);
        assert_eq!(StatusTone::from(FlightStatus::Cancelled), StatusTone::Critical);
    }

    #[test]
    fn test_tones_are_distinct() {
        let codes: Vec<_> = FlightStatus::ALL
            .iter()
            .map(|s| StatusTone::from(*s).ansi())
            .collect();
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn test_render_empty_table() {
        let out = render_table(&[], &plain());
        assert_eq!(out, "No flights scheduled yet...\n");
    }

    #[test]
    fn test_render_table_plain() {
        let flights = vec![
            record(1, "QR902", FlightStatus::OnTime),
            record(2, "BA1", FlightStatus::Cancelled),
        ];
        let out = render_table(&flights, &plain());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# | Flight | Destination | Departure | Status"));
        assert!(lines[1].starts_with("--"));
        assert!(lines[2].contains("QR902"));
        assert!(lines[2].ends_with("On Time"));
        assert!(lines[3].contains("BA1   "));
        assert!(lines[3].ends_with("Cancelled"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_render_table_colored() {
        let flights = vec![record(1, "QR902", FlightStatus::Delayed)];
        let out = render_table(&flights, &DisplayConfig::default());
        assert!(out.contains("\x1b[1;33mDelayed\x1b[0m"));
    }

    #[test]
    fn test_render_summary() {
        let counts = StatusCounts {
            on_time: 2,
            delayed: 1,
            cancelled: 0,
        };
        assert_eq!(
            render_summary(&counts),
            "3 flights (2 On Time, 1 Delayed, 0 Cancelled)\n"
        );
    }

    #[test]
    fn test_render_draft() {
        let draft = DraftEntry::new().with(DraftField::FlightNumber, "QR1");
        let out = render_draft(&draft);
        assert!(out.contains("flightNumber   QR1"));
        assert!(out.contains("destination    (empty)"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[record(1, "QR902", FlightStatus::OnTime)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["flightNumber"], "QR902");
        assert_eq!(value[0]["status"], "On Time");
    }
}
