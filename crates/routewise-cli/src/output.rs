//! Output formatting for CLI results.
//!
//! Every command produces a serializable value; `--format` picks between the
//! plain-text renderers below and pretty-printed JSON.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use routewise_lib::output::format_minutes;
use routewise_lib::{LinkRecord, Location};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Render `value` for stdout, using `text` for the plain format.
    pub fn render<T, F>(self, value: &T, text: F) -> Result<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        match self {
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
            OutputFormat::Text => Ok(text(value)),
        }
    }

    /// Render and print `value` to stdout.
    pub fn emit<T, F>(self, value: &T, text: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        print!("{}", self.render(value, text)?);
        Ok(())
    }
}

/// List locations one per line.
pub fn format_locations_text(locations: &[Location]) -> String {
    if locations.is_empty() {
        return "No locations stored.\n".to_string();
    }
    let mut buffer = format!("Locations ({}):\n", locations.len());
    for location in locations {
        let _ = writeln!(buffer, " - {} (id {})", location.name, location.id);
    }
    buffer
}

/// Tabulate stored links, newest first as supplied.
pub fn format_links_text(records: &[LinkRecord]) -> String {
    if records.is_empty() {
        return "No links stored.\n".to_string();
    }
    let mut buffer = format!("Links ({}):\n", records.len());
    let _ = writeln!(
        buffer,
        "{:>4} {:<16} {:<16} {:>10} {:<6} {:>8}",
        "Id", "From", "To", "Km", "Mode", "Time"
    );
    for record in records {
        let _ = writeln!(
            buffer,
            "{:>4} {:<16} {:<16} {:>10.1} {:<6} {:>8}",
            record.link.id,
            record.from_city,
            record.to_city,
            record.link.distance,
            record.link.mode,
            format_minutes(record.time_minutes)
        );
    }
    buffer
}

/// Confirmation line for a newly stored link.
pub fn format_link_added_text(record: &LinkRecord) -> String {
    format!(
        "Added link {}: {} -> {} ({:.1} km by {}, {})\n",
        record.link.id,
        record.from_city,
        record.to_city,
        record.link.distance,
        record.link.mode,
        format_minutes(record.time_minutes)
    )
}
