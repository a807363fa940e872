// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report formatting for a finished ResultsTable.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use contourbench_core::ResultsTable;
use contourbench_core::error::Result;
use serde::Serialize;
use tracing::info;

/// Human-readable rendering of a [`ResultsTable`], one block per image.
pub struct TextReport<'a>(pub &'a ResultsTable);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for image in self.0.images() {
            writeln!(f, "Results for {}:", image.image.display())?;
            for result in &image.qualities {
                let entry = &result.entry;
                writeln!(f, "  Quality: {}%", result.quality)?;
                writeln!(
                    f,
                    "  Processing Time: {:.2} seconds",
                    entry.processing_time_secs
                )?;
                writeln!(f, "  Number of Contours: {}", entry.contour_count)?;
                writeln!(f, "  Processed Image Path: {}", entry.output)?;
                writeln!(f)?;
            }
        }
        for path in self.0.skipped() {
            writeln!(f, "Skipped {}: image could not be loaded", path.display())?;
        }
        Ok(())
    }
}

/// Render the text report into a `String`.
pub fn render(table: &ResultsTable) -> String {
    TextReport(table).to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    results: &'a ResultsTable,
}

/// Serialise the table as pretty-printed JSON, stamped with `generated_at`.
pub fn to_json(table: &ResultsTable, generated_at: DateTime<Utc>) -> Result<String> {
    let report = JsonReport {
        generated_at,
        results: table,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write the JSON report to `path`, creating or overwriting it.
pub fn write_json(
    table: &ResultsTable,
    generated_at: DateTime<Utc>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let json = to_json(table, generated_at)?;
    std::fs::write(path.as_ref(), json)?;
    info!(path = %path.as_ref().display(), "JSON report written");
    Ok(())
}
