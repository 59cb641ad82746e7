//! Tabular input and leaderboard output.
//!
//! Input is a CSV file with a header row; one column holds the profile
//! references. Output is either a JSON report or a flat CSV table.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Leaderboard, LeaderboardReport, OutputFormat};

/// Header row of the CSV leaderboard.
const CSV_HEADER: [&str; 8] = [
    "Rank",
    "Identifier",
    "Display Name",
    "Total Solved",
    "Easy",
    "Medium",
    "Hard",
    "Worldwide Rank",
];

/// Read profile references from the named column of a CSV file.
pub fn read_references(path: impl AsRef<Path>, column: &str) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    read_references_from(file, column)
}

/// Read profile references from any CSV source.
///
/// Every data row yields one reference, blank cells included, so the
/// output length always equals the row count.
pub fn read_references_from<R: Read>(source: R, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| AppError::input_schema(column))?;

    let mut references = Vec::new();
    for row in reader.records() {
        let row = row?;
        references.push(row.get(index).unwrap_or("").trim().to_string());
    }
    Ok(references)
}

/// Write a leaderboard in the requested format.
pub fn write_leaderboard<W: Write>(
    writer: W,
    leaderboard: &Leaderboard,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, leaderboard, pretty),
        OutputFormat::Csv => write_csv(writer, leaderboard),
    }
}

fn write_json<W: Write>(mut writer: W, leaderboard: &Leaderboard, pretty: bool) -> Result<()> {
    let report = LeaderboardReport::new(leaderboard);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &report)?;
    } else {
        serde_json::to_writer(&mut writer, &report)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_csv<W: Write>(writer: W, leaderboard: &Leaderboard) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for row in leaderboard.rows() {
        csv_writer.write_record([
            row.rank.to_string(),
            row.identifier,
            row.display_name.unwrap_or_default(),
            row.total_solved.to_string(),
            row.easy.to_string(),
            row.medium.to_string(),
            row.hard.to_string(),
            row.worldwide_rank_or_reason.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
