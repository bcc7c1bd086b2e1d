use crate::action::Action;
use crate::error::Result;
use crate::record::MergedRecord;
use chrono::{DateTime, TimeZone};
use std::path::Path;

pub const DELIMITER: u8 = b';';
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

// ---------------------------------------------------------------------------
// Value rendering
// ---------------------------------------------------------------------------

/// Render a float the way the profile tables always have: shortest
/// round-trip digits, integral values keep one decimal, and the decimal
/// point becomes a comma.
///
/// Small values are written in positional notation (`0,00002`), not the
/// exponent form (`2,0e-05`) of older tables.
pub fn format_float(value: f64) -> String {
    let text = if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    };
    text.replacen('.', ",", 1)
}

fn opt_float(value: Option<f64>) -> String {
    value.map(format_float).unwrap_or_default()
}

fn opt_int(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn header() -> Vec<&'static str> {
    let mut columns = vec!["Actor", "Intensity"];
    columns.extend(Action::all().iter().map(|a| a.column()));
    columns.push("Delay");
    columns
}

pub fn row(record: &MergedRecord) -> Vec<String> {
    let mut cells = vec![record.actor.to_string(), format_float(record.intensity)];
    cells.extend(Action::all().iter().map(|&a| opt_int(record.stage_time(a))));
    cells.push(opt_float(record.delay));
    cells
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

pub fn write_table<W: std::io::Write>(writer: W, records: &[MergedRecord]) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);
    out.write_record(header())?;
    for record in records {
        out.write_record(row(record))?;
    }
    out.flush()?;
    Ok(())
}

pub fn render_table(records: &[MergedRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_table(&mut buf, records)?;
    Ok(buf)
}

/// Write the table in one step; a failed run leaves no partial file.
pub fn save_table(path: &Path, records: &[MergedRecord]) -> Result<()> {
    let data = render_table(records)?;
    crate::io::atomic_write(path, &data)
}

/// `<prefix>YYYYmmdd_HHMM.csv` for the given moment.
pub fn output_filename<Tz>(prefix: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}{}.csv", now.format(TIMESTAMP_FORMAT))
}
