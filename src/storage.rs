use crate::models::Record;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Load the processed Gapminder dataset from CSV.
///
/// Columns are matched by header name; extra columns written by the upstream
/// preprocessing step (the pandas index, raw columns the queries never touch)
/// are ignored, and empty cells deserialize to `None`.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("open dataset {}", path.display()))?;
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        let rec: Record = row.with_context(|| format!("parse row in {}", path.display()))?;
        out.push(rec);
    }
    log::debug!("loaded {} rows from {}", out.len(), path.display());
    Ok(out)
}

/// Save observations as CSV with header.
pub fn save_csv<P: AsRef<Path>>(points: &[Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for p in points {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save observations as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(points: &[Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
