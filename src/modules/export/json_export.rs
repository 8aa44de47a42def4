//! JSON Export
//!
//! Pretty-printed JSON for the collections with no natural CSV shape.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

/// Write any serializable record list to a JSON file
pub fn write_records<T: Serialize>(
    path: &Path,
    records: &[T],
) -> Result<usize, Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, records)?;
    Ok(records.len())
}
