//! Writing tables back out as delimited text or JSON records.

use std::io::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::table::{Cell, Table};

/// Write `table` as delimited text with a header row.
///
/// Absent cells become empty fields; temporal cells use ISO 8601.
pub fn write_delimited<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(table.column_names())?;
    for row in 0..table.row_count() {
        out.write_record(
            table
                .row(row)
                .into_iter()
                .map(|cell| cell.render().unwrap_or_default()),
        )?;
    }

    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `table` as a pretty-printed JSON array of row objects.
pub fn write_json_records<W: Write>(table: &Table, writer: W) -> Result<()> {
    let names = table.column_names();
    let records: Vec<IndexMap<&str, &Cell>> = (0..table.row_count())
        .map(|row| names.iter().copied().zip(table.row(row)).collect())
        .collect();

    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}
