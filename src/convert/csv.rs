//! CSV loading.

use std::path::Path;

use crate::error::ConvertResult;
use crate::types::Table;

/// Load a comma-separated file into a [`Table`].
///
/// The first record is the header. Column types are inferred whole-column
/// (see [`Table::from_string_rows`]); empty cells become nulls.
pub fn load_csv(path: impl AsRef<Path>) -> ConvertResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    table_from_reader(&mut rdr)
}

/// Load CSV data from an existing reader.
pub fn table_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> ConvertResult<Table> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::from_string_rows(headers, rows))
}
