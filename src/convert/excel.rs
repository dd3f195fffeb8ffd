//! Excel workbook loading.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::error::{ConvertError, ConvertResult};
use crate::types::{Column, Table, Value};

/// Load the first sheet of an Excel workbook into a [`Table`].
///
/// Behavior:
/// - Uses the first sheet in the workbook.
/// - The first non-empty row is the header; header cells are rendered to text
///   whatever their cell type.
/// - Remaining rows become typed values carrying each cell's own type, so a
///   column can come out mixed — callers run the normalizer afterwards.
pub fn load_excel(path: impl AsRef<Path>) -> ConvertResult<Table> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ConvertError::Malformed {
            path: path.to_path_buf(),
            message: "workbook has no sheets".to_string(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;

    table_from_range(path, &range)
}

fn table_from_range(path: &Path, range: &Range<Data>) -> ConvertResult<Table> {
    let mut header_row_idx: Option<usize> = None;
    let mut columns: Vec<Column> = Vec::new();

    for (idx, row) in range.rows().enumerate() {
        if row.iter().any(|c| !matches!(c, Data::Empty)) {
            header_row_idx = Some(idx);
            columns = row
                .iter()
                .map(|c| Column::new(header_cell_text(c), Vec::new()))
                .collect();
            break;
        }
    }

    let header_row_idx = header_row_idx.ok_or_else(|| ConvertError::Malformed {
        path: path.to_path_buf(),
        message: "sheet has no non-empty rows".to_string(),
    })?;

    for (idx, row) in range.rows().enumerate() {
        if idx <= header_row_idx {
            continue;
        }
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let cell = row.get(col_idx).unwrap_or(&Data::Empty);
            column.values.push(cell_value(cell));
        }
    }

    Ok(Table::new(columns))
}

/// Text rendering of a header cell. Whole-number floats print without the
/// trailing `.0` so numeric headers match their on-screen form.
fn header_cell_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

fn cell_value(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                Value::Null
            } else {
                Value::Utf8(s.clone())
            }
        }
        Data::Int(i) => Value::Int64(*i),
        // Excel stores most numbers as floats; whole in-range values load as
        // integers so an untyped count column does not turn into doubles.
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 9.0e18 {
                Value::Int64(*f as i64)
            } else {
                Value::Float64(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::Utf8(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
