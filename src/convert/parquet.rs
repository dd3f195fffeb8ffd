//! Columnar output: serialize a [`Table`] to a Parquet file.
//!
//! The writer derives one physical type per column from the value kinds
//! actually present, then writes a single row group with typed column
//! writers. Output lands in a sibling temp file first and is renamed onto the
//! destination on success, so a crash mid-write never leaves a partial file
//! that a later run would mistake for a completed conversion.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parquet::basic::{LogicalType, Repetition, Type as PhysicalType};
use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::types::Type;

use crate::error::{ConvertError, ConvertResult};
use crate::types::{Column, Table, Value};

/// One column's values lowered to a concrete Parquet representation.
///
/// `def_levels` has one entry per row (1 = present, 0 = null); the value
/// vector holds only the present values, as the column writers expect.
enum Prepared {
    Int64(Vec<i64>, Vec<i16>),
    Float64(Vec<f64>, Vec<i16>),
    Bool(Vec<bool>, Vec<i16>),
    Utf8(Vec<ByteArray>, Vec<i16>),
}

/// Serialize `table` to Parquet at `dest`, atomically.
///
/// Per-column physical types: all-integer columns become INT64; any float
/// among numerics promotes the column to DOUBLE; all-bool becomes BOOLEAN;
/// all-text becomes BYTE_ARRAY (UTF8); an empty or all-null column is written
/// as an all-null UTF8 column. A column mixing incomparable kinds at this
/// point returns [`ConvertError::MixedColumn`] — normalization happens before
/// the writer, never inside it.
pub fn write_parquet(table: &Table, dest: &Path) -> ConvertResult<()> {
    if table.columns.is_empty() {
        return Err(ConvertError::Malformed {
            path: dest.to_path_buf(),
            message: "table has no columns".to_string(),
        });
    }

    let prepared: Vec<Prepared> = table
        .columns
        .iter()
        .map(prepare_column)
        .collect::<ConvertResult<_>>()?;

    let fields: Vec<Arc<Type>> = table
        .columns
        .iter()
        .zip(prepared.iter())
        .map(|(column, p)| parquet_field(&column.name, p))
        .collect::<ConvertResult<_>>()?;
    let schema = Arc::new(Type::group_type_builder("schema").with_fields(fields).build()?);
    let props = Arc::new(WriterProperties::builder().build());

    let tmp = temp_path(dest);
    match write_row_group(&tmp, schema, props, &prepared) {
        Ok(()) => {
            fs::rename(&tmp, dest)?;
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn temp_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    dest.with_file_name(name)
}

fn prepare_column(column: &Column) -> ConvertResult<Prepared> {
    let mut has_int = false;
    let mut has_float = false;
    let mut has_bool = false;
    let mut has_utf8 = false;
    for value in &column.values {
        match value {
            Value::Null => {}
            Value::Int64(_) => has_int = true,
            Value::Float64(_) => has_float = true,
            Value::Bool(_) => has_bool = true,
            Value::Utf8(_) => has_utf8 = true,
        }
    }

    let mixed = || ConvertError::MixedColumn {
        column: column.name.clone(),
    };

    if has_utf8 {
        if has_int || has_float || has_bool {
            return Err(mixed());
        }
        let mut values = Vec::new();
        let mut defs = Vec::with_capacity(column.values.len());
        for v in &column.values {
            match v {
                Value::Utf8(s) => {
                    values.push(ByteArray::from(s.as_str()));
                    defs.push(1);
                }
                Value::Null => defs.push(0),
                _ => unreachable!("kind scan admits only utf8 and null here"),
            }
        }
        return Ok(Prepared::Utf8(values, defs));
    }

    if has_bool {
        if has_int || has_float {
            return Err(mixed());
        }
        let mut values = Vec::new();
        let mut defs = Vec::with_capacity(column.values.len());
        for v in &column.values {
            match v {
                Value::Bool(b) => {
                    values.push(*b);
                    defs.push(1);
                }
                Value::Null => defs.push(0),
                _ => unreachable!("kind scan admits only bool and null here"),
            }
        }
        return Ok(Prepared::Bool(values, defs));
    }

    if has_float {
        let mut values = Vec::new();
        let mut defs = Vec::with_capacity(column.values.len());
        for v in &column.values {
            match v {
                Value::Float64(f) => {
                    values.push(*f);
                    defs.push(1);
                }
                Value::Int64(i) => {
                    values.push(*i as f64);
                    defs.push(1);
                }
                Value::Null => defs.push(0),
                _ => unreachable!("kind scan admits only numerics and null here"),
            }
        }
        return Ok(Prepared::Float64(values, defs));
    }

    if has_int {
        let mut values = Vec::new();
        let mut defs = Vec::with_capacity(column.values.len());
        for v in &column.values {
            match v {
                Value::Int64(i) => {
                    values.push(*i);
                    defs.push(1);
                }
                Value::Null => defs.push(0),
                _ => unreachable!("kind scan admits only int64 and null here"),
            }
        }
        return Ok(Prepared::Int64(values, defs));
    }

    // No values at all: an all-null UTF8 column keeps the header visible.
    Ok(Prepared::Utf8(Vec::new(), vec![0; column.values.len()]))
}

fn parquet_field(name: &str, prepared: &Prepared) -> ConvertResult<Arc<Type>> {
    let (physical, logical) = match prepared {
        Prepared::Int64(..) => (PhysicalType::INT64, None),
        Prepared::Float64(..) => (PhysicalType::DOUBLE, None),
        Prepared::Bool(..) => (PhysicalType::BOOLEAN, None),
        Prepared::Utf8(..) => (PhysicalType::BYTE_ARRAY, Some(LogicalType::String)),
    };
    let field = Type::primitive_type_builder(name, physical)
        .with_repetition(Repetition::OPTIONAL)
        .with_logical_type(logical)
        .build()?;
    Ok(Arc::new(field))
}

fn write_row_group(
    path: &Path,
    schema: Arc<Type>,
    props: Arc<WriterProperties>,
    prepared: &[Prepared],
) -> ConvertResult<()> {
    let file = File::create(path)?;
    let mut writer = SerializedFileWriter::new(file, schema, props)?;

    let mut row_group = writer.next_row_group()?;
    let mut idx = 0usize;
    while let Some(mut col_writer) = row_group.next_column()? {
        match (col_writer.untyped(), &prepared[idx]) {
            (ColumnWriter::Int64ColumnWriter(w), Prepared::Int64(values, defs)) => {
                w.write_batch(values, Some(defs), None)?;
            }
            (ColumnWriter::DoubleColumnWriter(w), Prepared::Float64(values, defs)) => {
                w.write_batch(values, Some(defs), None)?;
            }
            (ColumnWriter::BoolColumnWriter(w), Prepared::Bool(values, defs)) => {
                w.write_batch(values, Some(defs), None)?;
            }
            (ColumnWriter::ByteArrayColumnWriter(w), Prepared::Utf8(values, defs)) => {
                w.write_batch(values, Some(defs), None)?;
            }
            _ => unreachable!("column writer type follows the schema built from Prepared"),
        }
        col_writer.close()?;
        idx += 1;
    }
    row_group.close()?;
    writer.close()?;
    Ok(())
}
