//! Core data model: a column-major [`Table`] of typed [`Value`]s.
//!
//! Loaders produce tables; the normalizer and the Parquet writer consume them.
//! Storage is column-major because the interesting operations (mixed-type
//! detection, per-column type selection, columnar output) are per-column.

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text rendering of this value. Nulls stay null; everything else becomes
    /// [`Value::Utf8`] of its display form.
    pub fn to_text(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Int64(v) => Value::Utf8(v.to_string()),
            Value::Float64(v) => Value::Utf8(v.to_string()),
            Value::Bool(v) => Value::Utf8(v.to_string()),
            Value::Utf8(s) => Value::Utf8(s.clone()),
        }
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (always text; spreadsheet header cells are rendered to
    /// text at load time).
    pub name: String,
    /// Cell values, one per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// In-memory tabular dataset, stored column-major.
///
/// All columns hold the same number of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Columns in source order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Number of rows (zero for a table with no columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Build a table from header names and rows of raw strings, inferring one
    /// type per column.
    ///
    /// Inference is whole-column, in priority order:
    ///
    /// - every non-empty cell parses as `i64` -> Int64
    /// - every non-empty cell parses as `f64` -> Float64
    /// - every non-empty cell is `true`/`false` (case-insensitive) -> Bool
    /// - otherwise -> Utf8
    ///
    /// Empty (after trimming) cells become [`Value::Null`]. Rows shorter than
    /// the header are padded with nulls; extra trailing fields are dropped.
    pub fn from_string_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&str> = rows
                    .iter()
                    .map(|row| row.get(idx).map_or("", |s| s.trim()))
                    .collect();
                Column::new(name, infer_column(&cells))
            })
            .collect();
        Self { columns }
    }
}

fn infer_column(cells: &[&str]) -> Vec<Value> {
    let non_empty = || cells.iter().filter(|c| !c.is_empty());

    if non_empty().all(|c| c.parse::<i64>().is_ok()) {
        return cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    Value::Null
                } else {
                    Value::Int64(c.parse().unwrap_or_default())
                }
            })
            .collect();
    }
    if non_empty().all(|c| c.parse::<f64>().is_ok()) {
        return cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    Value::Null
                } else {
                    Value::Float64(c.parse().unwrap_or_default())
                }
            })
            .collect();
    }
    if non_empty().all(|c| c.eq_ignore_ascii_case("true") || c.eq_ignore_ascii_case("false")) {
        return cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    Value::Null
                } else {
                    Value::Bool(c.eq_ignore_ascii_case("true"))
                }
            })
            .collect();
    }
    cells
        .iter()
        .map(|c| {
            if c.is_empty() {
                Value::Null
            } else {
                Value::Utf8((*c).to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Table, Value};

    fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn infers_integer_column() {
        let t = Table::from_string_rows(
            vec!["id".to_string()],
            strings(&[&["1"], &["2"], &["3"]]),
        );
        assert_eq!(
            t.columns[0].values,
            vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]
        );
    }

    #[test]
    fn integer_decimal_mix_infers_float() {
        let t = Table::from_string_rows(vec!["x".to_string()], strings(&[&["1"], &["2.5"]]));
        assert_eq!(
            t.columns[0].values,
            vec![Value::Float64(1.0), Value::Float64(2.5)]
        );
    }

    #[test]
    fn bool_literals_infer_bool() {
        let t = Table::from_string_rows(
            vec!["flag".to_string()],
            strings(&[&["true"], &["FALSE"]]),
        );
        assert_eq!(
            t.columns[0].values,
            vec![Value::Bool(true), Value::Bool(false)]
        );
    }

    #[test]
    fn non_numeric_cell_forces_text_for_whole_column() {
        let t = Table::from_string_rows(
            vec!["code".to_string()],
            strings(&[&["1"], &["A100"], &["2"]]),
        );
        assert_eq!(
            t.columns[0].values,
            vec![
                Value::Utf8("1".to_string()),
                Value::Utf8("A100".to_string()),
                Value::Utf8("2".to_string()),
            ]
        );
    }

    #[test]
    fn empty_cells_become_null_and_do_not_affect_inference() {
        let t = Table::from_string_rows(
            vec!["id".to_string()],
            strings(&[&["1"], &[""], &["3"]]),
        );
        assert_eq!(
            t.columns[0].values,
            vec![Value::Int64(1), Value::Null, Value::Int64(3)]
        );
    }

    #[test]
    fn short_rows_are_padded_with_nulls() {
        let t = Table::from_string_rows(
            vec!["a".to_string(), "b".to_string()],
            strings(&[&["1", "2"], &["3"]]),
        );
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.columns[1].values, vec![Value::Int64(2), Value::Null]);
    }

    #[test]
    fn row_count_of_empty_table_is_zero() {
        let t = Table::new(Vec::new());
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.column_count(), 0);
    }
}
