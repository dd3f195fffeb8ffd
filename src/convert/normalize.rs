//! Mixed-type column detection and normalization.
//!
//! Spreadsheet cells carry their own types, so a single column can silently
//! blend numbers and text (an identifier column with both pure numbers and
//! alphanumeric codes is the classic case). Columnar output needs one type
//! per column, so ambiguity is resolved conservatively toward text.
//!
//! Detection is an explicit capability check over value kinds, not an
//! error-shape inspection: two values either have a defined order between
//! their kinds or they do not.

use std::cmp::Ordering;

use crate::types::{Table, Value};

/// Compare two values under the crate's ordering lattice.
///
/// - `Int64` and `Float64` compare numerically with each other (floats use
///   total ordering, so NaN never poisons a numeric column).
/// - `Utf8` compares lexicographically with `Utf8` only.
/// - `Bool` compares with `Bool` only (`false < true`).
/// - Every pairing involving `Null`, and every other cross-kind pairing, has
///   no defined order and returns `None`.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int64(x), Value::Int64(y)) => Some(x.cmp(y)),
        (Value::Int64(x), Value::Float64(y)) => Some((*x as f64).total_cmp(y)),
        (Value::Float64(x), Value::Int64(y)) => Some(x.total_cmp(&(*y as f64))),
        (Value::Float64(x), Value::Float64(y)) => Some(x.total_cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Utf8(x), Value::Utf8(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Returns `true` when at least two non-null values in the column are not
/// order-comparable with each other.
///
/// Works by computing a running maximum: the first pair with no defined order
/// classifies the column as mixed. Null values never participate, so an empty
/// or all-null column is vacuously homogeneous.
pub fn is_mixed(values: &[Value]) -> bool {
    let mut max: Option<&Value> = None;
    for value in values {
        if value.is_null() {
            continue;
        }
        match max {
            None => max = Some(value),
            Some(current) => match compare_values(value, current) {
                Some(Ordering::Greater) => max = Some(value),
                Some(_) => {}
                None => return true,
            },
        }
    }
    false
}

/// Coerce every mixed column of `table` to text in place.
///
/// Returns the names of the coerced columns so callers can report them.
pub fn normalize_mixed_columns(table: &mut Table) -> Vec<String> {
    let mut coerced = Vec::new();
    for column in &mut table.columns {
        if is_mixed(&column.values) {
            for value in &mut column.values {
                *value = value.to_text();
            }
            coerced.push(column.name.clone());
        }
    }
    coerced
}

#[cfg(test)]
mod tests {
    use super::{is_mixed, normalize_mixed_columns};
    use crate::types::{Column, Table, Value};

    fn ints(vals: &[i64]) -> Vec<Value> {
        vals.iter().copied().map(Value::Int64).collect()
    }

    #[test]
    fn empty_column_is_not_mixed() {
        assert!(!is_mixed(&[]));
    }

    #[test]
    fn homogeneous_numbers_are_not_mixed() {
        assert!(!is_mixed(&ints(&[1, 2, 3])));
    }

    #[test]
    fn homogeneous_strings_are_not_mixed() {
        assert!(!is_mixed(&[
            Value::Utf8("a".to_string()),
            Value::Utf8("b".to_string()),
        ]));
    }

    #[test]
    fn number_and_string_are_mixed() {
        assert!(is_mixed(&[
            Value::Int64(1),
            Value::Utf8("a".to_string()),
            Value::Int64(3),
        ]));
    }

    #[test]
    fn integer_and_float_are_comparable() {
        assert!(!is_mixed(&[Value::Int64(1), Value::Float64(2.5)]));
    }

    #[test]
    fn bool_and_number_are_mixed() {
        assert!(is_mixed(&[Value::Bool(true), Value::Int64(1)]));
    }

    #[test]
    fn nulls_never_make_a_column_mixed() {
        assert!(!is_mixed(&[Value::Null, Value::Int64(1), Value::Null]));
        assert!(!is_mixed(&[Value::Null, Value::Null]));
    }

    #[test]
    fn nan_does_not_poison_a_numeric_column() {
        assert!(!is_mixed(&[
            Value::Float64(1.0),
            Value::Float64(f64::NAN),
            Value::Float64(2.0),
        ]));
    }

    #[test]
    fn normalize_coerces_only_mixed_columns_and_reports_them() {
        let mut table = Table::new(vec![
            Column::new("id", ints(&[1, 2, 3])),
            Column::new(
                "code",
                vec![Value::Int64(1), Value::Utf8("A100".to_string()), Value::Null],
            ),
        ]);

        let coerced = normalize_mixed_columns(&mut table);
        assert_eq!(coerced, vec!["code".to_string()]);
        assert_eq!(table.columns[0].values, ints(&[1, 2, 3]));
        assert_eq!(
            table.columns[1].values,
            vec![
                Value::Utf8("1".to_string()),
                Value::Utf8("A100".to_string()),
                Value::Null,
            ]
        );
    }
}
