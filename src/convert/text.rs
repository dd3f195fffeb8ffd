//! Delimited-text loading (`.dat` / `.txt`).
//!
//! These files declare no separator; [`sniff_delimiter`] inspects the first
//! non-blank line first, and the file is then read with the sniffed byte.
//! Both delimited extensions share this one loader — there is a single
//! detection function and a single policy for detection failure.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};
use crate::types::Table;

use super::sniff::sniff_delimiter;

/// Load a delimited-text file into a [`Table`], sniffing the delimiter from
/// the first non-blank line.
///
/// Returns [`ConvertError::DelimiterNotFound`] when no delimiter can be
/// determined; the batch dispatcher reports that as a skip, not a failure.
///
/// Unlike strict CSV, records may have varying field counts: short rows are
/// padded with nulls and fields beyond the header width are dropped
/// (space-delimited extracts are rarely rectangular).
pub fn load_delimited(path: impl AsRef<Path>) -> ConvertResult<Table> {
    let path = path.as_ref();

    let delimiter = sniff_delimiter(BufReader::new(File::open(path)?))?.ok_or_else(|| {
        ConvertError::DelimiterNotFound {
            path: path.to_path_buf(),
        }
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let width = headers.len();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(Table::from_string_rows(headers, rows))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::load_delimited;
    use crate::error::ConvertError;
    use crate::types::Value;

    fn tmp_file(name: &str, contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("tabular-batch-text-{name}-{nanos}.dat"));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_pipe_delimited() {
        let path = tmp_file("pipe", "id|label\n1|alpha\n2|beta\n");
        let t = load_delimited(&path).unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.columns[0].values[1], Value::Int64(2));
        assert_eq!(t.columns[1].values[0], Value::Utf8("alpha".to_string()));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn skips_leading_blank_lines_when_sniffing() {
        let path = tmp_file("blank", "\n\nid,label\n1,alpha\n");
        let t = load_delimited(&path).unwrap();
        // The reader itself also ignores the blank lines, so the header is intact.
        assert_eq!(t.columns[0].name, "id");
        assert_eq!(t.row_count(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn pads_short_rows_with_nulls() {
        let path = tmp_file("ragged", "a b c\n1 2 3\n4 5\n");
        let t = load_delimited(&path).unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.columns[2].values, vec![Value::Int64(3), Value::Null]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn undetectable_delimiter_is_a_typed_error() {
        let path = tmp_file("nodelim", "justoneword\nmore\n");
        let err = load_delimited(&path).unwrap_err();
        assert!(matches!(err, ConvertError::DelimiterNotFound { .. }));
        assert!(err.to_string().contains("unable to determine delimiter"));
        let _ = fs::remove_file(&path);
    }
}
