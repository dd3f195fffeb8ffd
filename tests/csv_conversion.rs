use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use parquet::file::reader::FileReader;
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use tabular_batch_convert::config::ConvertConfig;
use tabular_batch_convert::convert::{BatchOptions, run_batch};

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tabular-batch-csv-{name}-{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn read_rows(path: &PathBuf) -> Vec<Vec<(String, Field)>> {
    let reader = SerializedFileReader::try_from(path.as_path()).unwrap();
    reader
        .into_iter()
        .map(|row| {
            row.unwrap()
                .get_column_iter()
                .map(|(name, field)| (name.clone(), field.clone()))
                .collect()
        })
        .collect()
}

#[test]
fn converts_a_csv_into_one_parquet_with_matching_shape() {
    let dir = tmp_dir("shape");
    fs::write(
        dir.join("x.csv"),
        "id,name,score\n1,Ada,98.5\n2,Grace,87.25\n3,Linus,77\n",
    )
    .unwrap();

    let config = ConvertConfig::with_directories([dir.clone()]);
    let summary = run_batch(&config, &BatchOptions::default()).unwrap();

    let output = dir.join("x.parquet");
    assert_eq!(summary.converted, vec![output.clone()]);
    assert!(summary.is_clean());
    assert!(output.exists());

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 3);
    assert_eq!(rows[0][0], ("id".to_string(), Field::Long(1)));
    assert_eq!(rows[1][1], ("name".to_string(), Field::Str("Grace".to_string())));
    // "77" in a decimal column comes out as a double.
    assert_eq!(rows[2][2], ("score".to_string(), Field::Double(77.0)));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn second_run_is_a_no_op_and_output_bytes_are_unchanged() {
    let dir = tmp_dir("idempotent");
    fs::write(dir.join("x.csv"), "id,name\n1,Ada\n").unwrap();

    let config = ConvertConfig::with_directories([dir.clone()]);

    let first = run_batch(&config, &BatchOptions::default()).unwrap();
    assert_eq!(first.converted.len(), 1);
    let bytes_after_first = fs::read(dir.join("x.parquet")).unwrap();

    let second = run_batch(&config, &BatchOptions::default()).unwrap();
    assert!(second.converted.is_empty());
    assert_eq!(second.skipped_existing, vec![dir.join("x.csv")]);
    assert!(second.is_clean());
    assert_eq!(fs::read(dir.join("x.parquet")).unwrap(), bytes_after_first);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn empty_cells_round_trip_as_nulls() {
    let dir = tmp_dir("nulls");
    fs::write(dir.join("x.csv"), "id,score\n1,\n2,5.5\n").unwrap();

    let config = ConvertConfig::with_directories([dir.clone()]);
    run_batch(&config, &BatchOptions::default()).unwrap();

    let rows = read_rows(&dir.join("x.parquet"));
    assert_eq!(rows[0][1].1, Field::Null);
    assert_eq!(rows[1][1].1, Field::Double(5.5));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn two_stems_convert_independently_across_two_directories() {
    let dir_a = tmp_dir("multi-a");
    let dir_b = tmp_dir("multi-b");
    fs::write(dir_a.join("x.csv"), "id\n1\n").unwrap();
    fs::write(dir_b.join("y.csv"), "id\n2\n").unwrap();

    let config = ConvertConfig::with_directories([dir_a.clone(), dir_b.clone()]);
    let summary = run_batch(&config, &BatchOptions::default()).unwrap();

    assert_eq!(summary.converted.len(), 2);
    assert!(dir_a.join("x.parquet").exists());
    assert!(dir_b.join("y.parquet").exists());

    let _ = fs::remove_dir_all(&dir_a);
    let _ = fs::remove_dir_all(&dir_b);
}

#[test]
fn only_one_output_per_stem_even_with_two_sources() {
    let dir = tmp_dir("stem-clash");
    fs::write(dir.join("x.csv"), "id\n1\n").unwrap();
    // Same stem under a delimited extension; csv converts first by dispatch
    // order, so this one must be skipped.
    fs::write(dir.join("x.dat"), "a|b\n1|2\n").unwrap();

    let config = ConvertConfig::with_directories([dir.clone()]);
    let summary = run_batch(&config, &BatchOptions::default()).unwrap();

    assert_eq!(summary.converted, vec![dir.join("x.parquet")]);
    assert_eq!(summary.skipped_existing, vec![dir.join("x.dat")]);

    // The output came from the csv: one column, not two.
    let rows = read_rows(&dir.join("x.parquet"));
    assert_eq!(rows[0].len(), 1);

    let _ = fs::remove_dir_all(&dir);
}
