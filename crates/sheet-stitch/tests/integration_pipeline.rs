mod common;

use std::process::Command;

use common::{XlsxValue, create_test_xlsx};
use sheet_stitch::{
    Cell, ExportOptions, StitchError, StitchOptions, UploadedFile, stitch, stitch_with_options,
    write_csv,
};
use tempfile::tempdir;

fn rendered_rows(rows: &[Vec<Cell>]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}

fn sample_xlsx() -> Vec<u8> {
    create_test_xlsx(&[
        vec![XlsxValue::Text("n"), XlsxValue::Text("c")],
        vec![XlsxValue::Number(4.0), XlsxValue::Text("w")],
        vec![XlsxValue::Number(1.0), XlsxValue::Text("x")],
    ])
    .expect("XLSX fixture should be created")
}

#[test]
fn stitches_csv_and_xlsx_and_skips_malformed_files() {
    let files = vec![
        UploadedFile::new("a.csv", "n,c\n1,x\n2,y\n"),
        UploadedFile::new("b.xlsx", sample_xlsx()),
        UploadedFile::new("c.txt", "n,c\n1,x,extra\n"),
    ];

    let (table, report) = stitch(&files, false).expect("stitch should succeed");

    assert_eq!(report.succeeded_names(), vec!["a.csv", "b.xlsx"]);
    assert_eq!(report.skipped_names(), vec!["c.txt"]);
    assert!(
        report.skipped[0].reason.contains("expected 2 fields"),
        "report: {report:?}"
    );
    assert_eq!(table.headers, vec!["n", "c"]);
    assert_eq!(
        rendered_rows(&table.rows),
        vec![
            vec!["1", "x"],
            vec!["2", "y"],
            vec!["4", "w"],
            vec!["1", "x"],
        ]
    );
}

#[test]
fn deduplicates_matching_rows_across_formats() {
    let files = vec![
        UploadedFile::new("a.csv", "n,c\n1,x\n2,y\n"),
        UploadedFile::new("b.xlsx", sample_xlsx()),
    ];

    let (table, report) = stitch(&files, true).expect("stitch should succeed");

    assert_eq!(report.rows_before_dedup, 4);
    assert_eq!(report.duplicates_removed, Some(1));
    assert_eq!(
        rendered_rows(&table.rows),
        vec![vec!["1", "x"], vec!["2", "y"], vec!["4", "w"]]
    );
}

#[test]
fn row_count_is_sum_of_inputs_without_deduplication() {
    let files = vec![
        UploadedFile::new("a.csv", "id\n1\n1\n2\n"),
        UploadedFile::new("b.csv", "id\n2\n3\n"),
        UploadedFile::new("c.xlsx", sample_xlsx()),
    ];

    let (table, report) = stitch(&files, false).expect("stitch should succeed");
    let input_rows: usize = report.succeeded.iter().map(|file| file.rows).sum();

    assert_eq!(input_rows, 7);
    assert_eq!(table.row_count(), input_rows);
    assert_eq!(report.output_rows(), input_rows);
}

#[test]
fn deduplicating_a_stitched_table_again_is_a_no_op() {
    let files = vec![
        UploadedFile::new("a.csv", "id,v\n1,x\n1,x\n2,y\n"),
        UploadedFile::new("b.csv", "v,id\ny,2\nz,3\n"),
    ];

    let (mut table, report) = stitch(&files, true).expect("stitch should succeed");
    assert_eq!(report.duplicates_removed, Some(2));

    let once = table.clone();
    assert_eq!(table.drop_duplicates(), 0);
    assert_eq!(table, once);
}

#[test]
fn unions_columns_in_first_seen_order() {
    let files = vec![
        UploadedFile::new("a.csv", "id,name\n1,alice\n"),
        UploadedFile::new("b.csv", "city,id\nTaipei,2\n"),
    ];

    let (table, _) = stitch(&files, false).expect("stitch should succeed");

    assert_eq!(table.headers, vec!["id", "name", "city"]);
    assert_eq!(table.cell(1, "name"), Some(&Cell::Empty));
    assert_eq!(table.cell(1, "city"), Some(&Cell::text("Taipei")));
}

#[test]
fn fails_with_no_valid_input_when_every_file_is_unreadable() {
    let files = vec![
        UploadedFile::new("broken.xlsx", "not a zip archive"),
        UploadedFile::new("empty.csv", ""),
    ];

    let skipped = match stitch(&files, false) {
        Err(StitchError::NoValidInput { skipped }) => skipped,
        other => panic!("unexpected outcome: {other:?}"),
    };
    let names = skipped.iter().map(|file| file.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["broken.xlsx", "empty.csv"]);
}

#[test]
fn reports_progress_for_every_file() {
    let files = vec![
        UploadedFile::new("a.csv", "id\n1\n"),
        UploadedFile::new("broken.xls", "not a workbook"),
    ];
    let mut lines = Vec::new();

    stitch_with_options(
        &files,
        &StitchOptions::default(),
        &mut |event: &sheet_stitch::StitchEvent| lines.push(event.to_string()),
    )
    .expect("stitch should succeed");

    assert_eq!(lines[1], " * a.csv");
    assert!(lines[2].starts_with(" * SKIPPED: broken.xls ("), "lines: {lines:?}");
    assert_eq!(lines.last().map(String::as_str), Some("Spreadsheets stitched!"));
}

#[test]
fn writes_combined_csv_to_disk() {
    let dir = tempdir().expect("tempdir should be created");
    let output = dir.path().join("stitched_data.csv");
    let files = vec![
        UploadedFile::new("a.csv", "id,score\n1,2.5\n"),
        UploadedFile::new("b.csv", "id,score\n2,3\n"),
    ];

    let (table, _) = stitch(&files, false).expect("stitch should succeed");
    write_csv(&output, &table, &ExportOptions::default()).expect("csv should be written");

    let csv = std::fs::read_to_string(&output).expect("CSV should be readable");
    assert_eq!(csv, "id,score\n1,2.5\n2,3.0\n");
}

#[test]
fn cli_writes_output_and_preview() {
    let dir = tempdir().expect("tempdir should be created");
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&first, "n,c\n1,x\n2,y\n").expect("fixture should be written");
    std::fs::write(&second, "n,c\n1,x\n3,z\n").expect("fixture should be written");

    let result = Command::new(env!("CARGO_BIN_EXE_sheetstitch"))
        .args([
            "stitch",
            "--deduplicate",
            "--preview",
            "5",
            "-o",
            &output.to_string_lossy(),
            &first.to_string_lossy(),
            &second.to_string_lossy(),
        ])
        .output()
        .expect("CLI should run");

    assert_eq!(result.status.code(), Some(0));
    let csv = std::fs::read_to_string(&output).expect("CSV should be readable");
    assert_eq!(csv, "n,c\n1,x\n2,y\n3,z\n");
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("2  3  z"), "stdout: {stdout}");
}

#[test]
fn cli_exits_with_code_1_when_nothing_is_readable() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("broken.xlsx");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "not a workbook").expect("fixture should be written");

    let status = Command::new(env!("CARGO_BIN_EXE_sheetstitch"))
        .args([
            "stitch",
            "-o",
            &output.to_string_lossy(),
            &input.to_string_lossy(),
        ])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn cli_exits_with_code_2_when_no_rows() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("header-only.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "id,name\n").expect("fixture should be written");

    let status = Command::new(env!("CARGO_BIN_EXE_sheetstitch"))
        .args([
            "stitch",
            "-o",
            &output.to_string_lossy(),
            &input.to_string_lossy(),
        ])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(2));
}
