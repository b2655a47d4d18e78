//! Export integration tests.
//!
//! Tests CSV and zip exports built from loaded sheets.

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use sheetquery::app::{run_one_shot, OneShotOutcome, OneShotRequest};
use sheetquery::cli::ExportTarget;
use sheetquery::db::{QueryEngine, Value};
use sheetquery::error::SheetQueryError;
use sheetquery::export::{ALL_SHEETS_ARCHIVE_NAME, QUERY_EXPORT_FILE_NAME};

use super::fixtures::{loaded_session, loaded_session_with_engine, new_session, sample_workbook};

fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut contents = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    contents
}

#[tokio::test]
async fn test_export_query_before_execution() {
    let session = loaded_session().await;

    let err = session.export_query().await.unwrap_err();
    assert!(matches!(err, SheetQueryError::NoQueryExecuted));
    assert_eq!(err.to_string(), "No query executed yet");
}

#[tokio::test]
async fn test_export_query_csv() {
    let mut session = loaded_session().await;
    session
        .execute_sql("SELECT Name, Salary FROM Employees WHERE Active = 'TRUE' ORDER BY Name")
        .await
        .unwrap();

    let file = session.export_query().await.unwrap();

    assert_eq!(file.file_name, QUERY_EXPORT_FILE_NAME);
    assert_eq!(
        String::from_utf8(file.bytes).unwrap(),
        "Name,Salary\nAlice,85000\nCarol,91000\nDan,58000"
    );
}

#[tokio::test]
async fn test_export_sheet_escapes_special_characters() {
    let session = loaded_session().await;

    let file = session.export_sheet(Some("Sales Data")).await.unwrap();

    assert_eq!(file.file_name, "Sales Data.csv");
    assert_eq!(
        String::from_utf8(file.bytes).unwrap(),
        "First_Name,Email_Address,_1st_Place,Column4,_2024\n\
         Zoë,zoe@example.com,\"Say \"\"Hello\"\"\",\"a,b\",\"Line 1\nLine 2\"\n\
         東京,,,,1.5"
    );
}

#[tokio::test]
async fn test_export_header_only_sheet_is_empty() {
    let session = loaded_session().await;

    let file = session.export_sheet(Some("Headers Only")).await.unwrap();
    assert!(file.bytes.is_empty());
}

#[tokio::test]
async fn test_export_all_sheets_archive() {
    let session = loaded_session().await;

    let file = session.export_all().await.unwrap();
    assert_eq!(file.file_name, ALL_SHEETS_ARCHIVE_NAME);

    let mut archive = zip::ZipArchive::new(Cursor::new(file.bytes)).unwrap();
    let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Departments.csv",
            "Employees.csv",
            "Headers Only.csv",
            "Sales Data.csv"
        ]
    );

    assert_eq!(
        read_entry(&mut archive, "Departments.csv"),
        "DepartmentName,Floor\nEngineering,3\nSales,1\nMarketing,2"
    );
    assert!(read_entry(&mut archive, "Employees.csv")
        .starts_with("Name,Department,Salary,Hire_Date,Active\nAlice,Engineering,85000,2020-01-15,TRUE"));
}

#[tokio::test]
async fn test_export_query_re_runs_against_current_data() {
    let (mut session, engine) = loaded_session_with_engine().await;
    session.execute_sql("SELECT COUNT(*) AS n FROM Departments").await.unwrap();

    let first = session.export_query().await.unwrap();
    assert_eq!(first.bytes, b"n\n3".to_vec());

    engine
        .execute_query("INSERT INTO Departments VALUES ('Operations', '4')")
        .await
        .unwrap();

    let second = session.export_query().await.unwrap();
    assert_eq!(second.bytes, b"n\n4".to_vec());
    assert_eq!(session.last_result().unwrap().rows[0][0], Value::Int(3));
}

#[tokio::test]
async fn test_export_sheet_re_reads_table() {
    let (session, engine) = loaded_session_with_engine().await;

    let before = session.export_sheet(Some("Departments")).await.unwrap();
    engine
        .execute_query("INSERT INTO Departments VALUES ('Operations', '4')")
        .await
        .unwrap();
    let after = session.export_sheet(Some("Departments")).await.unwrap();

    let before = String::from_utf8(before.bytes).unwrap();
    let after = String::from_utf8(after.bytes).unwrap();
    assert!(!before.contains("Operations"));
    assert_eq!(after, format!("{before}\nOperations,4"));
}

#[tokio::test]
async fn test_one_shot_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("company.xlsx");
    std::fs::write(&input, sample_workbook().unwrap()).unwrap();
    let out = dir.path().join("exports");

    let mut session = new_session().await;
    let request = OneShotRequest {
        export: Some(ExportTarget::All),
        ..OneShotRequest::default()
    };

    let outcome = run_one_shot(&mut session, &input, &request, &out).await.unwrap();

    let OneShotOutcome::Exported(path) = outcome else {
        panic!("expected an export");
    };
    assert_eq!(path, out.join(ALL_SHEETS_ARCHIVE_NAME));
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[tokio::test]
async fn test_one_shot_query_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("company.xlsx");
    std::fs::write(&input, sample_workbook().unwrap()).unwrap();

    let mut session = new_session().await;
    let request = OneShotRequest {
        sql: Some("SELECT DepartmentName FROM Departments WHERE Floor = '1'".to_string()),
        export: Some(ExportTarget::Query),
        ..OneShotRequest::default()
    };

    run_one_shot(&mut session, &input, &request, dir.path()).await.unwrap();

    let written = std::fs::read_to_string(dir.path().join(QUERY_EXPORT_FILE_NAME)).unwrap();
    assert_eq!(written, "DepartmentName\nSales");
}
