//! Workbook loading integration tests.
//!
//! Tests the path from spreadsheet bytes through calamine into SQLite tables.

use pretty_assertions::assert_eq;
use sheetquery::db::Value;
use sheetquery::error::SheetQueryError;
use sheetquery::session::Session;
use sheetquery::workbook::{Sheet, Workbook};

use super::fixtures::{loaded_session, new_session, sample_workbook, SAMPLE_FILE};

async fn scalar(session: &mut Session, sql: &str) -> Value {
    let result = session.execute_sql(sql).await.unwrap();
    result.rows[0][0].clone()
}

#[tokio::test]
async fn test_sample_workbook_creates_one_table_per_sheet() {
    let mut session = new_session().await;
    let bytes = sample_workbook().unwrap();

    let report = session.load_file(&bytes, SAMPLE_FILE).await.unwrap();

    let tables: Vec<_> = report.tables.iter().map(|t| t.table.name.as_str()).collect();
    assert_eq!(
        tables,
        vec!["Employees", "Departments", "Sales_Data", "Headers_Only"]
    );
    assert_eq!(report.empty_sheets, vec!["Blank".to_string()]);
    assert!(report.failures.is_empty());
    assert_eq!(session.sheet_names().len(), 5);
}

#[tokio::test]
async fn test_row_counts_match_sheets() {
    let mut session = loaded_session().await;

    assert_eq!(
        scalar(&mut session, "SELECT COUNT(*) FROM Employees").await,
        Value::Int(4)
    );
    assert_eq!(
        scalar(&mut session, "SELECT COUNT(*) FROM Departments").await,
        Value::Int(3)
    );
}

#[tokio::test]
async fn test_typed_cells_are_stored_as_text() {
    let mut session = loaded_session().await;

    let result = session
        .execute_sql("SELECT Salary, Hire_Date, Active FROM Employees WHERE Name = 'Alice'")
        .await
        .unwrap();
    assert_eq!(
        result.rows[0],
        vec![
            Value::from("85000"),
            Value::from("2020-01-15"),
            Value::from("TRUE")
        ]
    );

    assert_eq!(
        scalar(&mut session, "SELECT Salary FROM Employees WHERE Name = 'Bob'").await,
        Value::from("62000.5")
    );
    assert_eq!(
        scalar(&mut session, "SELECT typeof(Floor) FROM Departments LIMIT 1").await,
        Value::from("text")
    );
}

#[tokio::test]
async fn test_awkward_headers_are_sanitized() {
    let session = loaded_session().await;

    let table = session.schema().unwrap().table_for_sheet("Sales Data").unwrap();
    assert_eq!(table.name, "Sales_Data");
    assert_eq!(
        table.columns,
        vec!["First_Name", "Email_Address", "_1st_Place", "Column4", "_2024"]
    );
}

#[tokio::test]
async fn test_sparse_cells_become_null() {
    let mut session = loaded_session().await;

    let result = session
        .execute_sql("SELECT Email_Address, _2024 FROM Sales_Data WHERE First_Name = '東京'")
        .await
        .unwrap();
    assert_eq!(result.rows[0], vec![Value::Null, Value::from("1.5")]);
}

#[tokio::test]
async fn test_header_only_sheet_is_empty_table() {
    let mut session = loaded_session().await;

    let result = session.execute_sql("SELECT * FROM Headers_Only").await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_blank_sheet_has_no_table() {
    let mut session = loaded_session().await;

    let err = session.execute_sql("SELECT * FROM Blank").await.unwrap_err();
    assert!(matches!(err, SheetQueryError::QueryFailed(_)));
    assert!(session.schema().unwrap().table_for_sheet("Blank").is_none());
}

#[tokio::test]
async fn test_csv_file_loads_as_single_table() {
    let mut session = new_session().await;
    let csv = "Name,Age\nAlice,30\n,\nBob,\n";

    let report = session.load_file(csv.as_bytes(), "people.csv").await.unwrap();

    assert_eq!(report.tables[0].table.name, "people");
    assert_eq!(report.tables[0].row_count, 2);
    assert_eq!(
        scalar(&mut session, "SELECT Name FROM people WHERE Age IS NULL").await,
        Value::from("Bob")
    );
}

#[tokio::test]
async fn test_unicode_and_numeric_sheet_names() {
    let mut session = new_session().await;
    let workbook = Workbook::new(
        "intl.xlsx",
        vec![
            Sheet::from_text_rows("销售数据2024", &[vec![Some("Amount")], vec![Some("10")]]),
            Sheet::from_text_rows("2024", &[vec![Some("Q")], vec![Some("1")]]),
        ],
    );

    let report = session.load_workbook(&workbook).await.unwrap();

    let tables: Vec<_> = report.tables.iter().map(|t| t.table.name.as_str()).collect();
    assert_eq!(tables, vec!["____2024", "2024"]);
    assert_eq!(
        scalar(&mut session, "SELECT Amount FROM \"____2024\"").await,
        Value::from("10")
    );
    assert_eq!(
        scalar(&mut session, "SELECT Q FROM \"2024\"").await,
        Value::from("1")
    );
}

#[tokio::test]
async fn test_corrupt_file_keeps_previous_workbook() {
    let mut session = loaded_session().await;

    let err = session
        .load_file(b"PK\x03\x04 truncated", "broken.xlsx")
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Error loading file: "));
    assert_eq!(session.file_name(), Some(SAMPLE_FILE));
    assert_eq!(
        scalar(&mut session, "SELECT COUNT(*) FROM Departments").await,
        Value::Int(3)
    );
}

#[tokio::test]
async fn test_reload_replaces_tables() {
    let mut session = loaded_session().await;
    let workbook = Workbook::new(
        "inventory.xlsx",
        vec![Sheet::from_text_rows("Stock", &[vec![Some("Item")], vec![Some("Bolt")]])],
    );

    session.load_workbook(&workbook).await.unwrap();

    assert!(session.execute_sql("SELECT * FROM Employees").await.is_err());
    assert_eq!(
        scalar(&mut session, "SELECT Item FROM Stock").await,
        Value::from("Bolt")
    );
}
