//! Query execution integration tests.
//!
//! Tests SQL over loaded sheets and result handling.

use pretty_assertions::assert_eq;
use sheetquery::db::Value;
use sheetquery::error::SheetQueryError;
use sheetquery::export::to_display_rows;

use super::fixtures::loaded_session;

#[tokio::test]
async fn test_join_across_sheets() {
    let mut session = loaded_session().await;

    let result = session
        .execute_sql(
            "SELECT e.Name, d.Floor FROM Employees e \
             JOIN Departments d ON d.DepartmentName = e.Department \
             ORDER BY e.Name",
        )
        .await
        .unwrap();

    assert_eq!(result.column_names(), vec!["Name", "Floor"]);
    assert_eq!(result.row_count, 4);
    assert_eq!(result.rows[0], vec![Value::from("Alice"), Value::from("3")]);
}

#[tokio::test]
async fn test_aggregate_over_text_columns() {
    let mut session = loaded_session().await;

    let result = session
        .execute_sql(
            "SELECT Department, COUNT(*) AS n, SUM(CAST(Salary AS REAL)) AS total \
             FROM Employees GROUP BY Department ORDER BY Department",
        )
        .await
        .unwrap();

    let rows = to_display_rows(result);
    assert_eq!(
        rows[0],
        vec![
            ("Department".to_string(), "Engineering".to_string()),
            ("n".to_string(), "2".to_string()),
            ("total".to_string(), "176000".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_special_characters_round_trip() {
    let mut session = loaded_session().await;

    let result = session
        .execute_sql("SELECT First_Name, _1st_Place, Column4, _2024 FROM Sales_Data LIMIT 1")
        .await
        .unwrap();

    assert_eq!(
        result.rows[0],
        vec![
            Value::from("Zoë"),
            Value::from("Say \"Hello\""),
            Value::from("a,b"),
            Value::from("Line 1\nLine 2"),
        ]
    );
}

#[tokio::test]
async fn test_default_query_of_first_sheet() {
    let mut session = loaded_session().await;

    assert_eq!(session.sql_text(), "SELECT * FROM \"Employees\" LIMIT 50");
    let result = session.execute().await.unwrap();
    assert_eq!(
        result.column_names(),
        vec!["Name", "Department", "Salary", "Hire_Date", "Active"]
    );
    assert_eq!(result.row_count, 4);
}

#[tokio::test]
async fn test_select_sheet_with_space_in_name() {
    let mut session = loaded_session().await;

    let result = session.select_sheet("Sales Data").await.unwrap();
    assert_eq!(result.row_count, 2);
    assert_eq!(session.sql_text(), "SELECT * FROM \"Sales_Data\" LIMIT 50");
}

#[tokio::test]
async fn test_invalid_sql_reports_engine_message() {
    let mut session = loaded_session().await;
    session.execute_sql("SELECT Name FROM Employees").await.unwrap();

    let err = session
        .execute_sql("SELECT * FROM nonexistent_table_xyz")
        .await
        .unwrap_err();

    assert!(matches!(err, SheetQueryError::QueryFailed(_)));
    assert_eq!(err.to_string(), "SQL Error: no such table: nonexistent_table_xyz");
    assert_eq!(session.last_result().unwrap().row_count, 4);
    assert_eq!(session.last_executed(), Some("SELECT Name FROM Employees"));
}

#[tokio::test]
async fn test_zero_rows_is_success() {
    let mut session = loaded_session().await;

    let result = session
        .execute_sql("SELECT * FROM Employees WHERE Name = 'Nobody'")
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(
        session.last_executed(),
        Some("SELECT * FROM Employees WHERE Name = 'Nobody'")
    );
}
