//! Command shell integration tests.
//!
//! Drives the shell the way a user would, line by line.

use sheetquery::app::{render_output, App};
use sheetquery::commands::StatusMessage;

use super::fixtures::{new_session, sample_workbook};

#[tokio::test]
async fn test_load_shows_first_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("company.xlsx");
    std::fs::write(&input, sample_workbook().unwrap()).unwrap();
    let mut app = App::new(new_session().await, dir.path());

    let output = app.handle_line(&format!("/load {}", input.display())).await;

    let rendered = render_output(&output);
    assert!(rendered.contains("Sheet 'Blank' is empty, no table created"));
    assert!(rendered.contains("Alice"));
    assert_eq!(
        app.status(),
        Some(&StatusMessage::Info(
            "Loaded file: company.xlsx with 5 sheet(s)".to_string()
        ))
    );
}

#[tokio::test]
async fn test_load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(new_session().await, dir.path());

    app.handle_line("/load /nonexistent/file.xlsx").await;

    let status = app.status().unwrap();
    assert!(status.is_error());
    assert!(status.text().starts_with("Error loading file: "));
}

#[tokio::test]
async fn test_shell_session() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("company.xlsx");
    std::fs::write(&input, sample_workbook().unwrap()).unwrap();
    let mut app = App::new(new_session().await, dir.path());

    let script = format!(
        "/load {}\n/sheets\n/use Departments\n\n/export all\n/quit\n",
        input.display()
    );
    let mut output = Vec::new();
    app.run_shell(script.as_bytes(), &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("* Employees -> Employees"));
    assert!(text.contains("  Sales Data -> Sales_Data"));
    assert!(text.contains("  Blank (no table)"));
    assert!(text.contains("DepartmentName | Floor"));
    assert!(dir.path().join("excel-export-all-sheets.zip").exists());
}

#[tokio::test]
async fn test_commands_without_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(new_session().await, dir.path());

    app.handle_line("/schema").await;
    assert_eq!(app.status().unwrap().text(), "No file loaded");

    app.handle_line("/use Employees").await;
    assert_eq!(app.status().unwrap().text(), "No file loaded");

    app.handle_line("SELECT 1 AS one").await;
    assert!(!app.status().unwrap().is_error());
}
