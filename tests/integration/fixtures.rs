//! Sample workbooks shared by the integration tests.

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use sheetquery::db::SqliteEngine;
use sheetquery::session::{Session, SessionOptions};

/// File name the sample workbook is loaded under.
pub const SAMPLE_FILE: &str = "company.xlsx";

/// Builds the sample workbook.
///
/// Sheets, in order:
/// - `Employees`: 4 people with text, numeric, date and boolean cells, and
///   one fully blank row between them
/// - `Departments`: 3 departments
/// - `Sales Data`: awkward headers (spaces, symbols, a leading digit, a gap
///   and a numeric header) and special characters in the values
/// - `Headers Only`: a header row and nothing else
/// - `Blank`: no cells at all
pub fn sample_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let employees = workbook.add_worksheet();
    employees.set_name("Employees")?;
    for (col, header) in ["Name", "Department", "Salary", "Hire Date", "Active"]
        .iter()
        .enumerate()
    {
        employees.write_string(0, col as u16, *header)?;
    }
    let people = [
        ("Alice", "Engineering", 85000.0, (2020, 1, 15), true),
        ("Bob", "Sales", 62000.5, (2019, 6, 1), false),
        ("Carol", "Engineering", 91000.0, (2021, 3, 30), true),
        ("Dan", "Marketing", 58000.0, (2022, 11, 7), true),
    ];
    let mut row: u32 = 1;
    for (idx, (name, dept, salary, (y, m, d), active)) in people.iter().enumerate() {
        if idx == 2 {
            // a blank row between Bob and Carol
            for col in 0..5u16 {
                employees.write_string(row, col, "")?;
            }
            row += 1;
        }
        employees.write_string(row, 0, *name)?;
        employees.write_string(row, 1, *dept)?;
        employees.write_number(row, 2, *salary)?;
        let date = ExcelDateTime::from_ymd(*y, *m, *d)?;
        employees.write_datetime_with_format(row, 3, &date, &date_format)?;
        employees.write_boolean(row, 4, *active)?;
        row += 1;
    }

    let departments = workbook.add_worksheet();
    departments.set_name("Departments")?;
    departments.write_string(0, 0, "DepartmentName")?;
    departments.write_string(0, 1, "Floor")?;
    for (idx, (name, floor)) in [("Engineering", 3), ("Sales", 1), ("Marketing", 2)]
        .iter()
        .enumerate()
    {
        departments.write_string(idx as u32 + 1, 0, *name)?;
        departments.write_number(idx as u32 + 1, 1, *floor)?;
    }

    let sales = workbook.add_worksheet();
    sales.set_name("Sales Data")?;
    sales.write_string(0, 0, "First Name")?;
    sales.write_string(0, 1, "Email@Address")?;
    sales.write_string(0, 2, "1st Place")?;
    sales.write_number(0, 4, 2024)?;
    sales.write_string(1, 0, "Zoë")?;
    sales.write_string(1, 1, "zoe@example.com")?;
    sales.write_string(1, 2, "Say \"Hello\"")?;
    sales.write_string(1, 3, "a,b")?;
    sales.write_string(1, 4, "Line 1\nLine 2")?;
    sales.write_string(2, 0, "東京")?;
    sales.write_number(2, 4, 1.5)?;

    let headers_only = workbook.add_worksheet();
    headers_only.set_name("Headers Only")?;
    headers_only.write_string(0, 0, "ID")?;
    headers_only.write_string(0, 1, "Name")?;

    let blank = workbook.add_worksheet();
    blank.set_name("Blank")?;

    workbook.save_to_buffer()
}

/// Creates a session over a fresh in-memory engine.
pub async fn new_session() -> Session {
    let engine = SqliteEngine::open_in_memory()
        .await
        .expect("in-memory engine");
    Session::new(Box::new(engine), SessionOptions::default())
}

/// Creates a session with the sample workbook loaded.
pub async fn loaded_session() -> Session {
    loaded_session_with_engine().await.0
}

/// Like [`loaded_session`], also returning a handle on the session's engine
/// so a test can change the loaded data behind the session.
pub async fn loaded_session_with_engine() -> (Session, SqliteEngine) {
    let engine = SqliteEngine::open_in_memory()
        .await
        .expect("in-memory engine");
    let mut session = Session::new(Box::new(engine.clone()), SessionOptions::default());
    let bytes = sample_workbook().expect("sample workbook");
    session
        .load_file(&bytes, SAMPLE_FILE)
        .await
        .expect("sample workbook loads");
    (session, engine)
}
