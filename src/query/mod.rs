//! Query execution for sheetquery.
//!
//! This module isolates SQL execution and timing from the session.

pub mod executor;

pub use executor::{QueryExecutor, QueryOutcome};
