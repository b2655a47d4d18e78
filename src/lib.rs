//! sheetquery - load spreadsheet files into an in-memory SQL engine, query
//! their sheets and export the results as CSV.
//!
//! This library exposes the core modules for the binary and integration
//! tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod query;
pub mod session;
pub mod workbook;
