//! Turn stacked spreadsheet tables into named template variables.

pub mod config;
pub mod error;
pub mod excel;
pub mod extract;
pub mod json_export;
pub mod tables;
pub mod variables;

pub use config::ExtractOptions;
pub use error::{ExtractError, TableError};
pub use extract::{Diagnostic, Extraction, extract_from_path, extract_variables};
pub use variables::{Binding, Variables};
