use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an extraction or a lookup against its result.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unable to read data from {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("no worksheets found in {}", .path.display())]
    NoSheets { path: PathBuf },

    #[error("no variable named '{name}' was extracted")]
    UnknownBinding { name: String },

    #[error("variable '{name}' is a {found}, expected a {expected}")]
    UnexpectedShape {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Problems with a single table. The table is skipped, the extraction goes on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("table has no data rows")]
    NoDataRows,

    #[error("table has no columns left after dropping decorative columns")]
    NoColumns,

    #[error("every data row is empty after dropping decorative columns")]
    OnlyEmptyRows,

    #[error("column '{label}' appears more than once in the header")]
    AmbiguousHeader { label: String },
}

impl TableError {
    /// Malformed tables are silently empty; ambiguous ones hold data that was refused.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, TableError::AmbiguousHeader { .. })
    }
}
