use crate::excel::Row;

/// A run of consecutive non-blank rows inside one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    /// 1-based position of the block among the sheet's blocks.
    pub position: usize,
    pub rows: Vec<Row>,
}

impl TableBlock {
    /// Sheet row number where the block starts.
    pub fn first_row(&self) -> usize {
        self.rows.first().map_or(0, |row| row.number)
    }
}

/// A block after header inference and decorative-column removal.
/// Every row has exactly `columns.len()` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
