use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::excel::PLACEHOLDER_LABEL;

/// Sheets that hold exactly one table; incomplete rows are dropped instead of splitting.
pub const DEFAULT_SINGLE_TABLE_SHEETS: [&str; 2] = ["diagram_labels", "diagram_variables"];

pub const DEFAULT_COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    pub single_table_sheets: IndexSet<String>,
    /// Column labels starting with this are generated for unlabeled columns.
    pub placeholder_prefix: String,
    /// Column labels starting with this are comments.
    pub comment_marker: char,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            single_table_sheets: DEFAULT_SINGLE_TABLE_SHEETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            placeholder_prefix: PLACEHOLDER_LABEL.to_string(),
            comment_marker: DEFAULT_COMMENT_MARKER,
        }
    }
}

impl ExtractOptions {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn with_single_table_sheet(mut self, name: impl Into<String>) -> Self {
        self.single_table_sheets.insert(name.into());
        self
    }

    pub fn without_single_table_sheets(mut self) -> Self {
        self.single_table_sheets.clear();
        self
    }

    pub fn is_single_table(&self, sheet_name: &str) -> bool {
        self.single_table_sheets.contains(sheet_name)
    }

    /// Placeholder and comment columns carry no data.
    pub fn is_decorative(&self, label: &str) -> bool {
        label.starts_with(self.placeholder_prefix.as_str()) || label.starts_with(self.comment_marker)
    }
}
