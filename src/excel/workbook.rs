use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::{Path, PathBuf};

use crate::error::ExtractError;
use crate::excel::{CellValue, Row, Sheet};

pub const PLACEHOLDER_LABEL: &str = "Unnamed";

/// Every worksheet of a file, loaded eagerly and kept in workbook order.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    file_path: PathBuf,
}

pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook, ExtractError> {
    let path_ref = path.as_ref();
    let unreadable = |source| ExtractError::SourceUnreadable {
        path: path_ref.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path_ref).map_err(unreadable)?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook.worksheet_range(name).map_err(unreadable)?;
        let sheet = create_sheet_from_range(name, &range);
        log::debug!(
            "loaded worksheet '{}': {} columns, {} rows",
            name,
            sheet.width(),
            sheet.rows.len()
        );
        sheets.push(sheet);
    }

    if sheets.is_empty() {
        return Err(ExtractError::NoSheets {
            path: path_ref.to_path_buf(),
        });
    }

    Ok(Workbook {
        sheets,
        file_path: path_ref.to_path_buf(),
    })
}

fn create_sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let (height, width) = range.get_size();
    let first_row = range.start().map_or(0, |(row, _)| row as usize);

    let mut rows_iter = range.rows();

    let columns = match rows_iter.next() {
        Some(header) => (0..width)
            .map(|col_idx| header_label(header.get(col_idx), col_idx))
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::with_capacity(height.saturating_sub(1));
    for (offset, cells) in rows_iter.enumerate() {
        let mut values: Vec<CellValue> = cells.iter().map(CellValue::from).collect();
        values.resize(width, CellValue::Missing);

        // 1-based sheet row: range start, plus the header, plus this row's offset
        rows.push(Row::new(first_row + offset + 2, values));
    }

    Sheet {
        name: name.to_string(),
        columns,
        rows,
    }
}

fn header_label(cell: Option<&Data>, col_idx: usize) -> String {
    match cell.map(CellValue::from) {
        Some(CellValue::Text(label)) if !label.is_empty() => label,
        _ => format!("{}: {}", PLACEHOLDER_LABEL, col_idx),
    }
}

impl Workbook {
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn get_sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn get_file_path(&self) -> &Path {
        &self.file_path
    }
}
