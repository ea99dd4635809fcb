use indexmap::IndexSet;

use crate::config::ExtractOptions;
use crate::error::TableError;
use crate::excel::{CellValue, Row};
use crate::tables::types::{NormalizedTable, TableBlock};

/// Infer a block's header and keep only its data-bearing columns.
///
/// The first block of a sheet is described by the sheet's own column labels and
/// all its rows are data. Any later block carries its header in its first row;
/// the header ends at the first missing cell and the data rows are read to
/// that width.
pub fn normalize(
    block: &TableBlock,
    sheet_header: &[String],
    options: &ExtractOptions,
) -> Result<NormalizedTable, TableError> {
    // First block: sheet header is schema, every row is data
    let (labels, data): (Vec<String>, &[Row]) = if block.position == 1 {
        (sheet_header.to_vec(), block.rows.as_slice())
    } else {
        // Later blocks: the first row is the header
        match block.rows.split_first() {
            Some((header, data)) => (derive_header(header, &options.placeholder_prefix), data),
            None => return Err(TableError::NoDataRows),
        }
    };

    if data.is_empty() {
        return Err(TableError::NoDataRows);
    }

    // Drop placeholder and comment columns
    let kept: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, label)| !options.is_decorative(label))
        .map(|(idx, _)| idx)
        .collect();

    if kept.is_empty() {
        return Err(TableError::NoColumns);
    }

    // Refuse the table rather than let one column overwrite another
    let mut columns = IndexSet::with_capacity(kept.len());
    for &idx in &kept {
        if !columns.insert(labels[idx].clone()) {
            return Err(TableError::AmbiguousHeader {
                label: labels[idx].clone(),
            });
        }
    }

    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|row| {
            kept.iter()
                .map(|&idx| row.cells.get(idx).cloned().map_or_else(String::new, CellValue::into_text))
                .collect()
        })
        .collect();

    if rows.iter().all(|row| row.iter().all(String::is_empty)) {
        return Err(TableError::OnlyEmptyRows);
    }

    Ok(NormalizedTable {
        columns: columns.into_iter().collect(),
        rows,
    })
}

/// Leading non-missing cells of a block's first row. Empty text labels get a
/// placeholder, the same as blank cells in the sheet header.
fn derive_header(row: &Row, placeholder_prefix: &str) -> Vec<String> {
    row.cells
        .iter()
        .take_while(|cell| !cell.is_missing())
        .enumerate()
        .map(|(idx, cell)| match cell.clone().into_text() {
            label if label.is_empty() => format!("{}: {}", placeholder_prefix, idx),
            label => label,
        })
        .collect()
}
