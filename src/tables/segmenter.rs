use crate::excel::{Row, Sheet};
use crate::tables::types::TableBlock;

/// Split a sheet into its table blocks, in sheet order.
///
/// Blank rows end the current block and are never part of one. A single-table
/// sheet yields at most one block, made of the rows that have no missing cell.
pub fn segment(sheet: &Sheet, single_table: bool) -> Vec<TableBlock> {
    if single_table {
        // No splitting: keep only rows with every cell filled in
        let rows: Vec<Row> = sheet
            .rows
            .iter()
            .filter(|row| !row.has_missing())
            .cloned()
            .collect();

        let dropped = sheet.rows.len() - rows.len();
        if dropped > 0 {
            log::debug!(
                "sheet '{}': dropped {} incomplete rows from single-table sheet",
                sheet.name,
                dropped
            );
        }

        if rows.is_empty() {
            return Vec::new();
        }
        return vec![TableBlock { position: 1, rows }];
    }

    let mut blocks = Vec::new();
    let mut current: Vec<Row> = Vec::new();

    // Each blank row closes the block collected so far
    for row in &sheet.rows {
        if row.is_blank() {
            close_block(&mut blocks, &mut current);
        } else {
            current.push(row.clone());
        }
    }
    // Rows after the last blank row
    close_block(&mut blocks, &mut current);

    blocks
}

fn close_block(blocks: &mut Vec<TableBlock>, current: &mut Vec<Row>) {
    if current.is_empty() {
        return;
    }
    blocks.push(TableBlock {
        position: blocks.len() + 1,
        rows: std::mem::take(current),
    });
}
