mod cell;
mod sheet;
mod workbook;

pub use cell::{CellValue, excel_date_to_iso_string};
pub use sheet::{Row, Sheet};
pub use workbook::{PLACEHOLDER_LABEL, Workbook, open_workbook};
