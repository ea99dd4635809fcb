use crate::excel::CellValue;

/// One data row of a sheet. `cells` lines up with the sheet's column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based row number in the source sheet (the header is row 1).
    pub number: usize,
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(number: usize, cells: Vec<CellValue>) -> Self {
        Self { number, cells }
    }

    /// True when every cell is missing. Such rows separate tables.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_missing)
    }

    pub fn has_missing(&self) -> bool {
        self.cells.iter().any(CellValue::is_missing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Labels from the sheet's first row, placeholders included.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Build a sheet from a header and rows of optional text, `None` being a missing cell.
    /// Rows are padded or cut to the header width and numbered from 2.
    pub fn from_rows<S, R, C>(name: &str, header: &[S], rows: R) -> Self
    where
        S: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = Option<&'static str>>,
    {
        let columns: Vec<String> = header.iter().map(|s| s.as_ref().to_string()).collect();
        let width = columns.len();

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, cells)| {
                let mut cells: Vec<CellValue> = cells
                    .into_iter()
                    .map(|cell| cell.map_or(CellValue::Missing, CellValue::text))
                    .collect();
                cells.resize(width, CellValue::Missing);
                Row::new(idx + 2, cells)
            })
            .collect();

        Self {
            name: name.to_string(),
            columns,
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}
