use std::fmt;
use std::path::Path;

use crate::config::ExtractOptions;
use crate::error::{ExtractError, TableError};
use crate::excel::{Sheet, open_workbook};
use crate::tables::{NormalizedTable, normalize, segment};
use crate::variables::{VariableStore, Variables, bind};

/// A table that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub sheet: String,
    /// 1-based position of the block in its sheet.
    pub block: usize,
    /// Sheet row the block starts on.
    pub row: usize,
    pub error: TableError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.error.is_malformed() {
            "ignoring table"
        } else {
            "rejecting table"
        };
        write!(
            f,
            "sheet '{}': {} {} at row {}: {}",
            self.sheet,
            kind,
            self.block,
            self.row,
            self.error
        )
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub variables: Variables,
    pub diagnostics: Vec<Diagnostic>,
}

/// Open a workbook and extract its variables. Nothing is returned if the file
/// can't be read.
pub fn extract_from_path<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    let workbook = open_workbook(path)?;
    log::info!(
        "read {} worksheets from {}: {:?}",
        workbook.sheets().len(),
        workbook.get_file_path().display(),
        workbook.get_sheet_names()
    );
    Ok(extract_variables(workbook.sheets(), options))
}

/// Run every sheet through segmentation, normalization and binding, in the
/// order given. Later sheets override earlier ones on name collisions.
pub fn extract_variables(sheets: &[Sheet], options: &ExtractOptions) -> Extraction {
    let mut store = VariableStore::new();
    let mut diagnostics = Vec::new();

    for sheet in sheets {
        let tables = sheet_tables(sheet, options, &mut diagnostics);
        log::info!("processed worksheet '{}': {} tables", sheet.name, tables.len());

        store.insert_sheet(&sheet.name, bind(&sheet.name, &tables));
    }

    Extraction {
        variables: store.freeze(),
        diagnostics,
    }
}

fn sheet_tables(
    sheet: &Sheet,
    options: &ExtractOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<NormalizedTable> {
    let blocks = segment(sheet, options.is_single_table(&sheet.name));
    let mut tables = Vec::with_capacity(blocks.len());

    for block in &blocks {
        match normalize(block, &sheet.columns, options) {
            Ok(table) => {
                log::debug!(
                    "sheet '{}': block {} at row {} is table {} with columns {:?}",
                    sheet.name,
                    block.position,
                    block.first_row(),
                    tables.len() + 1,
                    table.columns
                );
                tables.push(table);
            }
            Err(error) => {
                let diagnostic = Diagnostic {
                    sheet: sheet.name.clone(),
                    block: block.position,
                    row: block.first_row(),
                    error,
                };
                log::warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            }
        }
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::{Binding, Shape};
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> crate::variables::Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(sheets: &[Sheet]) -> Extraction {
        extract_variables(sheets, &ExtractOptions::default())
    }

    #[test]
    fn two_column_sheet_is_a_map_even_without_key_value_headers() {
        let sheet = Sheet::from_rows(
            "examples",
            &["name", "email"],
            vec![
                vec![Some("Alice"), Some("a@x.com")],
                vec![Some("Bob"), Some("b@x.com")],
            ],
        );
        let result = run(&[sheet]);
        let expected = Binding::KeyValueMap(record(&[("Alice", "a@x.com"), ("Bob", "b@x.com")]));
        assert_eq!(result.variables.get("examples").unwrap(), &expected);
        assert_eq!(result.variables.get("examples_table_1").unwrap(), &expected);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn record_list_sheet() {
        let sheet = Sheet::from_rows(
            "contact_info",
            &["name", "email", "phone"],
            vec![
                vec![Some("Alice"), Some("a@x.com"), Some("111")],
                vec![Some("Bob"), Some("b@x.com"), None],
            ],
        );
        let result = run(&[sheet]);
        let expected = Binding::RecordList(vec![
            record(&[("name", "Alice"), ("email", "a@x.com"), ("phone", "111")]),
            record(&[("name", "Bob"), ("email", "b@x.com"), ("phone", "")]),
        ]);
        assert_eq!(result.variables.get("contact_info").unwrap(), &expected);
        assert_eq!(result.variables.get("contact_info_table_1").unwrap(), &expected);
    }

    #[test]
    fn key_value_sheet() {
        let sheet = Sheet::from_rows(
            "network_settings",
            &["key", "value"],
            vec![
                vec![Some("ntp_server"), Some("1.1.1.1")],
                vec![Some("aaa_server"), Some("2.2.2.2")],
            ],
        );
        let result = run(&[sheet]);
        let expected = Binding::KeyValueMap(record(&[
            ("ntp_server", "1.1.1.1"),
            ("aaa_server", "2.2.2.2"),
        ]));
        assert_eq!(result.variables.get("network_settings").unwrap(), &expected);
        assert_eq!(
            result.variables.get("network_settings_table_1").unwrap(),
            &expected
        );
    }

    #[test]
    fn stacked_tables_in_one_sheet() {
        let sheet = Sheet::from_rows(
            "devices",
            &["key", "value", "Unnamed: 2"],
            vec![
                vec![Some("site"), Some("syd"), None],
                vec![None, None, None],
                vec![Some("device"), Some("model"), Some("role")],
                vec![Some("r1"), Some("c8300"), Some("spine")],
            ],
        );
        let variables = run(&[sheet]).variables;
        assert_eq!(
            variables.get("devices_table_1").unwrap().shape(),
            Shape::KeyValueMap
        );
        assert_eq!(
            variables.records("devices_table_2").unwrap(),
            &[record(&[("device", "r1"), ("model", "c8300"), ("role", "spine")])]
        );
        assert_eq!(
            variables.get("devices").unwrap(),
            variables.get("devices_table_1").unwrap()
        );
        assert!(!variables.contains("devices_table_3"));
    }

    #[test]
    fn single_table_sheet_drops_incomplete_rows() {
        let sheet = Sheet::from_rows(
            "diagram_labels",
            &["label", "value", "replacement_text"],
            vec![
                vec![Some("role"), Some("spine_1"), Some("syd_sw_01")],
                vec![Some("role"), Some("spine_2"), None],
                vec![None, None, None],
                vec![Some("role"), Some("leaf_1"), Some("syd_sw_03")],
            ],
        );
        let result = run(&[sheet]);
        let records = result.variables.records("diagram_labels").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["replacement_text"], "syd_sw_03");
        assert!(!result.variables.contains("diagram_labels_table_2"));
    }

    #[test]
    fn empty_table_does_not_take_a_number() {
        let sheet = Sheet::from_rows(
            "s",
            &["a", "b", "c"],
            vec![
                vec![Some("1"), Some("2"), Some("3")],
                vec![],
                vec![Some("#a"), Some("#b")],
                vec![Some("x"), Some("y")],
                vec![],
                vec![Some("host"), Some("ip")],
                vec![Some("h1"), Some("10.0.0.1")],
            ],
        );
        let result = run(&[sheet]);
        assert_eq!(
            result.variables.names().collect::<Vec<_>>(),
            vec!["s", "s_table_1", "s_table_2"]
        );
        assert_eq!(
            result.variables.key_value("s_table_2").unwrap()["h1"],
            "10.0.0.1"
        );
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic {
                sheet: "s".to_string(),
                block: 2,
                row: 4,
                error: TableError::NoColumns,
            }]
        );
    }

    #[test]
    fn ambiguous_table_is_reported_and_skipped() {
        let sheet = Sheet::from_rows(
            "s",
            &["ip", "ip", "host"],
            vec![vec![Some("1"), Some("2"), Some("h")]],
        );
        let result = run(&[sheet]);
        assert!(result.variables.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert!(!result.diagnostics[0].error.is_malformed());
        assert_eq!(
            result.diagnostics[0].to_string(),
            "sheet 's': rejecting table 1 at row 2: column 'ip' appears more than once in the header"
        );
    }

    #[test]
    fn later_sheet_overrides_collisions() {
        let first = Sheet::from_rows("x", &["k", "v"], vec![vec![Some("a"), Some("1")]]);
        let second = Sheet::from_rows("x_table_1", &["n"], vec![vec![Some("only")]]);
        let third = Sheet::from_rows("x", &["k", "v"], vec![vec![Some("a"), Some("2")]]);

        let variables = run(&[first, second, third]).variables;
        assert_eq!(variables.key_value("x").unwrap()["a"], "2");
        assert_eq!(variables.key_value("x_table_1").unwrap()["a"], "2");
        assert_eq!(variables.records("x_table_1_table_1").unwrap().len(), 1);
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let sheets = vec![
            Sheet::from_rows("a", &["k", "v"], vec![vec![Some("1"), Some("2")]]),
            Sheet::from_rows("b", &["x", "y", "z"], vec![vec![Some("1"), None, Some("3")]]),
        ];
        let first = serde_json::to_string(&run(&sheets).variables).unwrap();
        let second = serde_json::to_string(&run(&sheets).variables).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn normalized_rows_cover_the_sheet() {
        let sheet = Sheet::from_rows(
            "s",
            &["a", "b", "c"],
            vec![
                vec![Some("1"), Some("2"), Some("3")],
                vec![Some("4"), Some("5"), Some("6")],
                vec![],
                vec![Some("x"), Some("y"), Some("z")],
                vec![Some("7"), Some("8"), Some("9")],
            ],
        );
        let mut diagnostics = Vec::new();
        let tables = sheet_tables(&sheet, &ExtractOptions::default(), &mut diagnostics);
        let rows: Vec<Vec<&str>> = tables
            .iter()
            .flat_map(|t| t.rows.iter())
            .map(|row| row.iter().map(String::as_str).collect())
            .collect();
        // Later blocks give up their first row as the header
        assert_eq!(
            rows,
            vec![vec!["1", "2", "3"], vec!["4", "5", "6"], vec!["7", "8", "9"]]
        );
        assert!(diagnostics.is_empty());
    }
}
