use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

use crate::tables::NormalizedTable;

pub type Record = IndexMap<String, String>;

/// How a table is exposed to templates, decided by its column count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Two columns: first column keys, second column values.
    KeyValueMap,
    /// Anything else: one record per row.
    RecordList,
}

impl Shape {
    pub fn for_column_count(columns: usize) -> Self {
        if columns == 2 {
            Shape::KeyValueMap
        } else {
            Shape::RecordList
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Shape::KeyValueMap => "key/value map",
            Shape::RecordList => "record list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Binding {
    KeyValueMap(IndexMap<String, String>),
    RecordList(Vec<Record>),
}

impl Binding {
    pub fn from_table(table: &NormalizedTable) -> Self {
        match Shape::for_column_count(table.column_count()) {
            Shape::KeyValueMap => {
                let mut map = IndexMap::with_capacity(table.row_count());
                for row in &table.rows {
                    // A repeated key takes the later row's value
                    map.insert(row[0].clone(), row[1].clone());
                }
                Binding::KeyValueMap(map)
            }
            // One record per row, keys in column order
            Shape::RecordList => Binding::RecordList(
                table
                    .rows
                    .iter()
                    .map(|row| {
                        table
                            .columns
                            .iter()
                            .cloned()
                            .zip(row.iter().cloned())
                            .collect()
                    })
                    .collect(),
            ),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Binding::KeyValueMap(_) => Shape::KeyValueMap,
            Binding::RecordList(_) => Shape::RecordList,
        }
    }

    /// Number of entries for a map, number of records for a list.
    pub fn len(&self) -> usize {
        match self {
            Binding::KeyValueMap(map) => map.len(),
            Binding::RecordList(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn table_variable_name(sheet_name: &str, index: usize) -> String {
    format!("{}_table_{}", sheet_name, index)
}

/// Name a sheet's surviving tables, numbered from 1 in sheet order.
///
/// Table 1 is bound twice: under `<sheet>_table_1` and under the bare sheet
/// name, both pointing at the same value.
pub fn bind(sheet_name: &str, tables: &[NormalizedTable]) -> IndexMap<String, Arc<Binding>> {
    let mut bindings = IndexMap::with_capacity(tables.len() + 1);

    // Tables are numbered from 1 in sheet order
    for (idx, table) in tables.iter().enumerate() {
        let index = idx + 1;
        let binding = Arc::new(Binding::from_table(table));
        let name = table_variable_name(sheet_name, index);

        log::debug!(
            "binding '{}' as {} ({} columns, {} rows)",
            name,
            binding.shape().describe(),
            table.column_count(),
            table.row_count()
        );

        // The sheet name is an alias for its first table only
        if index == 1 {
            bindings.insert(sheet_name.to_string(), Arc::clone(&binding));
        }
        bindings.insert(name, binding);
    }

    bindings
}
