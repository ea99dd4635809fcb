use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ExtractError;
use crate::variables::binding::{Binding, Record, Shape};

/// Collects bindings sheet by sheet. A name bound by a later sheet replaces
/// the earlier binding outright.
#[derive(Debug, Default)]
pub struct VariableStore {
    bindings: IndexMap<String, Arc<Binding>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sheet(&mut self, sheet_name: &str, bindings: IndexMap<String, Arc<Binding>>) {
        for (name, binding) in bindings {
            // IndexMap keeps the name's first position and swaps the value
            if self.bindings.insert(name.clone(), binding).is_some() {
                log::info!("sheet '{}' overrides variable '{}'", sheet_name, name);
            }
        }
    }

    pub fn freeze(self) -> Variables {
        Variables {
            bindings: self.bindings,
        }
    }
}

/// The finished, read-only variable namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Variables {
    bindings: IndexMap<String, Arc<Binding>>,
}

impl Variables {
    pub fn get(&self, name: &str) -> Result<&Binding, ExtractError> {
        self.bindings
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| ExtractError::UnknownBinding {
                name: name.to_string(),
            })
    }

    pub fn key_value(&self, name: &str) -> Result<&IndexMap<String, String>, ExtractError> {
        match self.get(name)? {
            Binding::KeyValueMap(map) => Ok(map),
            other => Err(unexpected_shape(name, Shape::KeyValueMap, other)),
        }
    }

    pub fn records(&self, name: &str) -> Result<&[Record], ExtractError> {
        match self.get(name)? {
            Binding::RecordList(records) => Ok(records),
            other => Err(unexpected_shape(name, Shape::RecordList, other)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings
            .iter()
            .map(|(name, binding)| (name.as_str(), binding.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn unexpected_shape(name: &str, expected: Shape, found: &Binding) -> ExtractError {
    ExtractError::UnexpectedShape {
        name: name.to_string(),
        expected: expected.describe(),
        found: found.shape().describe(),
    }
}
