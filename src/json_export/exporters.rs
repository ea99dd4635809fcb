use anyhow::{Context, Result};
use serde::Serialize;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::variables::{Binding, Variables};

pub fn serialize_to_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

fn write_json_to_file<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(data)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

// Export every variable to a single JSON file
pub fn export_variables_json(variables: &Variables, path: &Path) -> Result<()> {
    write_json_to_file(variables, path)
}

// Export one variable, looked up by name
pub fn export_binding_json(variables: &Variables, name: &str, path: &Path) -> Result<()> {
    let binding: &Binding = variables.get(name)?;
    write_json_to_file(binding, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractOptions;
    use crate::excel::Sheet;
    use crate::extract::extract_variables;

    fn variables() -> Variables {
        let sheet = Sheet::from_rows(
            "network_settings",
            &["key", "value"],
            vec![vec![Some("ntp_server"), Some("1.1.1.1")]],
        );
        extract_variables(&[sheet], &ExtractOptions::default()).variables
    }

    #[test]
    fn snapshot_serializes_as_flat_object() {
        let json: serde_json::Value =
            serde_json::from_str(&serialize_to_json(&variables()).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "network_settings": { "ntp_server": "1.1.1.1" },
                "network_settings_table_1": { "ntp_server": "1.1.1.1" },
            })
        );
    }

    #[test]
    fn writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let all = dir.path().join("variables.json");
        let one = dir.path().join("one.json");

        export_variables_json(&variables(), &all).unwrap();
        export_binding_json(&variables(), "network_settings", &one).unwrap();

        let one_text = std::fs::read_to_string(&one).unwrap();
        assert!(one_text.contains("\"ntp_server\": \"1.1.1.1\""));
        assert!(std::fs::read_to_string(&all).unwrap().contains("network_settings_table_1"));
    }

    #[test]
    fn unknown_binding_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(export_binding_json(&variables(), "nope", &path).is_err());
        assert!(!path.exists());
    }
}
