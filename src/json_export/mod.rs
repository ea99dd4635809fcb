mod exporters;

pub use exporters::{export_binding_json, export_variables_json, serialize_to_json};
