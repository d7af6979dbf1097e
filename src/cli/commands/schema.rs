//! Implementation of the `bluemind-config schema` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{bluemind_schema, FieldKind, Schema};
use crate::infrastructure::logging::redact;

/// One declared setting as listed by `schema`
#[derive(Debug, Serialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// Key read from the environment and override file
    pub key: String,
    /// Declared type
    pub kind: FieldKind,
    /// Default value, redacted when sensitive
    pub default: String,
    /// Whether the value is a secret
    pub sensitive: bool,
    /// Short description, if declared
    pub description: Option<String>,
}

/// Output of the `schema` command
#[derive(Debug, Serialize)]
pub struct SchemaOutput {
    /// Declared settings in schema order
    pub fields: Vec<SchemaField>,
}

impl From<&Schema> for SchemaOutput {
    fn from(schema: &Schema) -> Self {
        let fields = schema
            .iter()
            .map(|f| SchemaField {
                name: f.name().to_string(),
                key: f.source_key().to_string(),
                kind: f.kind(),
                default: redact(f.default_value(), f.is_sensitive()),
                sensitive: f.is_sensitive(),
                description: f.description().map(str::to_string),
            })
            .collect();
        Self { fields }
    }
}

impl CommandOutput for SchemaOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["key", "type", "default", "description"]);
        for field in &self.fields {
            table.add_row(vec![
                field.key.clone(),
                field.kind.to_string(),
                field.default.clone(),
                field.description.clone().unwrap_or_default(),
            ]);
        }
        render_list("setting", &table, self.fields.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// List the declared BlueMind settings
pub fn execute(json_mode: bool) -> Result<()> {
    let schema = bluemind_schema()?;
    output(&SchemaOutput::from(&schema), json_mode);
    Ok(())
}
