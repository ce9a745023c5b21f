//! Get command implementation

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use widget_config::{WidgetConfigDocument, path};

/// Arguments for the get command
#[derive(Debug)]
pub struct GetArgs {
    pub input: String,
    pub widget: String,
    /// Dot-separated group path; empty for the top level
    pub group: String,
    pub keys: Vec<String>,
    pub interactions: bool,
    pub defaults: bool,
}

pub fn execute(args: GetArgs) -> Result<()> {
    let input = super::read_json(&args.input)?;
    let item = find_widget(&input, &args.widget).ok_or_else(|| anyhow!("No widget named '{}'", args.widget))?;
    let doc: WidgetConfigDocument = serde_json::from_value(item.clone())
        .with_context(|| format!("Widget '{}' is not a widget document", args.widget))?;

    super::write_json(&lookup(&doc, &args), None)
}

/// Find a widget by name without parsing the rest of the array.
fn find_widget<'a>(input: &'a Value, name: &str) -> Option<&'a Value> {
    input
        .as_array()?
        .iter()
        .find(|item| item.get("name").and_then(Value::as_str) == Some(name))
}

/// Resolve the requested keys into a JSON object. Missing keys map to null.
fn lookup(doc: &WidgetConfigDocument, args: &GetArgs) -> Value {
    let tree = if args.interactions {
        doc.interactions()
    } else {
        doc.props()
    };
    let group_path: Vec<&str> = args.group.split('.').filter(|s| !s.is_empty()).collect();
    let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();

    let values = if args.defaults {
        path::get_or_default(tree, &group_path, &keys)
    } else {
        path::get(tree, &group_path, &keys)
    };

    let object: Map<String, Value> = keys
        .iter()
        .zip(values)
        .map(|(key, value)| (key.to_string(), value.cloned().unwrap_or(Value::Null)))
        .collect();
    Value::Object(object)
}
