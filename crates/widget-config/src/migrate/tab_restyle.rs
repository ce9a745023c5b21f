//! `RC.1`: tab widgets gain the dropdown style and tab bar positioning.

use serde_json::Value;

use super::MigrationRule;
use crate::document::WidgetConfigDocument;
use crate::templates::tab::{self, TAB_GROUP_KEY};
use crate::types::{ConfigError, ConfigNode, Result, find_sibling};

pub const APP_VERSION_RC_1: &str = "RC.1";

const ALIGNMENT_LABEL_PREFIX: &str = "viz.common.enum.alignment.";

/// Rewrites pre-`RC.1` tab widgets to the current `tabGroup` layout.
///
/// Two legacy shapes are recognised:
///
/// - props with no `tabGroup` at all get the current group inserted first;
/// - a `tabGroup` that holds `align` but no `position` is restyled in place:
///   `style` and `position` go ahead of `align`, whose item labels move to
///   the shared alignment namespace, and the appearance nodes are appended.
///
/// A tab widget with no props, a `tabGroup` already holding `position`, or
/// a `tabGroup` nested inside `tabGroup` is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabGroupRestyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    InsertTemplate,
    Restyle { index: usize },
    Nothing,
}

fn plan(doc: &WidgetConfigDocument) -> Plan {
    if doc.original_type != tab::ORIGINAL_TYPE {
        return Plan::Nothing;
    }
    let props = doc.props();
    if props.is_empty() {
        return Plan::Nothing;
    }
    let Some(index) = props.iter().position(|n| n.key == TAB_GROUP_KEY) else {
        return Plan::InsertTemplate;
    };

    let rows = props[index].rows.as_deref().unwrap_or_default();
    let nested = rows.iter().any(|n| n.key == TAB_GROUP_KEY && n.is_group());
    let has = |key: &str| find_sibling(rows, key).is_some();
    if nested || has("position") || !has("align") {
        Plan::Nothing
    } else {
        Plan::Restyle { index }
    }
}

/// Point each option item's label at `viz.common.enum.alignment.<value>`.
fn retarget_align(align: &ConfigNode) -> ConfigNode {
    let mut node = align.clone();
    if let Some(Value::Array(items)) = node.options.as_mut().and_then(|o| o.get_mut("items")) {
        for item in items.iter_mut() {
            let Some(value) = item.get("value").and_then(Value::as_str).map(str::to_string) else {
                continue;
            };
            if let Some(obj) = item.as_object_mut() {
                obj.insert(
                    "label".to_string(),
                    Value::String(format!("{ALIGNMENT_LABEL_PREFIX}{value}")),
                );
            }
        }
    }
    if node.watcher.is_none() {
        node.watcher = tab::align_node().watcher;
    }
    node
}

fn restyle_rows(rows: &[ConfigNode]) -> Vec<ConfigNode> {
    let mut out = Vec::with_capacity(rows.len() + 11);
    out.push(find_sibling(rows, "style").cloned().unwrap_or_else(tab::style_node));
    out.push(tab::position_node());

    for node in rows {
        match node.key.as_str() {
            "style" => {}
            "align" => out.push(retarget_align(node)),
            _ => out.push(node.clone()),
        }
    }

    for node in tab::appearance_nodes() {
        if find_sibling(rows, &node.key).is_none() {
            out.push(node);
        }
    }
    out
}

impl MigrationRule for TabGroupRestyle {
    fn name(&self) -> &str {
        "tab-group-restyle"
    }

    fn version(&self) -> &str {
        APP_VERSION_RC_1
    }

    fn applies_to(&self, doc: &WidgetConfigDocument) -> bool {
        plan(doc) != Plan::Nothing
    }

    fn transform(&self, doc: &WidgetConfigDocument) -> Result<WidgetConfigDocument> {
        let mut props = doc.props().to_vec();
        match plan(doc) {
            Plan::InsertTemplate => props.insert(0, tab::tab_group()),
            Plan::Restyle { index } => {
                let rows = restyle_rows(props[index].rows.as_deref().unwrap_or_default());
                props[index].rows = Some(rows);
            }
            Plan::Nothing => {
                return Err(ConfigError::RuleFailed {
                    rule: self.name().to_string(),
                    document: doc.name.clone(),
                    message: "document has no legacy tab group to restyle".to_string(),
                });
            }
        }
        Ok(doc.clone().with_props(props))
    }
}
