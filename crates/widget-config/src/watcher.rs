//! Derived attributes from sibling dependencies.
//!
//! A watcher reads the raw values of the sibling keys it names and returns
//! attributes (`hide`, `disabled`, ...) to overlay onto its own node.
//! Watchers never see another watcher's output, so one pass over a row list
//! is enough and declaration order does not matter.

use serde_json::Value;

use crate::types::{ConfigError, ConfigNode, DepValues, DerivedAttrs, Result, find_sibling};

/// Collect the current values of `node`'s watcher dependencies.
///
/// Each dependency contributes its `value`, else its `default`, else
/// `null`. A dependency that is not a sibling, or is the node itself, is
/// an `InvalidWatcher` error.
pub fn dependency_values(node: &ConfigNode, siblings: &[ConfigNode]) -> Result<DepValues> {
    let mut values = DepValues::new();
    let Some(watcher) = &node.watcher else {
        return Ok(values);
    };

    for dep in &watcher.deps {
        let sibling = (dep != &node.key)
            .then(|| find_sibling(siblings, dep))
            .flatten()
            .ok_or_else(|| ConfigError::InvalidWatcher {
                node: node.key.clone(),
                dependency: dep.clone(),
            })?;
        let value = sibling.effective_value().cloned().unwrap_or(Value::Null);
        values.insert(dep.clone(), value);
    }

    Ok(values)
}

/// Run `node`'s watcher against its siblings.
///
/// Returns `None` when the node has no watcher, or when the watcher was
/// read from storage and carries no action. Dependencies are validated
/// either way.
pub fn evaluate_watcher(node: &ConfigNode, siblings: &[ConfigNode]) -> Result<Option<DerivedAttrs>> {
    let deps = dependency_values(node, siblings)?;
    Ok(node
        .watcher
        .as_ref()
        .and_then(|w| w.action.as_ref())
        .map(|action| action.call(&deps)))
}

/// Overlay derived attributes onto a node. `value` is never touched.
pub fn apply_derived(node: &mut ConfigNode, attrs: DerivedAttrs) {
    if let Some(hide) = attrs.hide {
        node.hide = Some(hide);
    }
    if let Some(disabled) = attrs.disabled {
        node.disabled = Some(disabled);
    }
    for (key, value) in attrs.extra {
        node.extra.insert(key, value);
    }
}

/// Evaluate every watcher in one row list.
///
/// A node whose watcher is invalid keeps its previous derived attributes
/// and the error is pushed to `errors`; the other nodes still evaluate.
pub fn evaluate_rows(rows: &[ConfigNode], errors: &mut Vec<ConfigError>) -> Vec<ConfigNode> {
    rows.iter()
        .map(|node| {
            let mut out = node.clone();
            match evaluate_watcher(node, rows) {
                Ok(Some(attrs)) => apply_derived(&mut out, attrs),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(node = %node.key, error = %e, "Skipping invalid watcher");
                    errors.push(e);
                }
            }
            out
        })
        .collect()
}

/// Evaluate watchers in every row list of a forest, parents before children.
pub fn evaluate_tree(tree: &[ConfigNode], errors: &mut Vec<ConfigError>) -> Vec<ConfigNode> {
    evaluate_rows(tree, errors)
        .into_iter()
        .map(|mut node| {
            if let Some(rows) = node.rows.take() {
                node.rows = Some(evaluate_tree(&rows, errors));
            }
            node
        })
        .collect()
}
