//! Path-based access to configuration trees.
//!
//! A path is a list of group keys descended into, root first, followed by
//! one or more leaf keys looked up in the final row list:
//!
//! ```rust,ignore
//! // tabGroup -> dimensions -> { width, height }
//! let values = path::get(&props, &["tabGroup", "dimensions"], &["width", "height"]);
//! ```
//!
//! Reads never fail: a missing group or leaf yields `None` in that slot and
//! the caller picks its own fallback. Writes are pure and refuse to create
//! structure that is not already there.

use serde_json::Value;

use crate::types::{ConfigError, ConfigNode, Result};

/// Resolve the row list at `group_path`.
///
/// An empty path resolves to `tree` itself. Descends through any node that
/// has children, whatever its editor family.
pub fn find_rows<'a>(tree: &'a [ConfigNode], group_path: &[&str]) -> Option<&'a [ConfigNode]> {
    let mut rows = tree;
    for segment in group_path {
        rows = rows.iter().find(|n| n.key == *segment)?.rows.as_deref()?;
    }
    Some(rows)
}

/// Look up the nodes named by `leaf_keys` under `group_path`.
pub fn get_nodes<'a>(
    tree: &'a [ConfigNode],
    group_path: &[&str],
    leaf_keys: &[&str],
) -> Vec<Option<&'a ConfigNode>> {
    let rows = find_rows(tree, group_path);
    leaf_keys
        .iter()
        .map(|key| rows.and_then(|rows| rows.iter().find(|n| n.key == *key)))
        .collect()
}

/// Read the explicit `value` of each leaf. No default lookup is done here.
pub fn get<'a>(
    tree: &'a [ConfigNode],
    group_path: &[&str],
    leaf_keys: &[&str],
) -> Vec<Option<&'a Value>> {
    get_nodes(tree, group_path, leaf_keys)
        .into_iter()
        .map(|node| node.and_then(|n| n.value.as_ref()))
        .collect()
}

/// Read each leaf's value, falling back to the node's own `default`.
pub fn get_or_default<'a>(
    tree: &'a [ConfigNode],
    group_path: &[&str],
    leaf_keys: &[&str],
) -> Vec<Option<&'a Value>> {
    get_nodes(tree, group_path, leaf_keys)
        .into_iter()
        .map(|node| node.and_then(ConfigNode::effective_value))
        .collect()
}

/// Produce a new tree with the row list at `group_path` replaced by `f`'s output.
///
/// Fails with `PathNotFound` if a segment does not resolve to a node with
/// children. Row lists off the path are cloned unchanged.
pub fn update_rows<F>(tree: &[ConfigNode], group_path: &[&str], f: F) -> Result<Vec<ConfigNode>>
where
    F: FnOnce(&[ConfigNode]) -> Result<Vec<ConfigNode>>,
{
    match group_path.split_first() {
        None => f(tree),
        Some((segment, rest)) => {
            let index = tree
                .iter()
                .position(|n| n.key == *segment && n.is_group())
                .ok_or_else(|| path_not_found(group_path, None))?;
            let children = tree[index].rows.as_deref().unwrap_or_default();
            let updated = update_rows(children, rest, f).map_err(|e| prefix_path(e, segment))?;

            let mut out = tree.to_vec();
            out[index].rows = Some(updated);
            Ok(out)
        }
    }
}

/// Produce a new tree with `leaf_key` under `group_path` set to `value`.
///
/// The original tree is untouched. Missing groups or a missing leaf fail
/// with `PathNotFound`; nothing is created.
pub fn set(
    tree: &[ConfigNode],
    group_path: &[&str],
    leaf_key: &str,
    value: Value,
) -> Result<Vec<ConfigNode>> {
    update_rows(tree, group_path, |rows| {
        let index = rows
            .iter()
            .position(|n| n.key == leaf_key)
            .ok_or_else(|| path_not_found(&[], Some(leaf_key)))?;
        let mut out = rows.to_vec();
        out[index].value = Some(value);
        Ok(out)
    })
    .map_err(|e| match e {
        // report the leaf as well when a group segment was the miss
        ConfigError::PathNotFound { .. } => path_not_found(group_path, Some(leaf_key)),
        other => other,
    })
}

fn path_not_found(group_path: &[&str], leaf_key: Option<&str>) -> ConfigError {
    let mut path: Vec<String> = group_path.iter().map(|s| s.to_string()).collect();
    path.extend(leaf_key.map(str::to_string));
    ConfigError::PathNotFound { path }
}

fn prefix_path(error: ConfigError, segment: &str) -> ConfigError {
    match error {
        ConfigError::PathNotFound { mut path } => {
            path.insert(0, segment.to_string());
            ConfigError::PathNotFound { path }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComType;
    use serde_json::json;

    fn leaf(key: &str, value: Value) -> ConfigNode {
        ConfigNode::new(key, key, ComType::InputNumber).with_value(value)
    }

    fn group(key: &str, rows: Vec<ConfigNode>) -> ConfigNode {
        ConfigNode::group(key, key, rows)
    }

    fn tab_tree() -> Vec<ConfigNode> {
        vec![group(
            "tabGroup",
            vec![
                ConfigNode::new("style", "tab.style", ComType::Select).with_initial(json!("tab")),
                group("dimensions", vec![leaf("width", json!(200)), leaf("height", json!(32))]),
                group(
                    "margins",
                    vec![group("marginRow1", vec![leaf("paddingTop", json!(0))])],
                ),
            ],
        )]
    }

    #[test]
    fn test_get_missing_leaf_is_none() {
        let tree = vec![group(
            "liquid",
            vec![ConfigNode::new("max", "liquid.max", ComType::InputNumber)
                .with_default(json!(100))
                .with_value(json!(100))],
        )];

        let values = get(&tree, &["liquid"], &["max", "shape"]);
        assert_eq!(values, vec![Some(&json!(100)), None]);
    }

    #[test]
    fn test_get_does_not_apply_default() {
        let tree = vec![group(
            "liquid",
            vec![ConfigNode::new("shape", "liquid.shape", ComType::Select).with_default(json!("circle"))],
        )];

        assert_eq!(get(&tree, &["liquid"], &["shape"]), vec![None]);
        assert_eq!(
            get_or_default(&tree, &["liquid"], &["shape"]),
            vec![Some(&json!("circle"))]
        );
    }

    #[test]
    fn test_get_preserves_leaf_order() {
        let tree = tab_tree();
        let values = get(&tree, &["tabGroup", "dimensions"], &["height", "width"]);
        assert_eq!(values, vec![Some(&json!(32)), Some(&json!(200))]);
    }

    #[test]
    fn test_get_missing_group_is_all_none() {
        let tree = tab_tree();
        assert_eq!(get(&tree, &["tabGroup", "nope"], &["a", "b"]), vec![None, None]);
        // a leaf is not a group
        assert_eq!(get(&tree, &["tabGroup", "style"], &["a"]), vec![None]);
    }

    #[test]
    fn test_get_empty_path_reads_root() {
        let tree = vec![leaf("a", json!(1))];
        assert_eq!(get(&tree, &[], &["a"]), vec![Some(&json!(1))]);
    }

    #[test]
    fn test_set_returns_new_tree() {
        let tree = tab_tree();
        let updated = set(&tree, &["tabGroup", "margins", "marginRow1"], "paddingTop", json!(12)).unwrap();

        assert_eq!(
            get(&updated, &["tabGroup", "margins", "marginRow1"], &["paddingTop"]),
            vec![Some(&json!(12))]
        );
        // original untouched
        assert_eq!(
            get(&tree, &["tabGroup", "margins", "marginRow1"], &["paddingTop"]),
            vec![Some(&json!(0))]
        );
        // siblings off the path are unchanged
        assert_eq!(
            find_rows(&updated, &["tabGroup", "dimensions"]),
            find_rows(&tree, &["tabGroup", "dimensions"])
        );
    }

    #[test]
    fn test_set_missing_group_fails() {
        let tree = tab_tree();
        let err = set(&tree, &["tabGroup", "borders"], "width", json!(1)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PathNotFound {
                path: vec!["tabGroup".into(), "borders".into(), "width".into()]
            }
        );
    }

    #[test]
    fn test_set_missing_leaf_fails() {
        let tree = tab_tree();
        let err = set(&tree, &["tabGroup", "dimensions"], "depth", json!(1)).unwrap_err();
        assert!(matches!(err, ConfigError::PathNotFound { ref path } if path.last().unwrap() == "depth"));
    }

    #[test]
    fn test_set_through_leaf_fails() {
        let tree = tab_tree();
        assert!(set(&tree, &["tabGroup", "style"], "x", json!(1)).is_err());
    }

    #[test]
    fn test_update_rows_reports_full_path() {
        let tree = tab_tree();
        let err = update_rows(&tree, &["tabGroup", "margins", "marginRow9"], |rows| Ok(rows.to_vec()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::PathNotFound {
                path: vec!["tabGroup".into(), "margins".into(), "marginRow9".into()]
            }
        );
    }
}
