//! User edits: write a value, then refresh the derived attributes it feeds.

use serde_json::Value;

use crate::path;
use crate::types::{ConfigError, ConfigNode, Result};
use crate::watcher;

/// A tree produced by [`apply_edit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edited {
    pub tree: Vec<ConfigNode>,
    /// Watcher problems found while re-evaluating the edited row list.
    pub errors: Vec<ConfigError>,
}

/// Set `leaf_key` under `group_path` and re-run the watchers of its siblings.
///
/// Only the edited row list is re-evaluated since watchers may depend on
/// siblings alone. The input tree is never modified.
///
/// # Errors
///
/// `PathNotFound` when the group path or the leaf does not exist.
pub fn apply_edit(tree: &[ConfigNode], group_path: &[&str], leaf_key: &str, value: Value) -> Result<Edited> {
    let updated = path::set(tree, group_path, leaf_key, value)?;

    let mut errors = Vec::new();
    let tree = path::update_rows(&updated, group_path, |rows| Ok(watcher::evaluate_rows(rows, &mut errors)))?;
    Ok(Edited { tree, errors })
}
