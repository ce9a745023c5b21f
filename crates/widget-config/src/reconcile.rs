//! Reconciliation of a schema template with previously saved values.
//!
//! The template decides the shape of the result (which keys exist, in what
//! order, how they nest, which editor and options they use). The saved tree
//! only contributes values: for each template node whose key also appears
//! among the saved siblings, the saved `value` is carried forward, along
//! with `hide`/`disabled` when they were explicitly stored.
//!
//! Saved nodes with no template counterpart are dropped.

use crate::types::{ConfigNode, find_sibling};

/// Merge `template` with `saved`.
///
/// With no saved tree (a freshly created widget) the template is returned
/// as is. Matching is by key within each sibling list, never globally.
pub fn merge(template: &[ConfigNode], saved: Option<&[ConfigNode]>) -> Vec<ConfigNode> {
    let Some(saved) = saved else {
        return template.to_vec();
    };

    template
        .iter()
        .map(|tpl| merge_node(tpl, find_sibling(saved, &tpl.key)))
        .collect()
}

fn merge_node(tpl: &ConfigNode, saved: Option<&ConfigNode>) -> ConfigNode {
    let Some(saved) = saved else {
        return tpl.clone();
    };

    let mut node = tpl.clone();
    // an absent saved value stays absent: the node falls back to its default
    node.value = saved.value.clone();
    if saved.hide.is_some() {
        node.hide = saved.hide;
    }
    if saved.disabled.is_some() {
        node.disabled = saved.disabled;
    }
    if let Some(rows) = &tpl.rows {
        node.rows = Some(merge(rows, saved.rows.as_deref()));
    }
    node
}

/// Whether two forests have the same shape: keys, editor families, and
/// nesting, in order. Values and options are ignored.
pub fn same_shape(a: &[ConfigNode], b: &[ConfigNode]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.key == y.key
                && x.com_type == y.com_type
                && match (&x.rows, &y.rows) {
                    (Some(xr), Some(yr)) => same_shape(xr, yr),
                    (None, None) => true,
                    _ => false,
                }
        })
}
