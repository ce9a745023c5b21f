//! Board widget interactions derived from the chart they display.

use serde_json::Value;

use crate::types::{ConfigNode, find_sibling};

pub const DRILL_THROUGH_KEY: &str = "drillThrough";
pub const VIEW_DETAIL_KEY: &str = "viewDetail";

/// Option set on a board interaction when the chart has its own setting.
pub const HAS_ORIGINAL_OPTION: &str = "hasOriginal";

fn chart_enables(chart: &[ConfigNode], key: &str) -> bool {
    find_sibling(chart, key).and_then(ConfigNode::effective_value) == Some(&Value::Bool(true))
}

/// Align a board widget's interactions with its chart's interactions.
///
/// When the chart declares any interactions, board interactions the chart
/// does not declare are dropped. `drillThrough` and `viewDetail` then get
/// `options.hasOriginal` set from whether the chart enables the same
/// interaction. Each node keeps its own other options.
pub fn annotate_chart_interactions(interactions: &[ConfigNode], chart: &[ConfigNode]) -> Vec<ConfigNode> {
    interactions
        .iter()
        .filter(|node| chart.is_empty() || find_sibling(chart, &node.key).is_some())
        .map(|node| {
            let mut node = node.clone();
            if node.key == DRILL_THROUGH_KEY || node.key == VIEW_DETAIL_KEY {
                let has_original = chart_enables(chart, &node.key);
                node.options
                    .get_or_insert_with(Default::default)
                    .insert(HAS_ORIGINAL_OPTION.to_string(), Value::Bool(has_original));
            }
            node
        })
        .collect()
}
