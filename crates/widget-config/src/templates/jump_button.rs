//! Jump button widget.

use serde_json::json;

use super::WidgetTemplate;
use super::common::{PRIMARY, background_group, border_group, padding_group, title_group};
use crate::types::{ComType, ConfigNode};

pub const ORIGINAL_TYPE: &str = "jumpBtn";

/// Drill-through interaction opened from the button.
pub fn drill_through() -> ConfigNode {
    ConfigNode::new("drillThrough", "drillThrough.title", ComType::CheckboxModal)
        .with_default(json!(false))
        .with_options(json!({ "modalSize": "middle" }))
        .with_rows(vec![ConfigNode::new(
            "setting",
            "drillThrough.title",
            "interaction.drillThrough",
        )])
}

pub fn template() -> WidgetTemplate {
    WidgetTemplate {
        props: vec![
            title_group(),
            padding_group(),
            border_group(),
            background_group(PRIMARY),
        ],
        interactions: vec![drill_through()],
    }
}
