//! Setting groups shared by most board widgets.

use serde_json::json;

use crate::types::{ComType, ConfigNode};

pub const WHITE: &str = "#FFFFFF";
pub const PRIMARY: &str = "#1B9AEE";

/// Widget title: visibility, alignment, and font.
pub fn title_group() -> ConfigNode {
    ConfigNode::group(
        "titleGroup",
        "title.titleGroup",
        vec![
            ConfigNode::new("showTitle", "title.showTitle", ComType::Switch).with_initial(json!(true)),
            ConfigNode::new("textAlign", "title.textAlign.textAlign", ComType::Select)
                .with_initial(json!("left"))
                .with_options(json!({
                    "translateItemLabel": true,
                    "items": [
                        { "label": "title.textAlign.left", "value": "left" },
                        { "label": "title.textAlign.center", "value": "center" }
                    ]
                })),
            ConfigNode::new("font", "viz.palette.style.font", ComType::Font).with_initial(json!({
                "fontFamily": "PingFang SC",
                "fontSize": "14",
                "fontWeight": "normal",
                "fontStyle": "normal",
                "color": "#495057"
            })),
        ],
    )
}

/// Inner padding on each side.
pub fn padding_group() -> ConfigNode {
    let side = |key: &str| {
        ConfigNode::new(key, format!("padding.{key}"), ComType::InputNumber).with_initial(json!(8))
    };
    ConfigNode::group(
        "paddingGroup",
        "padding.paddingGroup",
        vec![side("top"), side("right"), side("bottom"), side("left")],
    )
}

/// Background fill with the given base color.
pub fn background_group(color: &str) -> ConfigNode {
    ConfigNode::group(
        "backgroundGroup",
        "background.backgroundGroup",
        vec![
            ConfigNode::new("background", "background.background", ComType::Background).with_initial(json!({
                "color": color,
                "image": "",
                "size": "100% 100%",
                "repeat": "no-repeat"
            })),
        ],
    )
}

/// Widget border line.
pub fn border_group() -> ConfigNode {
    ConfigNode::group(
        "borderGroup",
        "border.borderGroup",
        vec![ConfigNode::new("border", "border.border", ComType::Line).with_initial(json!({
            "color": "transparent",
            "width": 0,
            "style": "solid",
            "radius": 0
        }))],
    )
}
