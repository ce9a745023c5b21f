//! Liquid-fill chart style and setting sections.
//!
//! Chart sections only carry defaults; values appear once a user edits them.
//! Charts are not widgets with an `originalType` of their own, so these
//! factories are not in [`TemplateRegistry`](super::TemplateRegistry).
//! Chart editors call them directly and reconcile saved chart sections
//! against them with [`reconcile::merge`](crate::reconcile::merge).

use serde_json::json;

use crate::types::{ComType, ConfigNode};

/// Style section: fill, outline and label groups.
pub fn styles() -> Vec<ConfigNode> {
    vec![
        ConfigNode::group(
            "liquid",
            "liquid.title",
            vec![
                ConfigNode::new("max", "liquid.max", ComType::InputNumber).with_default(json!(100)),
                ConfigNode::new("shape", "liquid.shape", ComType::Select)
                    .with_default(json!("circle"))
                    .with_options(json!({
                        "items": [
                            { "label": "圆形", "value": "circle" },
                            { "label": "矩形", "value": "rect" },
                            { "label": "圆角矩形", "value": "roundRect" },
                            { "label": "三角形", "value": "triangle" },
                            { "label": "菱形", "value": "diamond" },
                            { "label": "水滴", "value": "pin" },
                            { "label": "箭头", "value": "arrow" }
                        ]
                    })),
                ConfigNode::new("radius", "liquid.radius", ComType::MarginWidth).with_default(json!("80%")),
                ConfigNode::new("color", "liquid.waveColor", ComType::FontColor).with_default(json!("#3B82F6")),
                ConfigNode::new("backgroundColor", "liquid.backgroundColor", ComType::FontColor)
                    .with_default(json!("#FFFFFF")),
            ],
        ),
        ConfigNode::group(
            "outline",
            "outline.title",
            vec![
                ConfigNode::new("show", "outline.show", ComType::Checkbox).with_default(json!(true)),
                ConfigNode::new("borderDistance", "outline.borderDistance", ComType::InputNumber)
                    .with_default(json!(0)),
                ConfigNode::new("borderWidth", "outline.borderWidth", ComType::InputNumber).with_default(json!(2)),
                ConfigNode::new("borderColor", "outline.borderColor", ComType::FontColor)
                    .with_default(json!("#3B82F6")),
            ],
        ),
        ConfigNode::group(
            "label",
            "label.title",
            vec![
                ConfigNode::new("showLabel", "label.showLabel", ComType::Checkbox).with_default(json!(true)),
                ConfigNode::new("font", "viz.palette.style.font", ComType::Font).with_default(json!({
                    "fontFamily": "PingFang SC",
                    "fontSize": "40",
                    "fontWeight": "normal",
                    "fontStyle": "normal",
                    "color": "#495057"
                })),
            ],
        ),
    ]
}

/// Setting section: data paging.
pub fn settings() -> Vec<ConfigNode> {
    vec![ConfigNode::group(
        "paging",
        "viz.palette.setting.paging.title",
        vec![ConfigNode::new("pageSize", "viz.palette.setting.paging.pageSize", ComType::InputNumber)
            .with_default(json!(1000))
            .with_options(json!({ "needRefresh": true, "step": 1, "min": 0 }))],
    )]
}
