//! Tab container widget.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::WidgetTemplate;
use super::common::{WHITE, background_group, border_group, padding_group, title_group};
use crate::path;
use crate::types::{ComType, ConfigNode, Watcher};

pub const ORIGINAL_TYPE: &str = "tab";
pub const TAB_GROUP_KEY: &str = "tabGroup";

/// Value of `style` that switches the tab bar into a dropdown.
pub const DROPDOWN: &str = "dropdown";

fn hide_in_dropdown() -> Watcher {
    Watcher::hide_when("style", json!(DROPDOWN))
}

fn dropdown_only() -> Watcher {
    Watcher::hide_unless("style", json!(DROPDOWN))
}

fn number(key: &str, initial: i64) -> ConfigNode {
    ConfigNode::new(key, format!("tab.{key}"), ComType::InputNumber).with_initial(json!(initial))
}

fn color(key: &str, initial: &str) -> ConfigNode {
    ConfigNode::new(key, format!("tab.{key}"), ComType::FontColor).with_initial(json!(initial))
}

fn margin_row(key: &str, label: &str, rows: Vec<ConfigNode>) -> ConfigNode {
    ConfigNode::group(key, label, rows)
        .with_options(json!({ "layout": "horizontal", "flatten": true, "mode": "inner" }))
}

/// `style` selector: classic tab bar or dropdown.
pub fn style_node() -> ConfigNode {
    ConfigNode::new("style", "tab.style", ComType::Select)
        .with_initial(json!("tab"))
        .with_options(json!({
            "translateItemLabel": true,
            "items": [
                { "label": "tab.tab", "value": "tab" },
                { "label": "tab.dropdown", "value": DROPDOWN }
            ]
        }))
}

/// Title alignment within the tab bar.
pub fn align_node() -> ConfigNode {
    ConfigNode::new("align", "tab.alignTitle", ComType::Select)
        .with_initial(json!("start"))
        .with_options(json!({
            "translateItemLabel": true,
            "items": [
                { "label": "viz.common.enum.alignment.start", "value": "start" },
                { "label": "viz.common.enum.alignment.center", "value": "center" },
                { "label": "viz.common.enum.alignment.end", "value": "end" }
            ]
        }))
        .with_watcher(hide_in_dropdown())
}

/// Which edge the tab bar sits on.
pub fn position_node() -> ConfigNode {
    ConfigNode::new("position", "tab.position", ComType::Select)
        .with_initial(json!("top"))
        .with_options(json!({
            "translateItemLabel": true,
            "items": [
                { "label": "viz.common.enum.position.top", "value": "top" },
                { "label": "viz.common.enum.position.bottom", "value": "bottom" },
                { "label": "viz.common.enum.position.left", "value": "left" },
                { "label": "viz.common.enum.position.right", "value": "right" }
            ]
        }))
        .with_watcher(hide_in_dropdown())
}

/// Font, color, and dropdown layout nodes that follow `position`.
pub fn appearance_nodes() -> Vec<ConfigNode> {
    vec![
        ConfigNode::new("fontFamily", "tab.fontFamily", ComType::FontFamily).with_initial(json!("PingFang SC")),
        number("fontSize", 14),
        color("color", "#495057"),
        color("background", "#ffffff"),
        ConfigNode::group(
            "dimensions",
            "tab.dimensions",
            vec![number("width", 200), number("height", 32)],
        )
        .with_options(json!({ "layout": "horizontal", "flatten": true, "container": "flat" }))
        .with_watcher(dropdown_only()),
        ConfigNode::group(
            "margins",
            "tab.margins",
            vec![
                margin_row("marginRow1", "Row1", vec![number("paddingTop", 0), number("paddingBottom", 8)]),
                margin_row("marginRow2", "Row2", vec![number("paddingLeft", 0), number("paddingRight", 0)]),
            ],
        )
        .with_options(json!({ "flatten": true, "container": "flat" }))
        .with_watcher(dropdown_only()),
        color("borderColor", "#d9d9d9").with_watcher(dropdown_only()),
        ConfigNode::new("borderStyle", "tab.borderStyle", ComType::Select)
            .with_initial(json!("solid"))
            .with_options(json!({
                "items": [
                    { "label": "实线", "value": "solid" },
                    { "label": "虚线", "value": "dashed" },
                    { "label": "点线", "value": "dotted" },
                    { "label": "双实线", "value": "double" },
                    { "label": "无", "value": "none" }
                ]
            }))
            .with_watcher(dropdown_only()),
        number("borderWidth", 1).with_watcher(dropdown_only()),
    ]
}

/// The `tabGroup` settings group as the current schema defines it.
pub fn tab_group() -> ConfigNode {
    let mut rows = vec![style_node(), align_node(), position_node()];
    rows.extend(appearance_nodes());
    ConfigNode::group(TAB_GROUP_KEY, "tab.tabGroup", rows)
}

pub fn template() -> WidgetTemplate {
    WidgetTemplate {
        props: vec![
            tab_group(),
            title_group(),
            padding_group(),
            background_group(WHITE),
            border_group(),
        ],
        interactions: Vec::new(),
    }
}

/// Resolved tab bar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStyle {
    pub align: String,
    pub position: String,
    pub style: String,
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    pub background: String,
    pub width: f64,
    pub height: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub border_color: String,
    pub border_style: String,
    pub border_width: f64,
}

impl TabStyle {
    /// Read the tab settings out of a widget's props.
    ///
    /// Each setting uses the stored value, then the stored node's default,
    /// then the current template's default. Values of the wrong JSON type
    /// are treated as missing.
    pub fn from_props(props: &[ConfigNode]) -> Self {
        let template = [tab_group()];
        let read = |group_path: &[&str], key: &str| -> Vec<Value> {
            let stored = path::get_or_default(props, group_path, &[key]);
            let fallback = path::get_or_default(&template, group_path, &[key]);
            stored
                .into_iter()
                .chain(fallback)
                .flatten()
                .cloned()
                .collect()
        };
        let text = |group_path: &[&str], key: &str| -> String {
            read(group_path, key)
                .iter()
                .find_map(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        };
        let number = |group_path: &[&str], key: &str| -> f64 {
            read(group_path, key)
                .iter()
                .find_map(Value::as_f64)
                .unwrap_or_default()
        };

        let group = [TAB_GROUP_KEY];
        let dimensions = [TAB_GROUP_KEY, "dimensions"];
        let row1 = [TAB_GROUP_KEY, "margins", "marginRow1"];
        let row2 = [TAB_GROUP_KEY, "margins", "marginRow2"];

        TabStyle {
            align: text(&group, "align"),
            position: text(&group, "position"),
            style: text(&group, "style"),
            font_family: text(&group, "fontFamily"),
            font_size: number(&group, "fontSize"),
            color: text(&group, "color"),
            background: text(&group, "background"),
            width: number(&dimensions, "width"),
            height: number(&dimensions, "height"),
            padding_top: number(&row1, "paddingTop"),
            padding_bottom: number(&row1, "paddingBottom"),
            padding_left: number(&row2, "paddingLeft"),
            padding_right: number(&row2, "paddingRight"),
            border_color: text(&group, "borderColor"),
            border_style: text(&group, "borderStyle"),
            border_width: number(&group, "borderWidth"),
        }
    }

    /// Whether the tab bar renders as a dropdown.
    pub fn is_dropdown(&self) -> bool {
        self.style == DROPDOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile;

    #[test]
    fn test_tab_group_keys_in_order() {
        let group = tab_group();
        let keys: Vec<_> = group.rows.as_ref().unwrap().iter().map(|n| n.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "style", "align", "position", "fontFamily", "fontSize", "color", "background",
                "dimensions", "margins", "borderColor", "borderStyle", "borderWidth"
            ]
        );
    }

    #[test]
    fn test_template_shape_is_stable() {
        assert!(reconcile::same_shape(&template().props, &template().props));
        assert!(template().interactions.is_empty());
    }

    #[test]
    fn test_style_from_template_defaults() {
        let style = TabStyle::from_props(&template().props);
        assert_eq!(style.align, "start");
        assert_eq!(style.position, "top");
        assert_eq!(style.style, "tab");
        assert_eq!(style.font_size, 14.0);
        assert_eq!(style.width, 200.0);
        assert_eq!(style.padding_bottom, 8.0);
        assert_eq!(style.border_style, "solid");
        assert!(!style.is_dropdown());
    }

    #[test]
    fn test_style_reads_saved_values() {
        let props = path::set(&template().props, &[TAB_GROUP_KEY], "style", json!(DROPDOWN)).unwrap();
        let props = path::set(&props, &[TAB_GROUP_KEY, "dimensions"], "width", json!(320)).unwrap();

        let style = TabStyle::from_props(&props);
        assert!(style.is_dropdown());
        assert_eq!(style.width, 320.0);
    }

    #[test]
    fn test_style_falls_back_for_legacy_props() {
        let legacy = vec![ConfigNode::group(
            TAB_GROUP_KEY,
            "tab.tabGroup",
            vec![
                ConfigNode::new("align", "tab.alignTitle", ComType::Select).with_value(json!("end")),
                ConfigNode::new("fontSize", "tab.fontSize", ComType::InputNumber).with_value(json!("big")),
            ],
        )];

        let style = TabStyle::from_props(&legacy);
        assert_eq!(style.align, "end");
        assert_eq!(style.position, "top");
        // wrong type falls through to the template
        assert_eq!(style.font_size, 14.0);
    }
}
