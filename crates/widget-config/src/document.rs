//! Persisted widget configuration documents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ConfigNode;

/// The configuration trees a widget carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    /// Style settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<ConfigNode>>,

    /// Interaction settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<ConfigNode>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A widget's configuration as stored by the dashboard.
///
/// Fields other than the ones modelled here (layout rects, ids, content)
/// are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfigDocument {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Widget-type discriminator, e.g. `tab` or `jumpBtn`.
    pub original_type: String,

    /// Tag of the last migration applied. Legacy documents have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_config: Option<CustomConfig>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl WidgetConfigDocument {
    pub fn new(name: impl Into<String>, original_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original_type: original_type.into(),
            version: None,
            custom_config: None,
            extra: IndexMap::new(),
        }
    }

    pub fn with_props(mut self, props: Vec<ConfigNode>) -> Self {
        self.custom_config.get_or_insert_with(CustomConfig::default).props = Some(props);
        self
    }

    pub fn with_interactions(mut self, interactions: Vec<ConfigNode>) -> Self {
        self.custom_config
            .get_or_insert_with(CustomConfig::default)
            .interactions = Some(interactions);
        self
    }

    /// Style settings, or an empty slice when none are stored.
    pub fn props(&self) -> &[ConfigNode] {
        self.custom_config
            .as_ref()
            .and_then(|c| c.props.as_deref())
            .unwrap_or_default()
    }

    /// Interaction settings, or an empty slice when none are stored.
    pub fn interactions(&self) -> &[ConfigNode] {
        self.custom_config
            .as_ref()
            .and_then(|c| c.interactions.as_deref())
            .unwrap_or_default()
    }

    /// Mutable access to stored style settings, if any.
    pub fn props_mut(&mut self) -> Option<&mut Vec<ConfigNode>> {
        self.custom_config.as_mut()?.props.as_mut()
    }
}
