//! Core type definitions for widget configuration trees.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Editor family of a configuration node.
///
/// Selects the value shape and the editor used by the settings panel.
/// Tree algorithms (path resolution, reconciliation, migration) never
/// branch on it. Tags outside the known vocabulary are kept verbatim in
/// [`ComType::Other`] so that persisted documents round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComType {
    Group,
    Select,
    InputNumber,
    InputText,
    Checkbox,
    CheckboxModal,
    Switch,
    Slider,
    Font,
    FontFamily,
    FontColor,
    MarginWidth,
    Background,
    Line,
    Other(String),
}

impl ComType {
    /// The serialized tag for this editor family.
    pub fn as_str(&self) -> &str {
        match self {
            ComType::Group => "group",
            ComType::Select => "select",
            ComType::InputNumber => "inputNumber",
            ComType::InputText => "inputText",
            ComType::Checkbox => "checkbox",
            ComType::CheckboxModal => "checkboxModal",
            ComType::Switch => "switch",
            ComType::Slider => "slider",
            ComType::Font => "font",
            ComType::FontFamily => "fontFamily",
            ComType::FontColor => "fontColor",
            ComType::MarginWidth => "marginWidth",
            ComType::Background => "background",
            ComType::Line => "line",
            ComType::Other(tag) => tag,
        }
    }
}

impl From<String> for ComType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "group" => ComType::Group,
            "select" => ComType::Select,
            "inputNumber" => ComType::InputNumber,
            "inputText" => ComType::InputText,
            "checkbox" => ComType::Checkbox,
            "checkboxModal" => ComType::CheckboxModal,
            "switch" => ComType::Switch,
            "slider" => ComType::Slider,
            "font" => ComType::Font,
            "fontFamily" => ComType::FontFamily,
            "fontColor" => ComType::FontColor,
            "marginWidth" => ComType::MarginWidth,
            "background" => ComType::Background,
            "line" => ComType::Line,
            _ => ComType::Other(tag),
        }
    }
}

impl From<&str> for ComType {
    fn from(tag: &str) -> Self {
        ComType::from(tag.to_string())
    }
}

impl From<ComType> for String {
    fn from(com_type: ComType) -> Self {
        match com_type {
            ComType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the sibling values a watcher declared in its `deps`.
///
/// Keys appear in `deps` order. A dependency with neither a value nor a
/// default is present as `Value::Null`.
pub type DepValues = IndexMap<String, Value>;

/// Attributes computed by a watcher and overlaid onto its node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedAttrs {
    pub hide: Option<bool>,
    pub disabled: Option<bool>,
    /// Any other derived attribute, written to the node's extra fields.
    pub extra: IndexMap<String, Value>,
}

impl DerivedAttrs {
    pub fn hidden(hide: bool) -> Self {
        Self {
            hide: Some(hide),
            ..Self::default()
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A pure function from dependency values to derived attributes.
///
/// Equality is identity of the underlying function object: two actions
/// compare equal only when one is a clone of the other.
#[derive(Clone)]
pub struct WatchAction(Arc<dyn Fn(&DepValues) -> DerivedAttrs + Send + Sync>);

impl WatchAction {
    pub fn new(action: impl Fn(&DepValues) -> DerivedAttrs + Send + Sync + 'static) -> Self {
        WatchAction(Arc::new(action))
    }

    pub fn call(&self, deps: &DepValues) -> DerivedAttrs {
        (self.0)(deps)
    }
}

impl fmt::Debug for WatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WatchAction(..)")
    }
}

impl PartialEq for WatchAction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Derived-attribute rule attached to a node.
///
/// Only `deps` is persisted. Actions live in code, so a watcher read back
/// from JSON has no action until reconciliation restores the template's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watcher {
    /// Keys of sibling nodes whose values feed the action.
    pub deps: Vec<String>,

    #[serde(skip)]
    pub action: Option<WatchAction>,
}

impl Watcher {
    pub fn new<I, S>(deps: I, action: WatchAction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            deps: deps.into_iter().map(Into::into).collect(),
            action: Some(action),
        }
    }

    /// Hide the node while `dep` equals `value`.
    pub fn hide_when(dep: &str, value: Value) -> Self {
        let key = dep.to_string();
        Self::new(
            [dep],
            WatchAction::new(move |deps| DerivedAttrs::hidden(deps.get(&key) == Some(&value))),
        )
    }

    /// Hide the node unless `dep` equals `value`.
    pub fn hide_unless(dep: &str, value: Value) -> Self {
        let key = dep.to_string();
        Self::new(
            [dep],
            WatchAction::new(move |deps| DerivedAttrs::hidden(deps.get(&key) != Some(&value))),
        )
    }
}

/// Deserialize a field that is present in the input, `null` included.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// One entry in a configuration tree: a leaf setting or a group of settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigNode {
    /// Unique among siblings; stable across schema versions.
    pub key: String,

    /// i18n key of the node's caption.
    #[serde(default)]
    pub label: String,

    pub com_type: ComType,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Explicit value. Absent means "use `default`", which is not the same
    /// thing as a value equal to the default. A stored `null` is kept as
    /// `Some(Value::Null)` so it is written back.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ConfigNode>>,

    /// Editor parameters; opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<IndexMap<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watcher: Option<Watcher>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    /// Fields this crate does not model, passed through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ConfigNode {
    /// Create a node with no default, value, or children.
    pub fn new(key: impl Into<String>, label: impl Into<String>, com_type: impl Into<ComType>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            com_type: com_type.into(),
            default: None,
            value: None,
            rows: None,
            options: None,
            watcher: None,
            hide: None,
            disabled: None,
            extra: IndexMap::new(),
        }
    }

    /// Create a `group` node holding `rows`.
    pub fn group(key: impl Into<String>, label: impl Into<String>, rows: Vec<ConfigNode>) -> Self {
        Self::new(key, label, ComType::Group).with_rows(rows)
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Set both `default` and `value`, as freshly created widgets do.
    pub fn with_initial(self, value: Value) -> Self {
        self.with_default(value.clone()).with_value(value)
    }

    pub fn with_rows(mut self, rows: Vec<ConfigNode>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set options from a JSON object. Non-object values are ignored.
    pub fn with_options(mut self, options: Value) -> Self {
        if let Value::Object(map) = options {
            self.options = Some(map.into_iter().collect());
        }
        self
    }

    pub fn with_watcher(mut self, watcher: Watcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// The value the node currently stands for: `value`, else `default`.
    /// A `null` value counts as unset.
    pub fn effective_value(&self) -> Option<&Value> {
        self.value
            .as_ref()
            .filter(|v| !v.is_null())
            .or(self.default.as_ref())
    }

    /// Whether this node has a child list.
    pub fn is_group(&self) -> bool {
        self.rows.is_some()
    }

    /// Find a direct child by key.
    pub fn child(&self, key: &str) -> Option<&ConfigNode> {
        self.rows.as_deref()?.iter().find(|n| n.key == key)
    }

    /// Look up an option by name.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.as_ref()?.get(name)
    }
}

/// Find a node by key within one sibling list.
pub fn find_sibling<'a>(rows: &'a [ConfigNode], key: &str) -> Option<&'a ConfigNode> {
    rows.iter().find(|n| n.key == key)
}

/// Errors that can occur during configuration tree operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A group path or leaf key did not resolve to an existing node.
    #[error("Config path not found: {}", path.join("."))]
    PathNotFound {
        /// The requested path, leaf key last
        path: Vec<String>,
    },

    /// A watcher depends on a key that is not one of its siblings.
    #[error("Watcher on '{node}' depends on '{dependency}', which is not a sibling")]
    InvalidWatcher {
        /// Key of the node carrying the watcher
        node: String,
        /// The offending dependency key
        dependency: String,
    },

    /// A migration rule failed while transforming a document.
    #[error("Migration rule '{rule}' failed on widget '{document}': {message}")]
    RuleFailed {
        /// Name of the rule
        rule: String,
        /// Name of the document being migrated
        document: String,
        /// Error message
        message: String,
    },

    /// A stored widget entry does not have the shape of a widget document.
    #[error("Malformed widget document: {message}")]
    MalformedDocument {
        /// Parser message
        message: String,
    },

    /// Configuration nesting exceeds maximum depth.
    #[error("Config nesting too deep (max depth: {max_depth}) at path: {}", path.join("."))]
    NestingTooDeep {
        /// Maximum allowed depth
        max_depth: usize,
        /// Path where the limit was exceeded
        path: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_com_type_round_trips_known_tags() {
        for tag in ["group", "select", "inputNumber", "checkbox", "fontColor", "font", "checkboxModal"] {
            let com_type = ComType::from(tag);
            assert!(!matches!(com_type, ComType::Other(_)), "{tag} should be known");
            assert_eq!(String::from(com_type), tag);
        }
    }

    #[test]
    fn test_com_type_keeps_unknown_tags() {
        let com_type: ComType = serde_json::from_value(json!("interaction.drillThrough")).unwrap();
        assert_eq!(com_type, ComType::Other("interaction.drillThrough".to_string()));
        assert_eq!(serde_json::to_value(&com_type).unwrap(), json!("interaction.drillThrough"));
    }

    #[test]
    fn test_node_deserialize_camel_case() {
        let node: ConfigNode = serde_json::from_value(json!({
            "key": "fontSize",
            "label": "tab.fontSize",
            "comType": "inputNumber",
            "default": 14
        }))
        .unwrap();

        assert_eq!(node.com_type, ComType::InputNumber);
        assert_eq!(node.default, Some(json!(14)));
        assert_eq!(node.value, None);
        assert_eq!(node.effective_value(), Some(&json!(14)));
    }

    #[test]
    fn test_node_passes_through_unknown_fields() {
        let input = json!({
            "key": "k",
            "label": "l",
            "comType": "select",
            "value": "a",
            "legacyFlag": true
        });
        let node: ConfigNode = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(node.extra.get("legacyFlag"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn test_node_keeps_explicit_null_and_empty_label() {
        let input = json!({
            "key": "color",
            "label": "",
            "comType": "fontColor",
            "default": "#000",
            "value": null
        });
        let node: ConfigNode = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(node.value, Some(Value::Null));
        assert_eq!(node.effective_value(), Some(&json!("#000")));
        assert_eq!(serde_json::to_value(&node).unwrap(), input);

        let absent: ConfigNode = serde_json::from_value(json!({ "key": "color", "comType": "fontColor" })).unwrap();
        assert_eq!(absent.value, None);
        assert_eq!(absent.default, None);
    }

    #[test]
    fn test_watcher_serializes_deps_only() {
        let node = ConfigNode::new("align", "tab.alignTitle", ComType::Select)
            .with_watcher(Watcher::hide_when("style", json!("dropdown")));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["watcher"], json!({ "deps": ["style"] }));

        let back: ConfigNode = serde_json::from_value(json).unwrap();
        let watcher = back.watcher.unwrap();
        assert_eq!(watcher.deps, vec!["style"]);
        assert!(watcher.action.is_none());
    }

    #[test]
    fn test_watch_action_equality_is_identity() {
        let a = WatchAction::new(|_| DerivedAttrs::hidden(true));
        let b = WatchAction::new(|_| DerivedAttrs::hidden(true));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_hide_when_and_unless() {
        let mut deps = DepValues::new();
        deps.insert("style".to_string(), json!("dropdown"));

        let when = Watcher::hide_when("style", json!("dropdown"));
        let unless = Watcher::hide_unless("style", json!("dropdown"));
        assert_eq!(when.action.unwrap().call(&deps).hide, Some(true));
        assert_eq!(unless.action.unwrap().call(&deps).hide, Some(false));
    }

    #[test]
    fn test_child_lookup() {
        let group = ConfigNode::group(
            "liquid",
            "liquid.title",
            vec![ConfigNode::new("max", "liquid.max", ComType::InputNumber)],
        );
        assert!(group.is_group());
        assert!(group.child("max").is_some());
        assert!(group.child("shape").is_none());
        assert!(ConfigNode::new("x", "", ComType::Checkbox).child("max").is_none());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::PathNotFound {
            path: vec!["tabGroup".into(), "dimensions".into(), "depth".into()],
        };
        assert_eq!(err.to_string(), "Config path not found: tabGroup.dimensions.depth");

        let err = ConfigError::InvalidWatcher {
            node: "align".into(),
            dependency: "mode".into(),
        };
        assert!(err.to_string().contains("'mode'"));
    }
}
