//! Schema templates for widget types.
//!
//! A template is the canonical, current shape of a widget's configuration.
//! Reconciliation merges saved documents against it, and migration rules
//! borrow nodes from it when they rebuild legacy groups.

use indexmap::IndexMap;

use crate::types::ConfigNode;

pub mod common;
pub mod jump_button;
pub mod liquid;
pub mod tab;

/// Freshly built configuration trees for one widget type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetTemplate {
    pub props: Vec<ConfigNode>,
    pub interactions: Vec<ConfigNode>,
}

pub type TemplateFactory = fn() -> WidgetTemplate;

/// Template factories keyed by `originalType`.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    factories: IndexMap<String, TemplateFactory>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every widget type that ships a template.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(tab::ORIGINAL_TYPE, tab::template);
        registry.register(jump_button::ORIGINAL_TYPE, jump_button::template);
        registry
    }

    /// Register (or replace) the factory for a widget type.
    pub fn register(&mut self, original_type: impl Into<String>, factory: TemplateFactory) {
        self.factories.insert(original_type.into(), factory);
    }

    /// Build a fresh template for `original_type`.
    pub fn build(&self, original_type: &str) -> Option<WidgetTemplate> {
        self.factories.get(original_type).map(|factory| factory())
    }

    pub fn contains(&self, original_type: &str) -> bool {
        self.factories.contains_key(original_type)
    }

    /// Registered widget types in registration order.
    pub fn widget_types(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}
