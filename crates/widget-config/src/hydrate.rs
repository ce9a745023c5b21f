//! Load-time hydration of persisted widget documents.
//!
//! Hydration is the path every stored document takes before it reaches a
//! settings panel:
//!
//! 1. migrate it to the current schema version;
//! 2. reconcile its props (and interactions, when the widget type has any)
//!    against a fresh template for its `originalType`;
//! 3. evaluate watchers over the resulting forests.
//!
//! Documents whose type has no registered template skip step 2. Problems
//! never abort a batch; they are reported per document. At the JSON
//! boundary, entries that are not widget documents at all are passed
//! through unchanged with a `MalformedDocument` diagnostic.
//!
//! # Depth Limiting
//!
//! Reconciliation and watcher evaluation recurse through nested groups. A
//! stored tree deeper than [`HydrateOptions::max_depth`] is reported as
//! `NestingTooDeep` and the document is returned as migration left it.

use serde_json::Value;

use crate::document::WidgetConfigDocument;
use crate::migrate::MigrationRegistry;
use crate::reconcile;
use crate::templates::TemplateRegistry;
use crate::types::{ConfigError, ConfigNode, Result};
use crate::watcher;

/// Options for hydration.
#[derive(Debug, Clone)]
pub struct HydrateOptions {
    /// Maximum group nesting depth (default: 256).
    pub max_depth: usize,
}

impl Default for HydrateOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// A problem found while hydrating one document of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDiagnostic {
    /// Position of the document in the input batch
    pub index: usize,
    pub name: String,
    pub error: ConfigError,
}

/// Result of hydrating a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrateReport {
    pub documents: Vec<WidgetConfigDocument>,
    pub diagnostics: Vec<DocumentDiagnostic>,
}

impl HydrateReport {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Result of hydrating a persisted JSON batch.
///
/// `documents` lines up with the input array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonHydrateReport {
    pub documents: Vec<Value>,
    pub diagnostics: Vec<DocumentDiagnostic>,
}

impl JsonHydrateReport {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

fn diagnostics_for(index: usize, name: &str, errors: Vec<ConfigError>) -> impl Iterator<Item = DocumentDiagnostic> + '_ {
    errors.into_iter().map(move |error| DocumentDiagnostic {
        index,
        name: name.to_string(),
        error,
    })
}

/// Migrates, reconciles, and evaluates widget documents.
pub struct Hydrator {
    migrations: MigrationRegistry,
    templates: TemplateRegistry,
    options: HydrateOptions,
}

impl Hydrator {
    pub fn new(migrations: MigrationRegistry, templates: TemplateRegistry) -> Self {
        Self {
            migrations,
            templates,
            options: HydrateOptions::default(),
        }
    }

    /// Hydrator with the shipped migration rules and widget templates.
    pub fn standard() -> Self {
        Self::new(MigrationRegistry::standard(), TemplateRegistry::standard())
    }

    pub fn with_options(mut self, options: HydrateOptions) -> Self {
        self.options = options;
        self
    }

    /// Hydrate a batch of documents.
    pub fn hydrate(&self, docs: Vec<WidgetConfigDocument>) -> HydrateReport {
        let mut report = HydrateReport::default();
        for (index, doc) in docs.into_iter().enumerate() {
            let (document, errors) = self.hydrate_document(doc);
            report.diagnostics.extend(diagnostics_for(index, &document.name, errors));
            report.documents.push(document);
        }
        report
    }

    /// Hydrate a persisted JSON array of widget documents.
    ///
    /// Anything other than an array yields an empty report. An entry that
    /// does not parse as a document is returned as given and reported as
    /// `MalformedDocument`; the rest of the batch is hydrated normally.
    pub fn hydrate_json(&self, input: &Value) -> JsonHydrateReport {
        let mut report = JsonHydrateReport::default();
        let Some(items) = input.as_array() else {
            tracing::warn!("Widget config input is not an array; nothing to hydrate");
            return report;
        };

        for (index, item) in items.iter().enumerate() {
            let name = item.get("name").and_then(Value::as_str).unwrap_or_default();
            let doc = match serde_json::from_value::<WidgetConfigDocument>(item.clone()) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(index, widget = name, error = %e, "Passing through malformed widget config");
                    let error = ConfigError::MalformedDocument { message: e.to_string() };
                    report.diagnostics.extend(diagnostics_for(index, name, vec![error]));
                    report.documents.push(item.clone());
                    continue;
                }
            };

            let (document, errors) = self.hydrate_document(doc);
            report.diagnostics.extend(diagnostics_for(index, &document.name, errors));
            match serde_json::to_value(&document) {
                Ok(value) => report.documents.push(value),
                Err(e) => {
                    let error = ConfigError::MalformedDocument { message: e.to_string() };
                    report.diagnostics.extend(diagnostics_for(index, name, vec![error]));
                    report.documents.push(item.clone());
                }
            }
        }
        report
    }

    /// Hydrate one document, returning it with any problems found.
    pub fn hydrate_document(&self, doc: WidgetConfigDocument) -> (WidgetConfigDocument, Vec<ConfigError>) {
        let mut errors = Vec::new();

        let outcome = self.migrations.migrate_document(doc);
        errors.extend(outcome.failure);
        let mut doc = outcome.document;

        let depth_check = check_depth(doc.props(), 0, &self.options, &[])
            .and_then(|()| check_depth(doc.interactions(), 0, &self.options, &[]));
        if let Err(e) = depth_check {
            tracing::warn!(widget = %doc.name, error = %e, "Skipping hydration");
            errors.push(e);
            return (doc, errors);
        }

        if let Some(template) = self.templates.build(&doc.original_type) {
            let saved = doc.custom_config.as_ref().and_then(|c| c.props.as_deref());
            let props = reconcile::merge(&template.props, saved);
            if saved.is_some_and(|saved| !reconcile::same_shape(saved, &props)) {
                tracing::debug!(widget = %doc.name, "Reconciled props with current template");
            }
            doc = doc.with_props(props);

            if !template.interactions.is_empty() {
                let saved = doc.custom_config.as_ref().and_then(|c| c.interactions.as_deref());
                let interactions = reconcile::merge(&template.interactions, saved);
                doc = doc.with_interactions(interactions);
            }
        }

        if let Some(config) = doc.custom_config.as_mut() {
            for forest in [&mut config.props, &mut config.interactions].into_iter().flatten() {
                *forest = watcher::evaluate_tree(forest, &mut errors);
            }
        }

        (doc, errors)
    }
}

fn check_depth(nodes: &[ConfigNode], depth: usize, options: &HydrateOptions, path: &[String]) -> Result<()> {
    if depth > options.max_depth {
        return Err(ConfigError::NestingTooDeep {
            max_depth: options.max_depth,
            path: path.to_vec(),
        });
    }
    for node in nodes {
        if let Some(rows) = &node.rows {
            let mut child_path = path.to_vec();
            child_path.push(node.key.clone());
            check_depth(rows, depth + 1, options, &child_path)?;
        }
    }
    Ok(())
}
