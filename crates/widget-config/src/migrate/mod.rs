//! Version migration of persisted widget documents.
//!
//! Rules are registered in release order. Each document is offered to each
//! rule exactly once; a rule that applies rewrites the document and stamps
//! it with the rule's version tag. Later rules may rely on earlier ones
//! having run.
//!
//! Rules must be idempotent: `applies_to` has to recognise a document the
//! rule already rewrote, so migrating twice is the same as migrating once.
//!
//! A rule that fails is an authoring bug. The failure is reported and
//! logged, the document is returned as it was before that rule, and the
//! rest of the batch carries on.

use serde_json::Value;

use crate::document::WidgetConfigDocument;
use crate::types::{ConfigError, Result};

mod tab_restyle;

pub use tab_restyle::{APP_VERSION_RC_1, TabGroupRestyle};

/// A version-tagged rewrite of persisted documents.
///
/// Rules must be `Send + Sync` so batches can be migrated in parallel.
pub trait MigrationRule: Send + Sync {
    /// Human-readable name, used in logs and failure reports.
    fn name(&self) -> &str;

    /// Version tag stamped on documents this rule rewrites.
    fn version(&self) -> &str;

    /// Whether the document still needs this rule.
    fn applies_to(&self, doc: &WidgetConfigDocument) -> bool;

    /// Rewrite the document.
    ///
    /// # Errors
    ///
    /// Only on a defect in the rule itself.
    fn transform(&self, doc: &WidgetConfigDocument) -> Result<WidgetConfigDocument>;
}

/// Outcome of migrating one document.
#[derive(Debug, Clone)]
pub struct DocumentMigration {
    pub document: WidgetConfigDocument,
    /// Names of the rules that rewrote the document, in order.
    pub applied: Vec<String>,
    /// Set when a rule failed; later rules were not attempted.
    pub failure: Option<ConfigError>,
}

impl DocumentMigration {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// A rule failure within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationFailure {
    /// Position of the document in the input batch
    pub index: usize,
    pub error: ConfigError,
}

/// Result of migrating a batch.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub documents: Vec<WidgetConfigDocument>,
    pub failures: Vec<MigrationFailure>,
}

/// Result of migrating a persisted JSON batch.
///
/// `documents` lines up with the input array. A document listed in
/// `failures` is returned as it was before the failing rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonMigrationReport {
    pub documents: Vec<Value>,
    pub failures: Vec<MigrationFailure>,
}

impl JsonMigrationReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Ordered list of migration rules.
pub struct MigrationRegistry {
    rules: Vec<Box<dyn MigrationRule>>,
}

impl MigrationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry with every shipped rule, in release order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.push(Box::new(TabGroupRestyle));
        registry
    }

    /// Add a rule. Rules run in the order they are added.
    pub fn push(&mut self, rule: Box<dyn MigrationRule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Distinct version tags in release order.
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !versions.contains(&rule.version()) {
                versions.push(rule.version());
            }
        }
        versions
    }

    /// Release ordinal of a version tag, if this registry knows it.
    pub fn release_index(&self, version: &str) -> Option<usize> {
        self.versions().iter().position(|v| *v == version)
    }

    /// Run every rule over one document.
    ///
    /// A document already stamped with a known tag skips rules released at
    /// or before that tag. Unknown tags skip nothing and leave it to the
    /// rules' own structural checks.
    pub fn migrate_document(&self, doc: WidgetConfigDocument) -> DocumentMigration {
        let entry_release = doc.version.as_deref().and_then(|v| self.release_index(v));
        let mut outcome = DocumentMigration {
            document: doc,
            applied: Vec::new(),
            failure: None,
        };

        for rule in &self.rules {
            let rule_release = self.release_index(rule.version());
            if entry_release.is_some() && entry_release >= rule_release {
                continue;
            }
            if !rule.applies_to(&outcome.document) {
                continue;
            }

            tracing::debug!(
                rule = rule.name(),
                widget = %outcome.document.name,
                "Applying migration rule"
            );
            match rule.transform(&outcome.document) {
                Ok(mut migrated) => {
                    migrated.version = Some(rule.version().to_string());
                    outcome.document = migrated;
                    outcome.applied.push(rule.name().to_string());
                }
                Err(e) => {
                    tracing::error!(
                        rule = rule.name(),
                        widget = %outcome.document.name,
                        error = %e,
                        "Migration rule failed"
                    );
                    outcome.failure = Some(e);
                    break;
                }
            }
        }

        outcome
    }

    /// Migrate a batch of documents independently of one another.
    pub fn migrate(&self, docs: Vec<WidgetConfigDocument>) -> MigrationReport {
        let mut report = MigrationReport::default();
        for (index, doc) in docs.into_iter().enumerate() {
            let outcome = self.migrate_document(doc);
            if let Some(error) = outcome.failure {
                report.failures.push(MigrationFailure { index, error });
            }
            report.documents.push(outcome.document);
        }
        report
    }

    /// Migrate a persisted JSON array of widget documents.
    ///
    /// Anything other than an array yields an empty report. Elements that
    /// do not parse as documents, and documents no rule touches, are
    /// returned exactly as given. Rule failures are listed in the report.
    pub fn migrate_json(&self, input: &Value) -> JsonMigrationReport {
        let mut report = JsonMigrationReport::default();
        let Some(items) = input.as_array() else {
            tracing::warn!("Widget config input is not an array; nothing to migrate");
            return report;
        };

        for (index, item) in items.iter().enumerate() {
            let doc = match serde_json::from_value::<WidgetConfigDocument>(item.clone()) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::debug!(index, error = %e, "Passing through unrecognised widget config");
                    report.documents.push(item.clone());
                    continue;
                }
            };

            let outcome = self.migrate_document(doc);
            if let Some(error) = outcome.failure.clone() {
                report.failures.push(MigrationFailure { index, error });
            }
            if !outcome.changed() {
                report.documents.push(item.clone());
                continue;
            }
            let migrated = serde_json::to_value(&outcome.document).unwrap_or_else(|e| {
                tracing::error!(index, error = %e, "Failed to serialize migrated widget config");
                item.clone()
            });
            report.documents.push(migrated);
        }
        report
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Migrate persisted widget configs with the standard rule set.
///
/// This is the single entry point storage-facing code should use.
pub fn migrate_widget_configs(input: &Value) -> JsonMigrationReport {
    MigrationRegistry::standard().migrate_json(input)
}
