//! Configuration trees for dashboard widgets.
//!
//! Every widget describes its style and interaction settings as a forest of
//! [`ConfigNode`]s. This crate owns the lifecycle of those forests between
//! storage and the settings panel.
//!
//! # Key Features
//!
//! - **Path access**: read and write settings by group path and leaf key
//!   ([`path`]), always producing a new tree
//! - **Watchers**: derive `hide`/`disabled` from sibling values ([`watcher`])
//! - **Reconciliation**: the current template decides shape, saved documents
//!   supply values ([`reconcile`])
//! - **Migration**: version-tagged rules upgrade persisted documents
//!   ([`MigrationRegistry`])
//!
//! # Architecture
//!
//! - [`WidgetConfigDocument`]: one persisted widget, owning its forests
//! - [`TemplateRegistry`]: current schema per widget type
//! - [`Hydrator`]: migrate, reconcile, then evaluate watchers
//!
//! # Example
//!
//! ```rust,no_run
//! use widget_config::{Hydrator, WidgetConfigDocument, migrate_widget_configs};
//!
//! let stored: serde_json::Value = /* from storage */ todo!();
//!
//! // Storage-facing upgrade, JSON in and JSON out
//! let migrated = migrate_widget_configs(&stored);
//! for failure in &migrated.failures {
//!     eprintln!("widget #{}: {}", failure.index, failure.error);
//! }
//!
//! // Full load path for the settings panel
//! let docs: Vec<WidgetConfigDocument> =
//!     serde_json::from_value(serde_json::Value::Array(migrated.documents)).unwrap();
//! let report = Hydrator::standard().hydrate(docs);
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{}: {}", diagnostic.name, diagnostic.error);
//! }
//! ```

mod document;
mod edit;
mod hydrate;
mod interactions;
mod migrate;
pub mod path;
pub mod reconcile;
pub mod templates;
mod types;
pub mod watcher;

pub use types::{
    ComType,
    ConfigError,
    ConfigNode,
    DepValues,
    DerivedAttrs,
    Result,
    WatchAction,
    Watcher,
    find_sibling,
};

pub use document::{CustomConfig, WidgetConfigDocument};

pub use edit::{Edited, apply_edit};

pub use hydrate::{DocumentDiagnostic, HydrateOptions, HydrateReport, Hydrator, JsonHydrateReport};

pub use interactions::{
    DRILL_THROUGH_KEY,
    HAS_ORIGINAL_OPTION,
    VIEW_DETAIL_KEY,
    annotate_chart_interactions,
};

pub use migrate::{
    APP_VERSION_RC_1,
    DocumentMigration,
    JsonMigrationReport,
    MigrationFailure,
    MigrationRegistry,
    MigrationReport,
    MigrationRule,
    TabGroupRestyle,
    migrate_widget_configs,
};

pub use templates::{TemplateFactory, TemplateRegistry, WidgetTemplate};
pub use templates::tab::TabStyle;
