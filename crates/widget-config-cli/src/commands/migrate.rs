//! Migrate command implementation

use anyhow::{Result, bail};
use serde_json::Value;
use tracing::{info, warn};

use widget_config::migrate_widget_configs;

/// Arguments for the migrate command
#[derive(Debug)]
pub struct MigrateArgs {
    pub input: String,
    pub output: Option<String>,
    /// Fail when any migration rule reports a problem
    pub strict: bool,
}

pub fn execute(args: MigrateArgs) -> Result<()> {
    let input = super::read_json(&args.input)?;
    let items = input.as_array().map(Vec::as_slice).unwrap_or_default();

    let report = migrate_widget_configs(&input);
    for failure in &report.failures {
        warn!(index = failure.index, error = %failure.error, "Migration problem");
    }
    let changed = items.iter().zip(&report.documents).filter(|(a, b)| a != b).count();
    info!(
        widgets = items.len(),
        changed,
        failures = report.failures.len(),
        "Migrated widget configs"
    );

    if args.strict && report.has_failures() {
        bail!("{} widget(s) failed to migrate", report.failures.len());
    }

    super::write_json(&Value::Array(report.documents), args.output.as_deref())
}
