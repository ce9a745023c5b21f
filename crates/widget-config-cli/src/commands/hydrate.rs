//! Hydrate command implementation

use anyhow::{Result, bail};
use serde_json::Value;
use tracing::{info, warn};

use widget_config::Hydrator;

/// Arguments for the hydrate command
#[derive(Debug)]
pub struct HydrateArgs {
    pub input: String,
    pub output: Option<String>,
    /// Fail when any document reports a problem
    pub strict: bool,
}

pub fn execute(args: HydrateArgs) -> Result<()> {
    let input = super::read_json(&args.input)?;
    let report = Hydrator::standard().hydrate_json(&input);
    for diagnostic in &report.diagnostics {
        warn!(
            index = diagnostic.index,
            widget = %diagnostic.name,
            error = %diagnostic.error,
            "Hydration problem"
        );
    }
    info!(
        widgets = report.documents.len(),
        diagnostics = report.diagnostics.len(),
        "Hydrated widget configs"
    );

    if args.strict && report.has_diagnostics() {
        bail!("{} widget(s) reported problems", report.diagnostics.len());
    }

    super::write_json(&Value::Array(report.documents), args.output.as_deref())
}
