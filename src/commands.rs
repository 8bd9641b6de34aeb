//! CLI command implementations

use anyhow::Context;
use modfacts_core::{FactSink, JsonLinesSink, Symbol};
use modfacts_extractor::config::CONFIG_FILE;
use modfacts_extractor::{Coordinator, ExtractionContext, ExtractionInput, ExtractorConfig, FailurePolicy};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

/// Load the config file and apply command-line overrides.
pub fn load_config(path: Option<&Path>, abort_run: bool, threads: Option<usize>) -> anyhow::Result<ExtractorConfig> {
    let mut config = ExtractorConfig::load(path.unwrap_or(Path::new(CONFIG_FILE)))?;
    if abort_run {
        config.failure_policy = FailurePolicy::AbortRun;
    }
    if threads.is_some() {
        config.threads = threads;
    }
    tracing::debug!("Using config: {:?}", config);
    Ok(config)
}

pub fn extract(input: &Path, output: &Path, config: ExtractorConfig) -> anyhow::Result<()> {
    tracing::info!("Extracting modifiers from {}", input.display());

    let input = ExtractionInput::load(input)?;
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let sink: Arc<dyn FactSink> = Arc::new(JsonLinesSink::new(BufWriter::new(file)));

    let cx = ExtractionContext::new(sink);
    let summary = Coordinator::new(config).run(&cx, &input.units)?;

    for failure in &summary.failures {
        eprintln!("aborted {}: {}", failure.unit, failure.error);
    }
    println!("{}", serde_json::to_string_pretty(&summary.stats)?);

    tracing::info!("Facts written to {}", output.display());
    Ok(())
}

pub fn classify(input: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let symbol: Symbol = serde_json::from_str(&json).with_context(|| format!("parsing {}", input.display()))?;

    let modifiers = modfacts_extractor::classify(&symbol)?;
    println!("{}", modifiers.iter().collect::<Vec<_>>().join(" "));
    Ok(())
}
