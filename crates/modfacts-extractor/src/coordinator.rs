//! Orchestrates parallel extraction over compilation units

use crate::config::{ExtractorConfig, FailurePolicy};
use crate::context::{ExtractionContext, RunStats};
use crate::extractor::{CompilationUnit, UnitReport, extract_unit};
use modfacts_core::ExtractError;
use rayon::prelude::*;
use serde::Serialize;

/// A unit dropped under [`FailurePolicy::AbortUnit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub unit: String,
    pub error: String,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub units: Vec<UnitReport>,
    pub failures: Vec<UnitFailure>,
    pub stats: RunStats,
}

pub struct Coordinator {
    config: ExtractorConfig,
}

impl Coordinator {
    pub fn new(config: ExtractorConfig) -> Self {
        Coordinator { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract every unit against the shared context.
    ///
    /// Fact sink failures always abort the run. Classification failures abort only their
    /// unit unless the policy says otherwise.
    pub fn run(&self, cx: &ExtractionContext, units: &[CompilationUnit]) -> anyhow::Result<RunSummary> {
        let results = match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                pool.install(|| self.extract_all(cx, units))
            }
            None => self.extract_all(cx, units),
        };

        let mut summary = RunSummary::default();
        for (unit, result) in units.iter().zip(results) {
            match result {
                Ok(report) => summary.units.push(report),
                Err(ExtractError::Modifier(err)) => match self.config.failure_policy {
                    FailurePolicy::AbortUnit => {
                        tracing::error!("Aborting unit {}: {}", unit.name, err);
                        summary.failures.push(UnitFailure {
                            unit: unit.name.clone(),
                            error: err.to_string(),
                        });
                    }
                    FailurePolicy::AbortRun => {
                        tracing::error!("Aborting run in unit {}: {}", unit.name, err);
                        return Err(anyhow::Error::new(err)
                            .context(format!("extracting unit {}", unit.name)));
                    }
                },
                Err(err @ ExtractError::Fact(_)) => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("writing facts for unit {}", unit.name)));
                }
            }
        }

        cx.sink().flush()?;
        summary.stats = RunStats {
            units_aborted: summary.failures.len(),
            ..cx.stats()
        };

        tracing::info!(
            "Extracted {} units ({} aborted): {} declarations, {} modifier entities, {} edges",
            summary.units.len(),
            summary.stats.units_aborted,
            summary.stats.declarations_classified,
            summary.stats.entities_created,
            summary.stats.edges_attached
        );
        Ok(summary)
    }

    fn extract_all(
        &self,
        cx: &ExtractionContext,
        units: &[CompilationUnit],
    ) -> Vec<Result<UnitReport, ExtractError>> {
        units.par_iter().map(|unit| extract_unit(cx, unit)).collect()
    }
}
