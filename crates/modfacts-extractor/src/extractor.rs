//! Per-unit modifier extraction

use crate::context::ExtractionContext;
use crate::modifier::{self, ModifierSet};
use anyhow::Context as _;
use modfacts_core::{DeclarationId, ExtractError, Symbol};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A declaration as handed over by the tree walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    pub id: DeclarationId,
    pub symbol: Symbol,
}

/// All declarations discovered in one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<DeclarationRecord>,
}

/// The input document of an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionInput {
    pub units: Vec<CompilationUnit>,
}

impl ExtractionInput {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let input = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(input)
    }
}

/// What one unit contributed to the fact sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    pub unit: String,
    pub declarations: usize,
    pub edges: usize,
}

/// Extract modifiers for every declaration in `unit`.
///
/// The whole unit is classified before any edge is written, so a classification failure
/// leaves nothing of the unit in the sink.
pub fn extract_unit(cx: &ExtractionContext, unit: &CompilationUnit) -> Result<UnitReport, ExtractError> {
    let classified = unit
        .declarations
        .iter()
        .map(|decl| modifier::classify(&decl.symbol).map(|set| (decl.id, set)))
        .collect::<Result<Vec<(DeclarationId, ModifierSet)>, _>>()?;

    let mut report = UnitReport {
        unit: unit.name.clone(),
        declarations: classified.len(),
        edges: 0,
    };

    for (declaration, modifiers) in &classified {
        cx.note_classified();
        modifier::attach_all(cx, *declaration, modifiers)?;
        report.edges += modifiers.len();
    }

    tracing::debug!(
        "Unit {}: {} declarations, {} modifier edges",
        report.unit,
        report.declarations,
        report.edges
    );
    Ok(report)
}
