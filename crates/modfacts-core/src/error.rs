//! Error types for modifier extraction

use thiserror::Error;

/// Raised when the classifier meets a symbol shape it has no rule for.
///
/// This signals a gap in coverage of the upstream semantic model, not a defect in the
/// analysed code, so callers abort the affected unit instead of guessing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModifierError {
    #[error("unsupported modifier combination on `{symbol}`: {detail}")]
    UnsupportedModifierCombination { symbol: String, detail: String },
}

impl ModifierError {
    pub fn unsupported(symbol: impl Into<String>, detail: impl Into<String>) -> Self {
        ModifierError::UnsupportedModifierCombination {
            symbol: symbol.into(),
            detail: detail.into(),
        }
    }

    /// Name of the symbol the error was raised for.
    pub fn symbol(&self) -> &str {
        match self {
            ModifierError::UnsupportedModifierCombination { symbol, .. } => symbol,
        }
    }
}

/// Errors from writing facts.
#[derive(Error, Debug)]
pub enum FactError {
    #[error("fact sink I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize fact: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("fact sink poisoned by a panicking writer")]
    Poisoned,
}

/// Any failure while extracting modifiers for a declaration.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Modifier(#[from] ModifierError),
    #[error(transparent)]
    Fact(#[from] FactError),
}
