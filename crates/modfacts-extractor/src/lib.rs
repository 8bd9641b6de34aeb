//! Modifier extraction: classification, run context, and unit orchestration

pub mod config;
pub mod context;
pub mod coordinator;
pub mod extractor;
pub mod modifier;


pub use config::{ExtractorConfig, FailurePolicy, ConfigError};
pub use context::{ExtractionContext, RunStats};
pub use coordinator::{Coordinator, RunSummary, UnitFailure};
pub use extractor::{CompilationUnit, DeclarationRecord, ExtractionInput, UnitReport, extract_unit};
pub use modifier::{ModifierSet, classify, extract_modifiers};
