//! Modfacts core: modifier entities, symbol metadata, entity cache, and fact sinks

pub mod model;
pub mod symbols;
pub mod cache;
pub mod facts;
pub mod error;


#[cfg(test)]
pub mod test_utils;

pub use model::{EntityId, DeclarationId, Accessibility, SymbolKind, TypeKind, ModifierKey, ModifierEntity, ModifierEdge, MODIFIER_CATEGORY};
pub use symbols::{Symbol, SymbolFlags, SymbolDetail, NamedTypeDetail, FieldDetail, MethodDetail, ContainingType, DeclaredAccessibility};
pub use cache::{EntityCache, EntityFactory, Cached};
pub use facts::{Fact, FactSink, MemorySink, JsonLinesSink};
pub use error::{ModifierError, FactError, ExtractError};
