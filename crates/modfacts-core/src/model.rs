//! Core data structures for modifier facts

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable, content-derived identifier for a cached entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Derive an id from an entity's trap key. Same key, same id, for the whole run.
    pub fn from_trap_key(trap_key: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        trap_key.hash(&mut hasher);
        EntityId(hasher.finish())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

/// Identifier of a declaration supplied by the tree walker. Opaque to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct DeclarationId(pub u64);

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Declared accessibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    NotApplicable,
    Private,
    /// `private protected`
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accessibility::NotApplicable => "not_applicable",
            Accessibility::Private => "private",
            Accessibility::ProtectedAndInternal => "protected_and_internal",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedOrInternal => "protected_or_internal",
            Accessibility::Public => "public",
        }
    }

    /// Parse the collaborator's accessibility tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "not_applicable" | "NotApplicable" => Some(Accessibility::NotApplicable),
            "private" | "Private" => Some(Accessibility::Private),
            "protected_and_internal" | "ProtectedAndInternal" => Some(Accessibility::ProtectedAndInternal),
            "protected" | "Protected" => Some(Accessibility::Protected),
            "internal" | "Internal" => Some(Accessibility::Internal),
            "protected_or_internal" | "ProtectedOrInternal" => Some(Accessibility::ProtectedOrInternal),
            "public" | "Public" => Some(Accessibility::Public),
            _ => None,
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminates what kind of symbol a declaration was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    // ── Types ───────────────────────────────────────────────
    NamedType,
    ErrorType,
    ArrayType,
    PointerType,
    FunctionPointerType,
    DynamicType,
    TypeParameter,

    // ── Members ─────────────────────────────────────────────
    Method,
    Field,
    Property,
    Event,
    Parameter,
    Local,
    Label,
    RangeVariable,
    Discard,
    Preprocessing,

    // ── Containers ──────────────────────────────────────────
    Namespace,
    Alias,
    Assembly,
    NetModule,

    // ── Fallback ────────────────────────────────────────────
    /// Any kind this model does not list. Classified by accessibility and flags alone.
    #[serde(other)]
    Other,
}

/// Kind of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Error,
    Unknown,
}

/// Key under which a modifier entity is cached.
///
/// Equality and hashing are structural on the name, so two independently built keys
/// for `"public"` address the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModifierKey {
    name: Arc<str>,
}

impl ModifierKey {
    pub fn new(name: impl AsRef<str>) -> Self {
        ModifierKey {
            name: Arc::from(name.as_ref()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for ModifierKey {
    fn from(name: &str) -> Self {
        ModifierKey::new(name)
    }
}

/// Suffix distinguishing modifier trap keys from other entity categories.
pub const MODIFIER_CATEGORY: &str = "modifier";

/// The canonical entity for one modifier name within a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierEntity {
    pub id: EntityId,
    pub name: String,
}

impl ModifierEntity {
    pub fn new(key: &ModifierKey) -> Self {
        let id = EntityId::from_trap_key(&Self::trap_key(key.name()));
        ModifierEntity {
            id,
            name: key.name().to_string(),
        }
    }

    /// `<name>;modifier`
    pub fn trap_key(name: &str) -> String {
        format!("{};{}", name, MODIFIER_CATEGORY)
    }
}

/// One edge between a declaration and a modifier entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModifierEdge {
    pub declaration: DeclarationId,
    pub modifier: EntityId,
}
