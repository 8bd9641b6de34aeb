//! Symbol metadata handed over by the tree walker

use crate::error::ModifierError;
use crate::model::{Accessibility, SymbolKind, TypeKind};
use serde::{Deserialize, Serialize};

/// Declared accessibility as reported upstream.
///
/// Anything the upstream model may report that is not one of the known variants is
/// kept as `Unrecognized` so the classifier can reject it with the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclaredAccessibility {
    Known(Accessibility),
    Unrecognized(String),
}

impl From<String> for DeclaredAccessibility {
    fn from(tag: String) -> Self {
        match Accessibility::from_tag(&tag) {
            Some(access) => DeclaredAccessibility::Known(access),
            None => DeclaredAccessibility::Unrecognized(tag),
        }
    }
}

impl From<DeclaredAccessibility> for String {
    fn from(access: DeclaredAccessibility) -> Self {
        match access {
            DeclaredAccessibility::Known(access) => access.as_str().to_string(),
            DeclaredAccessibility::Unrecognized(tag) => tag,
        }
    }
}

impl From<Accessibility> for DeclaredAccessibility {
    fn from(access: Accessibility) -> Self {
        DeclaredAccessibility::Known(access)
    }
}

/// Flags every symbol carries regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolFlags {
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_extern: bool,
}

/// Named-type view of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTypeDetail {
    pub type_kind: TypeKind,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub is_ref_like: bool,
}

/// Field view of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDetail {
    pub is_const: bool,
    pub is_read_only: bool,
}

/// Method view of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodDetail {
    pub is_async: bool,
}

/// Kind-specific shape of a symbol. Must agree with the symbol's kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SymbolDetail {
    NamedType(NamedTypeDetail),
    Field(FieldDetail),
    Method(MethodDetail),
    #[default]
    Opaque,
}

/// The type a symbol is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainingType {
    pub kind: SymbolKind,
    #[serde(default)]
    pub type_kind: Option<TypeKind>,
}

impl ContainingType {
    pub fn named(type_kind: TypeKind) -> Self {
        ContainingType {
            kind: SymbolKind::NamedType,
            type_kind: Some(type_kind),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == SymbolKind::NamedType && self.type_kind == Some(TypeKind::Interface)
    }
}

/// Immutable snapshot of one symbol's semantic metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub accessibility: DeclaredAccessibility,
    #[serde(default)]
    pub flags: SymbolFlags,
    #[serde(default)]
    pub containing_type: Option<ContainingType>,
    #[serde(default)]
    pub detail: SymbolDetail,
    /// True when the symbol has at least one declaring syntax reference.
    #[serde(default)]
    pub declared_in_source: bool,
    /// Keyword modifiers not covered by the semantic flags (`partial`, `new`, `unsafe`, ...).
    #[serde(default)]
    pub source_modifiers: Vec<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, accessibility: Accessibility) -> Self {
        Symbol {
            name: name.into(),
            kind,
            accessibility: accessibility.into(),
            flags: SymbolFlags::default(),
            containing_type: None,
            detail: SymbolDetail::Opaque,
            declared_in_source: false,
            source_modifiers: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: SymbolFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_detail(mut self, detail: SymbolDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn declared_in(mut self, containing_type: ContainingType) -> Self {
        self.containing_type = Some(containing_type);
        self
    }

    pub fn from_source(mut self) -> Self {
        self.declared_in_source = true;
        self
    }

    pub fn with_source_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the symbol is a member declared in an interface body.
    pub fn in_interface(&self) -> bool {
        self.containing_type.is_some_and(|t| t.is_interface())
    }

    pub fn source_level_modifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.source_modifiers.iter().map(String::as_str)
    }

    /// Read the symbol as a named type. Only valid when the kind tag says so.
    pub fn as_named_type(&self) -> Result<&NamedTypeDetail, ModifierError> {
        match (&self.kind, &self.detail) {
            (SymbolKind::NamedType, SymbolDetail::NamedType(detail)) => Ok(detail),
            _ => Err(self.shape_mismatch("named type")),
        }
    }

    pub fn as_field(&self) -> Result<&FieldDetail, ModifierError> {
        match (&self.kind, &self.detail) {
            (SymbolKind::Field, SymbolDetail::Field(detail)) => Ok(detail),
            _ => Err(self.shape_mismatch("field")),
        }
    }

    pub fn as_method(&self) -> Result<&MethodDetail, ModifierError> {
        match (&self.kind, &self.detail) {
            (SymbolKind::Method, SymbolDetail::Method(detail)) => Ok(detail),
            _ => Err(self.shape_mismatch("method")),
        }
    }

    fn shape_mismatch(&self, expected: &str) -> ModifierError {
        ModifierError::unsupported(
            &self.name,
            format!(
                "symbol kind {:?} is inconsistent with its shape {:?} (expected a {} view)",
                self.kind, self.detail, expected
            ),
        )
    }
}
