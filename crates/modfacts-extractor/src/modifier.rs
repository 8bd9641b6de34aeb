//! Modifier classification
//!
//! Maps a symbol's semantic metadata to the set of modifier names the fact schema expects,
//! then attaches one edge per name. Every rule is evaluated independently and the results
//! are unioned. Two flags are deliberately not surfaced as their obvious fact:
//!
//! - `static` on a source-declared const field, where the language already implies it;
//! - `abstract` on interface members, which are reported as `virtual` instead.
//!
//! New rules must keep that suppression discipline rather than emitting whenever a flag
//! is set.

use crate::context::ExtractionContext;
use modfacts_core::{
    Accessibility, DeclarationId, DeclaredAccessibility, ExtractError, ModifierEntity,
    ModifierError, Symbol, SymbolKind, TypeKind,
};
use std::sync::Arc;

pub const PUBLIC: &str = "public";
pub const PRIVATE: &str = "private";
pub const PROTECTED: &str = "protected";
pub const INTERNAL: &str = "internal";
pub const ABSTRACT: &str = "abstract";
pub const VIRTUAL: &str = "virtual";
pub const SEALED: &str = "sealed";
pub const STATIC: &str = "static";
pub const READONLY: &str = "readonly";
pub const OVERRIDE: &str = "override";
pub const ASYNC: &str = "async";
pub const EXTERN: &str = "extern";
pub const REF: &str = "ref";

/// Stands in for the symbol name when an accessibility is resolved without a symbol.
pub const ACCESSIBILITY_LABEL: &str = "<accessibility>";

/// Modifier names for one declaration, in rule order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet {
    names: Vec<String>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` unless already present. Returns whether it was added.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names sorted alphabetically, for order-insensitive comparison.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().collect();
        names.sort_unstable();
        names
    }
}

impl<'a> Extend<&'a str> for ModifierSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl IntoIterator for ModifierSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

/// The modifier name for an accessibility that maps to exactly one name.
pub fn accessibility_modifier(access: Accessibility) -> Option<&'static str> {
    match access {
        Accessibility::Private => Some(PRIVATE),
        Accessibility::Protected => Some(PROTECTED),
        Accessibility::Public => Some(PUBLIC),
        Accessibility::Internal => Some(INTERNAL),
        Accessibility::NotApplicable
        | Accessibility::ProtectedOrInternal
        | Accessibility::ProtectedAndInternal => None,
    }
}

/// All modifier names an accessibility expands to.
pub fn accessibility_modifiers(access: Accessibility) -> &'static [&'static str] {
    match access {
        Accessibility::Private => &[PRIVATE],
        Accessibility::Public => &[PUBLIC],
        Accessibility::Protected => &[PROTECTED],
        Accessibility::Internal => &[INTERNAL],
        Accessibility::NotApplicable => &[],
        Accessibility::ProtectedOrInternal => &[PROTECTED, INTERNAL],
        // `private protected` is recorded as protected + private.
        Accessibility::ProtectedAndInternal => &[PROTECTED, PRIVATE],
    }
}

/// Compute the modifier names for `symbol`. Pure; touches neither cache nor sink.
pub fn classify(symbol: &Symbol) -> Result<ModifierSet, ModifierError> {
    let access = match &symbol.accessibility {
        DeclaredAccessibility::Known(access) => *access,
        DeclaredAccessibility::Unrecognized(raw) => {
            return Err(ModifierError::unsupported(
                &symbol.name,
                format!("unhandled accessibility value `{}`", raw),
            ));
        }
    };

    let named_type = match symbol.kind {
        SymbolKind::NamedType => Some(symbol.as_named_type()?),
        _ => None,
    };
    let field = match symbol.kind {
        SymbolKind::Field => Some(symbol.as_field()?),
        _ => None,
    };
    let method = match symbol.kind {
        SymbolKind::Method => Some(symbol.as_method()?),
        _ => None,
    };

    let flags = &symbol.flags;
    let in_interface = symbol.in_interface();
    let is_interface = named_type.is_some_and(|t| t.type_kind == TypeKind::Interface);

    let mut set = ModifierSet::new();
    set.extend(accessibility_modifiers(access).iter().copied());

    if symbol.kind == SymbolKind::ErrorType {
        set.insert(PUBLIC);
    }

    if flags.is_abstract && !is_interface && !in_interface {
        set.insert(ABSTRACT);
    }

    // Interface members are abstract by construction; the schema calls them virtual.
    if flags.is_abstract && in_interface {
        set.insert(VIRTUAL);
    }

    if flags.is_sealed {
        set.insert(SEALED);
    }

    let implicit_static = field.is_some_and(|f| f.is_const) && symbol.declared_in_source;
    if flags.is_static && !implicit_static {
        set.insert(STATIC);
    }

    if flags.is_virtual {
        set.insert(VIRTUAL);
    }

    if field.is_some_and(|f| f.is_read_only) {
        set.insert(READONLY);
    }

    if flags.is_override {
        set.insert(OVERRIDE);
    }

    if method.is_some_and(|m| m.is_async) {
        set.insert(ASYNC);
    }

    if flags.is_extern {
        set.insert(EXTERN);
    }

    set.extend(symbol.source_level_modifiers());

    if let Some(t) = named_type.filter(|t| t.type_kind == TypeKind::Struct) {
        if t.is_read_only {
            set.insert(READONLY);
        }
        if t.is_ref_like {
            set.insert(REF);
        }
    }

    Ok(set)
}

/// Intern the entity for a modifier name.
pub fn create(cx: &ExtractionContext, name: &str) -> Result<Arc<ModifierEntity>, ExtractError> {
    Ok(cx.modifier(name)?)
}

/// Intern the entity for a single-name accessibility.
pub fn create_for_accessibility(
    cx: &ExtractionContext,
    access: Accessibility,
) -> Result<Arc<ModifierEntity>, ExtractError> {
    let name = accessibility_modifier(access).ok_or_else(|| {
        ModifierError::unsupported(
            ACCESSIBILITY_LABEL,
            format!("accessibility `{}` does not map to a single modifier", access),
        )
    })?;
    create(cx, name)
}

/// Attach the modifier `name` to `declaration`.
pub fn has_modifier(
    cx: &ExtractionContext,
    declaration: DeclarationId,
    name: &str,
) -> Result<(), ExtractError> {
    let entity = cx.modifier(name)?;
    cx.attach(declaration, &entity)?;
    Ok(())
}

/// Attach every modifier implied by `access` to `declaration`.
pub fn has_accessibility(
    cx: &ExtractionContext,
    declaration: DeclarationId,
    access: Accessibility,
) -> Result<(), ExtractError> {
    for name in accessibility_modifiers(access) {
        has_modifier(cx, declaration, name)?;
    }
    Ok(())
}

/// Attach a set of already-classified modifiers to `declaration`.
pub fn attach_all(
    cx: &ExtractionContext,
    declaration: DeclarationId,
    modifiers: &ModifierSet,
) -> Result<(), ExtractError> {
    for name in modifiers.iter() {
        has_modifier(cx, declaration, name)?;
    }
    Ok(())
}

/// Classify `symbol` and attach the result to `declaration`.
pub fn extract_modifiers(
    cx: &ExtractionContext,
    declaration: DeclarationId,
    symbol: &Symbol,
) -> Result<ModifierSet, ExtractError> {
    let modifiers = classify(symbol)?;
    cx.note_classified();
    attach_all(cx, declaration, &modifiers)?;
    Ok(modifiers)
}
