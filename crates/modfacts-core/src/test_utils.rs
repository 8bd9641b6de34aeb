//! Test utilities for modfacts-core

use crate::model::{Accessibility, SymbolKind, TypeKind};
use crate::symbols::{FieldDetail, MethodDetail, NamedTypeDetail, Symbol, SymbolDetail, SymbolFlags};

/// A source-declared field.
pub fn field(name: &str, access: Accessibility, detail: FieldDetail, flags: SymbolFlags) -> Symbol {
    Symbol::new(name, SymbolKind::Field, access)
        .with_detail(SymbolDetail::Field(detail))
        .with_flags(flags)
        .from_source()
}

/// A method with the given async flag.
pub fn method(name: &str, access: Accessibility, is_async: bool, flags: SymbolFlags) -> Symbol {
    Symbol::new(name, SymbolKind::Method, access)
        .with_detail(SymbolDetail::Method(MethodDetail { is_async }))
        .with_flags(flags)
        .from_source()
}

/// A named type of the given kind.
pub fn named_type(name: &str, access: Accessibility, type_kind: TypeKind) -> Symbol {
    Symbol::new(name, SymbolKind::NamedType, access)
        .with_detail(SymbolDetail::NamedType(NamedTypeDetail {
            type_kind,
            is_read_only: false,
            is_ref_like: false,
        }))
        .from_source()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_agree_with_kind_tags() {
        let f = field("count", Accessibility::Private, FieldDetail::default(), SymbolFlags::default());
        assert!(f.as_field().is_ok());

        let m = method("run", Accessibility::Public, true, SymbolFlags::default());
        assert!(m.as_method().unwrap().is_async);

        let t = named_type("Point", Accessibility::Public, TypeKind::Struct);
        assert_eq!(t.as_named_type().unwrap().type_kind, TypeKind::Struct);
    }
}
