//! Entity attribute predicates: O(1) reads of access-flag bits and simple
//! IR tags, generic over the capability traits in [`crate::ir`].

use crate::ir::{Accessible, AccessFlags, ClassDef, TypeName, Typed};
use crate::matcher::{matcher, Predicate};

/// Match entities with external linkage.
pub fn is_external<'p, T: Accessible + ?Sized + 'p>() -> Predicate<'p, T> {
    matcher(|t: &T| t.is_external())
}

/// Match entities carrying the `final` flag.
pub fn is_final<'p, T: Accessible + ?Sized + 'p>() -> Predicate<'p, T> {
    matcher(|t: &T| t.access().contains(AccessFlags::FINAL))
}

/// Match entities carrying the `static` flag.
pub fn is_static<'p, T: Accessible + ?Sized + 'p>() -> Predicate<'p, T> {
    matcher(|t: &T| t.access().contains(AccessFlags::STATIC))
}

/// Match entities carrying the `abstract` flag.
pub fn is_abstract<'p, T: Accessible + ?Sized + 'p>() -> Predicate<'p, T> {
    matcher(|t: &T| t.access().contains(AccessFlags::ABSTRACT))
}

/// Match classes that are enums.
pub fn is_enum<'p>() -> Predicate<'p, ClassDef> {
    matcher(|cls: &ClassDef| cls.access().contains(AccessFlags::ENUM))
}

/// Match classes that are interfaces.
pub fn is_interface<'p>() -> Predicate<'p, ClassDef> {
    matcher(|cls: &ClassDef| cls.access().contains(AccessFlags::INTERFACE))
}

/// Match classes with a concrete body (class data).
pub fn has_class_data<'p>() -> Predicate<'p, ClassDef> {
    matcher(|cls: &ClassDef| cls.has_class_data())
}

/// Lift a type predicate onto any entity exposing a value type.
pub fn as_type<'p, T>(p: Predicate<'p, TypeName>) -> Predicate<'p, T>
where
    T: Typed + ?Sized + 'p,
{
    matcher(move |t: &T| p.matches(t.value_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ClassDefBuilder, FieldDef, MethodDef};
    use crate::matcher::named;

    #[test]
    fn test_flag_predicates_on_methods() {
        let stat = MethodDef::new("Lfoo;", "helper")
            .with_access(AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL);
        let plain = MethodDef::new("Lfoo;", "run");

        assert!(is_static::<MethodDef>().matches(&stat));
        assert!(is_final::<MethodDef>().matches(&stat));
        assert!(!is_abstract::<MethodDef>().matches(&stat));
        assert!(!is_static::<MethodDef>().matches(&plain));
    }

    #[test]
    fn test_class_kind_predicates() {
        let iface = ClassDefBuilder::new("Lfoo/Iface;")
            .access(AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT)
            .build();
        let en = ClassDefBuilder::new("Lfoo/Color;")
            .access(AccessFlags::PUBLIC | AccessFlags::ENUM)
            .build();

        assert!(is_interface().matches(&iface));
        assert!(is_abstract::<ClassDef>().matches(&iface));
        assert!(!is_enum().matches(&iface));
        assert!(is_enum().matches(&en));
        assert!(!is_interface().matches(&en));
    }

    #[test]
    fn test_is_external() {
        let shell = ClassDefBuilder::new("Landroid/app/Activity;")
            .external(true)
            .class_data(false)
            .build();
        let own = ClassDefBuilder::new("Lfoo/Bar;").build();
        assert!(is_external::<ClassDef>().matches(&shell));
        assert!(!is_external::<ClassDef>().matches(&own));
        assert!(!has_class_data().matches(&shell));
        assert!(has_class_data().matches(&own));
    }

    #[test]
    fn test_as_type_on_fields() {
        let field = FieldDef::new("Lfoo;", "count", "I");
        assert!(as_type::<FieldDef>(named("I")).matches(&field));
        assert!(!as_type::<FieldDef>(named("J")).matches(&field));
    }
}
