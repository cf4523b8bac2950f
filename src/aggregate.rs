//! Aggregate and quantifier predicates: existentials over member
//! collections, declaring-class membership, and membership in a borrowed
//! container.

use crate::ir::{Annotated, Annotation, ClassDef, FieldDef, Member, MethodDef, TypeName};
use crate::matcher::{matcher, Predicate};

/// Match classes where any virtual-dispatch method satisfies `p`. An empty
/// collection never matches.
pub fn any_vmethods<'p>(p: Predicate<'p, MethodDef>) -> Predicate<'p, ClassDef> {
    matcher(move |cls: &ClassDef| cls.vmethods().iter().any(|m| p.matches(m)))
}

/// Match classes where any direct-dispatch method satisfies `p`.
pub fn any_dmethods<'p>(p: Predicate<'p, MethodDef>) -> Predicate<'p, ClassDef> {
    matcher(move |cls: &ClassDef| cls.dmethods().iter().any(|m| p.matches(m)))
}

/// Match classes where any instance field satisfies `p`.
pub fn any_ifields<'p>(p: Predicate<'p, FieldDef>) -> Predicate<'p, ClassDef> {
    matcher(move |cls: &ClassDef| cls.ifields().iter().any(|f| p.matches(f)))
}

/// Match classes where any static field satisfies `p`.
pub fn any_sfields<'p>(p: Predicate<'p, FieldDef>) -> Predicate<'p, ClassDef> {
    matcher(move |cls: &ClassDef| cls.sfields().iter().any(|f| p.matches(f)))
}

/// Match entities carrying any annotation satisfying `p`. Entities without a
/// concrete definition fail closed.
pub fn any_annos<'p, T>(p: Predicate<'p, Annotation>) -> Predicate<'p, T>
where
    T: Annotated + ?Sized + 'p,
{
    matcher(move |t: &T| {
        t.annotations()
            .is_some_and(|annos| annos.iter().any(|a| p.matches(a)))
    })
}

/// Match members whose declaring type satisfies `p`.
pub fn member_of<'p, T>(p: Predicate<'p, TypeName>) -> Predicate<'p, T>
where
    T: Member + ?Sized + 'p,
{
    matcher(move |member: &T| p.matches(member.declaring_type()))
}

/// Identity membership test, used by [`in_container`]. Implementations
/// compare by address, never by structural equality.
pub trait Contains<T: ?Sized> {
    fn contains_entity(&self, t: &T) -> bool;
}

impl<'a, T: ?Sized> Contains<T> for [&'a T] {
    fn contains_entity(&self, t: &T) -> bool {
        self.iter().any(|member| std::ptr::eq(*member, t))
    }
}

impl<'a, T: ?Sized> Contains<T> for Vec<&'a T> {
    fn contains_entity(&self, t: &T) -> bool {
        self.as_slice().contains_entity(t)
    }
}

/// Match entities found, by identity, in a borrowed container. The container
/// is never owned or copied; the caller guarantees it outlives every use of
/// the predicate.
pub fn in_container<'p, T, C>(container: &'p C) -> Predicate<'p, T>
where
    T: ?Sized + 'p,
    C: Contains<T> + Sync + ?Sized,
{
    matcher(move |t: &T| container.contains_entity(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::is_static;
    use crate::ir::{AccessFlags, ClassDefBuilder, FieldRef, MethodRef};
    use crate::matcher::{any, named};

    fn sample_class() -> ClassDef {
        ClassDefBuilder::new("Lfoo/Bar;")
            .vmethod(MethodDef::new("Lfoo/Bar;", "run"))
            .vmethod(
                MethodDef::new("Lfoo/Bar;", "toString")
                    .with_annotation(Annotation::new("Lanno/Override;")),
            )
            .dmethod(
                MethodDef::new("Lfoo/Bar;", "<init>")
                    .with_access(AccessFlags::PUBLIC | AccessFlags::CONSTRUCTOR),
            )
            .ifield(FieldDef::new("Lfoo/Bar;", "count", "I"))
            .build()
    }

    #[test]
    fn test_method_quantifiers() {
        let cls = sample_class();
        assert!(any_vmethods(named("run")).matches(&cls));
        assert!(!any_vmethods(named("<init>")).matches(&cls));
        assert!(any_dmethods(named("<init>")).matches(&cls));
        assert!(!any_dmethods(named("run")).matches(&cls));
    }

    #[test]
    fn test_field_quantifiers() {
        let cls = sample_class();
        assert!(any_ifields(named("count")).matches(&cls));
        assert!(!any_ifields(is_static()).matches(&cls));
        // No static fields at all: even the universal predicate fails.
        assert!(!any_sfields(any()).matches(&cls));
    }

    #[test]
    fn test_empty_collections_fail_with_any() {
        let empty = ClassDefBuilder::new("Lempty;").build();
        assert!(!any_vmethods(any()).matches(&empty));
        assert!(!any_dmethods(any()).matches(&empty));
        assert!(!any_ifields(any()).matches(&empty));
        assert!(!any_sfields(any()).matches(&empty));
    }

    #[test]
    fn test_any_annos() {
        let cls = sample_class();
        assert!(any_annos(named("Lanno/Override;")).matches(&cls.vmethods()[1]));
        assert!(!any_annos(any()).matches(&cls.vmethods()[0]));
        // References carry no definition: fail closed even for `any`.
        let mref = MethodRef::new("Lfoo/Bar;", "toString", "()Ljava/lang/String;");
        assert!(!any_annos::<MethodRef>(any()).matches(&mref));
    }

    #[test]
    fn test_member_of() {
        let meth = MethodDef::new("Lfoo/Bar;", "run");
        assert!(member_of::<MethodDef>(named("Lfoo/Bar;")).matches(&meth));
        assert!(!member_of::<MethodDef>(named("Lother;")).matches(&meth));
        let fref = FieldRef::new("Lfoo/Bar;", "count", "I");
        assert!(member_of::<FieldRef>(named("Lfoo/Bar;")).matches(&fref));
    }

    #[test]
    fn test_in_container_by_identity() {
        let a = MethodDef::new("Lfoo;", "a");
        let b = MethodDef::new("Lfoo;", "b");
        let twin_of_a = MethodDef::new("Lfoo;", "a");
        let container: Vec<&MethodDef> = vec![&a, &b];
        let p = in_container(&container);
        assert!(p.matches(&a));
        assert!(p.matches(&b));
        // Structurally equal but a different entity.
        assert!(!p.matches(&twin_of_a));
    }
}
