//! Constructor and identity detectors, plus thin wrappers over the external
//! reachability/keep oracle.

use crate::hierarchy::ClassHierarchy;
use crate::ir::{AccessFlags, KeepRules, MethodDef, MethodRef};
use crate::matcher::{matcher, Predicate};

const INIT: &str = "<init>";
const CLINIT: &str = "<clinit>";

fn default_constructor(meth: &MethodDef) -> bool {
    !meth.access().contains(AccessFlags::STATIC) && meth.name() == INIT && meth.params().is_empty()
}

/// Match methods that are instance initializers with zero declared
/// parameters.
pub fn is_default_constructor<'p>() -> Predicate<'p, MethodDef> {
    matcher(default_constructor)
}

/// Same as [`is_default_constructor`], applied after resolving a reference
/// to its definition. No definition, no match.
pub fn can_be_default_constructor<'p>(hier: &'p ClassHierarchy) -> Predicate<'p, MethodRef> {
    matcher(move |mref: &MethodRef| {
        hier.resolve_method(mref).is_some_and(default_constructor)
    })
}

/// Match methods that are constructors. INCLUDES static (class) initializers.
pub fn is_constructor<'p>() -> Predicate<'p, MethodDef> {
    matcher(|meth: &MethodDef| meth.name() == INIT || meth.name() == CLINIT)
}

/// Reference-tolerant constructor check: the name alone decides, no
/// resolution needed.
pub fn can_be_constructor<'p>() -> Predicate<'p, MethodRef> {
    matcher(|mref: &MethodRef| mref.name() == INIT || mref.name() == CLINIT)
}

/// Match members the keep oracle considers safe to delete.
pub fn can_delete<'p, T, R>(rules: &'p R) -> Predicate<'p, T>
where
    T: ?Sized + 'p,
    R: KeepRules<T> + Sync,
{
    matcher(move |t: &T| rules.can_delete(t))
}

/// Match members the keep oracle considers safe to rename.
pub fn can_rename<'p, T, R>(rules: &'p R) -> Predicate<'p, T>
where
    T: ?Sized + 'p,
    R: KeepRules<T> + Sync,
{
    matcher(move |t: &T| rules.can_rename(t))
}

/// Match members protected by a keep rule.
pub fn has_keep<'p, T, R>(rules: &'p R) -> Predicate<'p, T>
where
    T: ?Sized + 'p,
    R: KeepRules<T> + Sync,
{
    matcher(move |t: &T| rules.has_keep(t))
}
