//! Class hierarchy: type-to-class resolution and the subtype predicate.
//!
//! The hierarchy is a read-only index over class definitions. Resolution is
//! always optional: primitives, arrays and stripped external types resolve to
//! nothing, and every predicate built on top treats that as "does not match".

use std::collections::{HashMap, HashSet};

use crate::ir::{ClassDef, MethodDef, MethodRef, TypeName};
use crate::matcher::{matcher, Predicate};

/// Index from type name to class definition, plus reference resolution.
#[derive(Debug, Default)]
pub struct ClassHierarchy {
    classes: HashMap<TypeName, ClassDef>,
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, keyed by its name. A later class with the same name
    /// replaces the earlier one.
    pub fn add_class(&mut self, cls: ClassDef) {
        self.classes.insert(cls.name().clone(), cls);
    }

    /// Look up the defining class of a type, if any.
    pub fn resolve(&self, ty: &TypeName) -> Option<&ClassDef> {
        self.classes.get(ty)
    }

    /// Resolve a method reference to its definition: direct methods first,
    /// then virtual, matched by name within the declaring class.
    pub fn resolve_method(&self, mref: &MethodRef) -> Option<&MethodDef> {
        let cls = self.resolve(mref.class())?;
        cls.dmethods()
            .iter()
            .chain(cls.vmethods().iter())
            .find(|m| m.name() == mref.name())
    }

    /// Resolve a full method descriptor of the form `Lcls;.name:(args)ret`
    /// into a reference, provided the method actually exists. Malformed
    /// descriptors and unknown methods yield `None`.
    pub fn resolve_method_desc(&self, desc: &str) -> Option<MethodRef> {
        let dot = desc.find(";.")?;
        let (class_part, rest) = desc.split_at(dot + 1);
        let rest = &rest[1..];
        let (name, proto) = rest.split_once(':')?;
        if name.is_empty() || !proto.starts_with('(') {
            return None;
        }
        let mref = MethodRef::new(class_part, name, proto);
        self.resolve_method(&mref).map(|_| mref)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Match types assignable to `target`: the target itself, or any type that
/// transitively derives from it via superclass links or implemented/extended
/// interfaces.
///
/// The walk keeps a visited set so diamond-shaped interface graphs terminate,
/// and treats unresolvable ancestors as dead ends.
pub fn is_assignable_to<'p>(
    hier: &'p ClassHierarchy,
    target: &'p TypeName,
) -> Predicate<'p, TypeName> {
    matcher(move |candidate: &TypeName| assignable(hier, candidate, target))
}

fn assignable(hier: &ClassHierarchy, candidate: &TypeName, target: &TypeName) -> bool {
    let mut visited: HashSet<&TypeName> = HashSet::new();
    let mut pending = vec![candidate];
    while let Some(ty) = pending.pop() {
        if ty == target {
            return true;
        }
        if !visited.insert(ty) {
            continue;
        }
        let Some(cls) = hier.resolve(ty) else {
            continue;
        };
        if let Some(sup) = cls.super_class() {
            pending.push(sup);
        }
        pending.extend(cls.interfaces().iter());
    }
    false
}

/// Lift a class predicate onto a type by resolving it to its defining class.
/// Unresolvable types (primitives, arrays, unknown externals) fail closed.
pub fn as_class<'p>(
    hier: &'p ClassHierarchy,
    p: Predicate<'p, ClassDef>,
) -> Predicate<'p, TypeName> {
    matcher(move |ty: &TypeName| hier.resolve(ty).is_some_and(|cls| p.matches(cls)))
}
