//! Predicate core: the generic matcher wrapper and its boolean combinators.
//!
//! A [`Predicate`] wraps a pure boolean function over a borrowed entity. It
//! owns nothing, can be cloned cheaply and evaluated any number of times.
//! Everything else in the crate is built by composing these.

use std::sync::Arc;

use crate::ir::Named;

/// A pure boolean test over a borrowed `T`.
///
/// `'p` bounds whatever the underlying closure borrows (a target type, a
/// class hierarchy, a container). Evaluation is referentially transparent:
/// no side effects, no errors, no panics. Anything unresolvable inside a
/// predicate is "does not match", never a failure.
pub struct Predicate<'p, T: ?Sized + 'p> {
    f: Arc<dyn Fn(&T) -> bool + Send + Sync + 'p>,
}

impl<'p, T: ?Sized> Clone for Predicate<'p, T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<'p, T: ?Sized> std::fmt::Debug for Predicate<'p, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl<'p, T: ?Sized + 'p> Predicate<'p, T> {
    /// Evaluate the predicate against one entity.
    pub fn matches(&self, t: &T) -> bool {
        (self.f)(t)
    }

    /// Logical negation.
    pub fn not(self) -> Predicate<'p, T> {
        matcher(move |t: &T| !self.matches(t))
    }

    /// Logical conjunction; `other` is not evaluated when `self` fails.
    pub fn and(self, other: Predicate<'p, T>) -> Predicate<'p, T> {
        matcher(move |t: &T| self.matches(t) && other.matches(t))
    }

    /// Logical disjunction; `other` is not evaluated when `self` matches.
    pub fn or(self, other: Predicate<'p, T>) -> Predicate<'p, T> {
        matcher(move |t: &T| self.matches(t) || other.matches(t))
    }

    /// Exclusive or. Both sides are always evaluated.
    pub fn xor(self, other: Predicate<'p, T>) -> Predicate<'p, T> {
        matcher(move |t: &T| self.matches(t) ^ other.matches(t))
    }
}

/// Wrap a matching function of type `&T -> bool` into a [`Predicate`].
///
/// This is the only way into the combinator algebra: wrapping is the opt-in
/// that keeps arbitrary closures out of it.
pub fn matcher<'p, T, F>(f: F) -> Predicate<'p, T>
where
    T: ?Sized + 'p,
    F: Fn(&T) -> bool + Send + Sync + 'p,
{
    Predicate { f: Arc::new(f) }
}

/// Match any `T` (always matches).
pub fn any<'p, T: ?Sized + 'p>() -> Predicate<'p, T> {
    matcher(|_: &T| true)
}

/// Compare two `T` by address identity, not structural equality.
pub fn identity_eq<'p, T: Sync + 'p>(expected: &'p T) -> Predicate<'p, T> {
    matcher(move |actual: &T| std::ptr::eq(expected, actual))
}

/// Match any `T` with exactly this name (case-sensitive).
pub fn named<'p, T>(name: impl Into<String>) -> Predicate<'p, T>
where
    T: Named + ?Sized + 'p,
{
    let name = name.into();
    matcher(move |t: &T| t.name() == name)
}
