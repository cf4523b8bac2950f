//! Irmatch: a declarative, composable predicate engine for querying bytecode IR.
//!
//! Optimization passes build predicates out of small leaves and boolean
//! combinators, then apply them to single entities or run the sequence
//! matcher over instruction streams to harvest the elements they act on.
//!
//! # Architecture
//! - Generic predicate wrapper + combinators ([`matcher`], [`Predicate`])
//! - Attribute leaves over access flags and IR tags
//! - Type-hierarchy subtyping ([`ClassHierarchy`], [`is_assignable_to`])
//! - Instruction leaves and operand projections
//! - Sliding-window sequence matching ([`OpcodePattern`], [`find_matches`])
//! - Quantifiers over member collections, constructor detectors
//! - Peripheral CSV ingestion of per-method runtime stats ([`MethodProfiles`])
//!
//! Matching never fails: unresolved references, operands and ancestors are
//! uniformly "does not match". The only fallible surface is stats ingestion,
//! which reports [`ProfilesError`].
//!
//! The engine holds only borrowed references into the caller's IR; nothing
//! is mutated, and evaluation is pure, so read-only matching can proceed
//! concurrently as long as the caller serializes it with any IR mutation.

mod aggregate;
mod attrs;
mod ctors;
mod hierarchy;
mod insn;
mod ir;
mod matcher;
mod profiles;
mod seq;

pub use aggregate::*;
pub use attrs::*;
pub use ctors::*;
pub use hierarchy::*;
pub use insn::*;
pub use ir::*;
pub use matcher::*;
pub use profiles::*;
pub use seq::*;
