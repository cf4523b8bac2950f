//! Sequence matcher: positional sliding-window search over instruction
//! streams.
//!
//! A pattern is a runtime-ordered list of per-position predicates. The scan
//! advances one instruction at a time and reports every window that
//! satisfies the pattern, overlapping ones included; a match never
//! suppresses later windows. This exhaustive behavior is relied on by
//! callers that post-process overlapping occurrences themselves.

use crate::ir::Instruction;
use crate::matcher::Predicate;

/// An ordered sequence of per-position instruction predicates.
#[derive(Debug, Clone)]
pub struct OpcodePattern<'p> {
    slots: Vec<Predicate<'p, Instruction>>,
}

impl<'p> OpcodePattern<'p> {
    pub fn new(slots: Vec<Predicate<'p, Instruction>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True iff every slot matches its instruction starting at `at`.
    /// Stops at the first failing position. Caller guarantees
    /// `at + len() <= insns.len()`.
    fn matches_at(&self, insns: &[Instruction], at: usize) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, p)| p.matches(&insns[at + i]))
    }
}

impl<'p> FromIterator<Predicate<'p, Instruction>> for OpcodePattern<'p> {
    fn from_iter<I: IntoIterator<Item = Predicate<'p, Instruction>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A contiguous run of instructions accepted by a pattern: the zero-based
/// start offset and the matched slice (no copies).
#[derive(Debug, Clone, Copy)]
pub struct MatchWindow<'a> {
    start: usize,
    insns: &'a [Instruction],
}

impl<'a> MatchWindow<'a> {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn insns(&self) -> &'a [Instruction] {
        self.insns
    }

    pub fn len(&self) -> usize {
        self.insns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }
}

/// Find every window of `insns` matching `pattern`, in ascending start
/// order. Overlapping and adjacent windows are all reported. Returns nothing
/// when the stream is shorter than the pattern, or the pattern is empty.
pub fn find_matches<'a>(
    insns: &'a [Instruction],
    pattern: &OpcodePattern<'_>,
) -> Vec<MatchWindow<'a>> {
    let n = pattern.len();
    let mut matches = Vec::new();
    if n == 0 || insns.len() < n {
        return matches;
    }
    for start in 0..=insns.len() - n {
        if pattern.matches_at(insns, start) {
            matches.push(MatchWindow {
                start,
                insns: &insns[start..start + n],
            });
        }
    }
    matches
}

/// Evaluate one predicate against every instruction independently; matching
/// instructions come back in stream order, each at most once.
pub fn find_insn_match<'a>(
    insns: &'a [Instruction],
    p: &Predicate<'_, Instruction>,
) -> Vec<&'a Instruction> {
    insns.iter().filter(|insn| p.matches(insn)).collect()
}
