//! Instruction predicates and cross-entity projections.
//!
//! Opcode-family leaves plus lifts that project an instruction's referenced
//! method, field, type or string into a sub-predicate. Projections fail
//! closed: an instruction lacking the operand kind never matches.
//!
//! Gated families take a sub-predicate on the same instruction; the ungated
//! form is spelled `invoke(any())`, `new_instance(any())` and so on.

use crate::ir::{FieldRef, Instruction, MethodRef, Opcode, TypeName};
use crate::matcher::{matcher, Predicate};

/// const-string loads.
pub fn const_string<'p>() -> Predicate<'p, Instruction> {
    matcher(|insn: &Instruction| insn.opcode() == Opcode::ConstString)
}

/// move-result-pseudo flavors.
pub fn move_result_pseudo<'p>() -> Predicate<'p, Instruction> {
    matcher(|insn: &Instruction| insn.opcode().is_move_result_pseudo())
}

/// new-instance gated by a sub-predicate on the instruction.
pub fn new_instance<'p>(p: Predicate<'p, Instruction>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode() == Opcode::NewInstance && p.matches(insn))
}

/// throw.
pub fn throwex<'p>() -> Predicate<'p, Instruction> {
    matcher(|insn: &Instruction| insn.opcode() == Opcode::Throw)
}

/// invoke-direct gated by a sub-predicate.
pub fn invoke_direct<'p>(p: Predicate<'p, Instruction>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode() == Opcode::InvokeDirect && p.matches(insn))
}

/// invoke-static gated by a sub-predicate.
pub fn invoke_static<'p>(p: Predicate<'p, Instruction>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode() == Opcode::InvokeStatic && p.matches(insn))
}

/// invoke-virtual gated by a sub-predicate.
pub fn invoke_virtual<'p>(p: Predicate<'p, Instruction>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode() == Opcode::InvokeVirtual && p.matches(insn))
}

/// invoke of any kind, gated by a sub-predicate.
pub fn invoke<'p>(p: Predicate<'p, Instruction>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode().is_invoke() && p.matches(insn))
}

/// Instance field put of any width, gated by a sub-predicate.
pub fn iput<'p>(p: Predicate<'p, Instruction>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode().is_iput() && p.matches(insn))
}

/// Instance field get of any width, gated by a sub-predicate.
pub fn iget<'p>(p: Predicate<'p, Instruction>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode().is_iget() && p.matches(insn))
}

/// return-void.
pub fn return_void<'p>() -> Predicate<'p, Instruction> {
    matcher(|insn: &Instruction| insn.opcode() == Opcode::ReturnVoid)
}

/// Instructions with exactly `n` source operands.
pub fn has_n_args<'p>(n: usize) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.srcs_len() == n)
}

/// Instructions with exactly this opcode.
pub fn is_opcode<'p>(opcode: Opcode) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.opcode() == opcode)
}

/// Instructions carrying a type operand.
pub fn has_type<'p>() -> Predicate<'p, Instruction> {
    matcher(|insn: &Instruction| insn.has_type())
}

/// Project the instruction's method operand into `p`; no method operand, no
/// match.
pub fn opcode_method<'p>(p: Predicate<'p, MethodRef>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.method().is_some_and(|m| p.matches(m)))
}

/// Project the instruction's field operand into `p`.
pub fn opcode_field<'p>(p: Predicate<'p, FieldRef>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.field().is_some_and(|f| p.matches(f)))
}

/// Project the instruction's type operand into `p`.
pub fn opcode_type<'p>(p: Predicate<'p, TypeName>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.type_ref().is_some_and(|t| p.matches(t)))
}

/// Project the instruction's string operand into `p`.
pub fn opcode_string<'p>(p: Predicate<'p, str>) -> Predicate<'p, Instruction> {
    matcher(move |insn: &Instruction| insn.string_lit().is_some_and(|s| p.matches(s)))
}
