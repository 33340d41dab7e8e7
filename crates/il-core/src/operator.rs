//! The IL opcode set.
//!
//! Each variant below carries a doc comment describing its emission shape;
//! the actual lowering logic lives in `il-codegen::operator`, keyed off
//! these variants. This module only carries the closed opcode vocabulary
//! and the static metadata (`arity`, `modifier_kind`) that does not depend
//! on a particular call site's operand.

use serde::{Deserialize, Serialize};

/// Whether an opcode is executed unconditionally, or guarded by the current
/// CR value being true (`C`) or false (`CN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKind {
    None,
    /// Guarded: executes only `if (CR)`.
    C,
    /// Guarded: executes only `if (!CR)`.
    Cn,
}

/// Static arity of an opcode: how many explicit operands it takes, not
/// counting the implicit CR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// No explicit operand (e.g. `NOT`).
    Zero,
    /// One explicit operand (most opcodes).
    One,
    /// A label operand (jumps).
    Label,
    /// A call argument list (CAL/function calls).
    CallArgs,
}

/// One IL instruction opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `LD op` -- CR := op. CR type becomes `type(op)`.
    Ld,
    /// `LDN op` -- CR := logical/bitwise negation of op. op must be BOOL or binary.
    Ldn,
    /// `ST op` -- op := CR. CR type unchanged.
    St,
    /// `STN op` -- op := negation of CR. CR must be BOOL or binary.
    Stn,
    /// `NOT` -- CR := negation of CR. No explicit operand. CR must be BOOL or binary.
    Not,
    /// `S op` -- if CR then op := TRUE. Implicitly C-modified regardless of
    /// surface syntax (see design notes on the S/R open question).
    S,
    /// `R op` -- if CR then op := FALSE. Implicitly C-modified, as with `S`.
    R,
    /// `AND op` -- CR := CR AND op (bitwise if integer). Operands must share type.
    And,
    /// `OR op` -- CR := CR OR op. Operands must share type.
    Or,
    /// `XOR op` -- CR := CR XOR op. Operands must share type.
    Xor,
    /// `ANDN op` -- CR := CR AND (NOT op).
    Andn,
    /// `ORN op` -- CR := CR OR (NOT op).
    Orn,
    /// `XORN op` -- CR := CR XOR (NOT op).
    Xorn,
    /// `ADD op` -- CR := CR + op. TIME+TIME lowers via the `time_add` intrinsic;
    /// otherwise operands must share a numeric type.
    Add,
    /// `SUB op` -- CR := CR - op. TIME-TIME lowers via `time_sub`; otherwise numeric same-type.
    Sub,
    /// `MUL op` -- CR := CR * op. TIME*INT (either order) lowers via `time_mul`;
    /// TIME*TIME is rejected; otherwise numeric same-type.
    Mul,
    /// `DIV op` -- CR := CR / op. Numeric same-type only.
    Div,
    /// `MOD op` -- CR := CR MOD op. Integer same-type only.
    Mod,
    /// `GT op` -- CR := CR > op, rendered via `cmp_<Type>`, where `<Type>` is
    /// the CR's type *before* this instruction overwrites it. CR type after: BOOL.
    Gt,
    Ge,
    Eq,
    Le,
    Lt,
    Ne,
    /// `JMP label` -- unconditional `goto label`.
    Jmp,
    /// `JMPC label` -- `if (CR) goto label`. CR must be BOOL.
    Jmpc,
    /// `JMPCN label` -- `if (!CR) goto label`. CR must be BOOL.
    Jmpcn,
    /// `RET` -- unconditional `goto end`.
    Ret,
    /// `RETC` -- `if (CR) goto end`.
    Retc,
    /// `RETCN` -- `if (!CR) goto end`.
    Retcn,
    /// `CAL fb(args)` -- unguarded function-block call, see call-lowering design.
    Cal,
    /// `CALC fb(args)` -- `if (CR) { ...call... }`.
    Calc,
    /// `CALCN fb(args)` -- `if (!CR) { ...call... }`.
    Calcn,
}

impl Operator {
    pub fn arity(self) -> Arity {
        use Operator::*;
        match self {
            Not => Arity::Zero,
            Jmp | Jmpc | Jmpcn => Arity::Label,
            Cal | Calc | Calcn => Arity::CallArgs,
            Ret | Retc | Retcn => Arity::Zero,
            _ => Arity::One,
        }
    }

    pub fn modifier_kind(self) -> ModifierKind {
        use Operator::*;
        match self {
            Calc | Retc | Jmpc => ModifierKind::C,
            Calcn | Retcn | Jmpcn => ModifierKind::Cn,
            // S and R always carry an implicit C guard; see DESIGN.md.
            S | R => ModifierKind::C,
            _ => ModifierKind::None,
        }
    }

    /// `true` if this opcode is one of the six comparison opcodes.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Ge | Operator::Eq | Operator::Le | Operator::Lt | Operator::Ne
        )
    }

    /// `true` if this opcode is a return-family opcode lowering to `goto end`.
    pub fn is_return(self) -> bool {
        matches!(self, Operator::Ret | Operator::Retc | Operator::Retcn)
    }

    /// `true` if this opcode is a function-block call.
    pub fn is_fb_call(self) -> bool {
        matches!(self, Operator::Cal | Operator::Calc | Operator::Calcn)
    }
}
