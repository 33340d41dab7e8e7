//! IL instructions and routines.

use serde::{Deserialize, Serialize};

use crate::operand::Operand;
use crate::operator::Operator;

/// A source location attached to an instruction, carried through into
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    pub line: u32,
    pub column: u32,
}

/// One resolved call argument, as it appeared at the call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallArg {
    /// A positional argument, matched to the formal parameter at this index
    /// (within the IN/INOUT/OUT ordering of the call site, not necessarily
    /// the declaration's full ordering).
    Positional(Operand),
    /// A formal (named) argument, e.g. `name := value` or `name => value`
    /// for OUT parameters.
    Named { name: String, value: Operand },
}

/// A single IL instruction, with an optional label and source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub label: Option<String>,
    pub span: SourceSpan,
    pub kind: InstructionKind,
}

/// The operative part of an instruction, independent of its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A label with no operation of its own (a target for a jump that falls
    /// through to whatever follows).
    LabelOnly,
    /// An operator with zero or one plain operand (LD, ST, AND, ADD, GT, ...).
    Simple {
        op: Operator,
        operand: Option<Operand>,
    },
    /// A jump-family operator (JMP/JMPC/JMPCN) with its target label.
    Jump { op: Operator, target: String },
    /// A return-family operator (RET/RETC/RETCN).
    Return { op: Operator },
    /// A standalone function call (formal or positional argument list),
    /// used when a function call appears as its own statement rather than
    /// feeding the CR via a simple operation.
    FunctionCall { name: String, args: Vec<CallArg> },
    /// A function-block call (CAL/CALC/CALCN).
    FbCall {
        op: Operator,
        instance: String,
        args: Vec<CallArg>,
    },
    /// A parenthesised expression: `op ( initial_operand, inner )`. The
    /// inner list executes in a fresh CR scope seeded by `initial_operand`;
    /// on completion its result becomes the right-hand operand of `op`.
    Expression {
        op: Operator,
        initial_operand: Operand,
        inner: Vec<Instruction>,
    },
}

/// A routine: the instruction list for a function, function block or
/// program body, plus nothing else -- the enclosing scope is supplied
/// separately to the walker at emission time, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub name: String,
    pub instructions: Vec<Instruction>,
}

impl Routine {
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Routine {
            name: name.into(),
            instructions,
        }
    }
}
