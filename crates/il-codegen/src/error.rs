//! Fatal, compiler-internal emission errors.
//!
//! Every variant carries whatever subset of `{opcode, cr_type, operand_type,
//! location}` is relevant so a diagnostic can be rendered without the
//! caller having to reconstruct context after the fact. There is no
//! recoverable variant: every failure here terminates emission of the
//! current compilation unit.

use il_core::{Operator, PlcType, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("{opcode:?} at {span:?}: current result has no type (CR read before LD)")]
    UndefinedCr { opcode: Operator, span: SourceSpan },

    #[error("{opcode:?} at {span:?}: operand type {operand_type:?} does not match required kind")]
    TypeRuleViolation {
        opcode: Operator,
        cr_type: Option<PlcType>,
        operand_type: PlcType,
        span: SourceSpan,
    },

    #[error("{opcode:?} at {span:?}: operand `{operand}` is required but missing")]
    MissingOperand {
        opcode: Operator,
        operand: &'static str,
        span: SourceSpan,
    },

    #[error("unresolved function `{name}` at {span:?}")]
    UnknownFunction { name: String, span: SourceSpan },

    #[error("unresolved function-block type `{name}` at {span:?}")]
    UnknownFbType { name: String, span: SourceSpan },

    #[error("unresolved function-block instance `{name}` at {span:?}")]
    UnknownFbInstance { name: String, span: SourceSpan },

    #[error("parameter `{param}` of `{callee}` uses EXTREF, which is not supported ({span:?})")]
    UnsupportedExtRef {
        callee: String,
        param: String,
        span: SourceSpan,
    },

    #[error("{opcode:?} at {span:?} is not a valid simple/expression operator: {reason}")]
    MalformedInstruction {
        opcode: Operator,
        reason: &'static str,
        span: SourceSpan,
    },

    #[error(transparent)]
    Check(#[from] il_check::CheckError),
}
