//! Typed data model for IEC 61131-3 Instruction List (IL) routines.
//!
//! This crate owns the shapes that the IL-to-imperative-code lowering stage
//! walks: [`types::PlcType`], [`operand::Operand`], [`operator::Operator`],
//! [`instruction::Instruction`] and [`instruction::Routine`]. It also
//! defines the trait seams ([`scope::VariableScope`], [`scope::FunctionTable`],
//! [`scope::FbTypeTable`]) through which the upstream symbol tables are
//! consulted. Nothing in this crate performs emission; see `il-codegen` for
//! that.

pub mod error;
pub mod instruction;
pub mod operand;
pub mod operator;
pub mod scope;
pub mod types;

pub use error::CoreError;
pub use instruction::{CallArg, Instruction, InstructionKind, Routine, SourceSpan};
pub use operand::{ConstValue, Operand, VariablePath};
pub use operator::{Arity, ModifierKind, Operator};
pub use scope::{
    FbInstanceDecl, FbTypeDecl, FbTypeTable, FunctionDecl, FunctionTable, ParamDecl,
    ParamDirection, VariableScope,
};
pub use types::PlcType;
