//! Lowers typed IEC 61131-3 Instruction List routines into equivalent
//! imperative target-language source text.
//!
//! The entry point is [`compile::compile_routine`]. Everything else in this
//! crate is reachable from it: the current-result register model
//! ([`cr`]), the per-opcode lowering table ([`operator`]),
//! function/function-block call lowering ([`call`]), the instruction walker
//! that ties them together ([`walker`]), and the emission primitives
//! ([`sink`], [`temp`], [`naming`]).

pub mod call;
pub mod compile;
pub mod cr;
pub mod error;
pub mod naming;
pub mod operator;
pub mod render;
pub mod sink;
pub mod temp;
pub mod walker;

pub use compile::{compile_routine, compile_routine_into};
pub use cr::CrState;
pub use error::CodegenError;
pub use naming::EmitOptions;
pub use sink::{OutputSink, StringSink};
pub use temp::TempNameFactory;
