//! The driver entry point: the seam a surrounding generator calls into.

use il_core::{FbTypeTable, FunctionTable, Routine, VariableScope};

use il_check::TypeQuery;

use crate::error::CodegenError;
use crate::naming::EmitOptions;
use crate::sink::{OutputSink, StringSink};
use crate::walker::Walker;

/// Lowers `routine` into a target-language source text fragment using
/// `StringSink` as the output sink, with `opts` controlling the naming
/// policy.
pub fn compile_routine(
    routine: &Routine,
    scope: &dyn VariableScope,
    functions: &dyn FunctionTable,
    fb_types: &dyn FbTypeTable,
    type_query: &dyn TypeQuery,
    opts: &EmitOptions,
) -> Result<String, CodegenError> {
    let mut sink = StringSink::new();
    compile_routine_into(&mut sink, routine, scope, functions, fb_types, type_query, opts)?;
    Ok(sink.into_string())
}

/// As [`compile_routine`], but writes into a caller-supplied sink instead of
/// allocating its own, for embedding generators that want to append the
/// fragment into a larger buffer.
pub fn compile_routine_into(
    sink: &mut dyn OutputSink,
    routine: &Routine,
    scope: &dyn VariableScope,
    functions: &dyn FunctionTable,
    fb_types: &dyn FbTypeTable,
    type_query: &dyn TypeQuery,
    opts: &EmitOptions,
) -> Result<(), CodegenError> {
    let mut walker = Walker::new(opts, type_query, scope, functions, fb_types);
    walker.compile_routine(sink, routine)
}
