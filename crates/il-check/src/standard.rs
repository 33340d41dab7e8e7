//! Resolution of IEC 61131-3 standard function calls.
//!
//! When a call site names a function absent from the user [`il_core::FunctionTable`],
//! the walker asks this service for its return type and formal parameter
//! names rather than inventing either locally -- standard-function
//! signatures are a property of the standard library the surrounding
//! generator links against, not something this crate should guess at.

use il_core::PlcType;

/// A resolved standard-function signature: each parameter's name and type
/// in declaration order (so positional lowering can still be rendered as
/// formal assignments, and a missing argument can fall back to its own
/// type's default rather than the call's return type), plus the return
/// type given the call's first-argument type.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardFunctionSignature {
    pub params: Vec<(String, PlcType)>,
    pub return_type: PlcType,
}

/// Looks up standard function signatures by name.
pub trait StandardFunctionTable {
    /// Resolves `name` given the type of the call's first argument (IL
    /// standard functions overload on their first-argument type, e.g.
    /// `ABS` on `INT` returns `INT`, `ABS` on `REAL` returns `REAL`).
    fn resolve(&self, name: &str, first_arg_type: &PlcType) -> Option<StandardFunctionSignature>;
}

/// A minimal, fixed table of the most common IEC 61131-3 standard
/// functions, used as the default [`StandardFunctionTable`] when the
/// embedding generator does not supply a fuller one of its own.
#[derive(Debug, Default)]
pub struct BuiltinStandardFunctions;

impl StandardFunctionTable for BuiltinStandardFunctions {
    fn resolve(&self, name: &str, first_arg_type: &PlcType) -> Option<StandardFunctionSignature> {
        let params = vec![("IN".to_string(), first_arg_type.clone())];

        match name {
            "ABS" | "TRUNC" | "SQRT" | "LN" | "LOG" | "EXP" | "SIN" | "COS" | "TAN" | "ASIN"
            | "ACOS" | "ATAN" => Some(StandardFunctionSignature {
                params,
                return_type: first_arg_type.clone(),
            }),
            "LEN" => Some(StandardFunctionSignature {
                params,
                return_type: PlcType::Dint,
            }),
            _ => None,
        }
    }
}
