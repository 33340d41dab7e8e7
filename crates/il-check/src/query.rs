//! The `TypeQuery` facade: the single seam through which `il-codegen`
//! resolves operand types and standard-function return types.

use il_core::{Operand, PlcType, VariableScope};

use crate::error::CheckError;
use crate::standard::{BuiltinStandardFunctions, StandardFunctionSignature, StandardFunctionTable};

/// Everything the walker needs to know about types, without ever emitting
/// text or mutating anything.
pub trait TypeQuery {
    /// Resolves an operand's `PlcType`, trying constant-type lookup first
    /// and falling back to variable lookup against `scope` -- mirroring the
    /// two-step resolution an IL operand undergoes in the original
    /// compiler: a literal already carries its type, a variable reference
    /// must be looked up.
    fn type_of(&self, operand: &Operand, scope: &dyn VariableScope) -> Result<PlcType, CheckError>;

    fn is_bool(&self, t: &PlcType) -> bool {
        crate::coercion::is_bool(t)
    }
    fn is_binary(&self, t: &PlcType) -> bool {
        crate::coercion::is_binary(t)
    }
    fn is_integer(&self, t: &PlcType) -> bool {
        crate::coercion::is_integer(t)
    }
    fn is_num(&self, t: &PlcType) -> bool {
        crate::coercion::is_num(t)
    }
    fn is_time(&self, t: &PlcType) -> bool {
        crate::coercion::is_time(t)
    }
    fn same_type(&self, a: &PlcType, b: &PlcType) -> bool {
        crate::coercion::same_type(a, b)
    }

    /// Resolves the return type (and, incidentally, the declared parameter
    /// names) of a standard-library function call, given the CR type that
    /// will be passed as its first argument. Returns `None` when `name` is
    /// not a recognised standard function (the caller should then treat it
    /// as an unresolved user function, which is a fatal resolution error).
    fn standard_function(
        &self,
        name: &str,
        first_arg_type: &PlcType,
    ) -> Option<StandardFunctionSignature>;
}

/// The reference [`TypeQuery`] implementation: resolves variables through a
/// supplied [`VariableScope`] and standard functions through a supplied
/// [`StandardFunctionTable`].
pub struct StaticTypeQuery<S: StandardFunctionTable = BuiltinStandardFunctions> {
    standard_functions: S,
}

impl StaticTypeQuery<BuiltinStandardFunctions> {
    pub fn new() -> Self {
        StaticTypeQuery {
            standard_functions: BuiltinStandardFunctions,
        }
    }
}

impl Default for StaticTypeQuery<BuiltinStandardFunctions> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StandardFunctionTable> StaticTypeQuery<S> {
    pub fn with_standard_functions(standard_functions: S) -> Self {
        StaticTypeQuery { standard_functions }
    }
}

impl<S: StandardFunctionTable> TypeQuery for StaticTypeQuery<S> {
    fn type_of(&self, operand: &Operand, scope: &dyn VariableScope) -> Result<PlcType, CheckError> {
        match operand {
            Operand::Constant { ty, .. } => Ok(ty.clone()),
            Operand::Variable { name, .. } => scope
                .type_of_variable(name)
                .ok_or_else(|| CheckError::UnresolvedVariable { name: name.clone() }),
            Operand::Direct { raw } => scope
                .type_of_variable(raw)
                .ok_or_else(|| CheckError::UnresolvedDirect { raw: raw.clone() }),
        }
    }

    fn standard_function(
        &self,
        name: &str,
        first_arg_type: &PlcType,
    ) -> Option<StandardFunctionSignature> {
        self.standard_functions.resolve(name, first_arg_type)
    }
}
