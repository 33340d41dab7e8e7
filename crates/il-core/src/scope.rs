//! Declaration symbol tables and scope lookup, consumed as trait objects.
//!
//! The lexer, parser, and the symbol tables that back these traits live
//! outside this crate. `il-codegen` is handed `&dyn VariableScope`,
//! `&dyn FunctionTable` and `&dyn FbTypeTable` and never constructs its own
//! symbol tables, matching the out-of-scope boundary around declaration
//! resolution.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::operand::Operand;
use crate::types::PlcType;

/// How a formal parameter passes data across a call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamDirection {
    In,
    Out,
    InOut,
    /// External reference. Recognised by the grammar but not supported by
    /// this lowering stage; resolving a call with an `ExtRef` parameter is
    /// a fatal error.
    ExtRef,
}

/// One formal parameter of a function or function-block type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: PlcType,
    pub direction: ParamDirection,
    /// Declared default value for `In` parameters, if any.
    pub default: Option<Operand>,
}

/// A user function declaration.
///
/// Parameters are stored in an [`IndexMap`] to preserve declaration order,
/// which call lowering depends on for positional argument matching and for
/// emitting fresh temporaries in a deterministic, declaration-matching
/// sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: IndexMap<String, ParamDecl>,
    pub return_type: PlcType,
}

impl FunctionDecl {
    pub fn param_in_order(&self, index: usize) -> Option<&ParamDecl> {
        self.params.get_index(index).map(|(_, p)| p)
    }
}

/// A function-block type declaration (the "class"; instances are looked up
/// separately through [`VariableScope::fb_instance_type`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FbTypeDecl {
    pub name: String,
    pub params: IndexMap<String, ParamDecl>,
}

/// Metadata about a declared function-block instance variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FbInstanceDecl {
    pub instance_name: String,
    pub type_name: String,
}

/// Read-only lookup of variables and FB instances in the enclosing scope of
/// the routine currently being lowered.
pub trait VariableScope {
    /// Resolves the `PlcType` of a variable by name (ignoring any
    /// field/index path; path resolution against structured/array element
    /// types is delegated to the type query facade in `il-check`).
    fn type_of_variable(&self, name: &str) -> Option<PlcType>;

    /// Resolves the declared FB type name for a variable declared as an FB
    /// instance, if `name` is such an instance.
    fn fb_instance_type(&self, name: &str) -> Option<String>;
}

/// Read-only lookup of user function declarations.
pub trait FunctionTable {
    fn find(&self, name: &str) -> Option<&FunctionDecl>;
}

/// Read-only lookup of function-block type declarations.
pub trait FbTypeTable {
    fn find(&self, name: &str) -> Option<&FbTypeDecl>;
}
