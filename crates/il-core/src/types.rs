//! The PLC type algebra.
//!
//! `PlcType` mirrors the scalar and composite types defined by IEC 61131-3.
//! Composite types (enum, derived alias, structured, array) are carried
//! opaquely by name: this crate does not resolve or validate their layout,
//! that is the declaration symbol table's job, consulted through
//! [`crate::scope::VariableScope`].

use serde::{Deserialize, Serialize};

/// A PLC scalar or composite type.
///
/// Equality is structural on the variant, matching the exact-type-match
/// semantics IL's operator table requires (§4.2 of the lowering design: IL
/// arithmetic and comparison operators require operand types to match
/// exactly, with no implicit widening).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlcType {
    Bool,
    Sint,
    Int,
    Dint,
    Lint,
    Usint,
    Uint,
    Udint,
    Ulint,
    Real,
    Lreal,
    Time,
    String,
    WString,
    /// An enumerated type, carried by its declared name.
    Enum(String),
    /// A type alias/derived type, carried by its declared name.
    Derived(String),
    /// A structured (record) type, carried by its declared name.
    Structured(String),
    /// An array type: element type plus declared bounds length.
    Array {
        element: Box<PlcType>,
        length: u32,
    },
}

impl PlcType {
    /// The canonical zero/default value's type-tag name, used to select the
    /// union member when no literal is available (e.g. a missing IN
    /// argument with no declared default).
    pub fn variant_selector(&self) -> String {
        match self {
            PlcType::Bool => "BOOLvar".to_string(),
            PlcType::Sint => "SINTvar".to_string(),
            PlcType::Int => "INTvar".to_string(),
            PlcType::Dint => "DINTvar".to_string(),
            PlcType::Lint => "LINTvar".to_string(),
            PlcType::Usint => "USINTvar".to_string(),
            PlcType::Uint => "UINTvar".to_string(),
            PlcType::Udint => "UDINTvar".to_string(),
            PlcType::Ulint => "ULINTvar".to_string(),
            PlcType::Real => "REALvar".to_string(),
            PlcType::Lreal => "LREALvar".to_string(),
            PlcType::Time => "TIMEvar".to_string(),
            PlcType::String => "STRINGvar".to_string(),
            PlcType::WString => "WSTRINGvar".to_string(),
            PlcType::Enum(name) => format!("{name}var"),
            PlcType::Derived(name) => format!("{name}var"),
            PlcType::Structured(name) => format!("{name}var"),
            PlcType::Array { element, .. } => element.variant_selector(),
        }
    }

    /// The declared-type name as it would appear in source (used to render
    /// canonical type defaults and standard-function signatures).
    pub fn type_name(&self) -> String {
        match self {
            PlcType::Bool => "BOOL".to_string(),
            PlcType::Sint => "SINT".to_string(),
            PlcType::Int => "INT".to_string(),
            PlcType::Dint => "DINT".to_string(),
            PlcType::Lint => "LINT".to_string(),
            PlcType::Usint => "USINT".to_string(),
            PlcType::Uint => "UINT".to_string(),
            PlcType::Udint => "UDINT".to_string(),
            PlcType::Ulint => "ULINT".to_string(),
            PlcType::Real => "REAL".to_string(),
            PlcType::Lreal => "LREAL".to_string(),
            PlcType::Time => "TIME".to_string(),
            PlcType::String => "STRING".to_string(),
            PlcType::WString => "WSTRING".to_string(),
            PlcType::Enum(name) | PlcType::Derived(name) | PlcType::Structured(name) => {
                name.clone()
            }
            PlcType::Array { element, length } => {
                format!("ARRAY[0..{}] OF {}", length.saturating_sub(1), element.type_name())
            }
        }
    }

    /// The canonical zero-like default used when a function's IN parameter
    /// has no caller-supplied value and no declared default.
    pub fn canonical_default(&self) -> &'static str {
        match self {
            PlcType::Bool => "FALSE",
            PlcType::Real | PlcType::Lreal => "0.0",
            PlcType::Time => "T#0s",
            PlcType::String | PlcType::WString => "''",
            _ => "0",
        }
    }
}
