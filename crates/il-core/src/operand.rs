//! IL operands: constants and variable references.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::PlcType;

/// A literal value attached to its PLC type.
///
/// `Real`/`Lreal` constants are stored as `f64` internally regardless of
/// declared width, mirroring the teacher's `ConstValue` convention of
/// widening float storage to dodge `NaN`/`Eq` surprises from mixed-width
/// float literals; the declared `PlcType` on the owning [`Operand::Constant`]
/// is authoritative for emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Time(i64),
    Str(String),
}

/// One segment of a variable access path: a struct field name or an array
/// index expression rendered verbatim (index expressions are themselves
/// IL/ST source text produced upstream; this crate does not interpret them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSegment {
    Field(String),
    Index(String),
}

/// A possibly-qualified variable reference: a base name plus zero or more
/// field/index accessors, e.g. `rec.items[i].value`.
pub type VariablePath = SmallVec<[PathSegment; 4]>;

/// An IL operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// A literal value with its PLC type attached.
    Constant { value: ConstValue, ty: PlcType },
    /// A reference to a declared variable, optionally with a field/index
    /// access path.
    Variable { name: String, path: VariablePath },
    /// A directly represented hardware variable (e.g. `%IX0.0`, `%QW12`),
    /// rendered by the surrounding generator as a pointer dereference.
    Direct { raw: String },
}

impl Operand {
    /// Constructs a bare variable reference with no access path.
    pub fn var(name: impl Into<String>) -> Self {
        Operand::Variable {
            name: name.into(),
            path: SmallVec::new(),
        }
    }

    /// The base name this operand is rooted at, for diagnostics.
    pub fn root_name(&self) -> &str {
        match self {
            Operand::Constant { .. } => "<constant>",
            Operand::Variable { name, .. } => name,
            Operand::Direct { raw } => raw,
        }
    }
}
