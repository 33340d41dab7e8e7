//! The current-result (CR) register model.
//!
//! `CrState` tracks the emitted name of a CR storage slot and the `PlcType`
//! it currently holds, if any. It never itself writes to the sink except
//! through [`CrState::render_access`], which renders the union-selector
//! access expression for the type the CR currently holds.

use il_core::{Operator, PlcType, SourceSpan};

use crate::error::CodegenError;

#[derive(Debug, Clone)]
pub struct CrState {
    name: String,
    current_type: Option<PlcType>,
}

impl CrState {
    pub fn new(name: impl Into<String>) -> Self {
        CrState {
            name: name.into(),
            current_type: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clears the tracked type, as happens at the start of a fresh scope.
    pub fn reset(&mut self) {
        self.current_type = None;
    }

    /// Establishes the CR's type as if a value of `ty` had just been loaded.
    pub fn load(&mut self, ty: PlcType) {
        self.current_type = Some(ty);
    }

    pub fn peek_type(&self) -> Option<&PlcType> {
        self.current_type.as_ref()
    }

    pub fn set_type(&mut self, ty: PlcType) {
        self.current_type = Some(ty);
    }

    /// Renders `<cr_name>.<variant_selector(t)>`. Calling this while the CR
    /// type is undefined is a programming error -- it means an instruction
    /// tried to read the CR before any `LD` established a value -- and is
    /// reported as a [`CodegenError::UndefinedCr`] rather than panicking, so
    /// a caller embedding this inside a larger compilation unit can abort
    /// that unit cleanly.
    pub fn render_access(&self, opcode: Operator, span: SourceSpan) -> Result<String, CodegenError> {
        match &self.current_type {
            Some(ty) => Ok(format!("{}.{}", self.name, ty.variant_selector())),
            None => Err(CodegenError::UndefinedCr { opcode, span }),
        }
    }
}
