//! Emitter naming policy.
//!
//! Every identifier the emitted fragment references but does not itself
//! define (the CR union type, the CR and backup-CR variables, the end
//! label, the FB step-function suffix) is a field here rather than a
//! hardcoded literal, so an embedding generator can rename them to match
//! its own prelude without this crate needing to change.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// The CR union type name, e.g. `IL_DEFVAR_T`.
    pub cr_type_name: String,
    /// The primary CR variable name, e.g. `IL_DEFVAR`.
    pub cr_var_name: String,
    /// The backup CR variable name, e.g. `IL_DEFVAR_BACK`.
    pub cr_backup_name: String,
    /// The routine's end label, e.g. `end`.
    pub end_label: String,
    /// The suffix appended to an FB type name to name its step function,
    /// e.g. `_body`.
    pub fb_step_suffix: String,
    /// Intrinsic name for TIME + TIME.
    pub time_add_fn: String,
    /// Intrinsic name for TIME - TIME.
    pub time_sub_fn: String,
    /// Intrinsic name for TIME * INT (either operand order).
    pub time_mul_fn: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            cr_type_name: "IL_DEFVAR_T".to_string(),
            cr_var_name: "IL_DEFVAR".to_string(),
            cr_backup_name: "IL_DEFVAR_BACK".to_string(),
            end_label: "end".to_string(),
            fb_step_suffix: "_body".to_string(),
            time_add_fn: "time_add".to_string(),
            time_sub_fn: "time_sub".to_string(),
            time_mul_fn: "time_mul".to_string(),
        }
    }
}

impl EmitOptions {
    /// The name of a comparison intrinsic for `ty`: `cmp_<Type>`.
    pub fn cmp_fn(&self, ty_name: &str) -> String {
        format!("cmp_{ty_name}")
    }

    /// The FB step-function name for `fb_type_name`.
    pub fn fb_step_fn(&self, fb_type_name: &str) -> String {
        format!("{fb_type_name}{}", self.fb_step_suffix)
    }
}
