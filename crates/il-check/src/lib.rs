//! The type query facade consulted during IL lowering.
//!
//! `il-codegen` never inspects a `PlcType` directly to decide what kind of
//! operand it is; it asks this crate's pure classification functions, and
//! resolves operand types and standard-function return types through
//! [`query::TypeQuery`]. Keeping these as free functions over `PlcType`
//! values (no side effects, no I/O) mirrors the coercion-rules module they
//! are grounded on.

pub mod coercion;
pub mod error;
pub mod query;
pub mod standard;

pub use coercion::{is_binary, is_bool, is_integer, is_num, is_time, same_type};
pub use error::CheckError;
pub use query::{StaticTypeQuery, TypeQuery};
pub use standard::{BuiltinStandardFunctions, StandardFunctionSignature, StandardFunctionTable};
