//! Pure classification predicates over [`PlcType`].
//!
//! IL's operator table requires exact type matches, not widening
//! coercion, so unlike a general-purpose language frontend this module
//! does not offer a `can_coerce`; it only classifies.

use il_core::PlcType;

/// `true` if `t` is `BOOL`.
pub fn is_bool(t: &PlcType) -> bool {
    matches!(t, PlcType::Bool)
}

/// `true` if `t` supports bitwise/logical operators (`AND`/`OR`/`XOR`/`NOT`):
/// `BOOL` or any fixed-width integer.
pub fn is_binary(t: &PlcType) -> bool {
    is_bool(t) || is_integer(t)
}

/// `true` if `t` is one of the fixed-width signed or unsigned integer types.
pub fn is_integer(t: &PlcType) -> bool {
    matches!(
        t,
        PlcType::Sint
            | PlcType::Int
            | PlcType::Dint
            | PlcType::Lint
            | PlcType::Usint
            | PlcType::Uint
            | PlcType::Udint
            | PlcType::Ulint
    )
}

/// `true` if `t` is any type arithmetic operators accept: integer or
/// floating-point.
pub fn is_num(t: &PlcType) -> bool {
    is_integer(t) || matches!(t, PlcType::Real | PlcType::Lreal)
}

/// `true` if `t` is `TIME`.
pub fn is_time(t: &PlcType) -> bool {
    matches!(t, PlcType::Time)
}

/// Structural type equality, the sense in which IL requires "same type" for
/// binary operators and comparisons.
pub fn same_type(a: &PlcType, b: &PlcType) -> bool {
    a == b
}
