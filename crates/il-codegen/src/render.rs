//! Plain text rendering of operands. No type information is consulted
//! here -- only the literal/variable/direct shape of the operand.

use il_core::operand::PathSegment;
use il_core::{ConstValue, Operand};

pub fn render_operand(operand: &Operand) -> String {
    match operand {
        Operand::Constant { value, .. } => render_const(value),
        Operand::Variable { name, path } => {
            let mut s = name.clone();
            for seg in path {
                match seg {
                    PathSegment::Field(f) => {
                        s.push('.');
                        s.push_str(f);
                    }
                    PathSegment::Index(i) => {
                        s.push('[');
                        s.push_str(i);
                        s.push(']');
                    }
                }
            }
            s
        }
        // Directly represented hardware variables (`%IX0.0`) are rendered
        // as a dereference of the externally-declared pointer for that
        // memory location, dropping the leading `%` marker.
        Operand::Direct { raw } => format!("*({})", raw.trim_start_matches('%')),
    }
}

fn render_const(value: &ConstValue) -> String {
    match value {
        ConstValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        ConstValue::Int(i) => i.to_string(),
        ConstValue::Real(f) => format!("{f}"),
        ConstValue::Time(millis) => format!("T#{millis}ms"),
        ConstValue::Str(s) => format!("'{s}'"),
    }
}
