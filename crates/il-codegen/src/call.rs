//! Function and function-block call lowering.
//!
//! Argument resolution is split into a pure pre-pass (this module's
//! `resolve_*_args` functions, producing [`ArgSource`] values) followed by a
//! rendering pass, so the positional-cursor/name-lookup bookkeeping never
//! interleaves with text emission.

use il_check::{StandardFunctionSignature, TypeQuery};
use il_core::scope::{FbTypeDecl, FunctionDecl, ParamDirection};
use il_core::{CallArg, FbTypeTable, FunctionTable, Operand, PlcType, SourceSpan, VariableScope};

use crate::error::CodegenError;
use crate::naming::EmitOptions;
use crate::render::render_operand;
use crate::sink::OutputSink;
use crate::temp::TempNameFactory;

/// The resolved, concrete source of a single call argument's value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgSource {
    /// The current CR value, implicitly supplied as a user function's
    /// first argument.
    CrValue,
    /// A value the caller supplied at the call site.
    Caller(Operand),
    /// The formal parameter's declared default.
    Default(Operand),
    /// No caller value and no declared default: the parameter's PLC type's
    /// canonical zero-like value.
    TypeDefault(PlcType),
    /// A freshly allocated temporary, for an OUT/INOUT parameter the caller
    /// did not bind to anything.
    FreshTemp(String),
    /// The caller supplied no value for this FB parameter, and FB calls
    /// (unlike function calls) do not materialise temporaries for unbound
    /// parameters -- no assignment should be rendered for this one at all.
    Omitted,
}

fn find_caller_value(args: &[CallArg], name: &str, positional_cursor: &mut usize, args_consumed: &mut Vec<bool>) -> Option<Operand> {
    for (i, arg) in args.iter().enumerate() {
        if args_consumed[i] {
            continue;
        }
        if let CallArg::Named { name: n, value } = arg {
            if n == name {
                args_consumed[i] = true;
                return Some(value.clone());
            }
        }
    }
    while *positional_cursor < args.len() {
        let idx = *positional_cursor;
        *positional_cursor += 1;
        if args_consumed[idx] {
            continue;
        }
        if let CallArg::Positional(value) = &args[idx] {
            args_consumed[idx] = true;
            return Some(value.clone());
        }
    }
    None
}

/// Resolves a user function call's arguments against its declaration. The
/// declaration's first formal parameter always receives the current CR
/// value implicitly; the remaining formals are resolved positionally or by
/// name against `args`.
pub fn resolve_function_args(
    func: &FunctionDecl,
    args: &[CallArg],
    temp: &mut TempNameFactory,
    span: SourceSpan,
) -> Result<Vec<(String, ArgSource)>, CodegenError> {
    let mut positional_cursor = 0usize;
    let mut consumed = vec![false; args.len()];
    let mut out = Vec::with_capacity(func.params.len());

    for (idx, (name, pdecl)) in func.params.iter().enumerate() {
        if idx == 0 {
            out.push((name.clone(), ArgSource::CrValue));
            continue;
        }
        if pdecl.direction == ParamDirection::ExtRef {
            return Err(CodegenError::UnsupportedExtRef {
                callee: func.name.clone(),
                param: name.clone(),
                span,
            });
        }
        let caller_value = find_caller_value(args, name, &mut positional_cursor, &mut consumed);
        let source = match pdecl.direction {
            ParamDirection::In => match caller_value {
                Some(v) => ArgSource::Caller(v),
                None => match &pdecl.default {
                    Some(d) => ArgSource::Default(d.clone()),
                    None => ArgSource::TypeDefault(pdecl.ty.clone()),
                },
            },
            ParamDirection::Out | ParamDirection::InOut => match caller_value {
                Some(v) => ArgSource::Caller(v),
                None => ArgSource::FreshTemp(temp.fresh()),
            },
            ParamDirection::ExtRef => unreachable!("handled above"),
        };
        out.push((name.clone(), source));
    }
    Ok(out)
}

/// Resolves a standard-function call's arguments against the table-derived
/// signature. Standard functions take only IN parameters, so unlike
/// [`resolve_function_args`] there is no default/EXTREF handling: a missing
/// argument simply falls back to its own declared type's canonical
/// default, not the call's return type.
fn resolve_standard_args(sig: &StandardFunctionSignature, args: &[CallArg]) -> Vec<ArgSource> {
    let mut positional_cursor = 0usize;
    let mut consumed = vec![false; args.len()];
    let mut out = Vec::with_capacity(sig.params.len());

    for (idx, (name, ty)) in sig.params.iter().enumerate() {
        if idx == 0 {
            out.push(ArgSource::CrValue);
            continue;
        }
        let caller_value = find_caller_value(args, name, &mut positional_cursor, &mut consumed);
        out.push(match caller_value {
            Some(v) => ArgSource::Caller(v),
            None => ArgSource::TypeDefault(ty.clone()),
        });
    }
    out
}

fn render_arg(source: &ArgSource, cr_name: &str, cr_type: Option<&PlcType>) -> String {
    match source {
        ArgSource::CrValue => {
            let ty = cr_type.expect("CrValue arg requires a defined CR type");
            format!("{cr_name}.{}", ty.variant_selector())
        }
        ArgSource::Caller(op) => render_operand(op),
        ArgSource::Default(op) => render_operand(op),
        ArgSource::TypeDefault(ty) => ty.canonical_default().to_string(),
        ArgSource::FreshTemp(name) => name.clone(),
        ArgSource::Omitted => String::new(),
    }
}

/// Renders `CR.<returnType> = fname(arg0, arg1, ...);` and returns the
/// function's declared return type, which becomes the CR's new type.
///
/// `name` is looked up in `functions` first; a name absent from the user
/// function table falls back to `type_query`'s standard function table
/// before this is treated as a fatal resolution failure.
pub fn lower_function_call(
    sink: &mut dyn OutputSink,
    functions: &dyn FunctionTable,
    type_query: &dyn TypeQuery,
    name: &str,
    args: &[CallArg],
    cr_name: &str,
    cr_type: Option<&PlcType>,
    temp: &mut TempNameFactory,
    span: SourceSpan,
) -> Result<PlcType, CodegenError> {
    if let Some(func) = functions.find(name) {
        let resolved = resolve_function_args(func, args, temp, span)?;
        let rendered_args: Vec<String> = resolved
            .iter()
            .map(|(_, source)| render_arg(source, cr_name, cr_type))
            .collect();
        sink.write(&format!(
            "{cr_name}.{} = {}({});",
            func.return_type.variant_selector(),
            func.name,
            rendered_args.join(", ")
        ));
        return Ok(func.return_type.clone());
    }

    let first_arg_type = cr_type
        .cloned()
        .ok_or_else(|| CodegenError::UndefinedCr { opcode: il_core::Operator::Cal, span })?;
    let sig = type_query
        .standard_function(name, &first_arg_type)
        .ok_or_else(|| CodegenError::UnknownFunction { name: name.to_string(), span })?;
    let resolved = resolve_standard_args(&sig, args);
    let rendered_args: Vec<String> = resolved.iter().map(|source| render_arg(source, cr_name, cr_type)).collect();
    sink.write(&format!(
        "{cr_name}.{} = {}({});",
        sig.return_type.variant_selector(),
        name,
        rendered_args.join(", ")
    ));
    Ok(sig.return_type)
}

/// Resolves a function-block call's arguments. Unlike a function call, FB
/// calls never materialise a temporary for a missing OUT/INOUT parameter --
/// parameters the caller did not bind simply produce no assignment.
pub fn resolve_fb_args(fb_type: &FbTypeDecl, args: &[CallArg]) -> Vec<(String, ParamDirection, ArgSource)> {
    let mut positional_cursor = 0usize;
    let mut consumed = vec![false; args.len()];
    let mut out = Vec::with_capacity(fb_type.params.len());

    for (name, pdecl) in fb_type.params.iter() {
        let caller_value = find_caller_value(args, name, &mut positional_cursor, &mut consumed);
        let source = match caller_value {
            Some(v) => ArgSource::Caller(v),
            None => ArgSource::Omitted,
        };
        out.push((name.clone(), pdecl.direction, source));
    }
    out
}

/// Renders the full braced FB-call block: pre-call IN/INOUT assignments in
/// declaration order, the step-function call by reference, then post-call
/// OUT/INOUT assignments in declaration order. CR type is unaffected.
pub fn lower_fb_call(
    sink: &mut dyn OutputSink,
    opts: &EmitOptions,
    fb_types: &dyn FbTypeTable,
    scope: &dyn VariableScope,
    instance: &str,
    args: &[CallArg],
    span: SourceSpan,
) -> Result<(), CodegenError> {
    let type_name = scope
        .fb_instance_type(instance)
        .ok_or_else(|| CodegenError::UnknownFbInstance { name: instance.to_string(), span })?;
    let fb_type = fb_types
        .find(&type_name)
        .ok_or_else(|| CodegenError::UnknownFbType { name: type_name.clone(), span })?;
    let resolved = resolve_fb_args(fb_type, args);

    sink.write("{");
    sink.indent_right();
    for (name, direction, source) in &resolved {
        if matches!(direction, ParamDirection::ExtRef) {
            return Err(CodegenError::UnsupportedExtRef {
                callee: type_name.clone(),
                param: name.clone(),
                span,
            });
        }
        if matches!(direction, ParamDirection::In | ParamDirection::InOut) {
            if let ArgSource::Caller(value) = source {
                sink.newline();
                sink.write(&format!("{instance}.{name} = {};", render_operand(value)));
            }
        }
    }
    sink.newline();
    sink.write(&format!("{}(&{instance});", opts.fb_step_fn(&fb_type.name)));
    for (name, direction, source) in &resolved {
        if matches!(direction, ParamDirection::Out | ParamDirection::InOut) {
            if let ArgSource::Caller(value) = source {
                sink.newline();
                sink.write(&format!("{} = {instance}.{name};", render_operand(value)));
            }
        }
    }
    sink.indent_left();
    sink.newline();
    sink.write("}");
    Ok(())
}
