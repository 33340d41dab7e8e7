//! Per-opcode lowering.
//!
//! Each function here takes the pieces of state it needs as explicit
//! arguments and returns the CR's new type, rather than reading and writing
//! shared mutable fields -- the redesign called for wherever the source
//! compiler threaded `current_operand`/`current_operand_type` through
//! visitor state. The CR itself is passed as a [`CrState`] borrow; reading
//! its current value always goes through [`CrState::render_access`] so the
//! union-selector access expression is rendered in exactly one place.

use il_check::TypeQuery;
use il_core::operand::Operand;
use il_core::{Operator, PlcType, SourceSpan, VariableScope};

use crate::cr::CrState;
use crate::error::CodegenError;
use crate::naming::EmitOptions;
use crate::render::render_operand;
use crate::sink::OutputSink;

/// Everything a single operator lowering needs besides the operator itself
/// and its operand.
pub struct EmitCtx<'a> {
    pub sink: &'a mut dyn OutputSink,
    pub opts: &'a EmitOptions,
    pub type_query: &'a dyn TypeQuery,
    pub scope: &'a dyn VariableScope,
}

fn negation_symbol(is_bool: bool) -> &'static str {
    if is_bool {
        "!"
    } else {
        "~"
    }
}

fn require(cond: bool, err: CodegenError) -> Result<(), CodegenError> {
    if cond {
        Ok(())
    } else {
        Err(err)
    }
}

fn require_cr_type(cr: &CrState, op: Operator, span: SourceSpan) -> Result<PlcType, CodegenError> {
    cr.peek_type().cloned().ok_or(CodegenError::UndefinedCr { opcode: op, span })
}

/// Renders `if (<cr as bool>) ` and returns nothing -- used by C/CN guards
/// and by `S`/`R`, which are always implicitly C-guarded.
fn render_guard(ctx: &mut EmitCtx, cr: &CrState, negate: bool, op: Operator, span: SourceSpan) -> Result<(), CodegenError> {
    let cr_type = require_cr_type(cr, op, span)?;
    require(
        matches!(cr_type, PlcType::Bool),
        CodegenError::TypeRuleViolation {
            opcode: op,
            cr_type: Some(cr_type.clone()),
            operand_type: cr_type.clone(),
            span,
        },
    )?;
    let access = cr.render_access(op, span)?;
    let not = if negate { "!" } else { "" };
    ctx.sink.write(&format!("if ({not}{access}) "));
    Ok(())
}

/// `LD op` -- CR := op.
pub fn ld(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    let ty = ctx.type_query.type_of(operand, ctx.scope)?;
    ctx.sink.write(&format!("{}.{} = {};", cr.name(), ty.variant_selector(), render_operand(operand)));
    let _ = span;
    Ok(ty)
}

/// `LDN op` -- CR := logical/bitwise negation of op.
pub fn ldn(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    let ty = ctx.type_query.type_of(operand, ctx.scope)?;
    require(
        ctx.type_query.is_binary(&ty),
        CodegenError::TypeRuleViolation {
            opcode: Operator::Ldn,
            cr_type: None,
            operand_type: ty.clone(),
            span,
        },
    )?;
    let neg = negation_symbol(ctx.type_query.is_bool(&ty));
    ctx.sink.write(&format!(
        "{}.{} = {neg}{};",
        cr.name(),
        ty.variant_selector(),
        render_operand(operand)
    ));
    Ok(ty)
}

/// `ST op` -- op := CR.
pub fn st(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<(), CodegenError> {
    let access = cr.render_access(Operator::St, span)?;
    ctx.sink.write(&format!("{} = {access};", render_operand(operand)));
    Ok(())
}

/// `STN op` -- op := negation of CR.
pub fn stn(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<(), CodegenError> {
    let cr_type = require_cr_type(cr, Operator::Stn, span)?;
    require(
        ctx.type_query.is_binary(&cr_type),
        CodegenError::TypeRuleViolation {
            opcode: Operator::Stn,
            cr_type: Some(cr_type.clone()),
            operand_type: cr_type.clone(),
            span,
        },
    )?;
    let neg = negation_symbol(ctx.type_query.is_bool(&cr_type));
    let access = cr.render_access(Operator::Stn, span)?;
    ctx.sink.write(&format!("{} = {neg}{access};", render_operand(operand)));
    Ok(())
}

/// `NOT` -- CR := negation of CR. No explicit operand.
pub fn not(ctx: &mut EmitCtx, cr: &CrState, span: SourceSpan) -> Result<(), CodegenError> {
    let cr_type = require_cr_type(cr, Operator::Not, span)?;
    require(
        ctx.type_query.is_binary(&cr_type),
        CodegenError::TypeRuleViolation {
            opcode: Operator::Not,
            cr_type: Some(cr_type.clone()),
            operand_type: cr_type.clone(),
            span,
        },
    )?;
    let neg = negation_symbol(ctx.type_query.is_bool(&cr_type));
    let access = cr.render_access(Operator::Not, span)?;
    ctx.sink.write(&format!("{access} = {neg}{access};"));
    Ok(())
}

/// `S op` / `R op` -- conditionally set op to TRUE/FALSE. Always
/// implicitly C-guarded; see DESIGN.md.
pub fn set_reset(
    ctx: &mut EmitCtx,
    cr: &CrState,
    operand: &Operand,
    set_true: bool,
    op: Operator,
    span: SourceSpan,
) -> Result<(), CodegenError> {
    let cr_type = require_cr_type(cr, op, span)?;
    let operand_ty = ctx.type_query.type_of(operand, ctx.scope)?;
    require(
        ctx.type_query.is_binary(&operand_ty),
        CodegenError::TypeRuleViolation {
            opcode: op,
            cr_type: Some(cr_type),
            operand_type: operand_ty,
            span,
        },
    )?;
    render_guard(ctx, cr, false, op, span)?;
    let value = if set_true { "TRUE" } else { "FALSE" };
    ctx.sink.write(&format!("{{ {} = {value}; }}", render_operand(operand)));
    Ok(())
}

enum BitwiseKind {
    And,
    Or,
    Xor,
}

fn bitwise_symbol(kind: &BitwiseKind) -> &'static str {
    match kind {
        BitwiseKind::And => "&",
        BitwiseKind::Or => "|",
        BitwiseKind::Xor => "^",
    }
}

/// `AND`/`OR`/`XOR` and their `N`-negated counterparts.
fn bitwise(
    ctx: &mut EmitCtx,
    cr: &CrState,
    operand: &Operand,
    kind: BitwiseKind,
    negate_operand: bool,
    op: Operator,
    span: SourceSpan,
) -> Result<PlcType, CodegenError> {
    let cr_type = require_cr_type(cr, op, span)?;
    let operand_ty = ctx.type_query.type_of(operand, ctx.scope)?;
    require(
        ctx.type_query.is_binary(&cr_type) && ctx.type_query.same_type(&cr_type, &operand_ty),
        CodegenError::TypeRuleViolation {
            opcode: op,
            cr_type: Some(cr_type.clone()),
            operand_type: operand_ty.clone(),
            span,
        },
    )?;
    let access = cr.render_access(op, span)?;
    let neg = if negate_operand {
        negation_symbol(ctx.type_query.is_bool(&operand_ty))
    } else {
        ""
    };
    ctx.sink.write(&format!(
        "{access} = {access} {} {neg}{};",
        bitwise_symbol(&kind),
        render_operand(operand)
    ));
    Ok(operand_ty)
}

pub fn and(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    bitwise(ctx, cr, operand, BitwiseKind::And, false, Operator::And, span)
}
pub fn or(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    bitwise(ctx, cr, operand, BitwiseKind::Or, false, Operator::Or, span)
}
pub fn xor(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    bitwise(ctx, cr, operand, BitwiseKind::Xor, false, Operator::Xor, span)
}
pub fn andn(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    bitwise(ctx, cr, operand, BitwiseKind::And, true, Operator::Andn, span)
}
pub fn orn(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    bitwise(ctx, cr, operand, BitwiseKind::Or, true, Operator::Orn, span)
}
pub fn xorn(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    bitwise(ctx, cr, operand, BitwiseKind::Xor, true, Operator::Xorn, span)
}

enum ArithKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// `ADD`/`SUB`/`MUL`/`DIV`/`MOD`. TIME arithmetic lowers through the
/// `time_add`/`time_sub`/`time_mul` intrinsics; everything else requires
/// matching numeric operand types.
fn arithmetic(
    ctx: &mut EmitCtx,
    cr: &CrState,
    operand: &Operand,
    kind: ArithKind,
    op: Operator,
    span: SourceSpan,
) -> Result<PlcType, CodegenError> {
    let cr_type = require_cr_type(cr, op, span)?;
    let operand_ty = ctx.type_query.type_of(operand, ctx.scope)?;
    let is_time = ctx.type_query.is_time(&cr_type) || ctx.type_query.is_time(&operand_ty);

    if is_time {
        let intrinsic = match kind {
            ArithKind::Add if ctx.type_query.is_time(&cr_type) && ctx.type_query.is_time(&operand_ty) => {
                Some(ctx.opts.time_add_fn.clone())
            }
            ArithKind::Sub if ctx.type_query.is_time(&cr_type) && ctx.type_query.is_time(&operand_ty) => {
                Some(ctx.opts.time_sub_fn.clone())
            }
            ArithKind::Mul
                if (ctx.type_query.is_time(&cr_type) && ctx.type_query.is_integer(&operand_ty))
                    || (ctx.type_query.is_integer(&cr_type) && ctx.type_query.is_time(&operand_ty)) =>
            {
                Some(ctx.opts.time_mul_fn.clone())
            }
            _ => None,
        };
        let intrinsic = intrinsic.ok_or_else(|| CodegenError::TypeRuleViolation {
            opcode: op,
            cr_type: Some(cr_type.clone()),
            operand_type: operand_ty.clone(),
            span,
        })?;
        let access = cr.render_access(op, span)?;
        ctx.sink.write(&format!("{access} = {intrinsic}({access}, {});", render_operand(operand)));
        return Ok(PlcType::Time);
    }

    require(
        ctx.type_query.is_num(&cr_type) && ctx.type_query.same_type(&cr_type, &operand_ty),
        CodegenError::TypeRuleViolation {
            opcode: op,
            cr_type: Some(cr_type.clone()),
            operand_type: operand_ty.clone(),
            span,
        },
    )?;
    if matches!(kind, ArithKind::Mod) {
        require(
            ctx.type_query.is_integer(&cr_type),
            CodegenError::TypeRuleViolation {
                opcode: op,
                cr_type: Some(cr_type.clone()),
                operand_type: operand_ty.clone(),
                span,
            },
        )?;
    }
    let symbol = match kind {
        ArithKind::Add => "+",
        ArithKind::Sub => "-",
        ArithKind::Mul => "*",
        ArithKind::Div => "/",
        ArithKind::Mod => "%",
    };
    let access = cr.render_access(op, span)?;
    ctx.sink.write(&format!("{access} = {access} {symbol} {};", render_operand(operand)));
    Ok(operand_ty)
}

pub fn add(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    arithmetic(ctx, cr, operand, ArithKind::Add, Operator::Add, span)
}
pub fn sub(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    arithmetic(ctx, cr, operand, ArithKind::Sub, Operator::Sub, span)
}
pub fn mul(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    arithmetic(ctx, cr, operand, ArithKind::Mul, Operator::Mul, span)
}
pub fn div(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    arithmetic(ctx, cr, operand, ArithKind::Div, Operator::Div, span)
}
pub fn modulo(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, span: SourceSpan) -> Result<PlcType, CodegenError> {
    arithmetic(ctx, cr, operand, ArithKind::Mod, Operator::Mod, span)
}

/// Comparison family: renders against the CR type held *before* this
/// instruction overwrites it, because the intrinsic selector depends on
/// operand type rather than the BOOL result type.
pub fn compare(ctx: &mut EmitCtx, cr: &CrState, operand: &Operand, op: Operator, span: SourceSpan) -> Result<PlcType, CodegenError> {
    let cr_type = require_cr_type(cr, op, span)?;
    let operand_ty = ctx.type_query.type_of(operand, ctx.scope)?;
    require(
        ctx.type_query.same_type(&cr_type, &operand_ty),
        CodegenError::TypeRuleViolation {
            opcode: op,
            cr_type: Some(cr_type.clone()),
            operand_type: operand_ty.clone(),
            span,
        },
    )?;
    let old_access = cr.render_access(op, span)?;
    let intrinsic = ctx.opts.cmp_fn(&cr_type.type_name());
    ctx.sink.write(&format!(
        "{}.{} = {intrinsic}(2, {old_access}, {});",
        cr.name(),
        PlcType::Bool.variant_selector(),
        render_operand(operand)
    ));
    Ok(PlcType::Bool)
}

/// `JMP`/`JMPC`/`JMPCN label`.
pub fn jump(ctx: &mut EmitCtx, cr: &CrState, op: Operator, label: &str, span: SourceSpan) -> Result<(), CodegenError> {
    match op {
        Operator::Jmp => {
            ctx.sink.write(&format!("goto {label};"));
            Ok(())
        }
        Operator::Jmpc | Operator::Jmpcn => {
            let cr_type = require_cr_type(cr, op, span)?;
            require(
                ctx.type_query.is_bool(&cr_type),
                CodegenError::TypeRuleViolation {
                    opcode: op,
                    cr_type: Some(cr_type.clone()),
                    operand_type: cr_type.clone(),
                    span,
                },
            )?;
            let negate = matches!(op, Operator::Jmpcn);
            let not = if negate { "!" } else { "" };
            let access = cr.render_access(op, span)?;
            ctx.sink.write(&format!("if ({not}{access}) goto {label};"));
            Ok(())
        }
        _ => unreachable!("jump() called with non-jump opcode"),
    }
}

/// `RET`/`RETC`/`RETCN` -- lowers to `goto <end_label>`.
pub fn ret(ctx: &mut EmitCtx, cr: &CrState, op: Operator, span: SourceSpan) -> Result<(), CodegenError> {
    let end_label = ctx.opts.end_label.clone();
    match op {
        Operator::Ret => {
            ctx.sink.write(&format!("goto {end_label};"));
            Ok(())
        }
        Operator::Retc | Operator::Retcn => {
            let cr_type = require_cr_type(cr, op, span)?;
            require(
                ctx.type_query.is_bool(&cr_type),
                CodegenError::TypeRuleViolation {
                    opcode: op,
                    cr_type: Some(cr_type.clone()),
                    operand_type: cr_type.clone(),
                    span,
                },
            )?;
            let not = if matches!(op, Operator::Retcn) { "!" } else { "" };
            let access = cr.render_access(op, span)?;
            ctx.sink.write(&format!("if ({not}{access}) goto {end_label};"));
            Ok(())
        }
        _ => unreachable!("ret() called with non-return opcode"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::StringSink;
    use il_check::StaticTypeQuery;
    use std::collections::HashMap;

    struct FakeScope(HashMap<String, PlcType>);
    impl VariableScope for FakeScope {
        fn type_of_variable(&self, name: &str) -> Option<PlcType> {
            self.0.get(name).cloned()
        }
        fn fb_instance_type(&self, _name: &str) -> Option<String> {
            None
        }
    }

    fn scope_with(vars: &[(&str, PlcType)]) -> FakeScope {
        FakeScope(vars.iter().map(|(n, t)| (n.to_string(), t.clone())).collect())
    }

    fn cr_with(ty: Option<PlcType>) -> CrState {
        let mut cr = CrState::new("CR");
        if let Some(ty) = ty {
            cr.load(ty);
        }
        cr
    }

    #[test]
    fn ld_emits_cr_assignment_and_returns_type() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("b", PlcType::Int)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(None);
        let ty = ld(&mut ctx, &cr, &Operand::var("b"), SourceSpan::default()).unwrap();
        assert_eq!(ty, PlcType::Int);
        assert_eq!(sink.into_string(), "CR.INTvar = b;");
    }

    #[test]
    fn st_uses_cr_type_selector() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Int));
        st(&mut ctx, &cr, &Operand::var("b"), SourceSpan::default()).unwrap();
        assert_eq!(sink.into_string(), "b = CR.INTvar;");
    }

    #[test]
    fn st_without_prior_load_is_fatal() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(None);
        let err = st(&mut ctx, &cr, &Operand::var("b"), SourceSpan::default());
        assert!(matches!(err, Err(CodegenError::UndefinedCr { .. })));
    }

    #[test]
    fn compare_uses_pre_overwrite_cr_type() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("b", PlcType::Dint)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Dint));
        let ty = compare(&mut ctx, &cr, &Operand::var("b"), Operator::Gt, SourceSpan::default()).unwrap();
        assert_eq!(ty, PlcType::Bool);
        assert_eq!(sink.into_string(), "CR.BOOLvar = cmp_DINT(2, CR.DINTvar, b);");
    }

    #[test]
    fn add_time_time_uses_intrinsic() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("t", PlcType::Time)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Time));
        let ty = add(&mut ctx, &cr, &Operand::var("t"), SourceSpan::default()).unwrap();
        assert_eq!(ty, PlcType::Time);
        assert_eq!(sink.into_string(), "CR.TIMEvar = time_add(CR.TIMEvar, t);");
    }

    #[test]
    fn mul_time_and_int_uses_time_mul() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("n", PlcType::Int)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Time));
        let ty = mul(&mut ctx, &cr, &Operand::var("n"), SourceSpan::default()).unwrap();
        assert_eq!(ty, PlcType::Time);
        assert_eq!(sink.into_string(), "CR.TIMEvar = time_mul(CR.TIMEvar, n);");
    }

    #[test]
    fn mul_time_time_is_rejected() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("t2", PlcType::Time)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Time));
        let err = mul(&mut ctx, &cr, &Operand::var("t2"), SourceSpan::default());
        assert!(matches!(err, Err(CodegenError::TypeRuleViolation { .. })));
    }

    #[test]
    fn s_is_implicitly_guarded() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("flag", PlcType::Bool)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Bool));
        set_reset(&mut ctx, &cr, &Operand::var("flag"), true, Operator::S, SourceSpan::default()).unwrap();
        assert_eq!(sink.into_string(), "if (CR.BOOLvar) { flag = TRUE; }");
    }

    #[test]
    fn not_requires_binary_cr() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Real));
        let err = not(&mut ctx, &cr, SourceSpan::default());
        assert!(matches!(err, Err(CodegenError::TypeRuleViolation { .. })));
    }

    #[test]
    fn ldn_negates_bool_with_bang_and_int_with_tilde() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("flag", PlcType::Bool)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(None);
        ldn(&mut ctx, &cr, &Operand::var("flag"), SourceSpan::default()).unwrap();
        assert_eq!(sink.into_string(), "CR.BOOLvar = !flag;");

        let mut sink2 = StringSink::new();
        let scope2 = scope_with(&[("n", PlcType::Int)]);
        let mut ctx2 = EmitCtx { sink: &mut sink2, opts: &opts, type_query: &tq, scope: &scope2 };
        ldn(&mut ctx2, &cr, &Operand::var("n"), SourceSpan::default()).unwrap();
        assert_eq!(sink2.into_string(), "CR.INTvar = ~n;");
    }

    #[test]
    fn jmpc_guards_on_bool_cr() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Bool));
        jump(&mut ctx, &cr, Operator::Jmpc, "L1", SourceSpan::default()).unwrap();
        assert_eq!(sink.into_string(), "if (CR.BOOLvar) goto L1;");
    }

    #[test]
    fn ret_lowers_to_goto_end() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(None);
        ret(&mut ctx, &cr, Operator::Ret, SourceSpan::default()).unwrap();
        assert_eq!(sink.into_string(), "goto end;");
    }

    #[test]
    fn mod_requires_integer() {
        let mut sink = StringSink::new();
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = scope_with(&[("r", PlcType::Real)]);
        let mut ctx = EmitCtx { sink: &mut sink, opts: &opts, type_query: &tq, scope: &scope };
        let cr = cr_with(Some(PlcType::Real));
        let err = modulo(&mut ctx, &cr, &Operand::var("r"), SourceSpan::default());
        assert!(matches!(err, Err(CodegenError::TypeRuleViolation { .. })));
    }
}
