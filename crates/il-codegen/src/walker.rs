//! The instruction walker: drives emission over a routine's IL list.
//!
//! The current result is carried as a [`CrState`] rather than shared
//! visitor state: `compile_routine` owns the outer one, and a
//! parenthesised expression's inner scope gets its own, both living on the
//! Rust call stack for exactly the duration of their list.

use il_core::{
    FbTypeTable, FunctionTable, Instruction, InstructionKind, Operand, Operator, PlcType, Routine,
    SourceSpan, VariableScope,
};

use il_check::TypeQuery;

use crate::call;
use crate::cr::CrState;
use crate::error::CodegenError;
use crate::naming::EmitOptions;
use crate::operator::{self, EmitCtx};
use crate::sink::OutputSink;
use crate::temp::TempNameFactory;

/// A [`VariableScope`] decorator that answers a single synthetic name (the
/// backup CR) with a caller-supplied type and otherwise delegates, so the
/// deferred operator in a parenthesised expression can be resolved through
/// the ordinary `TypeQuery::type_of` path instead of a special case in
/// every operator function.
struct BackupScope<'a> {
    inner: &'a dyn VariableScope,
    backup_name: &'a str,
    backup_type: PlcType,
}

impl VariableScope for BackupScope<'_> {
    fn type_of_variable(&self, name: &str) -> Option<PlcType> {
        if name == self.backup_name {
            Some(self.backup_type.clone())
        } else {
            self.inner.type_of_variable(name)
        }
    }

    fn fb_instance_type(&self, name: &str) -> Option<String> {
        self.inner.fb_instance_type(name)
    }
}

/// Dispatches one value-producing operator (everything except jumps,
/// returns, and calls, which have their own instruction shapes) and
/// returns the CR's type after the operator runs.
fn dispatch(
    ctx: &mut EmitCtx,
    cr: &CrState,
    op: Operator,
    operand: Option<&Operand>,
    span: SourceSpan,
) -> Result<Option<PlcType>, CodegenError> {
    use Operator::*;

    let need_operand = |name: &'static str| -> Result<&Operand, CodegenError> {
        operand.ok_or(CodegenError::MissingOperand { opcode: op, operand: name, span })
    };

    match op {
        Ld => Ok(Some(operator::ld(ctx, cr, need_operand("LD operand")?, span)?)),
        Ldn => Ok(Some(operator::ldn(ctx, cr, need_operand("LDN operand")?, span)?)),
        St => {
            operator::st(ctx, cr, need_operand("ST operand")?, span)?;
            Ok(cr.peek_type().cloned())
        }
        Stn => {
            operator::stn(ctx, cr, need_operand("STN operand")?, span)?;
            Ok(cr.peek_type().cloned())
        }
        Not => {
            operator::not(ctx, cr, span)?;
            Ok(cr.peek_type().cloned())
        }
        S => {
            operator::set_reset(ctx, cr, need_operand("S operand")?, true, op, span)?;
            Ok(cr.peek_type().cloned())
        }
        R => {
            operator::set_reset(ctx, cr, need_operand("R operand")?, false, op, span)?;
            Ok(cr.peek_type().cloned())
        }
        And => Ok(Some(operator::and(ctx, cr, need_operand("AND operand")?, span)?)),
        Or => Ok(Some(operator::or(ctx, cr, need_operand("OR operand")?, span)?)),
        Xor => Ok(Some(operator::xor(ctx, cr, need_operand("XOR operand")?, span)?)),
        Andn => Ok(Some(operator::andn(ctx, cr, need_operand("ANDN operand")?, span)?)),
        Orn => Ok(Some(operator::orn(ctx, cr, need_operand("ORN operand")?, span)?)),
        Xorn => Ok(Some(operator::xorn(ctx, cr, need_operand("XORN operand")?, span)?)),
        Add => Ok(Some(operator::add(ctx, cr, need_operand("ADD operand")?, span)?)),
        Sub => Ok(Some(operator::sub(ctx, cr, need_operand("SUB operand")?, span)?)),
        Mul => Ok(Some(operator::mul(ctx, cr, need_operand("MUL operand")?, span)?)),
        Div => Ok(Some(operator::div(ctx, cr, need_operand("DIV operand")?, span)?)),
        Mod => Ok(Some(operator::modulo(ctx, cr, need_operand("MOD operand")?, span)?)),
        Gt | Ge | Eq | Le | Lt | Ne => {
            Ok(Some(operator::compare(ctx, cr, need_operand("comparison operand")?, op, span)?))
        }
        Jmp | Jmpc | Jmpcn | Ret | Retc | Retcn | Cal | Calc | Calcn => {
            Err(CodegenError::MalformedInstruction {
                opcode: op,
                reason: "jump/return/call opcodes cannot appear as a simple or expression operator",
                span,
            })
        }
    }
}

/// Drives emission of an entire routine into `sink`.
pub struct Walker<'a> {
    opts: &'a EmitOptions,
    type_query: &'a dyn TypeQuery,
    scope: &'a dyn VariableScope,
    functions: &'a dyn FunctionTable,
    fb_types: &'a dyn FbTypeTable,
    temp: TempNameFactory,
}

impl<'a> Walker<'a> {
    pub fn new(
        opts: &'a EmitOptions,
        type_query: &'a dyn TypeQuery,
        scope: &'a dyn VariableScope,
        functions: &'a dyn FunctionTable,
        fb_types: &'a dyn FbTypeTable,
    ) -> Self {
        Walker {
            opts,
            type_query,
            scope,
            functions,
            fb_types,
            temp: TempNameFactory::default(),
        }
    }

    /// Declares the backup and primary CR, walks `routine`'s instructions,
    /// and emits the end label with its trailing no-op assignment.
    pub fn compile_routine(&mut self, sink: &mut dyn OutputSink, routine: &Routine) -> Result<(), CodegenError> {
        self.temp.reset();
        let cr_type_name = self.opts.cr_type_name.clone();
        let cr_backup_name = self.opts.cr_backup_name.clone();
        let cr_var_name = self.opts.cr_var_name.clone();
        let end_label = self.opts.end_label.clone();

        sink.write(&format!("{cr_type_name} {cr_backup_name};"));
        sink.newline();
        sink.write(&format!("{cr_type_name} {cr_var_name};"));
        sink.newline();

        let mut cr = CrState::new(cr_var_name.clone());
        cr.reset();
        self.walk_list(sink, &routine.instructions, &mut cr)?;

        sink.write(&format!("{end_label}:"));
        sink.indent_right();
        sink.newline();
        // A nop so the label always has a following statement.
        sink.write(&format!("{cr_var_name} = {cr_var_name};"));
        sink.indent_left();
        Ok(())
    }

    fn walk_list(&mut self, sink: &mut dyn OutputSink, instructions: &[Instruction], cr: &mut CrState) -> Result<(), CodegenError> {
        for instr in instructions {
            self.walk_instruction(sink, instr, cr)?;
            sink.newline();
        }
        Ok(())
    }

    fn walk_instruction(&mut self, sink: &mut dyn OutputSink, instr: &Instruction, cr: &mut CrState) -> Result<(), CodegenError> {
        if let Some(label) = &instr.label {
            sink.write(&format!("{label}:"));
            sink.newline();
        }

        match &instr.kind {
            InstructionKind::LabelOnly => Ok(()),
            InstructionKind::Simple { op, operand } => {
                let mut ctx = EmitCtx {
                    sink,
                    opts: self.opts,
                    type_query: self.type_query,
                    scope: self.scope,
                };
                let new_ty = dispatch(&mut ctx, cr, *op, operand.as_ref(), instr.span)?;
                if let Some(ty) = new_ty {
                    cr.set_type(ty);
                }
                Ok(())
            }
            InstructionKind::Jump { op, target } => {
                let mut ctx = EmitCtx {
                    sink,
                    opts: self.opts,
                    type_query: self.type_query,
                    scope: self.scope,
                };
                operator::jump(&mut ctx, cr, *op, target, instr.span)
            }
            InstructionKind::Return { op } => {
                let mut ctx = EmitCtx {
                    sink,
                    opts: self.opts,
                    type_query: self.type_query,
                    scope: self.scope,
                };
                operator::ret(&mut ctx, cr, *op, instr.span)
            }
            InstructionKind::FunctionCall { name, args } => {
                let new_ty = call::lower_function_call(
                    sink,
                    self.functions,
                    self.type_query,
                    name,
                    args,
                    cr.name(),
                    cr.peek_type(),
                    &mut self.temp,
                    instr.span,
                )?;
                cr.set_type(new_ty);
                Ok(())
            }
            InstructionKind::FbCall { op, instance, args } => self.walk_fb_call(sink, *op, instance, args, cr, instr.span),
            InstructionKind::Expression { op, initial_operand, inner } => {
                self.walk_expression(sink, *op, initial_operand, inner, cr, instr.span)
            }
        }
    }

    fn walk_fb_call(
        &mut self,
        sink: &mut dyn OutputSink,
        op: Operator,
        instance: &str,
        args: &[il_core::CallArg],
        cr: &CrState,
        span: SourceSpan,
    ) -> Result<(), CodegenError> {
        match op {
            Operator::Cal => call::lower_fb_call(sink, self.opts, self.fb_types, self.scope, instance, args, span),
            Operator::Calc | Operator::Calcn => {
                let ty = cr.peek_type().ok_or(CodegenError::UndefinedCr { opcode: op, span })?;
                if !self.type_query.is_bool(ty) {
                    return Err(CodegenError::TypeRuleViolation {
                        opcode: op,
                        cr_type: Some(ty.clone()),
                        operand_type: ty.clone(),
                        span,
                    });
                }
                let negate = matches!(op, Operator::Calcn);
                let not = if negate { "!" } else { "" };
                let access = cr.render_access(op, span)?;
                sink.write(&format!("if ({not}{access}) "));
                call::lower_fb_call(sink, self.opts, self.fb_types, self.scope, instance, args, span)
            }
            _ => unreachable!("walk_fb_call called with non-FB-call opcode"),
        }
    }

    fn walk_expression(
        &mut self,
        sink: &mut dyn OutputSink,
        op: Operator,
        initial_operand: &Operand,
        inner: &[Instruction],
        outer_cr: &mut CrState,
        span: SourceSpan,
    ) -> Result<(), CodegenError> {
        let ty_before = outer_cr.peek_type().cloned();
        let cr_type_name = self.opts.cr_type_name.clone();
        let cr_backup_name = self.opts.cr_backup_name.clone();
        let cr_name = outer_cr.name().to_string();

        sink.write("{");
        sink.indent_right();
        sink.newline();
        sink.write(&format!("{cr_type_name} {cr_name};"));
        sink.newline();

        let mut inner_cr = CrState::new(cr_name.clone());
        {
            let mut ctx = EmitCtx {
                sink,
                opts: self.opts,
                type_query: self.type_query,
                scope: self.scope,
            };
            let loaded = operator::ld(&mut ctx, &inner_cr, initial_operand, span)?;
            inner_cr.load(loaded);
        }
        sink.newline();

        self.walk_list(sink, inner, &mut inner_cr)?;

        let inner_ty = inner_cr.peek_type().cloned().ok_or(CodegenError::UndefinedCr { opcode: op, span })?;
        sink.write(&format!("{cr_backup_name} = {cr_name};"));
        sink.indent_left();
        sink.newline();
        sink.write("}");
        sink.newline();

        // The backup CR is itself a union-typed register, so referencing it
        // as the deferred operator's right-hand operand must go through the
        // same `<name>.<selector>` union access every other CR read uses --
        // not a plain variable name. `accessor` carries that pre-rendered
        // text; `BackupScope` answers `type_of_variable(accessor)` so the
        // ordinary `TypeQuery::type_of` path resolves it like any operand.
        let accessor = format!("{cr_backup_name}.{}", inner_ty.variant_selector());
        let backup_scope = BackupScope {
            inner: self.scope,
            backup_name: &accessor,
            backup_type: inner_ty,
        };
        let backup_operand = Operand::var(accessor.clone());
        let new_ty = {
            let mut ctx = EmitCtx {
                sink,
                opts: self.opts,
                type_query: self.type_query,
                scope: &backup_scope,
            };
            dispatch(&mut ctx, outer_cr, op, Some(&backup_operand), span)?
        };
        match new_ty.or(ty_before) {
            Some(ty) => outer_cr.set_type(ty),
            None => outer_cr.reset(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::StringSink;
    use il_check::StaticTypeQuery;
    use il_core::scope::{FbTypeDecl, FunctionDecl};
    use il_core::{ConstValue, InstructionKind, SourceSpan};
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
    struct NoFunctions;
    impl FunctionTable for NoFunctions {
        fn find(&self, _name: &str) -> Option<&FunctionDecl> {
            None
        }
    }
    struct NoFbTypes;
    impl FbTypeTable for NoFbTypes {
        fn find(&self, _name: &str) -> Option<&FbTypeDecl> {
            None
        }
    }

    fn instr(kind: InstructionKind) -> Instruction {
        Instruction { label: None, span: SourceSpan::default(), kind }
    }

    #[test]
    fn ld_then_st_scenario() {
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let mut vars = HashMap::new();
        vars.insert("a".to_string(), PlcType::Int);
        vars.insert("b".to_string(), PlcType::Int);
        let scope = FakeScope(vars);
        let funcs = NoFunctions;
        let fbs = NoFbTypes;
        let mut walker = Walker::new(&opts, &tq, &scope, &funcs, &fbs);

        let routine = Routine::new(
            "R1",
            vec![
                instr(InstructionKind::Simple { op: Operator::Ld, operand: Some(Operand::var("a")) }),
                instr(InstructionKind::Simple { op: Operator::St, operand: Some(Operand::var("b")) }),
            ],
        );

        let mut sink = StringSink::new();
        walker.compile_routine(&mut sink, &routine).unwrap();
        let out = sink.into_string();
        assert!(out.contains("CR.INTvar = a;"));
        assert!(out.contains("b = CR.INTvar;"));
        assert!(out.contains("end:"));
        assert!(out.contains("CR = CR;"));
    }

    #[test]
    fn bare_label_routine_still_emits_prelude_and_end() {
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = FakeScope(HashMap::new());
        let funcs = NoFunctions;
        let fbs = NoFbTypes;
        let mut walker = Walker::new(&opts, &tq, &scope, &funcs, &fbs);

        let routine = Routine::new(
            "R1",
            vec![Instruction {
                label: Some("start".into()),
                span: SourceSpan::default(),
                kind: InstructionKind::LabelOnly,
            }],
        );
        let mut sink = StringSink::new();
        walker.compile_routine(&mut sink, &routine).unwrap();
        let out = sink.into_string();
        assert!(out.contains("IL_DEFVAR_BACK;"));
        assert!(out.contains("start:"));
        assert!(out.contains("end:"));
    }

    #[test]
    fn paren_expression_restores_outer_cr_type() {
        // LD a; AND ( LDN b; OR c ) ; ST d   -- outer CR ends up INT (type of `a`)
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let mut vars = HashMap::new();
        vars.insert("a".to_string(), PlcType::Int);
        vars.insert("b".to_string(), PlcType::Int);
        vars.insert("c".to_string(), PlcType::Int);
        vars.insert("d".to_string(), PlcType::Int);
        let scope = FakeScope(vars);
        let funcs = NoFunctions;
        let fbs = NoFbTypes;
        let mut walker = Walker::new(&opts, &tq, &scope, &funcs, &fbs);

        let routine = Routine::new(
            "R1",
            vec![
                instr(InstructionKind::Simple { op: Operator::Ld, operand: Some(Operand::var("a")) }),
                instr(InstructionKind::Expression {
                    op: Operator::And,
                    initial_operand: Operand::var("b"),
                    inner: vec![instr(InstructionKind::Simple { op: Operator::Or, operand: Some(Operand::var("c")) })],
                }),
                instr(InstructionKind::Simple { op: Operator::St, operand: Some(Operand::var("d")) }),
            ],
        );
        let mut sink = StringSink::new();
        walker.compile_routine(&mut sink, &routine).unwrap();
        let out = sink.into_string();
        assert!(out.contains("IL_DEFVAR_BACK = IL_DEFVAR;"));
        assert!(out.contains("d = IL_DEFVAR.INTvar;"));
    }

    #[test]
    fn const_value_is_usable_as_literal_operand() {
        let opts = EmitOptions::default();
        let tq = StaticTypeQuery::new();
        let scope = FakeScope(HashMap::new());
        let funcs = NoFunctions;
        let fbs = NoFbTypes;
        let mut walker = Walker::new(&opts, &tq, &scope, &funcs, &fbs);
        let routine = Routine::new(
            "R1",
            vec![instr(InstructionKind::Simple {
                op: Operator::Ld,
                operand: Some(Operand::Constant { value: ConstValue::Bool(true), ty: PlcType::Bool }),
            })],
        );
        let mut sink = StringSink::new();
        walker.compile_routine(&mut sink, &routine).unwrap();
        assert!(sink.into_string().contains("IL_DEFVAR.BOOLvar = TRUE;"));
    }
}
