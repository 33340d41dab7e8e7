//! Property-based checks over the quantified invariants the walker must
//! hold for every routine, not just the hand-picked scenarios.

use std::collections::HashMap;

use il_check::StaticTypeQuery;
use il_core::scope::{FbTypeDecl, FunctionDecl, ParamDecl, ParamDirection};
use il_core::{
    CallArg, FbTypeTable, FunctionTable, Instruction, InstructionKind, Operand, Operator, PlcType,
    Routine, SourceSpan, VariableScope,
};
use il_codegen::{compile_routine, EmitOptions};
use indexmap::IndexMap;
use proptest::prelude::*;

struct FakeScope {
    vars: HashMap<String, PlcType>,
    fb_instances: HashMap<String, String>,
}

impl VariableScope for FakeScope {
    fn type_of_variable(&self, name: &str) -> Option<PlcType> {
        self.vars.get(name).cloned()
    }
    fn fb_instance_type(&self, name: &str) -> Option<String> {
        self.fb_instances.get(name).cloned()
    }
}

struct NoFunctions;
impl FunctionTable for NoFunctions {
    fn find(&self, _name: &str) -> Option<&FunctionDecl> {
        None
    }
}

struct FbTypes(HashMap<String, FbTypeDecl>);
impl FbTypeTable for FbTypes {
    fn find(&self, name: &str) -> Option<&FbTypeDecl> {
        self.0.get(name)
    }
}

fn plain(kind: InstructionKind) -> Instruction {
    Instruction { label: None, span: SourceSpan::default(), kind }
}

fn ld_st_routine(names: &[String]) -> Routine {
    let instrs = names
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let op = if i % 2 == 0 { Operator::Ld } else { Operator::St };
            plain(InstructionKind::Simple { op, operand: Some(Operand::var(n.clone())) })
        })
        .collect();
    Routine::new("R", instrs)
}

fn var_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(|s| s.to_string())
}

proptest! {
    /// Property 6: running the walker twice on the same routine with
    /// identical fresh state produces byte-identical output.
    #[test]
    fn compiling_twice_is_deterministic(names in prop::collection::vec(var_name_strategy(), 1..8)) {
        let mut vars = HashMap::new();
        for n in &names {
            vars.insert(n.clone(), PlcType::Int);
        }
        let scope = FakeScope { vars, fb_instances: HashMap::new() };
        let functions = NoFunctions;
        let fb_types = FbTypes(HashMap::new());
        let type_query = StaticTypeQuery::new();
        let opts = EmitOptions::default();

        let routine = ld_st_routine(&names);
        let first = compile_routine(&routine, &scope, &functions, &fb_types, &type_query, &opts);
        let second = compile_routine(&routine, &scope, &functions, &fb_types, &type_query, &opts);
        prop_assert_eq!(first.ok(), second.ok());
    }

    /// Property 8 (partial): `NOT` applied to a non-binary CR (here, REAL)
    /// is always rejected, regardless of which variable carries the value.
    #[test]
    fn not_on_real_cr_is_always_rejected(name in var_name_strategy()) {
        let mut vars = HashMap::new();
        vars.insert(name.clone(), PlcType::Real);
        let scope = FakeScope { vars, fb_instances: HashMap::new() };
        let functions = NoFunctions;
        let fb_types = FbTypes(HashMap::new());
        let type_query = StaticTypeQuery::new();
        let opts = EmitOptions::default();

        let routine = Routine::new(
            "R",
            vec![
                plain(InstructionKind::Simple { op: Operator::Ld, operand: Some(Operand::var(name)) }),
                plain(InstructionKind::Simple { op: Operator::Not, operand: None }),
            ],
        );

        let result = compile_routine(&routine, &scope, &functions, &fb_types, &type_query, &opts);
        prop_assert!(result.is_err());
    }

    /// Property 4: FB call pre-call assignments appear in the FB type's
    /// declaration order, independent of the order the caller wrote the
    /// named arguments in.
    #[test]
    fn fb_call_assignments_follow_declaration_order_not_call_order(
        shuffle_in_first in prop::bool::ANY,
    ) {
        let mut params = IndexMap::new();
        params.insert("IN".to_string(), ParamDecl { name: "IN".into(), ty: PlcType::Bool, direction: ParamDirection::In, default: None });
        params.insert("PT".to_string(), ParamDecl { name: "PT".into(), ty: PlcType::Time, direction: ParamDirection::In, default: None });
        let ton = FbTypeDecl { name: "TON".into(), params };
        let mut fb_types_map = HashMap::new();
        fb_types_map.insert("TON".to_string(), ton);

        let mut fb_instances = HashMap::new();
        fb_instances.insert("Timer1".to_string(), "TON".to_string());
        let mut vars = HashMap::new();
        vars.insert("start".to_string(), PlcType::Bool);
        vars.insert("duration".to_string(), PlcType::Time);
        let scope = FakeScope { vars, fb_instances };
        let functions = NoFunctions;
        let fb_types = FbTypes(fb_types_map);
        let type_query = StaticTypeQuery::new();
        let opts = EmitOptions::default();

        let named_in = CallArg::Named { name: "IN".into(), value: Operand::var("start") };
        let named_pt = CallArg::Named {
            name: "PT".into(),
            value: Operand::var("duration"),
        };
        let args = if shuffle_in_first {
            vec![named_in, named_pt]
        } else {
            vec![named_pt, named_in]
        };

        let routine = Routine::new(
            "R",
            vec![plain(InstructionKind::FbCall { op: Operator::Cal, instance: "Timer1".to_string(), args })],
        );

        let out = compile_routine(&routine, &scope, &functions, &fb_types, &type_query, &opts).unwrap();
        let in_pos = out.find("Timer1.IN = start;").expect("IN assignment present");
        let pt_pos = out.find("Timer1.PT = duration;").expect("PT assignment present");
        prop_assert!(in_pos < pt_pos, "IN must be assigned before PT regardless of call-site order: {out}");
    }
}
