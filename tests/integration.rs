// Integration tests for irmatch: composing predicates over a small program
// snapshot and running the sequence matcher end to end.

use irmatch::*;
use proptest::prelude::*;

fn make_hierarchy() -> ClassHierarchy {
    let mut hier = ClassHierarchy::new();
    hier.add_class(
        ClassDefBuilder::new("Ljava/lang/Object;")
            .external(true)
            .class_data(false)
            .build(),
    );
    hier.add_class(
        ClassDefBuilder::new("Ljava/io/Closeable;")
            .access(AccessFlags::PUBLIC | AccessFlags::INTERFACE)
            .build(),
    );
    hier.add_class(
        ClassDefBuilder::new("Lapp/Resource;")
            .super_class("Ljava/lang/Object;")
            .interface("Ljava/io/Closeable;")
            .dmethod(
                MethodDef::new("Lapp/Resource;", "<init>")
                    .with_access(AccessFlags::PUBLIC | AccessFlags::CONSTRUCTOR),
            )
            .vmethod(MethodDef::new("Lapp/Resource;", "close"))
            .ifield(FieldDef::new("Lapp/Resource;", "handle", "J"))
            .build(),
    );
    hier.add_class(
        ClassDefBuilder::new("Lapp/Pool;")
            .super_class("Lapp/Resource;")
            .sfield(
                FieldDef::new("Lapp/Pool;", "INSTANCE", "Lapp/Pool;")
                    .with_access(AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL),
            )
            .build(),
    );
    hier
}

#[test]
fn test_select_closeable_classes() {
    let hier = make_hierarchy();
    let closeable = TypeName::new("Ljava/io/Closeable;");
    let p = as_class(
        &hier,
        has_class_data().and(is_interface().not()),
    )
    .and(is_assignable_to(&hier, &closeable));

    assert!(p.matches(&TypeName::new("Lapp/Resource;")));
    assert!(p.matches(&TypeName::new("Lapp/Pool;")));
    assert!(!p.matches(&TypeName::new("Ljava/io/Closeable;"))); // interface itself
    assert!(!p.matches(&TypeName::new("Ljava/lang/Object;")));
    assert!(!p.matches(&TypeName::new("I")));
}

#[test]
fn test_select_singleton_holders() {
    let hier = make_hierarchy();
    let p = any_sfields(is_static().and(is_final()).and(as_type(named("Lapp/Pool;"))));
    let pool = hier.resolve(&TypeName::new("Lapp/Pool;")).unwrap();
    let resource = hier.resolve(&TypeName::new("Lapp/Resource;")).unwrap();
    assert!(p.matches(pool));
    assert!(!p.matches(resource));
}

#[test]
fn test_constructor_call_sequence() {
    // new-instance Resource; invoke-direct <init>; repeated twice with noise.
    let ctor = MethodRef::new("Lapp/Resource;", "<init>", "()V");
    let insns = vec![
        Instruction::new(Opcode::Const),
        Instruction::new(Opcode::NewInstance).with_type("Lapp/Resource;"),
        Instruction::new(Opcode::InvokeDirect).with_method(ctor.clone()),
        Instruction::new(Opcode::Nop),
        Instruction::new(Opcode::NewInstance).with_type("Lapp/Resource;"),
        Instruction::new(Opcode::InvokeDirect).with_method(ctor),
        Instruction::new(Opcode::ReturnVoid),
    ];
    let pattern = OpcodePattern::new(vec![
        new_instance(opcode_type(named("Lapp/Resource;"))),
        invoke_direct(opcode_method(can_be_constructor())),
    ]);
    let windows = find_matches(&insns, &pattern);
    let starts: Vec<usize> = windows.iter().map(|w| w.start()).collect();
    assert_eq!(starts, vec![1, 4]);
    assert_eq!(windows[0].insns()[0].opcode(), Opcode::NewInstance);
    assert_eq!(windows[0].insns()[1].opcode(), Opcode::InvokeDirect);
}

#[test]
fn test_profiles_feed_method_predicates() {
    let hier = make_hierarchy();
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    use std::io::Write;
    write!(
        csv,
        "index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level\n\
         0,Lapp/Resource;.close:()V,88.0,900,17.5,3,12.0,19\n\
         1,Lapp/Gone;.close:()V,1.0,1,1.0,1,1.0,1\n"
    )
    .unwrap();
    let profiles = MethodProfiles::parse_stats_file(csv.path(), &hier).unwrap();
    assert_eq!(profiles.len(), 1);

    // Hot methods by profile, expressed as an ordinary predicate.
    let hot = matcher(move |m: &MethodRef| {
        profiles.get(m).is_some_and(|s| s.call_count > 10.0)
    });
    assert!(hot.matches(&MethodRef::new("Lapp/Resource;", "close", "()V")));
    assert!(!hot.matches(&MethodRef::new("Lapp/Resource;", "<init>", "()V")));
}

fn insn_strategy() -> impl Strategy<Value = Instruction> {
    let opcodes = prop::sample::select(vec![
        Opcode::Nop,
        Opcode::Const,
        Opcode::ConstString,
        Opcode::NewInstance,
        Opcode::Throw,
        Opcode::InvokeStatic,
        Opcode::InvokeVirtual,
        Opcode::Iget,
        Opcode::Iput,
        Opcode::ReturnVoid,
    ]);
    (opcodes, prop::collection::vec(0u16..8, 0..4))
        .prop_map(|(op, srcs)| Instruction::new(op).with_srcs(srcs))
}

fn leaf(index: usize) -> Predicate<'static, Instruction> {
    match index {
        0 => any(),
        1 => any().not(),
        2 => matcher(|i: &Instruction| i.opcode().is_invoke()),
        3 => matcher(|i: &Instruction| i.srcs_len() % 2 == 0),
        _ => return_void(),
    }
}

proptest! {
    #[test]
    fn prop_combinator_laws(insn in insn_strategy(), pi in 0usize..5, qi in 0usize..5) {
        let p = leaf(pi);
        let q = leaf(qi);
        let pv = p.matches(&insn);
        let qv = q.matches(&insn);
        prop_assert_eq!(p.clone().not().matches(&insn), !pv);
        prop_assert_eq!(p.clone().and(q.clone()).matches(&insn), pv && qv);
        prop_assert_eq!(p.clone().or(q.clone()).matches(&insn), pv || qv);
        prop_assert_eq!(p.xor(q).matches(&insn), pv != qv);
    }

    #[test]
    fn prop_single_scan_is_order_preserving_filter(
        insns in prop::collection::vec(insn_strategy(), 0..32),
        pi in 0usize..5,
    ) {
        let p = leaf(pi);
        let hits = find_insn_match(&insns, &p);
        let expected: Vec<&Instruction> = insns.iter().filter(|i| p.matches(i)).collect();
        prop_assert_eq!(hits.len(), expected.len());
        for (h, e) in hits.iter().zip(expected.iter()) {
            prop_assert!(std::ptr::eq(*h, *e));
        }
    }

    #[test]
    fn prop_window_starts_are_ascending_and_in_range(
        insns in prop::collection::vec(insn_strategy(), 0..24),
        pi in 0usize..5,
        n in 1usize..4,
    ) {
        let pattern = OpcodePattern::new((0..n).map(|_| leaf(pi)).collect());
        let windows = find_matches(&insns, &pattern);
        if insns.len() < n {
            prop_assert!(windows.is_empty());
        }
        let mut prev: Option<usize> = None;
        for w in &windows {
            prop_assert_eq!(w.len(), n);
            prop_assert!(w.start() + n <= insns.len());
            if let Some(prev) = prev {
                prop_assert!(w.start() > prev);
            }
            prev = Some(w.start());
        }
    }
}
