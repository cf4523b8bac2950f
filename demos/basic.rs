use irmatch::*;

fn main() {
    // 1. Build a small program snapshot
    let mut hier = ClassHierarchy::new();
    hier.add_class(
        ClassDefBuilder::new("Ljava/lang/Runnable;")
            .access(AccessFlags::PUBLIC | AccessFlags::INTERFACE)
            .build(),
    );
    hier.add_class(
        ClassDefBuilder::new("Lapp/Task;")
            .interface("Ljava/lang/Runnable;")
            .dmethod(
                MethodDef::new("Lapp/Task;", "<init>")
                    .with_access(AccessFlags::PUBLIC | AccessFlags::CONSTRUCTOR),
            )
            .vmethod(MethodDef::new("Lapp/Task;", "run"))
            .build(),
    );

    // 2. Compose predicates over the hierarchy
    let runnable = TypeName::new("Ljava/lang/Runnable;");
    let is_task_like = is_assignable_to(&hier, &runnable).and(as_class(&hier, is_interface().not()));
    println!(
        "Lapp/Task; runnable: {}",
        is_task_like.matches(&TypeName::new("Lapp/Task;"))
    );

    // 3. Search an instruction stream for construction sites
    let insns = vec![
        Instruction::new(Opcode::NewInstance).with_type("Lapp/Task;"),
        Instruction::new(Opcode::InvokeDirect)
            .with_method(MethodRef::new("Lapp/Task;", "<init>", "()V")),
        Instruction::new(Opcode::InvokeVirtual)
            .with_method(MethodRef::new("Lapp/Task;", "run", "()V")),
        Instruction::new(Opcode::ReturnVoid),
    ];
    let pattern = OpcodePattern::new(vec![
        new_instance(opcode_type(is_task_like)),
        invoke_direct(opcode_method(can_be_constructor())),
    ]);
    for window in find_matches(&insns, &pattern) {
        println!(
            "construction at offset {}: {:?} then {:?}",
            window.start(),
            window.insns()[0].opcode(),
            window.insns()[1].opcode(),
        );
    }

    // 4. Single-predicate scan
    let calls = find_insn_match(&insns, &invoke(any()));
    println!("call sites: {}", calls.len());
}
