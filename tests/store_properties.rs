use std::collections::HashSet;

use proptest::prelude::*;
use umlsmith::diagram::{ArrowKind, ClassRelationKind, DiagramKind, EntityStore, ErRelationKind};
use umlsmith::serialize;

const NAMES: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta Node"];

// ===================
// Operations
// ===================

#[derive(Debug, Clone)]
enum Op {
    AddActor(usize),
    RemoveActor(usize),
    AddMessage(Option<usize>, Option<usize>),
    AddClass(usize),
    RemoveClass(usize),
    AddClassRelationship(usize, usize, usize),
    AddUseCaseActor(usize),
    RemoveUseCaseActor(usize),
    AddUseCase(usize),
    RemoveUseCase(usize),
    AddUseCaseLink(Option<usize>, Option<usize>),
    AddEntity(usize),
    RemoveEntity(usize),
    AddErRelationship(usize, usize, usize),
    AddActivity(usize),
    RemoveActivity(usize),
    AddFlow(Option<usize>, Option<usize>),
    AddComponent(usize),
    RemoveComponent(usize),
    AddDependency(Option<usize>, Option<usize>),
    AddState(usize),
    RemoveState(usize),
    AddTransition(Option<usize>, Option<usize>),
}

impl Op {
    fn kind(&self) -> DiagramKind {
        match self {
            Op::AddActor(_) | Op::RemoveActor(_) | Op::AddMessage(..) => DiagramKind::Sequence,
            Op::AddClass(_) | Op::RemoveClass(_) | Op::AddClassRelationship(..) => {
                DiagramKind::Class
            }
            Op::AddUseCaseActor(_)
            | Op::RemoveUseCaseActor(_)
            | Op::AddUseCase(_)
            | Op::RemoveUseCase(_)
            | Op::AddUseCaseLink(..) => DiagramKind::UseCase,
            Op::AddEntity(_) | Op::RemoveEntity(_) | Op::AddErRelationship(..) => DiagramKind::Erd,
            Op::AddActivity(_) | Op::RemoveActivity(_) | Op::AddFlow(..) => DiagramKind::Activity,
            Op::AddComponent(_) | Op::RemoveComponent(_) | Op::AddDependency(..) => {
                DiagramKind::Component
            }
            Op::AddState(_) | Op::RemoveState(_) | Op::AddTransition(..) => DiagramKind::State,
        }
    }
}

fn name(i: usize) -> &'static str {
    NAMES[i % NAMES.len()]
}

fn opt_name(i: Option<usize>) -> Option<&'static str> {
    i.map(name)
}

const CLASS_KINDS: [ClassRelationKind; 4] = [
    ClassRelationKind::Inheritance,
    ClassRelationKind::Composition,
    ClassRelationKind::Aggregation,
    ClassRelationKind::Association,
];

const ER_KINDS: [ErRelationKind; 3] = [
    ErRelationKind::OneToOne,
    ErRelationKind::OneToMany,
    ErRelationKind::ManyToMany,
];

/// Applies one operation; rejected edits are part of the exercise and ignored.
fn apply(store: &mut EntityStore, op: &Op) {
    let _ = match *op {
        Op::AddActor(i) => store.sequence_mut().add_actor(name(i)).map(drop),
        Op::RemoveActor(i) => Ok(drop(store.sequence_mut().remove_actor(name(i)))),
        Op::AddMessage(from, to) => store
            .sequence_mut()
            .add_message(opt_name(from), opt_name(to), ArrowKind::Sync, "m")
            .map(drop),
        Op::AddClass(i) => store.class_mut().add_class(name(i), i % 2 == 0).map(drop),
        Op::RemoveClass(i) => {
            let id = store.class().class_by_name(name(i)).map(|c| c.id);
            Ok(drop(id.map(|id| store.class_mut().remove_class(id))))
        }
        Op::AddClassRelationship(from, to, kind) => {
            let from = store.class().class_by_name(name(from)).map(|c| c.id);
            let to = store.class().class_by_name(name(to)).map(|c| c.id);
            store
                .class_mut()
                .add_relationship(from, to, CLASS_KINDS[kind % CLASS_KINDS.len()], "")
                .map(drop)
        }
        Op::AddUseCaseActor(i) => store.use_case_mut().add_actor(name(i)).map(drop),
        Op::RemoveUseCaseActor(i) => Ok(drop(store.use_case_mut().remove_actor(name(i)))),
        Op::AddUseCase(i) => store.use_case_mut().add_use_case(name(i)).map(drop),
        Op::RemoveUseCase(i) => Ok(drop(store.use_case_mut().remove_use_case(name(i)))),
        Op::AddUseCaseLink(actor, use_case) => store
            .use_case_mut()
            .add_link(opt_name(actor), opt_name(use_case))
            .map(drop),
        Op::AddEntity(i) => store.erd_mut().add_entity(name(i)).map(drop),
        Op::RemoveEntity(i) => {
            let id = store.erd().entity_by_name(name(i)).map(|e| e.id);
            Ok(drop(id.map(|id| store.erd_mut().remove_entity(id))))
        }
        Op::AddErRelationship(from, to, kind) => {
            let from = store.erd().entity_by_name(name(from)).map(|e| e.id);
            let to = store.erd().entity_by_name(name(to)).map(|e| e.id);
            store
                .erd_mut()
                .add_relationship(from, to, ER_KINDS[kind % ER_KINDS.len()], "")
                .map(drop)
        }
        Op::AddActivity(i) => store.activity_mut().add_activity(name(i)).map(drop),
        Op::RemoveActivity(i) => Ok(drop(store.activity_mut().remove_activity(name(i)))),
        Op::AddFlow(from, to) => store
            .activity_mut()
            .add_flow(opt_name(from), opt_name(to))
            .map(drop),
        Op::AddComponent(i) => store.component_mut().add_component(name(i)).map(drop),
        Op::RemoveComponent(i) => Ok(drop(store.component_mut().remove_component(name(i)))),
        Op::AddDependency(from, to) => store
            .component_mut()
            .add_dependency(opt_name(from), opt_name(to))
            .map(drop),
        Op::AddState(i) => store.state_mut().add_state(name(i)).map(drop),
        Op::RemoveState(i) => Ok(drop(store.state_mut().remove_state(name(i)))),
        Op::AddTransition(from, to) => store
            .state_mut()
            .add_transition(opt_name(from), opt_name(to), "e")
            .map(drop),
    };
}

// ===================
// Strategies
// ===================

fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = || 0usize..NAMES.len();
    let endpoint = || proptest::option::of(0usize..NAMES.len());
    prop_oneof![
        idx().prop_map(Op::AddActor),
        idx().prop_map(Op::RemoveActor),
        (endpoint(), endpoint()).prop_map(|(a, b)| Op::AddMessage(a, b)),
        idx().prop_map(Op::AddClass),
        idx().prop_map(Op::RemoveClass),
        (idx(), idx(), 0usize..4).prop_map(|(a, b, k)| Op::AddClassRelationship(a, b, k)),
        idx().prop_map(Op::AddUseCaseActor),
        idx().prop_map(Op::RemoveUseCaseActor),
        idx().prop_map(Op::AddUseCase),
        idx().prop_map(Op::RemoveUseCase),
        (endpoint(), endpoint()).prop_map(|(a, b)| Op::AddUseCaseLink(a, b)),
        idx().prop_map(Op::AddEntity),
        idx().prop_map(Op::RemoveEntity),
        (idx(), idx(), 0usize..3).prop_map(|(a, b, k)| Op::AddErRelationship(a, b, k)),
        idx().prop_map(Op::AddActivity),
        idx().prop_map(Op::RemoveActivity),
        (endpoint(), endpoint()).prop_map(|(a, b)| Op::AddFlow(a, b)),
        idx().prop_map(Op::AddComponent),
        idx().prop_map(Op::RemoveComponent),
        (endpoint(), endpoint()).prop_map(|(a, b)| Op::AddDependency(a, b)),
        idx().prop_map(Op::AddState),
        idx().prop_map(Op::RemoveState),
        (endpoint(), endpoint()).prop_map(|(a, b)| Op::AddTransition(a, b)),
    ]
}

fn kind_strategy() -> impl Strategy<Value = DiagramKind> {
    proptest::sample::select(DiagramKind::ALL.to_vec())
}

// ===================
// Property Test Functions
// ===================

fn assert_unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for name in names {
        prop_assert!(seen.insert(name), "duplicate name {name}");
    }
    Ok(())
}

/// No edge may reference a node that is not present, and node names stay unique.
fn check_integrity(store: &EntityStore) -> Result<(), TestCaseError> {
    let seq = store.sequence();
    assert_unique(seq.actors().iter().map(String::as_str))?;
    for msg in seq.messages() {
        prop_assert!(seq.actors().contains(&msg.from));
        prop_assert!(seq.actors().contains(&msg.to));
    }

    let class = store.class();
    assert_unique(class.classes().iter().map(|c| c.name.as_str()))?;
    let mut triples = HashSet::new();
    for rel in class.relationships() {
        prop_assert!(class.class(rel.from).is_some());
        prop_assert!(class.class(rel.to).is_some());
        prop_assert!(triples.insert((rel.from, rel.to, rel.kind)), "duplicate class relationship");
    }

    let uc = store.use_case();
    assert_unique(uc.actors().iter().map(String::as_str))?;
    assert_unique(uc.use_cases().iter().map(String::as_str))?;
    for actor in uc.actors() {
        prop_assert!(!uc.use_cases().contains(actor), "actor and use case share {actor}");
    }
    for link in uc.links() {
        prop_assert!(uc.actors().contains(&link.actor));
        prop_assert!(uc.use_cases().contains(&link.use_case));
    }

    let erd = store.erd();
    assert_unique(erd.entities().iter().map(|e| e.name.as_str()))?;
    let mut triples = HashSet::new();
    for rel in erd.relationships() {
        prop_assert!(erd.entity(rel.from).is_some());
        prop_assert!(erd.entity(rel.to).is_some());
        prop_assert!(triples.insert((rel.from, rel.to, rel.kind)), "duplicate ER relationship");
    }

    let activity = store.activity();
    for flow in activity.flows() {
        prop_assert!(activity.activities().contains(&flow.from));
        prop_assert!(activity.activities().contains(&flow.to));
    }

    let component = store.component();
    for dep in component.dependencies() {
        prop_assert!(component.components().contains(&dep.from));
        prop_assert!(component.components().contains(&dep.to));
    }

    let state = store.state();
    for t in state.transitions() {
        prop_assert!(state.states().contains(&t.from));
        prop_assert!(state.states().contains(&t.to));
    }
    Ok(())
}

fn check_cascade_integrity(ops: &[Op]) -> Result<(), TestCaseError> {
    let mut store = EntityStore::new();
    for op in ops {
        apply(&mut store, op);
        check_integrity(&store)?;
    }
    Ok(())
}

fn check_kind_isolation(
    setup: &[Op],
    later: &[Op],
    kind: DiagramKind,
) -> Result<(), TestCaseError> {
    let mut store = EntityStore::new();
    for op in setup {
        apply(&mut store, op);
    }
    store.set_kind(kind);
    let before = serialize(&store);

    for op in later.iter().filter(|op| op.kind() != kind) {
        store.set_kind(op.kind());
        apply(&mut store, op);
    }
    store.set_kind(kind);
    prop_assert_eq!(before, serialize(&store));
    Ok(())
}

fn check_determinism(ops: &[Op], kind: DiagramKind) -> Result<(), TestCaseError> {
    let mut store = EntityStore::new();
    for op in ops {
        apply(&mut store, op);
    }
    store.set_kind(kind);
    prop_assert_eq!(serialize(&store), serialize(&store));
    prop_assert_eq!(serialize(&store), serialize(&store.clone()));
    Ok(())
}

fn check_duplicate_add_is_rejected(name: &str) -> Result<(), TestCaseError> {
    let mut store = EntityStore::new();

    store.sequence_mut().add_actor(name).unwrap();
    prop_assert!(store.sequence_mut().add_actor(name).is_err());
    prop_assert_eq!(store.sequence().actors().len(), 1);

    store.class_mut().add_class(name, false).unwrap();
    prop_assert!(store.class_mut().add_class(name, true).is_err());
    prop_assert_eq!(store.class().classes().len(), 1);

    store.use_case_mut().add_actor(name).unwrap();
    prop_assert!(store.use_case_mut().add_actor(name).is_err());
    // A use case may not print like an existing actor either.
    prop_assert!(store.use_case_mut().add_use_case(name).is_err());
    let use_case = format!("{name} case");
    store.use_case_mut().add_use_case(&use_case).unwrap();
    prop_assert!(store.use_case_mut().add_use_case(&use_case).is_err());
    prop_assert_eq!(store.use_case().use_cases().len(), 1);

    store.erd_mut().add_entity(name).unwrap();
    prop_assert!(store.erd_mut().add_entity(name).is_err());
    prop_assert_eq!(store.erd().entities().len(), 1);

    store.activity_mut().add_activity(name).unwrap();
    prop_assert!(store.activity_mut().add_activity(name).is_err());
    store.component_mut().add_component(name).unwrap();
    prop_assert!(store.component_mut().add_component(name).is_err());
    store.state_mut().add_state(name).unwrap();
    prop_assert!(store.state_mut().add_state(name).is_err());
    prop_assert_eq!(store.state().states().len(), 1);
    Ok(())
}

proptest! {
    #[test]
    fn no_edge_ever_dangles(ops in prop::collection::vec(op_strategy(), 0..80)) {
        check_cascade_integrity(&ops)?;
    }

    #[test]
    fn other_kinds_never_change_active_output(
        setup in prop::collection::vec(op_strategy(), 0..40),
        later in prop::collection::vec(op_strategy(), 0..40),
        kind in kind_strategy(),
    ) {
        check_kind_isolation(&setup, &later, kind)?;
    }

    #[test]
    fn serialization_is_deterministic(
        ops in prop::collection::vec(op_strategy(), 0..60),
        kind in kind_strategy(),
    ) {
        check_determinism(&ops, kind)?;
    }

    #[test]
    fn duplicate_names_are_rejected(name in "[A-Za-z][A-Za-z0-9 _]{0,11}") {
        check_duplicate_add_is_rejected(&name)?;
    }
}
