//! PlantUML text generation.
//!
//! [`serialize`] is a pure function of the store: the same contents always
//! produce byte-identical text.

use log::debug;

use super::escape::{bracketed, participant, quoted, text};
use super::store::EntityStore;
use super::style::Style;
use super::types::{
    Class, ClassAttribute, ClassMethod, DiagramKind, ErAttribute, ErEntity, Id, UseCaseDirection,
};

const START: &str = "@startuml\n";
const END: &str = "@enduml\n";

/// Render the active diagram kind as PlantUML source.
pub fn serialize(store: &EntityStore) -> String {
    let mut out = String::from(START);
    write_style(&mut out, store.style());

    match store.kind() {
        DiagramKind::Sequence => write_sequence(&mut out, store),
        DiagramKind::Class => write_class(&mut out, store),
        DiagramKind::UseCase => write_use_case(&mut out, store),
        DiagramKind::Erd => write_erd(&mut out, store),
        DiagramKind::Activity => write_activity(&mut out, store),
        DiagramKind::Component => write_component(&mut out, store),
        DiagramKind::State => write_state(&mut out, store),
    }

    out.push_str(END);
    debug!("serialized {} diagram ({} bytes)", store.kind(), out.len());
    out
}

fn write_style(out: &mut String, style: &Style) {
    out.push_str(&format!("skinparam backgroundColor {}\n", style.background_color));
    out.push_str(&format!("skinparam defaultFontColor {}\n", style.text_color));
    out.push_str(&format!("skinparam ArrowColor {}\n", style.primary_color));
    out.push_str(&format!("skinparam BorderColor {}\n", style.primary_color));
    out.push('\n');
}

fn write_sequence(out: &mut String, store: &EntityStore) {
    let diagram = store.sequence();
    for actor in diagram.actors() {
        out.push_str(&format!("actor {}\n", participant(actor)));
    }
    out.push('\n');
    for msg in diagram.messages() {
        out.push_str(&format!(
            "{} {} {}: {}\n",
            participant(&msg.from),
            msg.arrow.symbol(),
            participant(&msg.to),
            text(&msg.text)
        ));
    }
}

fn write_class(out: &mut String, store: &EntityStore) {
    let diagram = store.class();
    for class in diagram.classes() {
        write_class_block(out, class);
    }
    out.push('\n');

    let name_of = |id: Id| diagram.class(id).map(|c| c.name.as_str());
    for rel in diagram.relationships() {
        // Dangling endpoints cannot survive a cascade; skip them if they ever do.
        let (Some(from), Some(to)) = (name_of(rel.from), name_of(rel.to)) else {
            continue;
        };
        out.push_str(&format!(
            "{} {} {}{}\n",
            quoted(from),
            rel.kind.symbol(),
            quoted(to),
            label_suffix(&rel.label)
        ));
    }
}

fn write_class_block(out: &mut String, class: &Class) {
    let qualifier = if class.is_abstract { "abstract " } else { "" };
    out.push_str(&format!("{}class {} {{\n", qualifier, quoted(&class.name)));
    for attribute in &class.attributes {
        out.push_str(&format!("  {}\n", attribute_line(attribute)));
    }
    if !class.attributes.is_empty() && !class.methods.is_empty() {
        out.push_str("  --\n");
    }
    for method in &class.methods {
        out.push_str(&format!("  {}\n", method_line(method)));
    }
    out.push_str("}\n");
}

fn attribute_line(attribute: &ClassAttribute) -> String {
    let mut line = format!("{} ", attribute.visibility.symbol());
    if attribute.is_static {
        line.push_str("{static} ");
    }
    line.push_str(&text(&attribute.name));
    line.push_str(&type_suffix(&attribute.type_name));
    line
}

fn method_line(method: &ClassMethod) -> String {
    let mut line = format!("{} ", method.visibility.symbol());
    if method.is_static {
        line.push_str("{static} ");
    }
    if method.is_abstract {
        line.push_str("{abstract} ");
    }
    line.push_str(&format!(
        "{}({})",
        text(&method.name),
        text(method.parameters.trim())
    ));
    line.push_str(&type_suffix(&method.return_type));
    line
}

fn write_use_case(out: &mut String, store: &EntityStore) {
    let diagram = store.use_case();
    let direction = match store.style().use_case_direction {
        UseCaseDirection::Horizontal => "left to right direction",
        UseCaseDirection::Vertical => "top to bottom direction",
    };
    out.push_str(direction);
    out.push('\n');
    for actor in diagram.actors() {
        out.push_str(&format!("actor {}\n", quoted(actor)));
    }
    for use_case in diagram.use_cases() {
        out.push_str(&format!("usecase {}\n", quoted(use_case)));
    }
    out.push('\n');
    for link in diagram.links() {
        out.push_str(&format!(
            "{} --> {}\n",
            quoted(&link.actor),
            quoted(&link.use_case)
        ));
    }
}

fn write_erd(out: &mut String, store: &EntityStore) {
    let diagram = store.erd();
    for entity in diagram.entities() {
        write_entity_block(out, entity);
    }
    out.push('\n');

    let name_of = |id: Id| diagram.entity(id).map(|e| e.name.as_str());
    for rel in diagram.relationships() {
        let (Some(from), Some(to)) = (name_of(rel.from), name_of(rel.to)) else {
            continue;
        };
        out.push_str(&format!(
            "{} {} {}{}\n",
            quoted(from),
            rel.kind.symbol(),
            quoted(to),
            label_suffix(&rel.label)
        ));
    }
}

fn write_entity_block(out: &mut String, entity: &ErEntity) {
    out.push_str(&format!("entity {} {{\n", quoted(&entity.name)));
    for attribute in &entity.attributes {
        out.push_str(&format!("  {}\n", entity_attribute_line(attribute)));
    }
    out.push_str("}\n");
}

fn entity_attribute_line(attribute: &ErAttribute) -> String {
    let mut line = text(&attribute.name);
    line.push_str(&type_suffix(&attribute.type_name));
    if attribute.is_primary_key {
        line.push_str(" [PK]");
    }
    if attribute.is_foreign_key {
        line.push_str(" [FK]");
    }
    if attribute.is_not_null {
        line.push_str(" [NOT NULL]");
    }
    line
}

fn write_activity(out: &mut String, store: &EntityStore) {
    let diagram = store.activity();
    for activity in diagram.activities() {
        out.push_str(&format!("action {}\n", quoted(activity)));
    }
    out.push('\n');
    for flow in diagram.flows() {
        out.push_str(&format!("{} --> {}\n", quoted(&flow.from), quoted(&flow.to)));
    }
}

fn write_component(out: &mut String, store: &EntityStore) {
    let diagram = store.component();
    for component in diagram.components() {
        out.push_str(&bracketed(component));
        out.push('\n');
    }
    out.push('\n');
    for dep in diagram.dependencies() {
        out.push_str(&format!(
            "{} --> {}\n",
            bracketed(&dep.from),
            bracketed(&dep.to)
        ));
    }
}

fn write_state(out: &mut String, store: &EntityStore) {
    let diagram = store.state();
    for state in diagram.states() {
        out.push_str(&format!("state {}\n", quoted(state)));
    }
    out.push('\n');
    for transition in diagram.transitions() {
        let event = if transition.event.is_empty() {
            String::new()
        } else {
            format!(" : {}", text(&transition.event))
        };
        out.push_str(&format!(
            "{} --> {}{}\n",
            quoted(&transition.from),
            quoted(&transition.to),
            event
        ));
    }
}

fn type_suffix(type_name: &str) -> String {
    let type_name = type_name.trim();
    if type_name.is_empty() {
        String::new()
    } else {
        format!(": {}", text(type_name))
    }
}

fn label_suffix(label: &str) -> String {
    if label.is_empty() {
        String::new()
    } else {
        format!(" : {}", text(label))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diagram::{
        ArrowKind, ClassRelationKind, ErRelationKind, UseCaseDirection, Visibility,
    };

    const HEADER: &str = "@startuml
skinparam backgroundColor #FFFFFF
skinparam defaultFontColor #000000
skinparam ArrowColor #1E88E5
skinparam BorderColor #1E88E5

";

    #[test]
    fn empty_store_still_has_header_and_terminator() {
        let store = EntityStore::new();
        assert_eq!(serialize(&store), format!("{HEADER}\n@enduml\n"));
    }

    #[test]
    fn style_directives_follow_fixed_order() {
        let mut store = EntityStore::new();
        store.set_background_color("#000").unwrap();
        store.set_text_color("White").unwrap();
        store.set_primary_color("#FF0000").unwrap();
        let out = serialize(&store);
        let lines: Vec<_> = out.lines().take(5).collect();
        assert_eq!(
            lines,
            [
                "@startuml",
                "skinparam backgroundColor #000",
                "skinparam defaultFontColor White",
                "skinparam ArrowColor #FF0000",
                "skinparam BorderColor #FF0000",
            ]
        );
    }

    #[test]
    fn sequence_with_default_message() {
        let mut store = EntityStore::new();
        let seq = store.sequence_mut();
        seq.add_actor("Alice").unwrap();
        seq.add_actor("Bob").unwrap();
        seq.add_message(None, None, ArrowKind::default(), "").unwrap();
        seq.add_message(Some("Bob"), Some("Alice"), ArrowKind::Reply, "ok\nthanks")
            .unwrap();

        let expected = format!(
            "{HEADER}actor Alice\nactor Bob\n\n\
             Alice -> Bob: \nBob --> Alice: ok\\nthanks\n@enduml\n"
        );
        assert_eq!(serialize(&store), expected);
    }

    #[test]
    fn removed_actor_drops_its_messages_from_output() {
        let mut store = EntityStore::new();
        let seq = store.sequence_mut();
        seq.add_actor("Alice").unwrap();
        seq.add_actor("Bob").unwrap();
        seq.add_message(None, None, ArrowKind::Sync, "hello").unwrap();
        seq.remove_actor("Bob");

        let out = serialize(&store);
        assert!(!out.contains("hello"));
        assert!(!out.contains("Bob"));
    }

    #[test]
    fn class_blocks_and_relationships() {
        let mut store = EntityStore::new();
        store.set_kind(DiagramKind::Class);
        let classes = store.class_mut();
        let animal = classes.add_class("Animal", true).unwrap();
        let dog = classes.add_class("Dog", false).unwrap();
        classes
            .add_attribute(
                animal,
                ClassAttribute {
                    name: "name".to_string(),
                    visibility: Visibility::Protected,
                    type_name: "String".to_string(),
                    is_static: false,
                },
            )
            .unwrap();
        classes
            .add_attribute(
                animal,
                ClassAttribute {
                    name: "count".to_string(),
                    visibility: Visibility::Private,
                    type_name: "int".to_string(),
                    is_static: true,
                },
            )
            .unwrap();
        classes
            .add_method(
                animal,
                ClassMethod {
                    name: "speak".to_string(),
                    return_type: "void".to_string(),
                    is_abstract: true,
                    ..Default::default()
                },
            )
            .unwrap();
        classes
            .add_method(
                dog,
                ClassMethod {
                    name: "create".to_string(),
                    visibility: Visibility::Package,
                    parameters: "name: String".to_string(),
                    return_type: "Dog".to_string(),
                    is_static: true,
                    ..Default::default()
                },
            )
            .unwrap();
        classes
            .add_relationship(Some(dog), Some(animal), ClassRelationKind::Inheritance, "")
            .unwrap();
        classes
            .add_relationship(Some(dog), Some(animal), ClassRelationKind::Aggregation, "pack")
            .unwrap();

        let expected = format!(
            "{HEADER}abstract class \"Animal\" {{
  # name: String
  - {{static}} count: int
  --
  + {{abstract}} speak(): void
}}
class \"Dog\" {{
  ~ {{static}} create(name: String): Dog
}}

\"Dog\" <|-- \"Animal\"
\"Dog\" o-- \"Animal\" : pack
@enduml
"
        );
        assert_eq!(serialize(&store), expected);
    }

    #[test]
    fn use_case_direction_and_links() {
        let mut store = EntityStore::new();
        store.set_kind(DiagramKind::UseCase);
        store.set_use_case_direction(UseCaseDirection::Horizontal);
        let uc = store.use_case_mut();
        uc.add_actor("Customer").unwrap();
        uc.add_use_case("Place Order").unwrap();
        uc.add_link(None, None).unwrap();

        let expected = format!(
            "{HEADER}left to right direction\nactor \"Customer\"\nusecase \"Place Order\"\n\n\
             \"Customer\" --> \"Place Order\"\n@enduml\n"
        );
        assert_eq!(serialize(&store), expected);

        store.set_use_case_direction(UseCaseDirection::Vertical);
        assert!(serialize(&store).contains("top to bottom direction\n"));
    }

    #[test]
    fn erd_markers_in_fixed_order() {
        let mut store = EntityStore::new();
        store.set_kind(DiagramKind::Erd);
        let erd = store.erd_mut();
        let user = erd.add_entity("User").unwrap();
        let order = erd.add_entity("Order").unwrap();
        erd.add_attribute(
            user,
            ErAttribute {
                name: "id".to_string(),
                type_name: "INT".to_string(),
                is_primary_key: true,
                ..Default::default()
            },
        )
        .unwrap();
        erd.add_attribute(
            order,
            ErAttribute {
                name: "user_id".to_string(),
                type_name: "INT".to_string(),
                is_primary_key: true,
                is_foreign_key: true,
                is_not_null: true,
            },
        )
        .unwrap();
        erd.add_relationship(Some(user), Some(order), ErRelationKind::OneToMany, "places")
            .unwrap();

        let expected = format!(
            "{HEADER}entity \"User\" {{
  id: INT [PK]
}}
entity \"Order\" {{
  user_id: INT [PK] [FK] [NOT NULL]
}}

\"User\" ||--o{{ \"Order\" : places
@enduml
"
        );
        assert_eq!(serialize(&store), expected);
    }

    #[test]
    fn activity_component_state_bodies() {
        let mut store = EntityStore::new();
        store.activity_mut().add_activity("Pick").unwrap();
        store.activity_mut().add_activity("Pack items").unwrap();
        store.activity_mut().add_flow(None, None).unwrap();
        store.component_mut().add_component("Web").unwrap();
        store.component_mut().add_component("Auth Service").unwrap();
        store.component_mut().add_dependency(None, None).unwrap();
        store.state_mut().add_state("Idle").unwrap();
        store.state_mut().add_state("Busy").unwrap();
        store.state_mut().add_transition(None, None, "").unwrap();
        store
            .state_mut()
            .add_transition(Some("Busy"), Some("Idle"), "done")
            .unwrap();

        store.set_kind(DiagramKind::Activity);
        assert_eq!(
            serialize(&store),
            format!(
                "{HEADER}action \"Pick\"\naction \"Pack items\"\n\n\
                 \"Pick\" --> \"Pack items\"\n@enduml\n"
            )
        );

        store.set_kind(DiagramKind::Component);
        assert_eq!(
            serialize(&store),
            format!("{HEADER}[Web]\n[Auth Service]\n\n[Web] --> [Auth Service]\n@enduml\n")
        );

        store.set_kind(DiagramKind::State);
        assert_eq!(
            serialize(&store),
            format!(
                "{HEADER}state \"Idle\"\nstate \"Busy\"\n\n\
                 \"Idle\" --> \"Busy\"\n\"Busy\" --> \"Idle\" : done\n@enduml\n"
            )
        );
    }

    #[test]
    fn serialization_is_deterministic() {
        let mut store = EntityStore::new();
        store.set_kind(DiagramKind::Class);
        store.class_mut().add_class("A", false).unwrap();
        store.class_mut().add_class("B", true).unwrap();
        store
            .class_mut()
            .add_relationship(None, None, ClassRelationKind::Composition, "")
            .unwrap();
        assert_eq!(serialize(&store), serialize(&store));
    }

    #[test]
    fn names_with_quotes_stay_on_one_token() {
        let mut store = EntityStore::new();
        store.set_kind(DiagramKind::State);
        store.state_mut().add_state("say \"hi\"").unwrap();
        store.state_mut().add_state("two\nlines").unwrap();
        store.state_mut().add_transition(None, None, "").unwrap();
        let out = serialize(&store);
        assert!(out.contains("\"say 'hi'\" --> \"two\\nlines\"\n"));

        // Would print as the same state.
        assert!(store.state_mut().add_state("say 'hi'").is_err());
        assert_eq!(store.state().states().len(), 2);
    }
}
