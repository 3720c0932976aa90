//! Declarative diagram documents, replayed through the store's edit operations.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::diagram::{
    ArrowKind, ClassAttribute, ClassMethod, ClassRelationKind, Collection, DiagramKind,
    EntityStore, ErAttribute, ErRelationKind, Id, StyleOverrides,
};
use crate::error::{DocumentError, EditError};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Document {
    pub kind: DiagramKind,
    pub style: StyleOverrides,
    pub sequence: SequenceSection,
    pub class: ClassSection,
    #[serde(alias = "use_case")]
    pub usecase: UseCaseSection,
    #[serde(alias = "er")]
    pub erd: ErdSection,
    pub activity: ActivitySection,
    pub component: ComponentSection,
    pub state: StateSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SequenceSection {
    pub actors: Vec<String>,
    pub messages: Vec<MessageSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageSpec {
    pub from: Option<String>,
    pub to: Option<String>,
    pub arrow: ArrowKind,
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClassSection {
    pub classes: Vec<ClassSpec>,
    pub relationships: Vec<RelationSpec<ClassRelationKind>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClassSpec {
    pub name: String,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub attributes: Vec<ClassAttribute>,
    pub methods: Vec<ClassMethod>,
}

/// A relationship whose endpoints are given by node name.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RelationSpec<K: Default> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub kind: K,
    pub label: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UseCaseSection {
    pub actors: Vec<String>,
    pub use_cases: Vec<String>,
    pub links: Vec<LinkSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinkSpec {
    pub actor: Option<String>,
    pub use_case: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErdSection {
    pub entities: Vec<EntitySpec>,
    pub relationships: Vec<RelationSpec<ErRelationKind>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntitySpec {
    pub name: String,
    pub attributes: Vec<ErAttribute>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EdgeSpec {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivitySection {
    pub activities: Vec<String>,
    pub flows: Vec<EdgeSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComponentSection {
    pub components: Vec<String>,
    pub dependencies: Vec<EdgeSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StateSection {
    pub states: Vec<String>,
    pub transitions: Vec<TransitionSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransitionSpec {
    pub from: Option<String>,
    pub to: Option<String>,
    pub event: String,
}

fn context(what: impl Into<String>) -> impl FnOnce(EditError) -> DocumentError {
    let context = what.into();
    move |source| DocumentError::Edit { context, source }
}

fn class_id(store: &EntityStore, name: Option<&str>) -> Result<Option<Id>, EditError> {
    name.map(|name| {
        store
            .class()
            .class_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| EditError::UnknownEndpoint {
                collection: Collection::Classes,
                name: name.to_string(),
            })
    })
    .transpose()
}

fn entity_id(store: &EntityStore, name: Option<&str>) -> Result<Option<Id>, EditError> {
    name.map(|name| {
        store
            .erd()
            .entity_by_name(name)
            .map(|e| e.id)
            .ok_or_else(|| EditError::UnknownEndpoint {
                collection: Collection::Entities,
                name: name.to_string(),
            })
    })
    .transpose()
}

impl Document {
    pub fn from_toml(content: &str) -> Result<Self, DocumentError> {
        toml::from_str(content).map_err(|e| DocumentError::Parse(format!("TOML: {}", e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self, DocumentError> {
        serde_yaml::from_str(content).map_err(|e| DocumentError::Parse(format!("YAML: {}", e)))
    }

    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(content).map_err(|e| DocumentError::Parse(format!("JSON: {}", e)))
    }

    /// Reads a document, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("toml") => Self::from_toml(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            // Try TOML first, then YAML
            _ => Self::from_toml(&content).or_else(|_| Self::from_yaml(&content)),
        }
    }

    /// Replays the document into `store`, stopping at the first rejected edit.
    pub fn apply(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        self.apply_style(store)?;
        self.apply_sequence(store)?;
        self.apply_class(store)?;
        self.apply_use_case(store)?;
        self.apply_erd(store)?;
        self.apply_activity(store)?;
        self.apply_component(store)?;
        self.apply_state(store)?;
        store.set_kind(self.kind);
        debug!("document applied, active kind {}", self.kind);
        Ok(())
    }

    /// Only the fields the document names replace what the store already has.
    fn apply_style(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        let style = &self.style;
        if let Some(color) = &style.background_color {
            store
                .set_background_color(color)
                .map_err(context("style background_color"))?;
        }
        if let Some(color) = &style.text_color {
            store
                .set_text_color(color)
                .map_err(context("style text_color"))?;
        }
        if let Some(color) = &style.primary_color {
            store
                .set_primary_color(color)
                .map_err(context("style primary_color"))?;
        }
        if let Some(direction) = style.use_case_direction {
            store.set_use_case_direction(direction);
        }
        Ok(())
    }

    fn apply_sequence(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        let seq = store.sequence_mut();
        for actor in &self.sequence.actors {
            seq.add_actor(actor)
                .map_err(context(format!("sequence actor '{}'", actor)))?;
        }
        for (i, msg) in self.sequence.messages.iter().enumerate() {
            seq.add_message(msg.from.as_deref(), msg.to.as_deref(), msg.arrow, &msg.text)
                .map_err(context(format!("sequence message #{}", i + 1)))?;
        }
        Ok(())
    }

    fn apply_class(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        for spec in &self.class.classes {
            let what = format!("class '{}'", spec.name);
            let classes = store.class_mut();
            let id = classes
                .add_class(&spec.name, spec.is_abstract)
                .map_err(context(what.clone()))?;
            for attribute in &spec.attributes {
                classes
                    .add_attribute(id, attribute.clone())
                    .map_err(context(format!("{} attribute '{}'", what, attribute.name)))?;
            }
            for method in &spec.methods {
                classes
                    .add_method(id, method.clone())
                    .map_err(context(format!("{} method '{}'", what, method.name)))?;
            }
        }
        for (i, rel) in self.class.relationships.iter().enumerate() {
            let what = format!("class relationship #{}", i + 1);
            let from = class_id(store, rel.from.as_deref()).map_err(context(what.clone()))?;
            let to = class_id(store, rel.to.as_deref()).map_err(context(what.clone()))?;
            store
                .class_mut()
                .add_relationship(from, to, rel.kind, &rel.label)
                .map_err(context(what))?;
        }
        Ok(())
    }

    fn apply_use_case(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        let uc = store.use_case_mut();
        for actor in &self.usecase.actors {
            uc.add_actor(actor)
                .map_err(context(format!("use-case actor '{}'", actor)))?;
        }
        for use_case in &self.usecase.use_cases {
            uc.add_use_case(use_case)
                .map_err(context(format!("use case '{}'", use_case)))?;
        }
        for (i, link) in self.usecase.links.iter().enumerate() {
            uc.add_link(link.actor.as_deref(), link.use_case.as_deref())
                .map_err(context(format!("use-case link #{}", i + 1)))?;
        }
        Ok(())
    }

    fn apply_erd(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        for spec in &self.erd.entities {
            let what = format!("entity '{}'", spec.name);
            let erd = store.erd_mut();
            let id = erd.add_entity(&spec.name).map_err(context(what.clone()))?;
            for attribute in &spec.attributes {
                erd.add_attribute(id, attribute.clone())
                    .map_err(context(format!("{} attribute '{}'", what, attribute.name)))?;
            }
        }
        for (i, rel) in self.erd.relationships.iter().enumerate() {
            let what = format!("ER relationship #{}", i + 1);
            let from = entity_id(store, rel.from.as_deref()).map_err(context(what.clone()))?;
            let to = entity_id(store, rel.to.as_deref()).map_err(context(what.clone()))?;
            store
                .erd_mut()
                .add_relationship(from, to, rel.kind, &rel.label)
                .map_err(context(what))?;
        }
        Ok(())
    }

    fn apply_activity(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        let activity = store.activity_mut();
        for name in &self.activity.activities {
            activity
                .add_activity(name)
                .map_err(context(format!("activity '{}'", name)))?;
        }
        for (i, flow) in self.activity.flows.iter().enumerate() {
            activity
                .add_flow(flow.from.as_deref(), flow.to.as_deref())
                .map_err(context(format!("activity flow #{}", i + 1)))?;
        }
        Ok(())
    }

    fn apply_component(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        let component = store.component_mut();
        for name in &self.component.components {
            component
                .add_component(name)
                .map_err(context(format!("component '{}'", name)))?;
        }
        for (i, dep) in self.component.dependencies.iter().enumerate() {
            component
                .add_dependency(dep.from.as_deref(), dep.to.as_deref())
                .map_err(context(format!("component dependency #{}", i + 1)))?;
        }
        Ok(())
    }

    fn apply_state(&self, store: &mut EntityStore) -> Result<(), DocumentError> {
        let state = store.state_mut();
        for name in &self.state.states {
            state
                .add_state(name)
                .map_err(context(format!("state '{}'", name)))?;
        }
        for (i, t) in self.state.transitions.iter().enumerate() {
            state
                .add_transition(t.from.as_deref(), t.to.as_deref(), &t.event)
                .map_err(context(format!("state transition #{}", i + 1)))?;
        }
        Ok(())
    }
}
