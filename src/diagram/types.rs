use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

/// Opaque record identifier, compared only for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(Uuid);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The seven supported diagram kinds. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    #[default]
    Sequence,
    Class,
    #[serde(alias = "use-case", alias = "use_case")]
    UseCase,
    #[serde(alias = "er", alias = "entity-relationship")]
    Erd,
    Activity,
    Component,
    #[serde(alias = "state-machine", alias = "statemachine")]
    State,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 7] = [
        DiagramKind::Sequence,
        DiagramKind::Class,
        DiagramKind::UseCase,
        DiagramKind::Erd,
        DiagramKind::Activity,
        DiagramKind::Component,
        DiagramKind::State,
    ];

    /// Short name used in generated file names.
    pub fn slug(self) -> &'static str {
        match self {
            DiagramKind::Sequence => "sequence",
            DiagramKind::Class => "class",
            DiagramKind::UseCase => "usecase",
            DiagramKind::Erd => "erd",
            DiagramKind::Activity => "activity",
            DiagramKind::Component => "component",
            DiagramKind::State => "state",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "sequence" => Ok(DiagramKind::Sequence),
            "class" => Ok(DiagramKind::Class),
            "usecase" => Ok(DiagramKind::UseCase),
            "erd" | "er" | "entityrelationship" => Ok(DiagramKind::Erd),
            "activity" => Ok(DiagramKind::Activity),
            "component" => Ok(DiagramKind::Component),
            "state" | "statemachine" => Ok(DiagramKind::State),
            _ => Err(format!("Unknown diagram kind '{}'", s)),
        }
    }
}

/// Every collection in the store. Used for change notifications and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Actors,
    Messages,
    Classes,
    ClassAttributes,
    ClassMethods,
    ClassRelationships,
    UseCaseActors,
    UseCases,
    UseCaseLinks,
    Entities,
    EntityAttributes,
    ErRelationships,
    Activities,
    ActivityFlows,
    Components,
    ComponentDependencies,
    States,
    StateTransitions,
    Style,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Actors => "actors",
            Collection::Messages => "messages",
            Collection::Classes => "classes",
            Collection::ClassAttributes => "class attributes",
            Collection::ClassMethods => "class methods",
            Collection::ClassRelationships => "class relationships",
            Collection::UseCaseActors => "use-case actors",
            Collection::UseCases => "use cases",
            Collection::UseCaseLinks => "use-case links",
            Collection::Entities => "entities",
            Collection::EntityAttributes => "entity attributes",
            Collection::ErRelationships => "ER relationships",
            Collection::Activities => "activities",
            Collection::ActivityFlows => "activity flows",
            Collection::Components => "components",
            Collection::ComponentDependencies => "component dependencies",
            Collection::States => "states",
            Collection::StateTransitions => "state transitions",
            Collection::Style => "style",
        };
        f.write_str(name)
    }
}

// ============================================
// Sequence Diagram Types
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ArrowKind {
    #[default]
    #[serde(rename = "->", alias = "sync")]
    Sync,
    #[serde(rename = "-->", alias = "reply")]
    Reply,
    #[serde(rename = "->>", alias = "async")]
    Async,
}

impl ArrowKind {
    pub fn symbol(self) -> &'static str {
        match self {
            ArrowKind::Sync => "->",
            ArrowKind::Reply => "-->",
            ArrowKind::Async => "->>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Id,
    pub from: String,
    pub to: String,
    pub arrow: ArrowKind,
    pub text: String,
}

// ============================================
// Class Diagram Types
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Visibility {
    #[default]
    #[serde(rename = "+", alias = "public")]
    Public,
    #[serde(rename = "-", alias = "private")]
    Private,
    #[serde(rename = "#", alias = "protected")]
    Protected,
    #[serde(rename = "~", alias = "package")]
    Package,
}

impl Visibility {
    pub fn symbol(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ClassAttribute {
    pub name: String,
    pub visibility: Visibility,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ClassMethod {
    pub name: String,
    pub visibility: Visibility,
    pub return_type: String,
    /// Free-form parameter list, emitted verbatim between the parentheses.
    pub parameters: String,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub id: Id,
    pub name: String,
    pub is_abstract: bool,
    pub attributes: Vec<ClassAttribute>,
    pub methods: Vec<ClassMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassRelationKind {
    #[default]
    Inheritance,
    Composition,
    Aggregation,
    Association,
}

impl ClassRelationKind {
    pub fn symbol(self) -> &'static str {
        match self {
            ClassRelationKind::Inheritance => "<|--",
            ClassRelationKind::Composition => "*--",
            ClassRelationKind::Aggregation => "o--",
            ClassRelationKind::Association => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRelationship {
    pub id: Id,
    pub from: Id,
    pub to: Id,
    pub kind: ClassRelationKind,
    pub label: String,
}

// ============================================
// Use Case Diagram Types
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCaseDirection {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseCaseLink {
    pub id: Id,
    pub actor: String,
    pub use_case: String,
}

// ============================================
// ER Diagram Types
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ErAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "pk")]
    pub is_primary_key: bool,
    #[serde(rename = "fk")]
    pub is_foreign_key: bool,
    #[serde(rename = "not_null")]
    pub is_not_null: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErEntity {
    pub id: Id,
    pub name: String,
    pub attributes: Vec<ErAttribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErRelationKind {
    OneToOne,
    #[default]
    OneToMany,
    ManyToMany,
}

impl ErRelationKind {
    pub fn symbol(self) -> &'static str {
        match self {
            ErRelationKind::OneToOne => "||--||",
            ErRelationKind::OneToMany => "||--o{",
            ErRelationKind::ManyToMany => "}o--o{",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErRelationship {
    pub id: Id,
    pub from: Id,
    pub to: Id,
    pub kind: ErRelationKind,
    pub label: String,
}

// ============================================
// Activity / Component / State Types
// ============================================

/// A directed edge between two name-keyed nodes (activity flows, component dependencies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Id,
    pub from: String,
    pub to: String,
}

impl Link {
    pub(crate) fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub id: Id,
    pub from: String,
    pub to: String,
    pub event: String,
}
