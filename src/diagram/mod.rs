mod activity;
mod class;
mod component;
mod erd;
pub mod escape;
mod graph;
pub mod plantuml;
mod rules;
mod sequence;
mod state;
mod store;
mod style;
mod types;
mod usecase;

pub use activity::ActivityDiagram;
pub use class::ClassDiagram;
pub use component::ComponentDiagram;
pub use erd::ErDiagram;
pub use plantuml::serialize;
pub use sequence::SequenceDiagram;
pub use state::StateDiagram;
pub use store::EntityStore;
pub use style::{Style, StyleOverrides, parse_color};
pub use types::*;
pub use usecase::UseCaseDiagram;
