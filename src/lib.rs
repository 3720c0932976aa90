//! Form-driven UML diagram model with deterministic PlantUML generation.
//!
//! The [`diagram::EntityStore`] holds one independent partition per diagram
//! kind. [`diagram::serialize`] turns the active partition into PlantUML
//! text, and a [`gateway::RenderGateway`] turns that text into an SVG.

pub mod config;
pub mod diagram;
pub mod document;
pub mod error;
pub mod export;
pub mod gateway;
pub mod session;

pub use config::Config;
pub use diagram::{DiagramKind, EntityStore, serialize};
pub use document::Document;
pub use session::{RenderedDiagram, Session};
