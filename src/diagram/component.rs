use super::graph::NamedGraph;
use super::rules::ChangeLog;
use super::types::{Collection, Id, Link};
use crate::error::EditError;

#[derive(Debug, Clone)]
pub struct ComponentDiagram {
    graph: NamedGraph,
    pub(crate) changes: ChangeLog,
}

impl Default for ComponentDiagram {
    fn default() -> Self {
        Self {
            graph: NamedGraph::new(Collection::Components, Collection::ComponentDependencies),
            changes: ChangeLog::default(),
        }
    }
}

impl ComponentDiagram {
    pub fn components(&self) -> &[String] {
        self.graph.nodes()
    }

    pub fn dependencies(&self) -> &[Link] {
        self.graph.links()
    }

    pub fn add_component(&mut self, name: &str) -> Result<(), EditError> {
        self.graph.add_node(name, &mut self.changes)
    }

    pub fn remove_component(&mut self, name: &str) -> bool {
        self.graph.remove_node(name, &mut self.changes)
    }

    pub fn add_dependency(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Id, EditError> {
        self.graph.add_link(from, to, &mut self.changes)
    }

    pub fn remove_dependency(&mut self, id: Id) -> bool {
        self.graph.remove_link(id, &mut self.changes)
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.graph.clear(&mut self.changes);
    }
}
