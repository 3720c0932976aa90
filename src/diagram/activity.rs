use super::graph::NamedGraph;
use super::rules::ChangeLog;
use super::types::{Collection, Id, Link};
use crate::error::EditError;

#[derive(Debug, Clone)]
pub struct ActivityDiagram {
    graph: NamedGraph,
    pub(crate) changes: ChangeLog,
}

impl Default for ActivityDiagram {
    fn default() -> Self {
        Self {
            graph: NamedGraph::new(Collection::Activities, Collection::ActivityFlows),
            changes: ChangeLog::default(),
        }
    }
}

impl ActivityDiagram {
    pub fn activities(&self) -> &[String] {
        self.graph.nodes()
    }

    pub fn flows(&self) -> &[Link] {
        self.graph.links()
    }

    pub fn add_activity(&mut self, name: &str) -> Result<(), EditError> {
        self.graph.add_node(name, &mut self.changes)
    }

    /// Removes the activity together with every flow entering or leaving it.
    pub fn remove_activity(&mut self, name: &str) -> bool {
        self.graph.remove_node(name, &mut self.changes)
    }

    pub fn add_flow(&mut self, from: Option<&str>, to: Option<&str>) -> Result<Id, EditError> {
        self.graph.add_link(from, to, &mut self.changes)
    }

    pub fn remove_flow(&mut self, id: Id) -> bool {
        self.graph.remove_link(id, &mut self.changes)
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.graph.clear(&mut self.changes);
    }
}
