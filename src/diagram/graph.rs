use log::debug;

use super::rules::{self, ChangeLog};
use super::types::{Collection, Id, Link};
use crate::error::EditError;

/// Name-keyed nodes joined by directed links. Parallel links are allowed.
#[derive(Debug, Clone)]
pub(crate) struct NamedGraph {
    nodes: Vec<String>,
    links: Vec<Link>,
    node_kind: Collection,
    link_kind: Collection,
}

impl NamedGraph {
    pub(crate) fn new(node_kind: Collection, link_kind: Collection) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            node_kind,
            link_kind,
        }
    }

    pub(crate) fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub(crate) fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn add_node(
        &mut self,
        name: &str,
        changes: &mut ChangeLog,
    ) -> Result<(), EditError> {
        let name = rules::new_name(self.nodes.iter().map(String::as_str), name, self.node_kind)?;
        debug!("adding {} node '{}'", self.node_kind, name);
        self.nodes.push(name);
        changes.record(&[self.node_kind]);
        Ok(())
    }

    pub(crate) fn remove_node(&mut self, name: &str, changes: &mut ChangeLog) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n != name);
        if self.nodes.len() == before {
            return false;
        }
        self.links.retain(|l| !l.touches(name));
        changes.record(&[self.node_kind, self.link_kind]);
        true
    }

    pub(crate) fn add_link(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
        changes: &mut ChangeLog,
    ) -> Result<Id, EditError> {
        rules::require_nodes(self.nodes.len(), 2, self.node_kind)?;
        let from = rules::named_endpoint(&self.nodes, from, 0, self.node_kind)?;
        let to = rules::named_endpoint(&self.nodes, to, 1, self.node_kind)?;

        let id = Id::new();
        self.links.push(Link { id, from, to });
        changes.record(&[self.link_kind]);
        Ok(id)
    }

    pub(crate) fn remove_link(&mut self, id: Id, changes: &mut ChangeLog) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        let removed = self.links.len() != before;
        if removed {
            changes.record(&[self.link_kind]);
        }
        removed
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub(crate) fn clear(&mut self, changes: &mut ChangeLog) {
        self.nodes.clear();
        self.links.clear();
        changes.record(&[self.node_kind, self.link_kind]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_links_and_parallel_links_are_kept() {
        let mut changes = ChangeLog::default();
        let mut graph = NamedGraph::new(Collection::Activities, Collection::ActivityFlows);
        graph.add_node("A", &mut changes).unwrap();
        graph.add_node("B", &mut changes).unwrap();

        graph.add_link(Some("A"), Some("A"), &mut changes).unwrap();
        graph.add_link(None, None, &mut changes).unwrap();
        graph.add_link(None, None, &mut changes).unwrap();
        assert_eq!(graph.links().len(), 3);

        graph.remove_node("A", &mut changes);
        assert!(graph.links().is_empty());
    }
}
