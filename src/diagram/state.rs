use log::debug;

use super::rules::{self, ChangeLog};
use super::types::{Collection, Id, StateTransition};
use crate::error::EditError;

/// States and the event-labelled transitions between them.
#[derive(Debug, Default, Clone)]
pub struct StateDiagram {
    states: Vec<String>,
    transitions: Vec<StateTransition>,
    pub(crate) changes: ChangeLog,
}

impl StateDiagram {
    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn add_state(&mut self, name: &str) -> Result<(), EditError> {
        let name = rules::new_name(
            self.states.iter().map(String::as_str),
            name,
            Collection::States,
        )?;
        debug!("adding state '{}'", name);
        self.states.push(name);
        self.changes.record(&[Collection::States]);
        Ok(())
    }

    pub fn remove_state(&mut self, name: &str) -> bool {
        let before = self.states.len();
        self.states.retain(|s| s != name);
        if self.states.len() == before {
            return false;
        }
        self.transitions.retain(|t| t.from != name && t.to != name);
        self.changes.record(&[Collection::States, Collection::StateTransitions]);
        true
    }

    pub fn add_transition(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
        event: &str,
    ) -> Result<Id, EditError> {
        rules::require_nodes(self.states.len(), 2, Collection::States)?;
        let from = rules::named_endpoint(&self.states, from, 0, Collection::States)?;
        let to = rules::named_endpoint(&self.states, to, 1, Collection::States)?;

        let id = Id::new();
        self.transitions.push(StateTransition {
            id,
            from,
            to,
            event: event.to_string(),
        });
        self.changes.record(&[Collection::StateTransitions]);
        Ok(id)
    }

    pub fn remove_transition(&mut self, id: Id) -> bool {
        let before = self.transitions.len();
        self.transitions.retain(|t| t.id != id);
        let removed = self.transitions.len() != before;
        if removed {
            self.changes.record(&[Collection::StateTransitions]);
        }
        removed
    }

    pub fn set_event(&mut self, id: Id, event: &str) -> Result<(), EditError> {
        let transition = self
            .transitions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| rules::unknown_record(Collection::StateTransitions, id))?;
        transition.event = event.to_string();
        self.changes.record(&[Collection::StateTransitions]);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.transitions.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
        self.transitions.clear();
        self.changes.record(&[Collection::States, Collection::StateTransitions]);
    }
}
