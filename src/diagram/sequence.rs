use log::debug;

use super::rules::{self, ChangeLog};
use super::types::{ArrowKind, Collection, Id, Message};
use crate::error::EditError;

/// Actors and the messages exchanged between them.
#[derive(Debug, Default, Clone)]
pub struct SequenceDiagram {
    actors: Vec<String>,
    messages: Vec<Message>,
    pub(crate) changes: ChangeLog,
}

impl SequenceDiagram {
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: Id) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn add_actor(&mut self, name: &str) -> Result<(), EditError> {
        let name = rules::new_name(
            self.actors.iter().map(String::as_str),
            name,
            Collection::Actors,
        )?;
        debug!("adding actor '{}'", name);
        self.actors.push(name);
        self.changes.record(&[Collection::Actors]);
        Ok(())
    }

    /// Removes the actor and every message sent from or to it.
    pub fn remove_actor(&mut self, name: &str) -> bool {
        let before = self.actors.len();
        self.actors.retain(|a| a != name);
        if self.actors.len() == before {
            return false;
        }
        self.messages.retain(|m| m.from != name && m.to != name);
        debug!("removed actor '{}'", name);
        self.changes.record(&[Collection::Actors, Collection::Messages]);
        true
    }

    /// Appends a message. Missing endpoints default to the first and second actor.
    pub fn add_message(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
        arrow: ArrowKind,
        text: &str,
    ) -> Result<Id, EditError> {
        rules::require_nodes(self.actors.len(), 2, Collection::Actors)?;
        let from = rules::named_endpoint(&self.actors, from, 0, Collection::Actors)?;
        let to = rules::named_endpoint(&self.actors, to, 1, Collection::Actors)?;

        let id = Id::new();
        debug!("adding message {} {} {}", from, arrow.symbol(), to);
        self.messages.push(Message {
            id,
            from,
            to,
            arrow,
            text: text.to_string(),
        });
        self.changes.record(&[Collection::Messages]);
        Ok(id)
    }

    pub fn remove_message(&mut self, id: Id) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        let removed = self.messages.len() != before;
        if removed {
            self.changes.record(&[Collection::Messages]);
        }
        removed
    }

    pub fn retarget_message(&mut self, id: Id, from: &str, to: &str) -> Result<(), EditError> {
        let from = rules::named_endpoint(&self.actors, Some(from), 0, Collection::Actors)?;
        let to = rules::named_endpoint(&self.actors, Some(to), 1, Collection::Actors)?;
        let message = self.message_mut(id)?;
        message.from = from;
        message.to = to;
        self.changes.record(&[Collection::Messages]);
        Ok(())
    }

    pub fn set_message_arrow(&mut self, id: Id, arrow: ArrowKind) -> Result<(), EditError> {
        self.message_mut(id)?.arrow = arrow;
        self.changes.record(&[Collection::Messages]);
        Ok(())
    }

    pub fn set_message_text(&mut self, id: Id, text: &str) -> Result<(), EditError> {
        self.message_mut(id)?.text = text.to_string();
        self.changes.record(&[Collection::Messages]);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.messages.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.actors.clear();
        self.messages.clear();
        self.changes.record(&[Collection::Actors, Collection::Messages]);
    }

    fn message_mut(&mut self, id: Id) -> Result<&mut Message, EditError> {
        self.messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| rules::unknown_record(Collection::Messages, id))
    }
}
