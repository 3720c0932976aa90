use log::debug;

use super::rules::{self, ChangeLog};
use super::types::{Collection, Id, UseCaseLink};
use crate::error::EditError;

/// Use-case actors, use cases, and the links from actors to use cases.
#[derive(Debug, Default, Clone)]
pub struct UseCaseDiagram {
    actors: Vec<String>,
    use_cases: Vec<String>,
    links: Vec<UseCaseLink>,
    pub(crate) changes: ChangeLog,
}

impl UseCaseDiagram {
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn use_cases(&self) -> &[String] {
        &self.use_cases
    }

    pub fn links(&self) -> &[UseCaseLink] {
        &self.links
    }

    pub fn add_actor(&mut self, name: &str) -> Result<(), EditError> {
        let name = rules::new_name(
            self.actors.iter().map(String::as_str),
            name,
            Collection::UseCaseActors,
        )?;
        rules::distinct_from(
            self.use_cases.iter().map(String::as_str),
            &name,
            Collection::UseCaseActors,
            Collection::UseCases,
        )?;
        rules::distinct_from(
            self.actors.iter().map(String::as_str),
            &name,
            Collection::UseCases,
            Collection::UseCaseActors,
        )?;
        debug!("adding use-case actor '{}'", name);
        self.actors.push(name);
        self.changes.record(&[Collection::UseCaseActors]);
        Ok(())
    }

    pub fn remove_actor(&mut self, name: &str) -> bool {
        let before = self.actors.len();
        self.actors.retain(|a| a != name);
        if self.actors.len() == before {
            return false;
        }
        self.links.retain(|l| l.actor != name);
        self.changes.record(&[Collection::UseCaseActors, Collection::UseCaseLinks]);
        true
    }

    pub fn add_use_case(&mut self, name: &str) -> Result<(), EditError> {
        let name = rules::new_name(
            self.use_cases.iter().map(String::as_str),
            name,
            Collection::UseCases,
        )?;
        rules::distinct_from(
            self.actors.iter().map(String::as_str),
            &name,
            Collection::UseCases,
            Collection::UseCaseActors,
        )?;
        debug!("adding use case '{}'", name);
        self.use_cases.push(name);
        self.changes.record(&[Collection::UseCases]);
        Ok(())
    }

    pub fn remove_use_case(&mut self, name: &str) -> bool {
        let before = self.use_cases.len();
        self.use_cases.retain(|u| u != name);
        if self.use_cases.len() == before {
            return false;
        }
        self.links.retain(|l| l.use_case != name);
        self.changes.record(&[Collection::UseCases, Collection::UseCaseLinks]);
        true
    }

    /// Links an actor to a use case, defaulting to the first of each.
    pub fn add_link(
        &mut self,
        actor: Option<&str>,
        use_case: Option<&str>,
    ) -> Result<Id, EditError> {
        rules::require_nodes(self.actors.len(), 1, Collection::UseCaseActors)?;
        rules::require_nodes(self.use_cases.len(), 1, Collection::UseCases)?;
        let actor = rules::named_endpoint(&self.actors, actor, 0, Collection::UseCaseActors)?;
        let use_case = rules::named_endpoint(&self.use_cases, use_case, 0, Collection::UseCases)?;

        let id = Id::new();
        self.links.push(UseCaseLink { id, actor, use_case });
        self.changes.record(&[Collection::UseCaseLinks]);
        Ok(id)
    }

    pub fn remove_link(&mut self, id: Id) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        let removed = self.links.len() != before;
        if removed {
            self.changes.record(&[Collection::UseCaseLinks]);
        }
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.use_cases.is_empty() && self.links.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.actors.clear();
        self.use_cases.clear();
        self.links.clear();
        self.changes.record(&[
            Collection::UseCaseActors,
            Collection::UseCases,
            Collection::UseCaseLinks,
        ]);
    }
}
