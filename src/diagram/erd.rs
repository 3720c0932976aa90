use log::debug;

use super::rules::{self, ChangeLog};
use super::types::{Collection, ErAttribute, ErEntity, ErRelationKind, ErRelationship, Id};
use crate::error::EditError;

/// Entities with typed attributes, and the cardinality relationships between them.
#[derive(Debug, Default, Clone)]
pub struct ErDiagram {
    entities: Vec<ErEntity>,
    relationships: Vec<ErRelationship>,
    pub(crate) changes: ChangeLog,
}

impl ErDiagram {
    pub fn entities(&self) -> &[ErEntity] {
        &self.entities
    }

    pub fn relationships(&self) -> &[ErRelationship] {
        &self.relationships
    }

    pub fn entity(&self, id: Id) -> Option<&ErEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&ErEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn add_entity(&mut self, name: &str) -> Result<Id, EditError> {
        let name = rules::new_name(
            self.entities.iter().map(|e| e.name.as_str()),
            name,
            Collection::Entities,
        )?;
        let id = Id::new();
        debug!("adding entity '{}' ({})", name, id);
        self.entities.push(ErEntity {
            id,
            name,
            attributes: Vec::new(),
        });
        self.changes.record(&[Collection::Entities]);
        Ok(id)
    }

    pub fn remove_entity(&mut self, id: Id) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        if self.entities.len() == before {
            return false;
        }
        self.relationships.retain(|r| r.from != id && r.to != id);
        self.changes.record(&[Collection::Entities, Collection::ErRelationships]);
        true
    }

    pub fn add_attribute(&mut self, entity: Id, attribute: ErAttribute) -> Result<(), EditError> {
        let name = rules::member_name(&attribute.name, Collection::EntityAttributes)?;
        let attribute = ErAttribute { name, ..attribute };
        self.entity_mut(entity)?.attributes.push(attribute);
        self.changes.record(&[Collection::EntityAttributes]);
        Ok(())
    }

    pub fn remove_attribute(&mut self, entity: Id, index: usize) -> Result<ErAttribute, EditError> {
        let attributes = &mut self.entity_mut(entity)?.attributes;
        rules::check_index(index, attributes.len(), Collection::EntityAttributes)?;
        let removed = attributes.remove(index);
        self.changes.record(&[Collection::EntityAttributes]);
        Ok(removed)
    }

    /// Appends a relationship, defaulting to the first two entities.
    /// The same (from, to, kind) triple may exist only once.
    pub fn add_relationship(
        &mut self,
        from: Option<Id>,
        to: Option<Id>,
        kind: ErRelationKind,
        label: &str,
    ) -> Result<Id, EditError> {
        let ids: Vec<Id> = self.entities.iter().map(|e| e.id).collect();
        rules::require_nodes(ids.len(), 2, Collection::Entities)?;
        let from = rules::id_endpoint(&ids, from, 0, Collection::Entities)?;
        let to = rules::id_endpoint(&ids, to, 1, Collection::Entities)?;
        self.ensure_unique(None, from, to, kind)?;

        let id = Id::new();
        self.relationships.push(ErRelationship {
            id,
            from,
            to,
            kind,
            label: label.to_string(),
        });
        self.changes.record(&[Collection::ErRelationships]);
        Ok(id)
    }

    pub fn remove_relationship(&mut self, id: Id) -> bool {
        let before = self.relationships.len();
        self.relationships.retain(|r| r.id != id);
        let removed = self.relationships.len() != before;
        if removed {
            self.changes.record(&[Collection::ErRelationships]);
        }
        removed
    }

    pub fn set_relationship_kind(&mut self, id: Id, kind: ErRelationKind) -> Result<(), EditError> {
        let (from, to) = {
            let rel = self.relationship_mut(id)?;
            (rel.from, rel.to)
        };
        self.ensure_unique(Some(id), from, to, kind)?;
        self.relationship_mut(id)?.kind = kind;
        self.changes.record(&[Collection::ErRelationships]);
        Ok(())
    }

    pub fn retarget_relationship(&mut self, id: Id, from: Id, to: Id) -> Result<(), EditError> {
        let ids: Vec<Id> = self.entities.iter().map(|e| e.id).collect();
        let from = rules::id_endpoint(&ids, Some(from), 0, Collection::Entities)?;
        let to = rules::id_endpoint(&ids, Some(to), 1, Collection::Entities)?;
        let kind = self.relationship_mut(id)?.kind;
        self.ensure_unique(Some(id), from, to, kind)?;

        let rel = self.relationship_mut(id)?;
        rel.from = from;
        rel.to = to;
        self.changes.record(&[Collection::ErRelationships]);
        Ok(())
    }

    pub fn set_relationship_label(&mut self, id: Id, label: &str) -> Result<(), EditError> {
        self.relationship_mut(id)?.label = label.to_string();
        self.changes.record(&[Collection::ErRelationships]);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entities.clear();
        self.relationships.clear();
        self.changes.record(&[Collection::Entities, Collection::ErRelationships]);
    }

    fn ensure_unique(
        &self,
        skip: Option<Id>,
        from: Id,
        to: Id,
        kind: ErRelationKind,
    ) -> Result<(), EditError> {
        if self
            .relationships
            .iter()
            .any(|r| Some(r.id) != skip && r.from == from && r.to == to && r.kind == kind)
        {
            return Err(rules::duplicate_edge(Collection::ErRelationships));
        }
        Ok(())
    }

    fn entity_mut(&mut self, id: Id) -> Result<&mut ErEntity, EditError> {
        self.entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| rules::unknown_record(Collection::Entities, id))
    }

    fn relationship_mut(&mut self, id: Id) -> Result<&mut ErRelationship, EditError> {
        self.relationships
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| rules::unknown_record(Collection::ErRelationships, id))
    }
}
