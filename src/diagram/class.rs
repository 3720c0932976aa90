use log::debug;

use super::rules::{self, ChangeLog};
use super::types::{
    Class, ClassAttribute, ClassMethod, ClassRelationKind, ClassRelationship, Collection, Id,
};
use crate::error::EditError;

/// Classes with their members, plus the relationships between them.
#[derive(Debug, Default, Clone)]
pub struct ClassDiagram {
    classes: Vec<Class>,
    relationships: Vec<ClassRelationship>,
    pub(crate) changes: ChangeLog,
}

impl ClassDiagram {
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn relationships(&self) -> &[ClassRelationship] {
        &self.relationships
    }

    pub fn class(&self, id: Id) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn add_class(&mut self, name: &str, is_abstract: bool) -> Result<Id, EditError> {
        let name = rules::new_name(
            self.classes.iter().map(|c| c.name.as_str()),
            name,
            Collection::Classes,
        )?;
        let id = Id::new();
        debug!("adding class '{}' ({})", name, id);
        self.classes.push(Class {
            id,
            name,
            is_abstract,
            attributes: Vec::new(),
            methods: Vec::new(),
        });
        self.changes.record(&[Collection::Classes]);
        Ok(id)
    }

    /// Removes the class and every relationship that has it as an endpoint.
    pub fn remove_class(&mut self, id: Id) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != id);
        if self.classes.len() == before {
            return false;
        }
        self.relationships.retain(|r| r.from != id && r.to != id);
        self.changes.record(&[Collection::Classes, Collection::ClassRelationships]);
        true
    }

    pub fn set_abstract(&mut self, id: Id, is_abstract: bool) -> Result<(), EditError> {
        self.class_mut(id)?.is_abstract = is_abstract;
        self.changes.record(&[Collection::Classes]);
        Ok(())
    }

    pub fn add_attribute(&mut self, class: Id, attribute: ClassAttribute) -> Result<(), EditError> {
        let name = rules::member_name(&attribute.name, Collection::ClassAttributes)?;
        let attribute = ClassAttribute { name, ..attribute };
        self.class_mut(class)?.attributes.push(attribute);
        self.changes.record(&[Collection::ClassAttributes]);
        Ok(())
    }

    pub fn remove_attribute(
        &mut self,
        class: Id,
        index: usize,
    ) -> Result<ClassAttribute, EditError> {
        let attributes = &mut self.class_mut(class)?.attributes;
        rules::check_index(index, attributes.len(), Collection::ClassAttributes)?;
        let removed = attributes.remove(index);
        self.changes.record(&[Collection::ClassAttributes]);
        Ok(removed)
    }

    pub fn add_method(&mut self, class: Id, method: ClassMethod) -> Result<(), EditError> {
        let name = rules::member_name(&method.name, Collection::ClassMethods)?;
        let method = ClassMethod { name, ..method };
        self.class_mut(class)?.methods.push(method);
        self.changes.record(&[Collection::ClassMethods]);
        Ok(())
    }

    pub fn remove_method(&mut self, class: Id, index: usize) -> Result<ClassMethod, EditError> {
        let methods = &mut self.class_mut(class)?.methods;
        rules::check_index(index, methods.len(), Collection::ClassMethods)?;
        let removed = methods.remove(index);
        self.changes.record(&[Collection::ClassMethods]);
        Ok(removed)
    }

    /// Appends a relationship. Missing endpoints default to the first and second class.
    /// The same (from, to, kind) triple may exist only once.
    pub fn add_relationship(
        &mut self,
        from: Option<Id>,
        to: Option<Id>,
        kind: ClassRelationKind,
        label: &str,
    ) -> Result<Id, EditError> {
        let ids: Vec<Id> = self.classes.iter().map(|c| c.id).collect();
        rules::require_nodes(ids.len(), 2, Collection::Classes)?;
        let from = rules::id_endpoint(&ids, from, 0, Collection::Classes)?;
        let to = rules::id_endpoint(&ids, to, 1, Collection::Classes)?;
        self.ensure_unique(None, from, to, kind)?;

        let id = Id::new();
        self.relationships.push(ClassRelationship {
            id,
            from,
            to,
            kind,
            label: label.to_string(),
        });
        self.changes.record(&[Collection::ClassRelationships]);
        Ok(id)
    }

    pub fn remove_relationship(&mut self, id: Id) -> bool {
        let before = self.relationships.len();
        self.relationships.retain(|r| r.id != id);
        let removed = self.relationships.len() != before;
        if removed {
            self.changes.record(&[Collection::ClassRelationships]);
        }
        removed
    }

    pub fn set_relationship_kind(
        &mut self,
        id: Id,
        kind: ClassRelationKind,
    ) -> Result<(), EditError> {
        let (from, to) = {
            let rel = self.relationship_mut(id)?;
            (rel.from, rel.to)
        };
        self.ensure_unique(Some(id), from, to, kind)?;
        self.relationship_mut(id)?.kind = kind;
        self.changes.record(&[Collection::ClassRelationships]);
        Ok(())
    }

    pub fn retarget_relationship(&mut self, id: Id, from: Id, to: Id) -> Result<(), EditError> {
        let ids: Vec<Id> = self.classes.iter().map(|c| c.id).collect();
        let from = rules::id_endpoint(&ids, Some(from), 0, Collection::Classes)?;
        let to = rules::id_endpoint(&ids, Some(to), 1, Collection::Classes)?;
        let kind = self.relationship_mut(id)?.kind;
        self.ensure_unique(Some(id), from, to, kind)?;

        let rel = self.relationship_mut(id)?;
        rel.from = from;
        rel.to = to;
        self.changes.record(&[Collection::ClassRelationships]);
        Ok(())
    }

    pub fn set_relationship_label(&mut self, id: Id, label: &str) -> Result<(), EditError> {
        self.relationship_mut(id)?.label = label.to_string();
        self.changes.record(&[Collection::ClassRelationships]);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.relationships.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.classes.clear();
        self.relationships.clear();
        self.changes.record(&[Collection::Classes, Collection::ClassRelationships]);
    }

    fn ensure_unique(
        &self,
        skip: Option<Id>,
        from: Id,
        to: Id,
        kind: ClassRelationKind,
    ) -> Result<(), EditError> {
        let clash = self
            .relationships
            .iter()
            .filter(|r| Some(r.id) != skip)
            .any(|r| r.from == from && r.to == to && r.kind == kind);
        if clash {
            return Err(rules::duplicate_edge(Collection::ClassRelationships));
        }
        Ok(())
    }

    fn class_mut(&mut self, id: Id) -> Result<&mut Class, EditError> {
        self.classes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| rules::unknown_record(Collection::Classes, id))
    }

    fn relationship_mut(&mut self, id: Id) -> Result<&mut ClassRelationship, EditError> {
        self.relationships
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| rules::unknown_record(Collection::ClassRelationships, id))
    }
}
