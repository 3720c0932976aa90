use log::debug;

use super::activity::ActivityDiagram;
use super::class::ClassDiagram;
use super::component::ComponentDiagram;
use super::erd::ErDiagram;
use super::rules::ChangeLog;
use super::sequence::SequenceDiagram;
use super::state::StateDiagram;
use super::style::{Style, parse_color};
use super::types::{Collection, DiagramKind, UseCaseDirection};
use super::usecase::UseCaseDiagram;
use crate::error::EditError;

/// Single source of truth for every diagram kind.
///
/// Each kind owns an independent partition; edits to one never touch
/// another. The style is shared by all kinds.
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    kind: DiagramKind,
    style: Style,
    sequence: SequenceDiagram,
    class: ClassDiagram,
    use_case: UseCaseDiagram,
    erd: ErDiagram,
    activity: ActivityDiagram,
    component: ComponentDiagram,
    state: StateDiagram,
    changes: ChangeLog,
    /// Bumped on every kind switch and clear.
    epoch: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Changes the active kind. No partition is touched.
    pub fn set_kind(&mut self, kind: DiagramKind) {
        if self.kind != kind {
            debug!("switching diagram kind {} -> {}", self.kind, kind);
            self.kind = kind;
            self.epoch += 1;
        }
    }

    /// Counter of kind switches and clears. Anything derived from the store
    /// under an older epoch describes a diagram that is no longer shown.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) -> Result<(), EditError> {
        self.style = style.validated()?;
        self.changes.record(&[Collection::Style]);
        Ok(())
    }

    pub fn set_background_color(&mut self, color: &str) -> Result<(), EditError> {
        self.style.background_color = parse_color(color)?;
        self.changes.record(&[Collection::Style]);
        Ok(())
    }

    pub fn set_text_color(&mut self, color: &str) -> Result<(), EditError> {
        self.style.text_color = parse_color(color)?;
        self.changes.record(&[Collection::Style]);
        Ok(())
    }

    pub fn set_primary_color(&mut self, color: &str) -> Result<(), EditError> {
        self.style.primary_color = parse_color(color)?;
        self.changes.record(&[Collection::Style]);
        Ok(())
    }

    pub fn set_use_case_direction(&mut self, direction: UseCaseDirection) {
        self.style.use_case_direction = direction;
        self.changes.record(&[Collection::Style]);
    }

    pub fn sequence(&self) -> &SequenceDiagram {
        &self.sequence
    }

    pub fn sequence_mut(&mut self) -> &mut SequenceDiagram {
        &mut self.sequence
    }

    pub fn class(&self) -> &ClassDiagram {
        &self.class
    }

    pub fn class_mut(&mut self) -> &mut ClassDiagram {
        &mut self.class
    }

    pub fn use_case(&self) -> &UseCaseDiagram {
        &self.use_case
    }

    pub fn use_case_mut(&mut self) -> &mut UseCaseDiagram {
        &mut self.use_case
    }

    pub fn erd(&self) -> &ErDiagram {
        &self.erd
    }

    pub fn erd_mut(&mut self) -> &mut ErDiagram {
        &mut self.erd
    }

    pub fn activity(&self) -> &ActivityDiagram {
        &self.activity
    }

    pub fn activity_mut(&mut self) -> &mut ActivityDiagram {
        &mut self.activity
    }

    pub fn component(&self) -> &ComponentDiagram {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut ComponentDiagram {
        &mut self.component
    }

    pub fn state(&self) -> &StateDiagram {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateDiagram {
        &mut self.state
    }

    /// Empties the active kind's collections. Other kinds keep their data.
    pub fn clear(&mut self) {
        debug!("clearing {} diagram", self.kind);
        self.epoch += 1;
        match self.kind {
            DiagramKind::Sequence => self.sequence.clear(),
            DiagramKind::Class => self.class.clear(),
            DiagramKind::UseCase => self.use_case.clear(),
            DiagramKind::Erd => self.erd.clear(),
            DiagramKind::Activity => self.activity.clear(),
            DiagramKind::Component => self.component.clear(),
            DiagramKind::State => self.state.clear(),
        }
    }

    /// Whether the given kind has no records at all.
    pub fn is_empty(&self, kind: DiagramKind) -> bool {
        match kind {
            DiagramKind::Sequence => self.sequence.is_empty(),
            DiagramKind::Class => self.class.is_empty(),
            DiagramKind::UseCase => self.use_case.is_empty(),
            DiagramKind::Erd => self.erd.is_empty(),
            DiagramKind::Activity => self.activity.is_empty(),
            DiagramKind::Component => self.component.is_empty(),
            DiagramKind::State => self.state.is_empty(),
        }
    }

    /// Drains the collections changed since the last call, for re-rendering.
    pub fn take_changes(&mut self) -> Vec<Collection> {
        let mut changed = Vec::new();
        self.changes.drain_into(&mut changed);
        self.sequence.changes.drain_into(&mut changed);
        self.class.changes.drain_into(&mut changed);
        self.use_case.changes.drain_into(&mut changed);
        self.erd.changes.drain_into(&mut changed);
        self.activity.changes.drain_into(&mut changed);
        self.component.changes.drain_into(&mut changed);
        self.state.changes.drain_into(&mut changed);
        changed
    }
}
