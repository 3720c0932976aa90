//! The controller that owns the store and the last rendered image.

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::diagram::{DiagramKind, EntityStore, serialize};
use crate::error::{GatewayError, GenerateError};
use crate::gateway::RenderGateway;

/// Output of the last successful generation, kept for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub content: Vec<u8>,
    pub filename: String,
}

/// Snapshot of the serialized store taken when a generation starts.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    seq: u64,
    kind: DiagramKind,
    epoch: u64,
    source: String,
}

impl GenerationTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// `<kind>-diagram-<YYYY-MM-DDTHH-MM-SS>.svg`
pub fn output_filename(kind: DiagramKind, at: DateTime<Utc>) -> String {
    format!("{}-diagram-{}.svg", kind.slug(), at.format("%Y-%m-%dT%H-%M-%S"))
}

#[derive(Debug, Default)]
pub struct Session {
    store: EntityStore,
    output: Option<RenderedDiagram>,
    /// Store epoch the cached image was rendered under.
    output_epoch: u64,
    latest_seq: u64,
    /// Tickets at or below this number were issued before a clear or kind switch.
    invalidated_through: u64,
}

impl Session {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// The cached image, unless the store has been cleared or switched kind since.
    pub fn output(&self) -> Option<&RenderedDiagram> {
        self.output
            .as_ref()
            .filter(|_| self.output_epoch == self.store.epoch())
    }

    /// Switches the active kind; the cached image no longer applies.
    pub fn set_kind(&mut self, kind: DiagramKind) {
        self.store.set_kind(kind);
        self.reset_output();
    }

    /// Empties the active kind's collections and drops the cached image.
    pub fn clear(&mut self) {
        self.store.clear();
        self.reset_output();
    }

    pub fn serialize(&self) -> String {
        serialize(&self.store)
    }

    pub fn begin_generation(&mut self) -> Result<GenerationTicket, GenerateError> {
        let source = self.serialize();
        if source.trim().is_empty() {
            return Err(GenerateError::EmptySource);
        }
        self.latest_seq += 1;
        info!(
            "starting generation #{} for {} diagram",
            self.latest_seq,
            self.store.kind()
        );
        Ok(GenerationTicket {
            seq: self.latest_seq,
            kind: self.store.kind(),
            epoch: self.store.epoch(),
            source,
        })
    }

    /// Records the renderer's answer for `ticket`.
    ///
    /// Only the most recently issued ticket may update the cache. On any
    /// error the store and the previously cached image are left as they were.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<Vec<u8>, GatewayError>,
    ) -> Result<&RenderedDiagram, GenerateError> {
        self.finish_generation_at(ticket, result, Utc::now())
    }

    pub fn finish_generation_at(
        &mut self,
        ticket: GenerationTicket,
        result: Result<Vec<u8>, GatewayError>,
        at: DateTime<Utc>,
    ) -> Result<&RenderedDiagram, GenerateError> {
        let content = result.inspect_err(|err| {
            warn!("generation #{} failed: {}", ticket.seq, err);
        })?;
        if content.is_empty() {
            warn!("generation #{} returned nothing", ticket.seq);
            return Err(GatewayError::EmptyResponse.into());
        }
        if ticket.seq != self.latest_seq
            || ticket.seq <= self.invalidated_through
            || ticket.epoch != self.store.epoch()
        {
            warn!(
                "discarding generation #{} (latest is #{})",
                ticket.seq, self.latest_seq
            );
            return Err(GenerateError::Stale { seq: ticket.seq });
        }

        let filename = output_filename(ticket.kind, at);
        info!("generation #{} complete: {}", ticket.seq, filename);
        self.output_epoch = ticket.epoch;
        Ok(self.output.insert(RenderedDiagram { content, filename }))
    }

    /// Serializes, renders, and caches the result in one step.
    pub fn generate(
        &mut self,
        gateway: &dyn RenderGateway,
    ) -> Result<&RenderedDiagram, GenerateError> {
        let ticket = self.begin_generation()?;
        let result = gateway.render(ticket.source());
        self.finish_generation(ticket, result)
    }

    fn reset_output(&mut self) {
        self.output = None;
        self.invalidated_through = self.latest_seq;
    }
}
