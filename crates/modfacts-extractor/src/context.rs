//! Extraction session context
//!
//! One context lives for one extraction run. It owns the modifier entity cache and a
//! handle to the fact sink, and it is shared by every worker classifying declarations.

use modfacts_core::{
    DeclarationId, EntityCache, FactError, FactSink, ModifierEntity, ModifierKey,
};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub entities_created: usize,
    pub edges_attached: usize,
    pub declarations_classified: usize,
    pub units_aborted: usize,
}

#[derive(Default)]
struct Counters {
    entities_created: AtomicUsize,
    edges_attached: AtomicUsize,
    declarations_classified: AtomicUsize,
}

pub struct ExtractionContext {
    modifiers: EntityCache<ModifierKey, ModifierEntity>,
    sink: Arc<dyn FactSink>,
    counters: Counters,
}

impl std::fmt::Debug for ExtractionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionContext")
            .field("modifiers", &self.modifiers.len())
            .field("stats", &self.stats())
            .finish()
    }
}

impl ExtractionContext {
    pub fn new(sink: Arc<dyn FactSink>) -> Self {
        ExtractionContext {
            modifiers: EntityCache::new(),
            sink,
            counters: Counters::default(),
        }
    }

    /// Resolve a modifier name to its run-wide entity.
    ///
    /// The first caller for a name registers the entity and declares it in the sink;
    /// everyone else gets the registered entity back.
    ///
    /// Registration happens before the declaration is written. If the sink rejects the
    /// declaration the entity stays registered but undeclared, so a sink error here must
    /// end the run; [`Coordinator::run`](crate::Coordinator::run) does so.
    pub fn modifier(&self, name: &str) -> Result<Arc<ModifierEntity>, FactError> {
        let cached = self.modifiers.create(ModifierKey::new(name), &ModifierEntity::new);
        if cached.created {
            tracing::debug!("New modifier entity {} ({})", name, cached.entity.id);
            self.sink.declare_modifier(cached.entity.id, &cached.entity.name)?;
            self.counters.entities_created.fetch_add(1, Ordering::Relaxed);
        }
        Ok(cached.entity)
    }

    /// Record an edge from `declaration` to `entity`.
    pub fn attach(&self, declaration: DeclarationId, entity: &ModifierEntity) -> Result<(), FactError> {
        self.sink.attach_modifier(declaration, entity.id)?;
        self.counters.edges_attached.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub(crate) fn note_classified(&self) {
        self.counters.declarations_classified.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of distinct modifier entities registered so far.
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    pub fn sink(&self) -> &Arc<dyn FactSink> {
        &self.sink
    }

    /// Counters gathered by the context. Unit-level counts are filled in by the coordinator.
    pub fn stats(&self) -> RunStats {
        RunStats {
            entities_created: self.counters.entities_created.load(Ordering::Relaxed),
            edges_attached: self.counters.edges_attached.load(Ordering::Relaxed),
            declarations_classified: self.counters.declarations_classified.load(Ordering::Relaxed),
            units_aborted: 0,
        }
    }
}
