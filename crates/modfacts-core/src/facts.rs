//! Append-only fact sinks

use crate::error::FactError;
use crate::model::{DeclarationId, EntityId, ModifierEdge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A single fact, as recorded by a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fact {
    /// A modifier entity and its display name.
    Modifiers { id: EntityId, name: String },
    /// An edge from a declaration to a modifier entity.
    HasModifiers {
        declaration: DeclarationId,
        modifier: EntityId,
    },
}

/// Destination for modifier facts. Implementations only append.
pub trait FactSink: Send + Sync {
    /// Record that `id` names the modifier `name`.
    fn declare_modifier(&self, id: EntityId, name: &str) -> Result<(), FactError>;

    /// Record that `declaration` carries the modifier `id`.
    fn attach_modifier(&self, declaration: DeclarationId, id: EntityId) -> Result<(), FactError>;

    /// Flush buffered facts, if the sink buffers.
    fn flush(&self) -> Result<(), FactError> {
        Ok(())
    }
}

/// Keeps every fact in memory, in arrival order.
///
/// A panic while holding the lock cannot leave the fact list half-written, so both reads
/// and writes carry on through a poisoned lock.
#[derive(Debug, Default)]
pub struct MemorySink {
    facts: Mutex<Vec<Fact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded facts.
    pub fn facts(&self) -> Vec<Fact> {
        self.lock().clone()
    }

    /// Names declared so far, in declaration order.
    pub fn declared_names(&self) -> Vec<String> {
        self.facts()
            .into_iter()
            .filter_map(|fact| match fact {
                Fact::Modifiers { name, .. } => Some(name),
                Fact::HasModifiers { .. } => None,
            })
            .collect()
    }

    /// Edges recorded so far, in attachment order.
    pub fn edges(&self) -> Vec<ModifierEdge> {
        self.facts()
            .into_iter()
            .filter_map(|fact| match fact {
                Fact::HasModifiers {
                    declaration,
                    modifier,
                } => Some(ModifierEdge {
                    declaration,
                    modifier,
                }),
                Fact::Modifiers { .. } => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Fact>> {
        self.facts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, fact: Fact) -> Result<(), FactError> {
        self.lock().push(fact);
        Ok(())
    }
}

impl FactSink for MemorySink {
    fn declare_modifier(&self, id: EntityId, name: &str) -> Result<(), FactError> {
        self.push(Fact::Modifiers {
            id,
            name: name.to_string(),
        })
    }

    fn attach_modifier(&self, declaration: DeclarationId, id: EntityId) -> Result<(), FactError> {
        self.push(Fact::HasModifiers {
            declaration,
            modifier: id,
        })
    }
}

/// Writes one JSON object per fact, one fact per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> Result<W, FactError> {
        self.writer.into_inner().map_err(|_| FactError::Poisoned)
    }

    fn write_fact(&self, fact: &Fact) -> Result<(), FactError> {
        let line = serde_json::to_string(fact)?;
        let mut writer = self.writer.lock().map_err(|_| FactError::Poisoned)?;
        writeln!(writer, "{}", line)?;
        Ok(())
    }
}

impl<W: Write + Send> FactSink for JsonLinesSink<W> {
    fn declare_modifier(&self, id: EntityId, name: &str) -> Result<(), FactError> {
        self.write_fact(&Fact::Modifiers {
            id,
            name: name.to_string(),
        })
    }

    fn attach_modifier(&self, declaration: DeclarationId, id: EntityId) -> Result<(), FactError> {
        self.write_fact(&Fact::HasModifiers {
            declaration,
            modifier: id,
        })
    }

    fn flush(&self) -> Result<(), FactError> {
        self.writer.lock().map_err(|_| FactError::Poisoned)?.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_survives_poisoned_lock() {
        let sink = MemorySink::new();
        sink.declare_modifier(EntityId(1), "public").unwrap();

        let poisoned = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = sink.facts.lock().unwrap();
                    panic!("writer panicked while holding the lock");
                })
                .join()
        });
        assert!(poisoned.is_err());
        assert!(sink.facts.is_poisoned());

        // Reads still see earlier facts, writes still land
        assert_eq!(sink.declared_names(), vec!["public".to_string()]);
        sink.attach_modifier(DeclarationId(2), EntityId(1)).unwrap();
        assert_eq!(sink.facts().len(), 2);
    }
}
