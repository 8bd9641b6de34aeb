//! Run-scoped entity cache

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::hash::Hash;
use std::sync::Arc;

/// Builds the entity for a key the cache has not seen yet.
pub trait EntityFactory<K, E> {
    fn create(&self, key: &K) -> E;
}

impl<K, E, F> EntityFactory<K, E> for F
where
    F: Fn(&K) -> E,
{
    fn create(&self, key: &K) -> E {
        self(key)
    }
}

/// Outcome of a cache lookup.
#[derive(Debug)]
pub struct Cached<E> {
    pub entity: Arc<E>,
    /// True only for the caller that constructed and registered the entity.
    pub created: bool,
}

/// Memoizing factory from structurally-compared keys to shared entities.
/// Thread-safe for concurrent access.
///
/// Create-or-fetch holds the key's shard lock across the check and the insert, so two
/// threads can never both observe `created == true` for equal keys. Factories must not
/// call back into the same cache.
pub struct EntityCache<K, E> {
    entries: DashMap<K, Arc<E>>,
}

impl<K, E> EntityCache<K, E>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        EntityCache {
            entries: DashMap::new(),
        }
    }

    /// Return the entity for `key`, constructing and registering it on first use.
    pub fn create<F>(&self, key: K, factory: &F) -> Cached<E>
    where
        F: EntityFactory<K, E> + ?Sized,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Cached {
                entity: Arc::clone(entry.get()),
                created: false,
            },
            Entry::Vacant(entry) => {
                let entity = Arc::new(factory.create(entry.key()));
                entry.insert(Arc::clone(&entity));
                Cached {
                    entity,
                    created: true,
                }
            }
        }
    }

    /// Look up an entity without creating it.
    pub fn get(&self, key: &K) -> Option<Arc<E>> {
        self.entries.get(key).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct entities registered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, E> Default for EntityCache<K, E>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
