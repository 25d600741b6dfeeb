use std::hash::{Hash, Hasher};

use fxhash::{FxHashMap, FxHasher64};
use parking_lot::RwLock;

use crate::{
    place::{Place, PlacesQuery},
    places_provider::PlacesProvider,
};

fn cache_key(provider: &PlacesProvider, query: &PlacesQuery) -> u64 {
    let mut hasher = FxHasher64::default();

    provider.hash(&mut hasher);
    query.hash(&mut hasher);

    hasher.finish()
}

pub trait PlacesCache: Send + Sync {
    fn cache(&self, provider: &PlacesProvider, query: &PlacesQuery, places: &[Place]);

    fn get_cached(&self, provider: &PlacesProvider, query: &PlacesQuery) -> Option<Vec<Place>>;
}

#[derive(Default)]
pub struct NoCache;

impl PlacesCache for NoCache {
    fn cache(&self, _provider: &PlacesProvider, _query: &PlacesQuery, _places: &[Place]) {}

    fn get_cached(&self, _provider: &PlacesProvider, _query: &PlacesQuery) -> Option<Vec<Place>> {
        None
    }
}

/// Keeps every answered lookup for the lifetime of the cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<FxHashMap<u64, Vec<Place>>>,
}

impl MemoryCache {
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl PlacesCache for MemoryCache {
    fn cache(&self, provider: &PlacesProvider, query: &PlacesQuery, places: &[Place]) {
        self.entries
            .write()
            .insert(cache_key(provider, query), places.to_vec());
    }

    fn get_cached(&self, provider: &PlacesProvider, query: &PlacesQuery) -> Option<Vec<Place>> {
        self.entries.read().get(&cache_key(provider, query)).cloned()
    }
}
