use std::future::Future;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    cache::{NoCache, PlacesCache},
    mock_places::mock_places,
    place::{Place, PlacesQuery},
    places_provider::PlacesProvider,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacesError {
    #[error("No places known for city {0}")]
    UnknownCity(String),
}

/// Asynchronous source of tourist places for a city.
pub trait PlacesLookup: Send + Sync {
    fn fetch_places(
        &self,
        query: &PlacesQuery,
    ) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send;
}

pub struct PlacesClient<C: PlacesCache = NoCache> {
    provider: PlacesProvider,
    cache: C,
}

impl Default for PlacesClient {
    fn default() -> Self {
        Self::new(PlacesProvider::default(), NoCache)
    }
}

impl<C: PlacesCache> PlacesClient<C> {
    pub fn new(provider: PlacesProvider, cache: C) -> Self {
        Self { provider, cache }
    }

    pub fn provider(&self) -> &PlacesProvider {
        &self.provider
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl<C: PlacesCache> PlacesLookup for PlacesClient<C> {
    #[instrument(skip_all, level = "debug", fields(city = %query.city_id))]
    async fn fetch_places(&self, query: &PlacesQuery) -> Result<Vec<Place>, PlacesError> {
        if let Some(places) = self.cache.get_cached(&self.provider, query) {
            debug!("Places for {} served from cache", query.city_name);
            return Ok(places);
        }

        let places = match &self.provider {
            PlacesProvider::Mock { latency } => {
                tokio::time::sleep(latency.unsigned_abs()).await;
                mock_places(&query.city_name)
            }
            PlacesProvider::Custom { places } => places
                .get(&query.city_id)
                .cloned()
                .ok_or_else(|| PlacesError::UnknownCity(query.city_id.clone()))?,
        };

        debug!("Loaded {} places for {}", places.len(), query.city_name);
        self.cache.cache(&self.provider, query, &places);

        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jiff::SignedDuration;

    use crate::{cache::MemoryCache, kilometers::Kilometers, place::PlaceId};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_provider_waits_for_latency() {
        let client = PlacesClient::default();
        let start = tokio::time::Instant::now();

        let places = client
            .fetch_places(&PlacesQuery::new("city_1", "Udaipur"))
            .await
            .unwrap();

        assert_eq!(places.len(), 5);
        assert_eq!(places[4].name, "Udaipur Lake");
        assert!(start.elapsed() >= std::time::Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_custom_provider_unknown_city() {
        let mut places = BTreeMap::new();
        places.insert(
            String::from("city_7"),
            vec![Place {
                id: PlaceId::new(1),
                name: String::from("Amber Fort"),
                distance: Kilometers::new(11.0),
            }],
        );
        let client = PlacesClient::new(PlacesProvider::Custom { places }, NoCache);

        let found = client
            .fetch_places(&PlacesQuery::new("city_7", "Jaipur"))
            .await
            .unwrap();
        assert_eq!(found[0].name, "Amber Fort");

        let missing = client
            .fetch_places(&PlacesQuery::new("city_8", "Agra"))
            .await;
        assert_eq!(missing, Err(PlacesError::UnknownCity(String::from("city_8"))));
    }

    #[tokio::test]
    async fn test_answers_are_cached() {
        let client = PlacesClient::new(
            PlacesProvider::Mock {
                latency: SignedDuration::ZERO,
            },
            MemoryCache::default(),
        );
        let query = PlacesQuery::new("city_1", "Pune");

        client.fetch_places(&query).await.unwrap();
        client.fetch_places(&query).await.unwrap();

        assert_eq!(client.cache().len(), 1);
    }
}
