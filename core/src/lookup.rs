use crate::models::ArtistPopularity;
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use rspotify::{model::SearchResult, model::SearchType, prelude::*, ClientCredsSpotify};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

/// Popularity barely moves within a day; hours of staleness is acceptable
/// and saves a catalog round trip per repeated name.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Artist name must not be empty")]
    EmptyName,
    #[error("No artist found matching '{0}'")]
    NotFound(String),
    #[error("Spotify API error: {0}")]
    Spotify(#[from] rspotify::ClientError),
    #[error("Unexpected search result type from Spotify")]
    UnexpectedResponse,
}

/// Resolves a free-text artist name to its catalog popularity.
#[async_trait]
pub trait PopularitySource: Send + Sync {
    async fn artist_popularity(&self, name: &str) -> Result<ArtistPopularity, LookupError>;

    /// Looks up many names concurrently and joins before returning.
    ///
    /// A failed or unmatched name is dropped from the result rather than
    /// failing the whole batch; the drop is logged so it is not invisible.
    async fn popularity_batch(&self, names: &[String]) -> Vec<ArtistPopularity> {
        let lookups = names.iter().map(|name| self.artist_popularity(name));

        join_all(lookups)
            .await
            .into_iter()
            .zip(names)
            .filter_map(|(result, name)| match result {
                Ok(artist) => Some(artist),
                Err(e) => {
                    warn!("Dropping '{}' from batch lookup: {}", name, e);
                    None
                }
            })
            .collect()
    }
}

struct CachedArtist {
    artist: ArtistPopularity,
    fetched_at: Instant,
}

/// Spotify-backed lookup with a per-name TTL cache.
///
/// One search request per uncached call, first match wins (`type=artist`,
/// `limit=1`). The cache is keyed by the case-folded trimmed name.
pub struct SpotifyLookup {
    spotify: Arc<ClientCredsSpotify>,
    cache: Mutex<HashMap<String, CachedArtist>>,
    ttl: Duration,
}

impl SpotifyLookup {
    pub fn new(spotify: ClientCredsSpotify) -> Self {
        Self::with_ttl(spotify, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(spotify: ClientCredsSpotify, ttl: Duration) -> Self {
        Self {
            spotify: Arc::new(spotify),
            cache: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    async fn cache_get(&self, key: &str) -> Option<ArtistPopularity> {
        let mut cache = self.cache.lock().await;
        match cache.get(key) {
            Some(cached) if cached.fetched_at.elapsed() < self.ttl => {
                Some(cached.artist.clone())
            }
            Some(_) => {
                cache.remove(key);
                None
            }
            None => None,
        }
    }

    async fn cache_put(&self, key: String, artist: ArtistPopularity) {
        self.cache.lock().await.insert(
            key,
            CachedArtist {
                artist,
                fetched_at: Instant::now(),
            },
        );
    }
}

#[async_trait]
impl PopularitySource for SpotifyLookup {
    async fn artist_popularity(&self, name: &str) -> Result<ArtistPopularity, LookupError> {
        let query = name.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyName);
        }

        let cache_key = query.to_lowercase();
        if let Some(artist) = self.cache_get(&cache_key).await {
            debug!("Cache hit for '{}'", query);
            return Ok(artist);
        }

        debug!("Searching Spotify for artist '{}'", query);
        let result = self
            .spotify
            .search(query, SearchType::Artist, None, None, Some(1), None)
            .await?;

        let page = match result {
            SearchResult::Artists(page) => page,
            _ => return Err(LookupError::UnexpectedResponse),
        };

        let best_match = page
            .items
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(query.to_string()))?;

        let artist = ArtistPopularity {
            id: best_match.id.id().to_string(),
            name: best_match.name,
            popularity: best_match.popularity.min(100) as u8,
        };

        self.cache_put(cache_key, artist.clone()).await;
        Ok(artist)
    }
}
