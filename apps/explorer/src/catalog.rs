//! Catalog access with response caching in front of every call

use std::sync::Arc;
use std::time::Duration;

use cadence_audiodb_client::{AlbumRecord, ArtistProfile, AudioDbClient, TrackRecord};

use crate::cache::{CacheKey, Clock, ResponseCache};

/// [`AudioDbClient`] behind one [`ResponseCache`] per call type
#[derive(Debug)]
pub struct CachedCatalog {
    client: AudioDbClient,
    ttl: Duration,
    artists: ResponseCache<Option<ArtistProfile>>,
    albums: ResponseCache<Vec<AlbumRecord>>,
    tracks: ResponseCache<Vec<TrackRecord>>,
}

impl CachedCatalog {
    pub fn new(client: AudioDbClient, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            ttl,
            artists: ResponseCache::new(clock.clone()),
            albums: ResponseCache::new(clock.clone()),
            tracks: ResponseCache::new(clock),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn search_artist(&self, name: &str) -> Option<ArtistProfile> {
        self.artists
            .get_or_fetch(&CacheKey::search(name), self.ttl, || {
                self.client.search_artist(name)
            })
            .await
    }

    pub async fn get_discography(&self, artist_id: &str) -> Vec<AlbumRecord> {
        self.albums
            .get_or_fetch(&CacheKey::discography(artist_id), self.ttl, || {
                self.client.get_discography(artist_id)
            })
            .await
    }

    pub async fn get_top_tracks(&self, artist_name: &str) -> Vec<TrackRecord> {
        self.tracks
            .get_or_fetch(&CacheKey::top_tracks(artist_name), self.ttl, || {
                self.client.get_top_tracks(artist_name)
            })
            .await
    }

    /// Drop every cached response
    pub fn clear(&self) {
        self.artists.clear();
        self.albums.clear();
        self.tracks.clear();
    }

    /// Drop expired responses, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.artists.purge_expired(self.ttl)
            + self.albums.purge_expired(self.ttl)
            + self.tracks.purge_expired(self.ttl)
    }
}
