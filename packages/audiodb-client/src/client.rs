//! TheAudioDB API client implementation

use std::fmt;
use std::time::Duration;

use cadence_shared_config::CatalogConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{AudioDbError, AudioDbResult};
use crate::models::{
    AlbumRecord, AlbumsResponse, ArtistProfile, SearchResponse, TopTracksResponse, TrackRecord,
};

/// Artist search endpoint, queried with `s={name}`
const SEARCH_ENDPOINT: &str = "search.php";

/// Album list endpoint, queried with `i={artist_id}`
const ALBUMS_ENDPOINT: &str = "album.php";

/// Top tracks endpoint, queried with `s={name}`
const TOP_TRACKS_ENDPOINT: &str = "track-top10.php";

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum artist name length
const MAX_ARTIST_NAME_LENGTH: usize = 256;

/// Maximum error body size kept in [`AudioDbError::Status`]
const MAX_ERROR_BODY_SIZE: usize = 500;

/// TheAudioDB API client
///
/// The client holds no state between calls besides the pooled HTTP client.
/// The plain operations never fail: transport errors, bad statuses, empty or
/// `null` bodies and malformed JSON all degrade to "no result".
#[derive(Clone)]
pub struct AudioDbClient {
    http_client: Client,
    config: CatalogConfig,
}

impl fmt::Debug for AudioDbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioDbClient")
            .field("url", &self.config.url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}

impl AudioDbClient {
    /// Create a new catalog client from configuration
    ///
    /// # Errors
    /// Returns `AudioDbError::Http` if the HTTP client cannot be built
    pub fn new(config: &CatalogConfig) -> AudioDbResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(
                DEFAULT_CONNECT_TIMEOUT_SECS.min(config.timeout_secs),
            ))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("Cadence/0.1")
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Validate a free-text query parameter (artist name or id)
    fn validate_query(value: &str, what: &str) -> AudioDbResult<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AudioDbError::InvalidInput(format!("{} cannot be empty", what)));
        }
        if trimmed.chars().count() > MAX_ARTIST_NAME_LENGTH {
            return Err(AudioDbError::InvalidInput(format!(
                "{} too long (max {} characters)",
                what, MAX_ARTIST_NAME_LENGTH
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Truncate error body, respecting UTF-8 boundaries
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }

        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);

        format!("{}... (truncated)", &body[..truncate_at])
    }

    /// Issue a GET and return the body, or `None` for an empty/`null` body
    async fn fetch_body(&self, endpoint: &str, params: &[(&str, &str)]) -> AudioDbResult<Option<String>> {
        let response = self
            .http_client
            .get(self.config.endpoint_url(endpoint))
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AudioDbError::Timeout(self.config.timeout_secs)
                } else {
                    AudioDbError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::truncate_error_body(response.text().await.unwrap_or_default());
            return Err(AudioDbError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AudioDbError::Timeout(self.config.timeout_secs)
            } else {
                AudioDbError::Http(e)
            }
        })?;

        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" {
            debug!(endpoint, "Catalog returned an empty body");
            return Ok(None);
        }

        Ok(Some(text))
    }

    /// Fetch and decode an endpoint; empty bodies decode to `T::default()`
    async fn fetch_json<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> AudioDbResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.fetch_body(endpoint, params).await? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(T::default()),
        }
    }

    /// Search for an artist by name, surfacing failures
    ///
    /// # Errors
    /// - `AudioDbError::InvalidInput` - If the name is blank or too long
    /// - `AudioDbError::Timeout` / `Http` / `Status` - transport failures
    /// - `AudioDbError::Parse` - malformed JSON
    #[instrument(skip(self))]
    pub async fn try_search_artist(&self, artist_name: &str) -> AudioDbResult<Option<ArtistProfile>> {
        let artist_name = Self::validate_query(artist_name, "artist name")?;

        debug!(artist = %artist_name, "Searching catalog for artist");

        let response: SearchResponse = self
            .fetch_json(SEARCH_ENDPOINT, &[("s", artist_name.as_str())])
            .await?;

        let artist = response
            .artists
            .and_then(|artists| artists.into_iter().next())
            .and_then(|raw| raw.into_profile());

        debug!(artist = %artist_name, found = artist.is_some(), "Artist search finished");

        Ok(artist)
    }

    /// Get all albums for an artist id, surfacing failures
    ///
    /// # Errors
    /// Same classification as [`Self::try_search_artist`]
    #[instrument(skip(self))]
    pub async fn try_get_discography(&self, artist_id: &str) -> AudioDbResult<Vec<AlbumRecord>> {
        let artist_id = Self::validate_query(artist_id, "artist id")?;

        debug!(artist_id = %artist_id, "Fetching discography from catalog");

        let response: AlbumsResponse = self
            .fetch_json(ALBUMS_ENDPOINT, &[("i", artist_id.as_str())])
            .await?;

        let albums: Vec<AlbumRecord> = response
            .album
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(artist_id = %artist_id, album_count = albums.len(), "Found albums");

        Ok(albums)
    }

    /// Get the top tracks for an artist name, surfacing failures
    ///
    /// Some artists have no top-track entry at all and the catalog answers
    /// with a literal `null`; that is an empty list, not an error.
    ///
    /// # Errors
    /// Same classification as [`Self::try_search_artist`]
    #[instrument(skip(self))]
    pub async fn try_get_top_tracks(&self, artist_name: &str) -> AudioDbResult<Vec<TrackRecord>> {
        let artist_name = Self::validate_query(artist_name, "artist name")?;

        debug!(artist = %artist_name, "Fetching top tracks from catalog");

        let response: TopTracksResponse = self
            .fetch_json(TOP_TRACKS_ENDPOINT, &[("s", artist_name.as_str())])
            .await?;

        let tracks: Vec<TrackRecord> = response
            .track
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(artist = %artist_name, track_count = tracks.len(), "Found top tracks");

        Ok(tracks)
    }

    /// Search for an artist by name; any failure yields `None`
    pub async fn search_artist(&self, artist_name: &str) -> Option<ArtistProfile> {
        self.try_search_artist(artist_name)
            .await
            .unwrap_or_else(|e| recover("search", artist_name, e))
    }

    /// Get all albums for an artist id; any failure yields an empty list
    pub async fn get_discography(&self, artist_id: &str) -> Vec<AlbumRecord> {
        self.try_get_discography(artist_id)
            .await
            .unwrap_or_else(|e| recover("discography", artist_id, e))
    }

    /// Get the top tracks for an artist name; any failure yields an empty list
    pub async fn get_top_tracks(&self, artist_name: &str) -> Vec<TrackRecord> {
        self.try_get_top_tracks(artist_name)
            .await
            .unwrap_or_else(|e| recover("top_tracks", artist_name, e))
    }
}

/// Log a swallowed catalog error and substitute the empty result
fn recover<T: Default>(call: &'static str, param: &str, error: AudioDbError) -> T {
    if error.is_input_error() {
        debug!(call, param = %param, error = %error, "Skipping catalog request");
    } else {
        warn!(call, param = %param, error = %error, "Catalog request failed, treating as no data");
    }
    T::default()
}
