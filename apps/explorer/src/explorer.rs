//! Lookup pipeline: validate, find the artist, fetch, aggregate

use std::sync::Arc;

use cadence_audiodb_client::{ArtistProfile, AudioDbClient, TrackRecord};
use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::cache::{Clock, SystemClock};
use crate::catalog::CachedCatalog;
use crate::config::Config;
use crate::error::{ExplorerError, ExplorerResult};
use crate::views::{
    analyze_discography, build_overview, rank_tracks, AlbumSort, DiscographyView, OverviewView,
    PopularTracksView, ViewModel, ViewOutcome, MAX_POPULARITY,
};

/// Which view a lookup should build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSelection {
    #[default]
    Overview,
    Discography {
        sort: AlbumSort,
    },
    PopularTracks {
        min_popularity: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub artist_name: String,
    pub view: ViewSelection,
}

impl ViewRequest {
    pub fn new(artist_name: impl Into<String>, view: ViewSelection) -> Self {
        Self {
            artist_name: artist_name.into(),
            view,
        }
    }

    pub fn overview(artist_name: impl Into<String>) -> Self {
        Self::new(artist_name, ViewSelection::Overview)
    }

    pub fn discography(artist_name: impl Into<String>, sort: AlbumSort) -> Self {
        Self::new(artist_name, ViewSelection::Discography { sort })
    }

    pub fn popular_tracks(artist_name: impl Into<String>, min_popularity: u32) -> Self {
        Self::new(artist_name, ViewSelection::PopularTracks { min_popularity })
    }
}

/// A found artist and the view built for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub artist: ArtistProfile,
    pub view: ViewModel,
}

impl Dashboard {
    pub fn user_message(&self) -> Option<String> {
        self.view.user_message()
    }
}

/// All three views for one artist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub artist: ArtistProfile,
    pub overview: OverviewView,
    pub sort: AlbumSort,
    pub discography: ViewOutcome<DiscographyView>,
    pub min_popularity: u32,
    pub popular_tracks: ViewOutcome<PopularTracksView>,
}

impl Report {
    /// The discography part as a standalone view
    pub fn discography_view(&self) -> ViewModel {
        ViewModel::Discography {
            sort: self.sort,
            outcome: self.discography.clone(),
        }
    }

    /// The popular-tracks part as a standalone view
    pub fn popular_tracks_view(&self) -> ViewModel {
        ViewModel::PopularTracks {
            min_popularity: self.min_popularity,
            outcome: self.popular_tracks.clone(),
        }
    }
}

/// Artist explorer over a cached catalog
#[derive(Debug)]
pub struct Explorer {
    catalog: CachedCatalog,
    clock: Arc<dyn Clock>,
}

impl Explorer {
    pub fn new(catalog: CachedCatalog, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    /// Build an explorer with a real HTTP client and the system clock
    pub fn from_config(config: &Config) -> ExplorerResult<Self> {
        let client = AudioDbClient::new(config.catalog())?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let catalog = CachedCatalog::new(client, config.cache_ttl(), clock.clone());

        Ok(Self::new(catalog, clock))
    }

    pub fn catalog(&self) -> &CachedCatalog {
        &self.catalog
    }

    fn current_year(&self) -> i32 {
        self.clock.now().year()
    }

    /// Search the catalog for an artist by name.
    ///
    /// # Errors
    /// `Validation` for a blank name (no request is made), `NotFound` when
    /// the catalog has no match.
    pub async fn find_artist(&self, name: &str) -> ExplorerResult<ArtistProfile> {
        let name = validate_name(name)?;

        self.catalog
            .search_artist(name)
            .await
            .ok_or_else(|| ExplorerError::NotFound(name.to_string()))
    }

    /// Look up an artist and build the requested view.
    ///
    /// Only the data the selected view needs is fetched.
    #[instrument(skip(self, request), fields(artist = %request.artist_name))]
    pub async fn lookup(&self, request: &ViewRequest) -> ExplorerResult<Dashboard> {
        if let ViewSelection::PopularTracks { min_popularity } = request.view {
            validate_min_popularity(min_popularity)?;
        }

        let artist = self.find_artist(&request.artist_name).await?;
        debug!(artist_id = %artist.id, "Artist found");

        let view = match request.view {
            ViewSelection::Overview => {
                ViewModel::Overview(build_overview(&artist, self.current_year()))
            }
            ViewSelection::Discography { sort } => {
                let albums = self.catalog.get_discography(&artist.id).await;
                ViewModel::Discography {
                    sort,
                    outcome: analyze_discography(albums, sort),
                }
            }
            ViewSelection::PopularTracks { min_popularity } => {
                let tracks = self.top_tracks_for(&artist).await;
                ViewModel::PopularTracks {
                    min_popularity,
                    outcome: rank_tracks(tracks, min_popularity),
                }
            }
        };

        info!(artist = %artist.name, "Dashboard view built");
        Ok(Dashboard { artist, view })
    }

    /// Look up an artist and build every view, fetching albums and tracks
    /// concurrently.
    #[instrument(skip(self))]
    pub async fn report(
        &self,
        artist_name: &str,
        sort: AlbumSort,
        min_popularity: u32,
    ) -> ExplorerResult<Report> {
        validate_min_popularity(min_popularity)?;
        let artist = self.find_artist(artist_name).await?;

        let (albums, tracks) = tokio::join!(
            self.catalog.get_discography(&artist.id),
            self.top_tracks_for(&artist),
        );
        debug!(albums = albums.len(), tracks = tracks.len(), "Catalog data fetched");

        Ok(Report {
            overview: build_overview(&artist, self.current_year()),
            sort,
            discography: analyze_discography(albums, sort),
            min_popularity,
            popular_tracks: rank_tracks(tracks, min_popularity),
            artist,
        })
    }

    /// Top tracks by the catalog's own name for the artist; a record
    /// without a name has nothing to query by.
    async fn top_tracks_for(&self, artist: &ArtistProfile) -> Vec<TrackRecord> {
        match artist.catalog_name.as_deref() {
            Some(name) => self.catalog.get_top_tracks(name).await,
            None => {
                debug!(artist_id = %artist.id, "Artist record has no name, skipping top tracks");
                Vec::new()
            }
        }
    }
}

fn validate_name(name: &str) -> ExplorerResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ExplorerError::Validation(
            "Please enter an artist name.".to_string(),
        ));
    }
    Ok(trimmed)
}

fn validate_min_popularity(min_popularity: u32) -> ExplorerResult<()> {
    if min_popularity > MAX_POPULARITY {
        return Err(ExplorerError::Validation(format!(
            "Minimum popularity must be between 0 and {MAX_POPULARITY}, got {min_popularity}."
        )));
    }
    Ok(())
}
