//! Catalog records and TheAudioDB response models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{
    clean_biography, coerce_count, coerce_id, coerce_int, coerce_optional_text, coerce_text,
    coerce_url, coerce_year, NOT_AVAILABLE,
};

/// An artist profile from the catalog search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistProfile {
    /// Catalog identifier (`idArtist`)
    pub id: String,
    /// Display name, "Unknown Artist" when missing
    pub name: String,
    /// Name as stored in the catalog; `None` when the record has none.
    /// Follow-up queries by name must use this, never the display name.
    #[serde(default)]
    pub catalog_name: Option<String>,
    /// Primary genre, "N/A" when missing
    pub genre: String,
    /// Comma-separated style tags as delivered by the catalog
    pub style: String,
    /// Mood descriptor, "N/A" when missing
    pub mood: String,
    /// Country of origin, "N/A" when missing
    pub country: String,
    /// Year the artist was formed, if known
    pub formed_year: Option<u32>,
    /// English biography with whitespace collapsed; empty when missing
    pub biography: String,
    /// Fan-art image URL
    pub fanart_url: Option<String>,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

/// A single album from the discography endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRecord {
    pub title: String,
    /// Release year, 0 when unknown
    pub year: u32,
    pub genre: String,
    /// Estimated sales, 0 when unknown
    pub sales: u64,
    /// Number of tracks, 0 when unknown
    pub track_count: u32,
}

/// A single entry from the top-tracks endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub title: String,
    /// Popularity score taken from the catalog's "loved" counter
    pub popularity: u32,
    /// Title of the album the track appears on
    pub album: String,
    /// Release year, 0 when unknown
    pub year: u32,
    /// Duration in whole seconds, 0 when unknown
    pub duration_secs: u32,
    /// Music video link, if the catalog has one
    pub music_video_url: Option<String>,
}

// Internal response types for deserialization.
//
// Every field is kept as a loose `Value` because the catalog mixes strings,
// numbers and nulls for the same field across records.

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub artists: Option<Vec<RawArtist>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumsResponse {
    #[serde(default)]
    pub album: Option<Vec<RawAlbum>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TopTracksResponse {
    #[serde(default)]
    pub track: Option<Vec<RawTrack>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawArtist {
    pub id_artist: Option<Value>,
    pub str_artist: Option<Value>,
    pub str_genre: Option<Value>,
    pub str_style: Option<Value>,
    pub str_mood: Option<Value>,
    pub str_country: Option<Value>,
    pub int_formed_year: Option<Value>,
    #[serde(rename = "strBiographyEN")]
    pub str_biography_en: Option<Value>,
    pub str_artist_fanart: Option<Value>,
    pub str_website: Option<Value>,
    pub str_facebook: Option<Value>,
    pub str_twitter: Option<Value>,
    pub str_instagram: Option<Value>,
}

impl RawArtist {
    /// Convert into a profile; records without an identifier are unusable
    pub(crate) fn into_profile(self) -> Option<ArtistProfile> {
        let id = coerce_id(self.id_artist.as_ref())?;
        let formed_year = Some(coerce_year(self.int_formed_year.as_ref())).filter(|y| *y > 0);
        let biography = coerce_text(self.str_biography_en.as_ref(), "");
        let catalog_name = coerce_optional_text(self.str_artist.as_ref());

        Some(ArtistProfile {
            id,
            name: catalog_name
                .clone()
                .unwrap_or_else(|| "Unknown Artist".to_string()),
            catalog_name,
            genre: coerce_text(self.str_genre.as_ref(), NOT_AVAILABLE),
            style: coerce_text(self.str_style.as_ref(), ""),
            mood: coerce_text(self.str_mood.as_ref(), NOT_AVAILABLE),
            country: coerce_text(self.str_country.as_ref(), NOT_AVAILABLE),
            formed_year,
            biography: clean_biography(&biography),
            fanart_url: coerce_url(self.str_artist_fanart.as_ref()),
            website: coerce_url(self.str_website.as_ref()),
            facebook: coerce_url(self.str_facebook.as_ref()),
            twitter: coerce_url(self.str_twitter.as_ref()),
            instagram: coerce_url(self.str_instagram.as_ref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAlbum {
    pub str_album: Option<Value>,
    pub int_year_released: Option<Value>,
    pub str_genre: Option<Value>,
    pub int_sales: Option<Value>,
    pub int_total_tracks: Option<Value>,
}

impl From<RawAlbum> for AlbumRecord {
    fn from(raw: RawAlbum) -> Self {
        Self {
            title: coerce_text(raw.str_album.as_ref(), "Unknown Album"),
            year: coerce_year(raw.int_year_released.as_ref()),
            genre: coerce_text(raw.str_genre.as_ref(), "Unknown"),
            sales: coerce_int(raw.int_sales.as_ref()),
            track_count: coerce_count(raw.int_total_tracks.as_ref()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTrack {
    pub str_track: Option<Value>,
    pub int_loved: Option<Value>,
    pub str_album: Option<Value>,
    pub int_year_released: Option<Value>,
    /// Milliseconds
    pub int_duration: Option<Value>,
    pub str_music_vid: Option<Value>,
}

impl From<RawTrack> for TrackRecord {
    fn from(raw: RawTrack) -> Self {
        let duration_ms = coerce_int(raw.int_duration.as_ref());

        Self {
            title: coerce_text(raw.str_track.as_ref(), "Unknown Track"),
            popularity: coerce_count(raw.int_loved.as_ref()),
            album: coerce_text(raw.str_album.as_ref(), "Unknown Album"),
            year: coerce_year(raw.int_year_released.as_ref()),
            duration_secs: u32::try_from(duration_ms / 1000).unwrap_or(u32::MAX),
            music_video_url: coerce_url(raw.str_music_vid.as_ref()),
        }
    }
}
