use std::cmp::Reverse;

use cadence_audiodb_client::TrackRecord;
use serde::Serialize;

use super::ViewOutcome;

/// Upper bound of the popularity scale accepted as a threshold
pub const MAX_POPULARITY: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopularityTier {
    High,
    Medium,
    Low,
}

impl PopularityTier {
    pub fn from_score(popularity: u32) -> Self {
        match popularity {
            p if p >= 80 => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTrack {
    pub title: String,
    pub popularity: u32,
    pub tier: PopularityTier,
    pub album: String,
    pub year: u32,
    pub duration_secs: u32,
    pub music_video_url: Option<String>,
}

impl From<TrackRecord> for RankedTrack {
    fn from(track: TrackRecord) -> Self {
        Self {
            tier: PopularityTier::from_score(track.popularity),
            title: track.title,
            popularity: track.popularity,
            album: track.album,
            year: track.year,
            duration_secs: track.duration_secs,
            music_video_url: track.music_video_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularTracksView {
    /// Tracks returned by the catalog before the threshold was applied
    pub available: usize,
    /// Least popular first, for a horizontal bar chart
    pub chart: Vec<RankedTrack>,
    /// Most popular first, for the detail list
    pub details: Vec<RankedTrack>,
}

/// Keep tracks at or above `min_popularity` and rank them both ways.
///
/// The threshold is expected to be within `0..=MAX_POPULARITY`; range checks
/// happen before the catalog is queried.
pub fn rank_tracks(tracks: Vec<TrackRecord>, min_popularity: u32) -> ViewOutcome<PopularTracksView> {
    if tracks.is_empty() {
        return ViewOutcome::UpstreamEmpty;
    }

    let available = tracks.len();
    let mut details: Vec<RankedTrack> = tracks
        .into_iter()
        .filter(|track| track.popularity >= min_popularity)
        .map(RankedTrack::from)
        .collect();

    if details.is_empty() {
        return ViewOutcome::NothingSurvived;
    }

    let mut chart = details.clone();
    chart.sort_by_key(|track| track.popularity);
    details.sort_by_key(|track| Reverse(track.popularity));

    ViewOutcome::Ready(PopularTracksView {
        available,
        chart,
        details,
    })
}
