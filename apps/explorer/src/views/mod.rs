//! Dashboard views derived from catalog records
//!
//! Every builder here is a pure function of the normalized records and its
//! parameters. List-based views report why they are empty through
//! [`ViewOutcome`], so the sink can tell "the catalog had nothing" apart from
//! "the filters removed everything".

mod discography;
mod overview;
mod popular_tracks;

use serde::Serialize;

pub use discography::{
    analyze_discography, AlbumSort, DiscographySummary, DiscographyView, YearCount,
    MIN_RELEASE_YEAR,
};
pub use overview::{
    build_overview, OverviewView, SocialLink, SocialPlatform, BIOGRAPHY_EXCERPT_CHARS,
    MAX_STYLE_TAGS,
};
pub use popular_tracks::{
    rank_tracks, PopularTracksView, PopularityTier, RankedTrack, MAX_POPULARITY,
};

/// Result of building a list-based view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ViewOutcome<T> {
    /// The catalog returned no records at all
    UpstreamEmpty,
    /// Records were returned but none passed filtering
    NothingSurvived,
    Ready(T),
}

impl<T> ViewOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// The view selected for a dashboard request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "result", rename_all = "snake_case")]
pub enum ViewModel {
    Overview(OverviewView),
    Discography {
        sort: AlbumSort,
        outcome: ViewOutcome<DiscographyView>,
    },
    PopularTracks {
        min_popularity: u32,
        outcome: ViewOutcome<PopularTracksView>,
    },
}

impl ViewModel {
    /// User-facing notice for an empty view, `None` when there is data to show
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Overview(_) => None,
            Self::Discography { outcome, .. } => match outcome {
                ViewOutcome::UpstreamEmpty => {
                    Some("No discography data available from the API.".to_string())
                }
                ViewOutcome::NothingSurvived => Some("No valid album data to display.".to_string()),
                ViewOutcome::Ready(_) => None,
            },
            Self::PopularTracks {
                min_popularity,
                outcome,
            } => match outcome {
                ViewOutcome::UpstreamEmpty => Some(
                    "No track data available from the database for this artist.".to_string(),
                ),
                ViewOutcome::NothingSurvived => Some(format!(
                    "No tracks meet the minimum popularity score of {min_popularity}."
                )),
                ViewOutcome::Ready(_) => None,
            },
        }
    }
}
