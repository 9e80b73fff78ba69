use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use cadence_audiodb_client::AlbumRecord;
use serde::{Deserialize, Serialize};

use super::ViewOutcome;

/// Albums released in or before this year are treated as bad data
pub const MIN_RELEASE_YEAR: u32 = 1900;

/// Ordering applied to the album table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumSort {
    #[default]
    YearNewest,
    YearOldest,
    Sales,
    TrackCount,
}

impl AlbumSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YearNewest => "newest",
            Self::YearOldest => "oldest",
            Self::Sales => "sales",
            Self::TrackCount => "tracks",
        }
    }

    /// Heading shown next to the album table
    pub fn label(self) -> &'static str {
        match self {
            Self::YearNewest => "Year (Newest First)",
            Self::YearOldest => "Year (Oldest First)",
            Self::Sales => "Sales",
            Self::TrackCount => "Track Count",
        }
    }

    fn apply(self, albums: &mut [AlbumRecord]) {
        // sort_by_key is stable, equal keys keep catalog order
        match self {
            Self::YearNewest => albums.sort_by_key(|a| Reverse(a.year)),
            Self::YearOldest => albums.sort_by_key(|a| a.year),
            Self::Sales => albums.sort_by_key(|a| Reverse(a.sales)),
            Self::TrackCount => albums.sort_by_key(|a| Reverse(a.track_count)),
        }
    }
}

impl fmt::Display for AlbumSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlbumSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "year-newest" | "year_newest" => Ok(Self::YearNewest),
            "oldest" | "year-oldest" | "year_oldest" => Ok(Self::YearOldest),
            "sales" => Ok(Self::Sales),
            "tracks" | "track-count" | "track_count" => Ok(Self::TrackCount),
            other => Err(format!(
                "unknown album sort '{other}' (expected newest, oldest, sales or tracks)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscographySummary {
    pub album_count: usize,
    pub first_year: u32,
    pub last_year: u32,
    pub max_tracks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: u32,
    pub albums: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscographyView {
    /// Albums that passed the year filter, in the requested order
    pub albums: Vec<AlbumRecord>,
    pub summary: DiscographySummary,
    /// Albums per release year in ascending year order, only for more than one album
    pub timeline: Option<Vec<YearCount>>,
}

/// Filter, sort and summarize an artist's albums
pub fn analyze_discography(
    albums: Vec<AlbumRecord>,
    sort: AlbumSort,
) -> ViewOutcome<DiscographyView> {
    if albums.is_empty() {
        return ViewOutcome::UpstreamEmpty;
    }

    let mut albums: Vec<AlbumRecord> = albums
        .into_iter()
        .filter(|album| album.year > MIN_RELEASE_YEAR)
        .collect();

    if albums.is_empty() {
        return ViewOutcome::NothingSurvived;
    }

    sort.apply(&mut albums);

    let summary = DiscographySummary {
        album_count: albums.len(),
        first_year: albums.iter().map(|a| a.year).min().unwrap_or_default(),
        last_year: albums.iter().map(|a| a.year).max().unwrap_or_default(),
        max_tracks: albums.iter().map(|a| a.track_count).max().unwrap_or_default(),
    };

    let timeline = (albums.len() > 1).then(|| {
        let mut per_year: BTreeMap<u32, usize> = BTreeMap::new();
        for album in &albums {
            *per_year.entry(album.year).or_default() += 1;
        }
        per_year
            .into_iter()
            .map(|(year, albums)| YearCount { year, albums })
            .collect()
    });

    ViewOutcome::Ready(DiscographyView {
        albums,
        summary,
        timeline,
    })
}
