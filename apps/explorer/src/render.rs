//! Plain-text rendering of dashboard views for the terminal

use std::fmt::Write;

use cadence_audiodb_client::ArtistProfile;

use crate::explorer::{Dashboard, Report};
use crate::views::{DiscographyView, OverviewView, PopularTracksView, ViewModel, ViewOutcome};

/// Artists that are known to be in the catalog
pub const SUGGESTED_ARTISTS: [&str; 6] = [
    "Coldplay",
    "Taylor Swift",
    "Ed Sheeran",
    "Beyonce",
    "Daft Punk",
    "The Beatles",
];

pub fn suggestions() -> String {
    format!("Try: {}", SUGGESTED_ARTISTS.join(", "))
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut out = header(&dashboard.artist);
    out.push_str(&view(&dashboard.view));
    out
}

pub fn report(report: &Report) -> String {
    let mut out = header(&report.artist);
    out.push_str(&overview(&report.overview));
    out.push('\n');
    out.push_str(&view(&report.discography_view()));
    out.push('\n');
    out.push_str(&view(&report.popular_tracks_view()));
    out
}

pub fn view(model: &ViewModel) -> String {
    if let Some(message) = model.user_message() {
        return format!("{message}\n");
    }

    match model {
        ViewModel::Overview(view) => overview(view),
        ViewModel::Discography {
            sort,
            outcome: ViewOutcome::Ready(view),
        } => discography(view, sort.label()),
        ViewModel::PopularTracks {
            outcome: ViewOutcome::Ready(view),
            ..
        } => popular_tracks(view),
        _ => String::new(),
    }
}

fn header(artist: &ArtistProfile) -> String {
    format!("== {} ==\n", artist.name)
}

// Writes into a String are infallible.

fn overview(view: &OverviewView) -> String {
    let mut out = String::new();
    let formed = view
        .formed_year
        .map_or_else(|| "N/A".to_string(), |year| year.to_string());
    let active = view
        .years_active
        .map_or_else(|| "N/A".to_string(), |years| format!("{years} years"));

    let _ = writeln!(out, "Genre: {}", view.genre);
    let _ = writeln!(out, "Formed: {formed}");
    let _ = writeln!(out, "Country: {}", view.country);
    let _ = writeln!(out, "Years Active: {active}");

    if view.style_tags.is_empty() {
        let _ = writeln!(out, "Styles: none listed");
    } else {
        let _ = writeln!(out, "Styles: {}", view.style_tags.join(" \u{2022} "));
    }

    if view.social_links.is_empty() {
        let _ = writeln!(out, "Links: none available");
    } else {
        for link in &view.social_links {
            let _ = writeln!(out, "{}: {}", link.platform.label(), link.url);
        }
    }

    if let Some(bio) = &view.biography_excerpt {
        let _ = writeln!(out, "\n{bio}");
    }
    out
}

fn discography(view: &DiscographyView, sort_label: &str) -> String {
    let mut out = String::new();
    let summary = &view.summary;

    let _ = writeln!(
        out,
        "Total Albums: {} | Years Span: {} - {} | Most Tracks: {}",
        summary.album_count, summary.first_year, summary.last_year, summary.max_tracks
    );

    if let Some(timeline) = &view.timeline {
        let _ = writeln!(out, "\nAlbums by Release Year");
        for entry in timeline {
            let _ = writeln!(out, "{}  {}", entry.year, "#".repeat(entry.albums));
        }
    }

    let _ = writeln!(out, "\nAlbum Catalog (sorted by {sort_label})");
    for album in &view.albums {
        let _ = writeln!(
            out,
            "{:<40} {:>4}  {:>3} tracks  {:>10} sold",
            album.title, album.year, album.track_count, album.sales
        );
    }
    out
}

fn popular_tracks(view: &PopularTracksView) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Showing {} of {} tracks",
        view.details.len(),
        view.available
    );
    for (rank, track) in view.details.iter().enumerate() {
        let _ = write!(
            out,
            "{:>2}. {:<40} {:>3} [{}]",
            rank + 1,
            track.title,
            track.popularity,
            track.tier.as_str()
        );
        if track.year > 0 {
            let _ = write!(out, "  {} ({})", track.album, track.year);
        } else {
            let _ = write!(out, "  {}", track.album);
        }
        if let Some(video) = &track.music_video_url {
            let _ = write!(out, "  {video}");
        }
        out.push('\n');
    }
    out
}
