//! Catalog fixtures shared by the explorer tests

use cadence_test_utils::{AlbumFixture, ArtistFixture, TrackFixture};

pub const COLDPLAY_ID: &str = "111239";

pub fn coldplay() -> ArtistFixture {
    ArtistFixture::coldplay()
}

/// Three real albums plus one with an implausible release year
pub fn coldplay_albums() -> Vec<AlbumFixture> {
    vec![
        AlbumFixture::new("The Blue Room", "1998").tracks(5),
        AlbumFixture::new("Parachutes", "2000")
            .tracks(10)
            .sales(8_000_000),
        AlbumFixture::new("A Rush of Blood to the Head", "2002")
            .tracks(11)
            .sales(9_000_000),
        AlbumFixture::new("Wax Cylinder Demo", "1850").tracks(2),
    ]
}

pub fn coldplay_tracks() -> Vec<TrackFixture> {
    vec![
        TrackFixture::new("Yellow", "90")
            .on_album("Parachutes", "2000")
            .with_video("https://www.youtube.com/watch?v=yKNxeF4KMsY"),
        TrackFixture::new("Trouble", "65").on_album("Parachutes", "2000"),
        TrackFixture::new("Shiver", "40").on_album("Parachutes", "2000"),
    ]
}

pub fn daft_punk() -> ArtistFixture {
    ArtistFixture::new("111492", "Daft Punk")
        .with_genre("Electronic", "House, French House")
        .formed("1993")
}
