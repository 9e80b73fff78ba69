//! Integration tests for the lookup pipeline
//!
//! Each test runs the explorer against a mock catalog and checks both the
//! resulting view and which catalog calls were made.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use cadence_explorer::views::{AlbumSort, PopularityTier, SocialPlatform, ViewModel, ViewOutcome};
use cadence_explorer::{ExplorerError, ViewRequest, ViewSession};
use cadence_test_utils::{ArtistFixture, MockAudioDbServer, TrackFixture};
use chrono::{TimeZone, Utc};
use common::*;

// =============================================================================
// Overview
// =============================================================================

#[tokio::test]
async fn test_overview_fetches_only_the_search() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::overview("Coldplay"))
        .await
        .unwrap();

    assert_eq!(dashboard.artist.id, COLDPLAY_ID);
    let overview = assert_matches!(dashboard.view, ViewModel::Overview(view) => view);
    assert_eq!(overview.years_active, Some(28));
    assert_eq!(
        overview.style_tags,
        vec!["Rock/Pop", "Britpop", "Alternative", "Piano Rock"]
    );
    let platforms: Vec<_> = overview.social_links.iter().map(|l| l.platform).collect();
    assert_eq!(
        platforms,
        vec![
            SocialPlatform::Website,
            SocialPlatform::Facebook,
            SocialPlatform::Instagram
        ]
    );

    assert_eq!(ctx.catalog.search_requests().await, 1);
    assert_eq!(ctx.catalog.discography_requests().await, 0);
    assert_eq!(ctx.catalog.top_tracks_requests().await, 0);
}

#[tokio::test]
async fn test_overview_with_sparse_profile() {
    let ctx = TestExplorer::start().await;
    ctx.catalog
        .mock_search("Obscure", vec![ArtistFixture::new("42", "Obscure")])
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::overview("Obscure"))
        .await
        .unwrap();

    assert_eq!(dashboard.artist.genre, "N/A");
    let overview = assert_matches!(dashboard.view, ViewModel::Overview(view) => view);
    assert_eq!(overview.years_active, None);
    assert!(overview.style_tags.is_empty());
    assert!(overview.social_links.is_empty());
    assert_eq!(overview.biography_excerpt, None);
}

// =============================================================================
// Not found and validation
// =============================================================================

#[tokio::test]
async fn test_unknown_artist_is_not_found_without_further_calls() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search_not_found("Zzzzznotaband").await;

    let result = ctx
        .explorer
        .lookup(&ViewRequest::discography(
            "Zzzzznotaband",
            AlbumSort::YearNewest,
        ))
        .await;

    assert_matches!(result, Err(ExplorerError::NotFound(name)) if name == "Zzzzznotaband");
    assert_eq!(ctx.catalog.discography_requests().await, 0);
    assert_eq!(ctx.catalog.top_tracks_requests().await, 0);
}

#[tokio::test]
async fn test_failed_search_is_reported_as_not_found() {
    let ctx = TestExplorer::start().await;
    ctx.catalog
        .mock_status(MockAudioDbServer::search_path(), 503)
        .await;

    let result = ctx.explorer.lookup(&ViewRequest::overview("Coldplay")).await;

    assert_matches!(result, Err(ExplorerError::NotFound(_)));
}

#[tokio::test]
async fn test_blank_name_makes_no_request() {
    let ctx = TestExplorer::start().await;

    let result = ctx.explorer.lookup(&ViewRequest::overview("   ")).await;

    assert_matches!(result, Err(ExplorerError::Validation(_)));
    assert_eq!(ctx.total_requests().await, 0);
}

#[tokio::test]
async fn test_out_of_range_popularity_makes_no_request() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;

    let result = ctx
        .explorer
        .lookup(&ViewRequest::popular_tracks("Coldplay", 101))
        .await;

    assert_matches!(result, Err(ExplorerError::Validation(_)));
    assert_eq!(ctx.total_requests().await, 0);
}

// =============================================================================
// Discography
// =============================================================================

#[tokio::test]
async fn test_discography_drops_implausible_years() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_discography(COLDPLAY_ID, coldplay_albums())
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::discography("Coldplay", AlbumSort::YearOldest))
        .await
        .unwrap();

    let outcome = assert_matches!(dashboard.view, ViewModel::Discography { outcome, .. } => outcome);
    let view = outcome.into_ready().unwrap();

    assert_eq!(view.summary.album_count, 3);
    assert_eq!(view.summary.first_year, 1998);
    assert_eq!(view.summary.last_year, 2002);
    assert_eq!(view.summary.max_tracks, 11);
    let years: Vec<u32> = view.albums.iter().map(|a| a.year).collect();
    assert_eq!(years, vec![1998, 2000, 2002]);
    assert_eq!(view.timeline.map(|t| t.len()), Some(3));
    assert_eq!(ctx.catalog.top_tracks_requests().await, 0);
}

#[tokio::test]
async fn test_discography_sorted_by_sales() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_discography(COLDPLAY_ID, coldplay_albums())
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::discography("Coldplay", AlbumSort::Sales))
        .await
        .unwrap();

    let view = match dashboard.view {
        ViewModel::Discography {
            outcome: ViewOutcome::Ready(view),
            ..
        } => view,
        other => panic!("expected a discography, got {other:?}"),
    };
    let titles: Vec<&str> = view.albums.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["A Rush of Blood to the Head", "Parachutes", "The Blue Room"]
    );
}

#[tokio::test]
async fn test_empty_discography_is_upstream_empty() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog.mock_discography_empty(COLDPLAY_ID).await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::discography("Coldplay", AlbumSort::YearNewest))
        .await
        .unwrap();

    assert_matches!(
        dashboard.view,
        ViewModel::Discography {
            outcome: ViewOutcome::UpstreamEmpty,
            ..
        }
    );
    assert_eq!(
        dashboard.user_message().as_deref(),
        Some("No discography data available from the API.")
    );
}

#[tokio::test]
async fn test_failing_discography_degrades_to_upstream_empty() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_status(MockAudioDbServer::discography_path(), 500)
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::discography("Coldplay", AlbumSort::YearNewest))
        .await
        .unwrap();

    assert_matches!(
        dashboard.view,
        ViewModel::Discography {
            outcome: ViewOutcome::UpstreamEmpty,
            ..
        }
    );
}

// =============================================================================
// Popular tracks
// =============================================================================

#[tokio::test]
async fn test_popular_tracks_threshold() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_top_tracks("Coldplay", coldplay_tracks())
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::popular_tracks("Coldplay", 60))
        .await
        .unwrap();

    let outcome = assert_matches!(dashboard.view, ViewModel::PopularTracks { outcome, .. } => outcome);
    let view = outcome.into_ready().unwrap();

    let scores: Vec<u32> = view.details.iter().map(|t| t.popularity).collect();
    assert_eq!(scores, vec![90, 65]);
    assert_eq!(view.available, 3);
    assert_eq!(view.details[0].tier, PopularityTier::High);
    assert_eq!(view.details[1].tier, PopularityTier::Medium);
    assert!(view.details[0].music_video_url.is_some());
    assert_eq!(ctx.catalog.discography_requests().await, 0);
}

#[tokio::test]
async fn test_threshold_too_high() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_top_tracks("Coldplay", coldplay_tracks())
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::popular_tracks("Coldplay", 95))
        .await
        .unwrap();

    assert_eq!(
        dashboard.user_message().as_deref(),
        Some("No tracks meet the minimum popularity score of 95.")
    );
}

#[tokio::test]
async fn test_null_top_tracks_is_upstream_empty() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog.mock_top_tracks_null("Coldplay").await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::popular_tracks("Coldplay", 0))
        .await
        .unwrap();

    assert_matches!(
        dashboard.view,
        ViewModel::PopularTracks {
            outcome: ViewOutcome::UpstreamEmpty,
            ..
        }
    );
}

#[tokio::test]
async fn test_nameless_artist_skips_top_tracks() {
    let ctx = TestExplorer::start().await;
    ctx.catalog
        .mock_search("Nameless", vec![ArtistFixture::new("777", "Nameless").without_name()])
        .await;
    ctx.catalog
        .mock_top_tracks("Unknown Artist", vec![TrackFixture::new("Someone Else's Hit", "99")])
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::popular_tracks("Nameless", 0))
        .await
        .unwrap();

    assert_eq!(dashboard.artist.name, "Unknown Artist");
    assert_eq!(dashboard.artist.catalog_name, None);
    assert_matches!(
        dashboard.view,
        ViewModel::PopularTracks {
            outcome: ViewOutcome::UpstreamEmpty,
            ..
        }
    );
    assert_eq!(ctx.catalog.top_tracks_requests().await, 0);
}

#[tokio::test]
async fn test_report_for_nameless_artist_skips_top_tracks() {
    let ctx = TestExplorer::start().await;
    ctx.catalog
        .mock_search("Nameless", vec![ArtistFixture::new("777", "Nameless").without_name()])
        .await;
    ctx.catalog.mock_discography_empty("777").await;

    let report = ctx
        .explorer
        .report("Nameless", AlbumSort::YearNewest, 0)
        .await
        .unwrap();

    assert_matches!(report.popular_tracks, ViewOutcome::UpstreamEmpty);
    assert_eq!(ctx.catalog.top_tracks_requests().await, 0);
}

#[tokio::test]
async fn test_slow_top_tracks_degrade_to_upstream_empty() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_slow(MockAudioDbServer::top_tracks_path(), Duration::from_secs(3))
        .await;

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::popular_tracks("Coldplay", 0))
        .await
        .unwrap();

    assert_matches!(
        dashboard.view,
        ViewModel::PopularTracks {
            outcome: ViewOutcome::UpstreamEmpty,
            ..
        }
    );
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_repeat_lookup_is_served_from_cache() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_discography(COLDPLAY_ID, coldplay_albums())
        .await;

    for sort in [AlbumSort::YearNewest, AlbumSort::Sales, AlbumSort::TrackCount] {
        ctx.explorer
            .lookup(&ViewRequest::discography("Coldplay", sort))
            .await
            .unwrap();
    }

    assert_eq!(ctx.catalog.search_requests().await, 1);
    assert_eq!(ctx.catalog.discography_requests().await, 1);
}

#[tokio::test]
async fn test_not_found_is_cached_too() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search_not_found("Zzzzznotaband").await;

    for _ in 0..2 {
        let result = ctx
            .explorer
            .lookup(&ViewRequest::overview("Zzzzznotaband"))
            .await;
        assert_matches!(result, Err(ExplorerError::NotFound(_)));
    }

    assert_eq!(ctx.catalog.search_requests().await, 1);
}

#[tokio::test]
async fn test_expired_entries_are_refetched() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;

    let request = ViewRequest::overview("Coldplay");
    ctx.explorer.lookup(&request).await.unwrap();

    ctx.clock.advance(TEST_TTL - Duration::from_secs(1));
    ctx.explorer.lookup(&request).await.unwrap();
    assert_eq!(ctx.catalog.search_requests().await, 1);

    ctx.clock.advance(Duration::from_secs(1));
    ctx.explorer.lookup(&request).await.unwrap();
    assert_eq!(ctx.catalog.search_requests().await, 2);
}

#[tokio::test]
async fn test_purge_drops_only_expired_responses() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog.mock_search("Daft Punk", vec![daft_punk()]).await;

    ctx.explorer.find_artist("Coldplay").await.unwrap();
    ctx.clock.advance(TEST_TTL);
    ctx.explorer.find_artist("Daft Punk").await.unwrap();

    assert_eq!(ctx.explorer.catalog().purge_expired(), 1);
    assert_eq!(ctx.explorer.catalog().purge_expired(), 0);

    ctx.explorer.find_artist("Daft Punk").await.unwrap();
    assert_eq!(ctx.catalog.search_requests().await, 2);
}

#[tokio::test]
async fn test_years_active_follow_the_clock() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.clock
        .set(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());

    let dashboard = ctx
        .explorer
        .lookup(&ViewRequest::overview("Coldplay"))
        .await
        .unwrap();

    let overview = assert_matches!(dashboard.view, ViewModel::Overview(view) => view);
    assert_eq!(overview.years_active, Some(34));
}

// =============================================================================
// Report and session
// =============================================================================

#[tokio::test]
async fn test_report_builds_every_view() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog
        .mock_discography(COLDPLAY_ID, coldplay_albums())
        .await;
    ctx.catalog
        .mock_top_tracks("Coldplay", coldplay_tracks())
        .await;

    let report = ctx
        .explorer
        .report("Coldplay", AlbumSort::YearNewest, 60)
        .await
        .unwrap();

    assert_eq!(report.overview.name, "Coldplay");
    assert_eq!(report.discography.ready().map(|d| d.summary.album_count), Some(3));
    assert_eq!(report.popular_tracks.ready().map(|t| t.details.len()), Some(2));
    assert_eq!(ctx.total_requests().await, 3);
}

#[tokio::test]
async fn test_report_for_unknown_artist() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search_not_found("Zzzzznotaband").await;

    let result = ctx
        .explorer
        .report("Zzzzznotaband", AlbumSort::YearNewest, 0)
        .await;

    assert_matches!(result, Err(ExplorerError::NotFound(_)));
    assert_eq!(ctx.catalog.discography_requests().await, 0);
    assert_eq!(ctx.catalog.top_tracks_requests().await, 0);
}

#[tokio::test]
async fn test_session_keeps_latest_lookup() {
    let ctx = TestExplorer::start().await;
    ctx.catalog.mock_search("Coldplay", vec![coldplay()]).await;
    ctx.catalog.mock_search("Daft Punk", vec![daft_punk()]).await;

    let session = ViewSession::new();
    let first = session.begin();
    let second = session.begin();

    let daft_punk = ctx
        .explorer
        .lookup(&ViewRequest::overview("Daft Punk"))
        .await
        .unwrap();
    assert!(session.publish(second, daft_punk));

    let coldplay = ctx
        .explorer
        .lookup(&ViewRequest::overview("Coldplay"))
        .await
        .unwrap();
    assert!(!session.publish(first, coldplay));

    assert_eq!(
        session.current().map(|d| d.artist.name),
        Some("Daft Punk".to_string())
    );
}
