//! Common test utilities for explorer integration tests
//!
//! Builds explorers wired to a mock catalog and a manual clock so cache
//! expiry can be driven from the test.

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

use std::sync::Arc;
use std::time::Duration;

use cadence_audiodb_client::AudioDbClient;
use cadence_explorer::{CachedCatalog, Clock, Explorer, ManualClock};
use cadence_test_utils::MockAudioDbServer;
use chrono::{TimeZone, Utc};

/// Cache lifetime used by test explorers
pub const TEST_TTL: Duration = Duration::from_secs(3600);

/// An explorer talking to a mock catalog
pub struct TestExplorer {
    pub catalog: MockAudioDbServer,
    pub clock: Arc<ManualClock>,
    pub explorer: Arc<Explorer>,
}

impl TestExplorer {
    pub async fn start() -> Self {
        let catalog = MockAudioDbServer::start().await;
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        let explorer = Arc::new(explorer_for(&catalog, clock.clone()));

        Self {
            catalog,
            clock,
            explorer,
        }
    }

    /// Total requests the mock catalog has seen across all endpoints
    pub async fn total_requests(&self) -> usize {
        self.catalog.search_requests().await
            + self.catalog.discography_requests().await
            + self.catalog.top_tracks_requests().await
    }
}

pub fn explorer_for(server: &MockAudioDbServer, clock: Arc<ManualClock>) -> Explorer {
    let client = AudioDbClient::new(&server.config()).unwrap();
    let clock: Arc<dyn Clock> = clock;
    Explorer::new(CachedCatalog::new(client, TEST_TTL, clock.clone()), clock)
}
