//! Shared test utilities for Cadence workspace
//!
//! This crate provides mock implementations of external services for testing
//! without network dependencies.
//!
//! # Mock Services
//!
//! - [`MockAudioDbServer`] - Mock TheAudioDB catalog (search, albums, top tracks)
//! - [`MockOllamaServer`] - Mock Ollama server for recommender and chat tests
//!
//! # Example
//!
//! ```rust,ignore
//! use cadence_test_utils::{ArtistFixture, MockAudioDbServer};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let catalog = MockAudioDbServer::start().await;
//!     catalog
//!         .mock_search("Coldplay", vec![ArtistFixture::new("111239", "Coldplay")])
//!         .await;
//!
//!     // Use catalog.config() to configure your client
//! }
//! ```

mod audiodb;
mod ollama;

pub use audiodb::{AlbumFixture, ArtistFixture, MockAudioDbServer, TrackFixture};
pub use ollama::MockOllamaServer;
