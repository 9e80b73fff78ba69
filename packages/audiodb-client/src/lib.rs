//! TheAudioDB catalog client for Cadence
//!
//! This crate talks to the three catalog endpoints the explorer needs:
//! - artist search by name
//! - album list by artist id
//! - top tracks by artist name
//!
//! Raw payloads are normalized before they leave the crate (see
//! [`normalize`]), so numeric fields are always integers and text fields
//! carry placeholders instead of nulls.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_audiodb_client::AudioDbClient;
//! use cadence_shared_config::CatalogConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AudioDbClient::new(&CatalogConfig::default())?;
//!
//! if let Some(artist) = client.search_artist("Coldplay").await {
//!     let albums = client.get_discography(&artist.id).await;
//!     println!("{} has {} albums", artist.name, albums.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `AUDIODB_URL`, `AUDIODB_API_KEY`, `AUDIODB_TIMEOUT` (see
//!   `cadence_shared_config::CatalogConfig`)

mod client;
mod error;
mod models;
pub mod normalize;

pub use client::AudioDbClient;
pub use error::{AudioDbError, AudioDbResult};
pub use models::{AlbumRecord, ArtistProfile, TrackRecord};
