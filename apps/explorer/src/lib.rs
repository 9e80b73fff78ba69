//! Cadence artist explorer
//!
//! Looks artists up in TheAudioDB through a response cache and builds the
//! dashboard views (overview, discography analysis, popular tracks) from
//! the normalized records. The `cadence` binary renders them in a terminal.
//!
//! ```rust,no_run
//! use cadence_explorer::{Config, Explorer, ViewRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let explorer = Explorer::from_config(&Config::load()?)?;
//! let dashboard = explorer.lookup(&ViewRequest::overview("Coldplay")).await?;
//! println!("{}", cadence_explorer::render::dashboard(&dashboard));
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod explorer;
pub mod render;
pub mod session;
pub mod views;

pub use assistant::{chat_artist, ConversationLog, MusicChat, Recommendation, Recommender};
pub use cache::{CacheKey, Clock, ManualClock, ResponseCache, SystemClock};
pub use catalog::CachedCatalog;
pub use config::Config;
pub use error::{ExplorerError, ExplorerResult};
pub use explorer::{Dashboard, Explorer, Report, ViewRequest, ViewSelection};
pub use session::{Ticket, ViewSession};
