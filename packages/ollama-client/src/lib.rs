//! Ollama client for Cadence's assistant features
//!
//! The recommender sends one prompt through [`OllamaClient::generate`]; the
//! music chat sends the whole conversation through [`OllamaClient::chat`].
//! Transient failures (server down, timeouts) are retried with exponential
//! backoff according to a [`RetryPolicy`].
//!
//! ```no_run
//! use cadence_ollama_client::{ChatMessage, OllamaClient};
//! use cadence_shared_config::OllamaConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new(&OllamaConfig::default())?;
//! let reply = client
//!     .chat(&[
//!         ChatMessage::system("You are a music expert."),
//!         ChatMessage::user("What is shoegaze?"),
//!     ])
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::{OllamaClient, RetryPolicy};
pub use error::{OllamaError, OllamaResult};
pub use models::{ChatMessage, ChatRole};
