//! Recommendation and chat on top of the explorer
//!
//! Both features are single calls to the generative-text service. Failures
//! of that service are returned inline as the reply text so the caller can
//! show them in place of an answer.

use std::sync::Arc;

use cadence_audiodb_client::ArtistProfile;
use cadence_ollama_client::{ChatMessage, OllamaClient};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ExplorerError, ExplorerResult};
use crate::explorer::Explorer;

/// Opening of every chat system prompt
pub const CHAT_SYSTEM_PROMPT: &str = "You are a music expert.";

/// Outcome of a two-artist recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub first: ArtistProfile,
    pub second: ArtistProfile,
    /// Model answer, or `"Error: ..."` when generation failed
    pub text: String,
}

/// Recommends one artist from two the user likes
#[derive(Debug, Clone)]
pub struct Recommender {
    explorer: Arc<Explorer>,
    ollama: OllamaClient,
}

impl Recommender {
    pub fn new(explorer: Arc<Explorer>, ollama: OllamaClient) -> Self {
        Self { explorer, ollama }
    }

    /// Look up both artists and ask the model for a recommendation.
    ///
    /// # Errors
    /// `Validation` when either name is blank (nothing is fetched),
    /// `NotFound` naming the first artist the catalog does not know.
    pub async fn recommend(&self, first: &str, second: &str) -> ExplorerResult<Recommendation> {
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(ExplorerError::Validation(
                "Please enter two artists!".to_string(),
            ));
        }

        let first = self.explorer.find_artist(first).await?;
        let second = self.explorer.find_artist(second).await?;

        let prompt = recommendation_prompt(&first, &second);
        debug!(first = %first.name, second = %second.name, "Requesting recommendation");

        let text = match self.ollama.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Recommendation generation failed");
                format!("Error: {e}")
            }
        };

        Ok(Recommendation {
            first,
            second,
            text,
        })
    }
}

pub fn recommendation_prompt(first: &ArtistProfile, second: &ArtistProfile) -> String {
    format!(
        "The user likes these two artists:\n\n\
         Artist 1:\n{}\n\n\
         Artist 2:\n{}\n\n\
         Based on both artists, recommend ONE music artist they would probably enjoy.\n\
         Also list 3-5 top songs by your recommended artist.\n\
         Make the explanation clear and friendly.",
        describe(first),
        describe(second)
    )
}

fn describe(artist: &ArtistProfile) -> String {
    format!(
        "Name: {}\nGenre: {}\nStyle: {}\nMood: {}",
        artist.name,
        artist.genre,
        if artist.style.is_empty() {
            "N/A"
        } else {
            artist.style.as_str()
        },
        artist.mood
    )
}

/// Chat history owned by the caller and passed into every turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationLog {
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// User and assistant messages in order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}

/// System prompt, optionally tailored to an artist the user likes
pub fn chat_context(artist: Option<&ArtistProfile>) -> String {
    match artist {
        Some(artist) => format!(
            "{CHAT_SYSTEM_PROMPT} The user likes {} ({} genre, {} style).",
            artist.name,
            artist.genre,
            if artist.style.is_empty() {
                "N/A"
            } else {
                artist.style.as_str()
            }
        ),
        None => CHAT_SYSTEM_PROMPT.to_string(),
    }
}

/// Look up the artist a chat should be tailored to.
///
/// A blank or unknown name yields `None`, and the chat falls back to the
/// generic system prompt.
pub async fn chat_artist(
    explorer: &Explorer,
    name: Option<&str>,
) -> ExplorerResult<Option<ArtistProfile>> {
    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        return Ok(None);
    };

    match explorer.find_artist(name).await {
        Ok(artist) => Ok(Some(artist)),
        Err(ExplorerError::NotFound(_)) => {
            warn!(artist = %name, "Chat artist not found, using generic context");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Music chat over a caller-owned conversation
#[derive(Debug, Clone)]
pub struct MusicChat {
    ollama: OllamaClient,
}

impl MusicChat {
    pub fn new(ollama: OllamaClient) -> Self {
        Self { ollama }
    }

    /// Send one user prompt and record both sides of the exchange in `log`.
    ///
    /// Returns the reply, or `"Error: ..."` when the model call failed.
    pub async fn turn(
        &self,
        log: &mut ConversationLog,
        context: Option<&ArtistProfile>,
        prompt: &str,
    ) -> String {
        log.push(ChatMessage::user(prompt));

        let mut messages = Vec::with_capacity(log.len() + 1);
        messages.push(ChatMessage::system(chat_context(context)));
        messages.extend_from_slice(log.messages());

        let reply = match self.ollama.chat(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat turn failed");
                format!("Error: {e}")
            }
        };

        log.push(ChatMessage::assistant(reply.clone()));
        reply
    }
}
