use std::sync::Arc;

use crate::catalog::Catalog;
use crate::models::Movie;
use crate::services::providers::TextCompletion;

/// Which path produced a chatbot reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Model,
    Local,
}

/// A chatbot answer and where it came from
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

/// Genres the local rule cascade recognizes, checked in this order
const KNOWN_GENRES: [&str; 10] = [
    "action",
    "comedy",
    "drama",
    "horror",
    "romance",
    "sci-fi",
    "thriller",
    "animation",
    "fantasy",
    "family",
];

const GREETINGS: [&str; 4] = ["hi", "hello", "hey", "greetings"];

/// Catalog-aware chat assistant
///
/// With a completion provider configured, the assistant answers through it
/// with catalog context embedded in the prompt. Without one, or when the
/// provider fails, a rule cascade over the catalog answers instead.
pub struct Chatbot {
    catalog: Arc<Catalog>,
    completion: Option<Arc<dyn TextCompletion>>,
}

impl Chatbot {
    pub fn new(catalog: Arc<Catalog>, completion: Option<Arc<dyn TextCompletion>>) -> Self {
        Self {
            catalog,
            completion,
        }
    }

    /// Answers a chat message; never fails, the local cascade is the floor
    pub async fn reply(&self, message: &str) -> ChatReply {
        let message = message.trim();

        if let Some(provider) = &self.completion {
            if !message.is_empty() {
                match provider.complete(&self.chat_prompt(message)).await {
                    Ok(text) => {
                        let text = text.trim().to_string();
                        if !text.is_empty() {
                            return ChatReply {
                                text,
                                source: ReplySource::Model,
                            };
                        }
                        tracing::warn!(
                            provider = provider.name(),
                            "Chat completion was blank, answering locally"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            provider = provider.name(),
                            error = %e,
                            "Chat completion failed, answering locally"
                        );
                    }
                }
            }
        }

        ChatReply {
            text: self.local_reply(message),
            source: ReplySource::Local,
        }
    }

    fn chat_prompt(&self, message: &str) -> String {
        let titles: Vec<&str> = self
            .catalog
            .movies()
            .iter()
            .take(20)
            .map(|m| m.title.as_str())
            .collect();
        format!(
            "You are a friendly assistant for the CineFlix movie catalog. \
             Some available titles: {}. Keep answers brief.\n\nUser: {}",
            titles.join(", "),
            message
        )
    }

    /// First matching rule wins; rules that find no movies fall through
    fn local_reply(&self, message: &str) -> String {
        if message.is_empty() {
            return "Ask me about movies! I can recommend top picks, suggest a genre, or search \
                    the catalog."
                .to_string();
        }

        let lowered = message.to_lowercase();

        if is_greeting(&lowered) {
            return "Hello! I'm your CineFlix assistant. Ask me for a recommendation or name a \
                    genre you're in the mood for."
                .to_string();
        }

        if lowered.contains("recommend") || lowered.contains("suggest") {
            let top = self.catalog.top_rated(3);
            if !top.is_empty() {
                return format!("Here are some top-rated picks: {}.", titles_of(&top));
            }
        }

        if let Some(genre) = KNOWN_GENRES.iter().copied().find(|g| lowered.contains(g)) {
            let mut movies = self.catalog.with_genre(&[genre]);
            movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            movies.truncate(3);
            if !movies.is_empty() {
                return format!(
                    "If you're in the mood for {}, try: {}.",
                    genre,
                    titles_of(&movies)
                );
            }
        }

        let mut hits = self.catalog.search_text(message);
        if !hits.is_empty() {
            hits.truncate(3);
            return format!("These might be what you're after: {}.", titles_of(&hits));
        }

        "I'm not sure about that one. Ask me to recommend something, or mention a genre like \
         action or comedy."
            .to_string()
    }
}

/// Greeting detection is word-based; "this" must not match "hi"
fn is_greeting(lowered: &str) -> bool {
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(|word| GREETINGS.contains(&word))
}

fn titles_of(movies: &[&Movie]) -> String {
    movies
        .iter()
        .map(|m| m.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
