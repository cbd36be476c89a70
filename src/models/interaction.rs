use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a user did with a movie
///
/// Stored as lowercase text in SQLite. Only `view` and `like` feed the
/// Cinematic DNA aggregation; `chatbot` rows are kept for audit only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum InteractionAction {
    View,
    Like,
    Chatbot,
}

impl InteractionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionAction::View => "view",
            InteractionAction::Like => "like",
            InteractionAction::Chatbot => "chatbot",
        }
    }
}

/// A stored interaction log row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InteractionEvent {
    pub id: i64,
    pub action: InteractionAction,
    pub movie_title: String,
    pub genre: String,
    pub timestamp: DateTime<Utc>,
}

/// An interaction about to be appended to the log
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub action: InteractionAction,
    pub movie_title: String,
    pub genre: String,
}

impl NewInteraction {
    pub fn new(
        action: InteractionAction,
        movie_title: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            action,
            movie_title: movie_title.into(),
            genre: genre.into(),
        }
    }
}
