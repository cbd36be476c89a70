use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::Catalog;
use crate::db::{InteractionStore, InteractionWriterHandle, PreferenceStore};
use crate::services::chatbot::Chatbot;
use crate::services::cinesound::SongMatcher;
use crate::services::extractor::MoodKeywordExtractor;
use crate::services::providers::TextCompletion;
use crate::services::recommender::Recommender;
use crate::services::sampling::Sampler;

/// Shared application state
///
/// Everything inside is immutable after startup or synchronizes
/// internally, so handlers clone freely.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<Recommender>,
    pub song_matcher: Arc<SongMatcher>,
    pub chatbot: Arc<Chatbot>,
    pub interactions: InteractionStore,
    pub preferences: PreferenceStore,
}

impl AppState {
    /// Wires the engine, the stores and the chat assistant together
    ///
    /// Returns the state plus the handle that shuts down the interaction
    /// writer.
    pub fn new(
        catalog: Catalog,
        completion: Option<Arc<dyn TextCompletion>>,
        pool: SqlitePool,
        rng_seed: Option<u64>,
    ) -> (Self, InteractionWriterHandle) {
        let catalog = Arc::new(catalog);
        let sampler = Arc::new(Sampler::from_seed_option(rng_seed));

        let recommender = Arc::new(Recommender::new(catalog.clone(), sampler.clone()));
        let song_matcher = Arc::new(SongMatcher::new(
            catalog.clone(),
            MoodKeywordExtractor::new(completion.clone()),
            sampler,
        ));
        let chatbot = Arc::new(Chatbot::new(catalog.clone(), completion));

        let (interactions, writer_handle) = InteractionStore::new(pool.clone());
        let preferences = PreferenceStore::new(pool);

        (
            Self {
                catalog,
                recommender,
                song_matcher,
                chatbot,
                interactions,
                preferences,
            },
            writer_handle,
        )
    }
}
