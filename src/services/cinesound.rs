use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::models::{Mood, Movie};
use crate::services::extractor::MoodKeywordExtractor;
use crate::services::genres;
use crate::services::recommender::MAX_RECOMMENDATIONS;
use crate::services::sampling::Sampler;
use crate::services::tfidf::{rank_descending, TfidfIndex};

/// Outcome of matching a song against the catalog
#[derive(Debug, Clone)]
pub struct SongMatch {
    pub movies: Vec<Movie>,
    pub mood: Mood,
    pub keywords: Vec<String>,
}

/// Song-to-movie matcher over the soundtrack index
///
/// Keyword similarity is tried first; when the extracted keywords share
/// no vocabulary with any soundtrack text, the matcher falls back to
/// sampling movies whose genres fit the detected mood.
pub struct SongMatcher {
    catalog: Arc<Catalog>,
    soundtrack_index: TfidfIndex,
    extractor: MoodKeywordExtractor,
    sampler: Arc<Sampler>,
}

impl SongMatcher {
    pub fn new(
        catalog: Arc<Catalog>,
        extractor: MoodKeywordExtractor,
        sampler: Arc<Sampler>,
    ) -> Self {
        let soundtrack_index = TfidfIndex::build(&catalog.soundtrack_corpus());
        tracing::info!(
            movies = catalog.len(),
            vocabulary = soundtrack_index.vocabulary_size(),
            "Soundtrack index built"
        );
        Self {
            catalog,
            soundtrack_index,
            extractor,
            sampler,
        }
    }

    /// Matches free-form song text to up to ten movies
    ///
    /// The detected mood and keywords are always reported, whichever
    /// matching stage produced the movies.
    pub async fn match_song(&self, song: &str) -> AppResult<SongMatch> {
        let song = song.trim();
        if song.is_empty() {
            return Err(AppError::InvalidInput("Song text cannot be empty".into()));
        }

        let mood = self.extractor.classify_mood(song).await;
        let keywords = self.extractor.extract_keywords(song).await;

        if !keywords.is_empty() {
            let query = keywords.join(" ");
            let scores = self.soundtrack_index.query_similarity(&query);
            if scores.iter().any(|&score| score > 0.0) {
                let movies = rank_descending(&scores, None, MAX_RECOMMENDATIONS)
                    .into_iter()
                    .filter_map(|i| self.catalog.get(i).cloned())
                    .collect();
                return Ok(SongMatch {
                    movies,
                    mood,
                    keywords,
                });
            }
        }

        let movies = self.sample_by_mood(mood);
        Ok(SongMatch {
            movies,
            mood,
            keywords,
        })
    }

    fn sample_by_mood(&self, mood: Mood) -> Vec<Movie> {
        let pool = self.catalog.indices_with_genre(genres::mood_genres(mood));
        self.sampler
            .sample_indices(pool.len(), MAX_RECOMMENDATIONS)
            .into_iter()
            .filter_map(|i| self.catalog.get(pool[i]).cloned())
            .collect()
    }
}
