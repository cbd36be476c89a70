use std::sync::Arc;

use crate::catalog::Catalog;
use crate::models::Movie;
use crate::services::genres;
use crate::services::sampling::Sampler;
use crate::services::tfidf::{rank_descending, TfidfIndex};

/// Hard cap on every recommendation list the engine returns
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Content-similarity recommender
///
/// Holds the precomputed pairwise similarity matrix of the content index,
/// so a `similar` lookup is a row scan with no vectorizing at request
/// time.
pub struct Recommender {
    catalog: Arc<Catalog>,
    pairwise: Vec<Vec<f32>>,
    sampler: Arc<Sampler>,
}

impl Recommender {
    /// Builds the content index and its pairwise matrix from the catalog
    pub fn new(catalog: Arc<Catalog>, sampler: Arc<Sampler>) -> Self {
        let index = TfidfIndex::build(&catalog.content_corpus());
        let pairwise = index.pairwise_similarity();
        tracing::info!(
            movies = catalog.len(),
            vocabulary = index.vocabulary_size(),
            "Content index built"
        );
        Self {
            catalog,
            pairwise,
            sampler,
        }
    }

    /// Up to ten movies most similar to the given title, best first
    ///
    /// Unknown titles yield an empty list. The movie itself is excluded by
    /// position, never by assuming it ranks first. Equal scores keep
    /// catalog order.
    pub fn similar(&self, title: &str) -> Vec<Movie> {
        let Some(position) = self.catalog.position_by_title(title) else {
            return Vec::new();
        };

        rank_descending(&self.pairwise[position], Some(position), MAX_RECOMMENDATIONS)
            .into_iter()
            .filter_map(|i| self.catalog.get(i).cloned())
            .collect()
    }

    /// Up to ten movies sampled from the genres opposite to the title's
    /// main genre. Unknown titles yield an empty list.
    pub fn parallel_universe(&self, title: &str) -> Vec<Movie> {
        let Some(movie) = self.catalog.find_by_title(title) else {
            return Vec::new();
        };

        let targets = genres::opposite_genres(movie.main_genre());
        let pool = self.catalog.indices_with_genre(targets);
        self.sampler
            .sample_indices(pool.len(), MAX_RECOMMENDATIONS)
            .into_iter()
            .filter_map(|i| self.catalog.get(pool[i]).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieRecord;
    use std::collections::HashSet;

    fn movie(title: &str, genre: &str, description: &str) -> Movie {
        Movie::from(MovieRecord {
            title: Some(title.to_string()),
            genre: Some(genre.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        })
    }

    fn test_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_movies(vec![
            movie(
                "Star Voyage",
                "Sci-Fi",
                "spaceship crew explores distant galaxy wormhole",
            ),
            movie(
                "Galaxy Quest",
                "Sci-Fi Comedy",
                "spaceship crew explores galaxy wormhole parody",
            ),
            movie("Baking Love", "Romance", "village baker falls deeply love"),
            movie("Lakeside Vows", "Romance Drama", "lakeside wedding love letters"),
            movie("Engine Fury", "Action", "car chase desert explosion convoy"),
        ]))
    }

    fn test_recommender() -> Recommender {
        Recommender::new(test_catalog(), Arc::new(Sampler::seeded(7)))
    }

    #[test]
    fn test_similar_ranks_shared_content_first() {
        let recommender = test_recommender();
        let similar = recommender.similar("Star Voyage");
        assert_eq!(similar[0].title, "Galaxy Quest");
        assert!(similar.iter().all(|m| m.title != "Star Voyage"));
    }

    #[test]
    fn test_similar_lookup_is_case_insensitive() {
        let recommender = test_recommender();
        let similar = recommender.similar("sTaR vOyAgE");
        assert_eq!(similar[0].title, "Galaxy Quest");
    }

    #[test]
    fn test_similar_unknown_title_is_empty() {
        let recommender = test_recommender();
        assert!(recommender.similar("Not In Catalog").is_empty());
        assert!(recommender.similar("").is_empty());
    }

    #[test]
    fn test_similar_caps_at_ten() {
        let movies: Vec<Movie> = (0..15)
            .map(|i| {
                movie(
                    &format!("Clone {i}"),
                    "Drama",
                    "identical description every time",
                )
            })
            .collect();
        let catalog = Arc::new(Catalog::from_movies(movies));
        let recommender = Recommender::new(catalog, Arc::new(Sampler::seeded(1)));

        let similar = recommender.similar("Clone 0");
        assert_eq!(similar.len(), MAX_RECOMMENDATIONS);
        // Identical scores fall back to catalog order
        assert_eq!(similar[0].title, "Clone 1");
        assert_eq!(similar[9].title, "Clone 10");
    }

    #[test]
    fn test_parallel_universe_draws_from_opposite_pool() {
        let recommender = test_recommender();
        // Sci-Fi jumps to Romance or Comedy
        let picks = recommender.parallel_universe("Star Voyage");
        assert!(!picks.is_empty());
        for pick in &picks {
            let genre = pick.genre.to_lowercase();
            assert!(
                genre.contains("romance") || genre.contains("comedy"),
                "unexpected genre {}",
                pick.genre
            );
        }
    }

    #[test]
    fn test_parallel_universe_small_pool_returns_whole_pool() {
        let recommender = test_recommender();
        let picks = recommender.parallel_universe("Star Voyage");
        let titles: HashSet<&str> = picks.iter().map(|m| m.title.as_str()).collect();
        // Galaxy Quest (Comedy), Baking Love and Lakeside Vows (Romance)
        assert_eq!(titles.len(), 3);
        assert!(titles.contains("Galaxy Quest"));
        assert!(titles.contains("Baking Love"));
        assert!(titles.contains("Lakeside Vows"));
    }

    #[test]
    fn test_parallel_universe_large_pool_returns_exactly_ten() {
        let mut movies = vec![movie("Lone Action", "Action", "explosions")];
        for i in 0..14 {
            movies.push(movie(&format!("Weepy {i}"), "Drama", "tears and rain"));
        }
        let catalog = Arc::new(Catalog::from_movies(movies));
        let recommender = Recommender::new(catalog, Arc::new(Sampler::seeded(3)));

        // Action jumps to Drama or Romance; the drama pool has 14 entries
        let picks = recommender.parallel_universe("Lone Action");
        assert_eq!(picks.len(), MAX_RECOMMENDATIONS);
        let titles: HashSet<&str> = picks.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_parallel_universe_unknown_title_is_empty() {
        let recommender = test_recommender();
        assert!(recommender.parallel_universe("Nope").is_empty());
    }

    #[test]
    fn test_parallel_universe_seeded_is_deterministic() {
        let a = Recommender::new(test_catalog(), Arc::new(Sampler::seeded(11)));
        let b = Recommender::new(test_catalog(), Arc::new(Sampler::seeded(11)));
        for _ in 0..5 {
            let pa: Vec<String> = a
                .parallel_universe("Star Voyage")
                .into_iter()
                .map(|m| m.title)
                .collect();
            let pb: Vec<String> = b
                .parallel_universe("Star Voyage")
                .into_iter()
                .map(|m| m.title)
                .collect();
            assert_eq!(pa, pb);
        }
    }
}
