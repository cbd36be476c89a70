use anyhow::Context;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::models::{Movie, MovieRecord};

/// In-memory movie catalog
///
/// Loaded once at startup from CSV and shared read-only for the life of the
/// process. Row order is load order and is the tie-break order everywhere
/// ranking happens.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Loads the catalog from a CSV file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open catalog at {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to parse catalog at {}", path.display()))
    }

    /// Loads the catalog from any CSV reader
    ///
    /// Missing optional columns (and short rows) degrade to empty fields
    /// rather than failing the load.
    pub fn from_reader(reader: impl Read) -> anyhow::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let mut movies = Vec::new();
        for record in csv_reader.deserialize() {
            let record: MovieRecord = record.context("Failed to parse catalog row")?;
            movies.push(Movie::from(record));
        }

        Ok(Self { movies })
    }

    /// Wraps already-built movies, keeping their order
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Index of the first row whose title matches, case-insensitively
    pub fn position_by_title(&self, title: &str) -> Option<usize> {
        let needle = title.to_lowercase();
        self.movies
            .iter()
            .position(|m| m.title.to_lowercase() == needle)
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.position_by_title(title).map(|i| &self.movies[i])
    }

    /// Indices of movies whose genre field contains any of the given
    /// genres, case-insensitive substring match
    pub fn indices_with_genre(&self, genres: &[&str]) -> Vec<usize> {
        let needles: Vec<String> = genres.iter().map(|g| g.to_lowercase()).collect();
        self.movies
            .iter()
            .enumerate()
            .filter(|(_, m)| {
                let genre = m.genre.to_lowercase();
                needles.iter().any(|n| genre.contains(n))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Applies the AND-combined browse filters
    pub fn filter(&self, filter: &MovieFilter) -> Vec<&Movie> {
        let genre = normalized(&filter.genre);
        let ott = normalized(&filter.ott);
        let search = normalized(&filter.search);

        self.movies
            .iter()
            .filter(|m| {
                if let Some(g) = &genre {
                    if !m.genre.to_lowercase().contains(g) {
                        return false;
                    }
                }
                if let Some(o) = &ott {
                    if !m.ott_platform.to_lowercase().contains(o) {
                        return false;
                    }
                }
                if let Some(s) = &search {
                    let hit = m.title.to_lowercase().contains(s)
                        || m.description.to_lowercase().contains(s)
                        || m.cast.to_lowercase().contains(s);
                    if !hit {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    /// Movies whose genre contains any of the given genres, in catalog order
    pub fn with_genre(&self, genres: &[&str]) -> Vec<&Movie> {
        self.indices_with_genre(genres)
            .into_iter()
            .map(|i| &self.movies[i])
            .collect()
    }

    /// Top `limit` movies by rating, descending, catalog order on ties
    pub fn top_rated(&self, limit: usize) -> Vec<&Movie> {
        let mut ranked: Vec<&Movie> = self.movies.iter().collect();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked.truncate(limit);
        ranked
    }

    /// Movies whose title or description contains the query, case-insensitive
    pub fn search_text(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|m| {
                m.title.to_lowercase().contains(&needle)
                    || m.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn content_corpus(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.content_text.as_str()).collect()
    }

    pub fn soundtrack_corpus(&self) -> Vec<&str> {
        self.movies
            .iter()
            .map(|m| m.soundtrack_text.as_str())
            .collect()
    }
}

/// Optional browse filters, AND-combined; doubles as the query-string shape
/// of `GET /api/movies`. Blank parameters count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieFilter {
    pub genre: Option<String>,
    pub ott: Option<String>,
    pub search: Option<String>,
}

impl MovieFilter {
    /// True when no filter carries a non-blank value
    pub fn is_empty(&self) -> bool {
        normalized(&self.genre).is_none()
            && normalized(&self.ott).is_none()
            && normalized(&self.search).is_none()
    }
}

fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
title,genre,description,director,cast,keywords,soundtrack_keywords,ott_platform,rating
Inception,Sci-Fi Thriller,A thief enters dreams,Christopher Nolan,Leonardo DiCaprio,dream heist,orchestral tense,Netflix,8.8
The Notebook,Romance Drama,A summer love story,Nick Cassavetes,Ryan Gosling,love letters,piano gentle,Prime Video,7.8
Mad Max,Action Adventure,Chase across the wasteland,George Miller,Tom Hardy,cars desert,drums engine,Netflix,8.1
";

    fn sample_catalog() -> Catalog {
        Catalog::from_reader(SAMPLE_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_full_rows() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.movies()[0].title, "Inception");
        assert_eq!(catalog.movies()[1].soundtrack_keywords, "piano gentle");
        assert_eq!(catalog.movies()[2].rating, 8.1);
    }

    #[test]
    fn test_load_without_soundtrack_column() {
        let csv = "\
title,genre,description,director,cast,keywords,ott_platform,rating
Alien,Sci-Fi Horror,Crew meets a stowaway,Ridley Scott,Sigourney Weaver,space monster,Hulu,8.5
";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.movies()[0].soundtrack_keywords, "");
        assert!(catalog.movies()[0]
            .soundtrack_text
            .contains("Sci-Fi Horror"));
    }

    #[test]
    fn test_load_blank_rating_defaults_to_zero() {
        let csv = "\
title,genre,description,director,cast,keywords,soundtrack_keywords,ott_platform,rating
Quiet,Drama,Small town story,Someone,Someone Else,town,strings,Netflix,
";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.movies()[0].rating, 0.0);
    }

    #[test]
    fn test_position_by_title_is_case_insensitive() {
        let catalog = sample_catalog();
        assert_eq!(catalog.position_by_title("inception"), Some(0));
        assert_eq!(catalog.position_by_title("MAD MAX"), Some(2));
        assert_eq!(catalog.position_by_title("No Such Movie"), None);
    }

    #[test]
    fn test_duplicate_titles_first_match_wins() {
        let csv = "\
title,genre,description,director,cast,keywords,soundtrack_keywords,ott_platform,rating
Twin,Drama,First copy,A,B,first,slow,Netflix,6.0
Twin,Comedy,Second copy,C,D,second,fast,Hulu,7.0
";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.position_by_title("twin"), Some(0));
        assert_eq!(catalog.find_by_title("TWIN").unwrap().genre, "Drama");
    }

    #[test]
    fn test_indices_with_genre_substring_any() {
        let catalog = sample_catalog();
        assert_eq!(catalog.indices_with_genre(&["romance", "action"]), vec![1, 2]);
        assert_eq!(catalog.indices_with_genre(&["thriller"]), vec![0]);
        assert!(catalog.indices_with_genre(&["western"]).is_empty());
    }

    #[test]
    fn test_filter_combines_with_and() {
        let catalog = sample_catalog();

        let genre_only = catalog.filter(&MovieFilter {
            genre: Some("sci-fi".to_string()),
            ..Default::default()
        });
        assert_eq!(genre_only.len(), 1);
        assert_eq!(genre_only[0].title, "Inception");

        let genre_and_ott = catalog.filter(&MovieFilter {
            genre: Some("adventure".to_string()),
            ott: Some("netflix".to_string()),
            ..Default::default()
        });
        assert_eq!(genre_and_ott.len(), 1);
        assert_eq!(genre_and_ott[0].title, "Mad Max");

        let search = catalog.filter(&MovieFilter {
            search: Some("gosling".to_string()),
            ..Default::default()
        });
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].title, "The Notebook");
    }

    #[test]
    fn test_blank_filter_params_count_as_absent() {
        let catalog = sample_catalog();
        let filter = MovieFilter {
            genre: Some(String::new()),
            ott: None,
            search: Some(String::new()),
        };
        assert!(filter.is_empty());
        assert_eq!(catalog.filter(&filter).len(), 3);
    }

    #[test]
    fn test_top_rated_orders_descending() {
        let catalog = sample_catalog();
        let top = catalog.top_rated(2);
        assert_eq!(top[0].title, "Inception");
        assert_eq!(top[1].title, "Mad Max");
    }
}
