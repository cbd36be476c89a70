use serde::{Deserialize, Serialize};

/// A movie in the catalog
///
/// The two derived text fields feed the vector indices and are rebuilt from
/// the raw columns at load time; they are never serialized to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Movie {
    /// Title doubles as the row identity; lookups compare case-insensitively
    pub title: String,
    /// Display genre string; may hold several whitespace-separated tokens
    pub genre: String,
    pub description: String,
    pub director: String,
    pub cast: String,
    pub keywords: String,
    pub soundtrack_keywords: String,
    pub ott_platform: String,
    pub rating: f32,
    /// Text the content index is built from
    #[serde(skip)]
    pub content_text: String,
    /// Text the soundtrack index is built from
    #[serde(skip)]
    pub soundtrack_text: String,
}

impl Movie {
    /// First whitespace-separated token of the genre string
    pub fn main_genre(&self) -> &str {
        main_genre(&self.genre)
    }
}

/// Main genre of a genre string: its first whitespace-separated token
/// ("Sci-Fi Thriller" -> "Sci-Fi"). Empty input yields the empty string.
pub fn main_genre(genre: &str) -> &str {
    genre.split_whitespace().next().unwrap_or("")
}

/// Raw catalog CSV row
///
/// Every column is optional: a partial catalog (older exports lack
/// `soundtrack_keywords`) must still load, with absent values degrading to
/// empty strings rather than failing the row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub soundtrack_keywords: Option<String>,
    #[serde(default)]
    pub ott_platform: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        let title = record.title.unwrap_or_default();
        let genre = record.genre.unwrap_or_default();
        let description = record.description.unwrap_or_default();
        let director = record.director.unwrap_or_default();
        let cast = record.cast.unwrap_or_default();
        let keywords = record.keywords.unwrap_or_default();
        let soundtrack_keywords = record.soundtrack_keywords.unwrap_or_default();
        let ott_platform = record.ott_platform.unwrap_or_default();
        let rating = record.rating.unwrap_or(0.0);

        let content_text = format!(
            "{} {} {} {} {}",
            genre, description, director, cast, keywords
        );
        let soundtrack_text = format!(
            "{} {} {} {}",
            soundtrack_keywords, genre, description, keywords
        );

        Movie {
            title,
            genre,
            description,
            director,
            cast,
            keywords,
            soundtrack_keywords,
            ott_platform,
            rating,
            content_text,
            soundtrack_text,
        }
    }
}
