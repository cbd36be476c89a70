use crate::models::Mood;

/// Target genres for a Parallel Universe jump, keyed by the movie's main
/// genre. Main genres the table does not list fall back to Comedy and
/// Drama.
pub fn opposite_genres(main_genre: &str) -> &'static [&'static str] {
    match main_genre {
        "Sci-Fi" => &["Romance", "Comedy"],
        "Action" => &["Drama", "Romance"],
        "Horror" => &["Comedy", "Family"],
        "Drama" => &["Action", "Comedy"],
        "Romance" => &["Action", "Horror"],
        "Comedy" => &["Horror", "Drama"],
        "Thriller" => &["Family", "Romance"],
        "Animation" => &["Horror", "Thriller"],
        "Fantasy" => &["Historical", "Biography"],
        _ => &["Comedy", "Drama"],
    }
}

/// Genres sampled when CineSound falls back from keyword matching to the
/// detected mood. Total over the mood set.
pub fn mood_genres(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Uplifting => &["Drama", "Romance", "Family"],
        Mood::Melancholic => &["Drama", "Romance"],
        Mood::Energetic => &["Action", "Adventure"],
        Mood::Calm => &["Drama", "Sci-Fi"],
        Mood::Dark => &["Horror", "Thriller"],
        Mood::Happy => &["Comedy", "Family", "Animation"],
        Mood::Sad => &["Drama", "Romance"],
        Mood::Intense => &["Thriller", "Action"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_genres_listed_entries() {
        assert_eq!(opposite_genres("Sci-Fi"), &["Romance", "Comedy"]);
        assert_eq!(opposite_genres("Horror"), &["Comedy", "Family"]);
        assert_eq!(opposite_genres("Fantasy"), &["Historical", "Biography"]);
    }

    #[test]
    fn test_opposite_genres_default_for_unlisted() {
        assert_eq!(opposite_genres("Documentary"), &["Comedy", "Drama"]);
        assert_eq!(opposite_genres(""), &["Comedy", "Drama"]);
        // Lookup is by the exact main-genre token; casing matters
        assert_eq!(opposite_genres("sci-fi"), &["Comedy", "Drama"]);
    }

    #[test]
    fn test_mood_genres_cover_every_mood() {
        for mood in Mood::ALL {
            assert!(!mood_genres(mood).is_empty());
        }
        assert_eq!(mood_genres(Mood::Happy), &["Comedy", "Family", "Animation"]);
        assert_eq!(mood_genres(Mood::Dark), &["Horror", "Thriller"]);
        assert_eq!(mood_genres(Mood::Uplifting), &["Drama", "Romance", "Family"]);
    }
}
