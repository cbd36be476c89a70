use std::collections::HashSet;
use std::sync::Arc;

use crate::models::Mood;
use crate::services::providers::TextCompletion;

/// LLM-backed mood and keyword extraction with deterministic fallbacks
///
/// Holds an optional provider. `None` (nothing configured) and `Some` with
/// a failing call take different fallback routes, and neither ever
/// surfaces an error to the caller:
///
/// - mood: any miss collapses to the default
/// - keywords: unconfigured synthesizes locally, a failed call returns an
///   empty list
pub struct MoodKeywordExtractor {
    completion: Option<Arc<dyn TextCompletion>>,
}

impl MoodKeywordExtractor {
    pub fn new(completion: Option<Arc<dyn TextCompletion>>) -> Self {
        Self { completion }
    }

    pub fn is_configured(&self) -> bool {
        self.completion.is_some()
    }

    /// Detects the dominant mood of a song text
    pub async fn classify_mood(&self, song_text: &str) -> Mood {
        let Some(provider) = &self.completion else {
            return Mood::default();
        };

        match provider.complete(&mood_prompt(song_text)).await {
            Ok(answer) => match Mood::parse(&answer) {
                Some(mood) => mood,
                None => {
                    tracing::warn!(
                        answer = %answer,
                        "Mood answer outside the label set, using default"
                    );
                    Mood::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = provider.name(),
                    "Mood classification failed, using default"
                );
                Mood::default()
            }
        }
    }

    /// Extracts up to five thematic keywords from a song text
    pub async fn extract_keywords(&self, song_text: &str) -> Vec<String> {
        let Some(provider) = &self.completion else {
            return local_keywords(song_text);
        };

        match provider.complete(&keyword_prompt(song_text)).await {
            Ok(answer) => parse_keyword_answer(&answer),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = provider.name(),
                    "Keyword extraction failed"
                );
                Vec::new()
            }
        }
    }
}

fn mood_prompt(song_text: &str) -> String {
    format!(
        "Analyze the mood of this song or lyric fragment: \"{song_text}\". \
         Respond with exactly one word from this list: \
         uplifting, melancholic, energetic, calm, dark, happy, sad, intense."
    )
}

fn keyword_prompt(song_text: &str) -> String {
    format!(
        "Extract 3-5 thematic keywords from this song or lyric fragment: \"{song_text}\". \
         Respond with only the keywords, lowercase, separated by commas."
    )
}

/// Comma-separated answer -> trimmed lowercase keywords, capped at five
fn parse_keyword_answer(answer: &str) -> Vec<String> {
    answer
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .take(5)
        .collect()
}

/// Keyword synthesis used when no provider is configured: words longer
/// than three characters, lowercased, first-occurrence order, distinct,
/// capped at five
fn local_keywords(song_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for word in song_text.split_whitespace() {
        if word.chars().count() <= 3 {
            continue;
        }
        let lowered = word.to_lowercase();
        if seen.insert(lowered.clone()) {
            keywords.push(lowered);
            if keywords.len() == 5 {
                break;
            }
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{CompletionError, MockTextCompletion};

    fn extractor_with(mock: MockTextCompletion) -> MoodKeywordExtractor {
        MoodKeywordExtractor::new(Some(Arc::new(mock)))
    }

    fn unconfigured() -> MoodKeywordExtractor {
        MoodKeywordExtractor::new(None)
    }

    #[tokio::test]
    async fn test_mood_valid_answer_is_parsed() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete()
            .returning(|_| Ok(" Melancholic\n".to_string()));
        let extractor = extractor_with(mock);
        assert_eq!(
            extractor.classify_mood("rain on the window").await,
            Mood::Melancholic
        );
    }

    #[tokio::test]
    async fn test_mood_answer_outside_set_defaults() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete()
            .returning(|_| Ok("jubilant".to_string()));
        let extractor = extractor_with(mock);
        assert_eq!(
            extractor.classify_mood("confetti everywhere").await,
            Mood::Uplifting
        );
    }

    #[tokio::test]
    async fn test_mood_provider_failure_defaults() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete()
            .returning(|_| Err(CompletionError::Empty));
        mock.expect_name().return_const("mock");
        let extractor = extractor_with(mock);
        assert_eq!(extractor.classify_mood("anything").await, Mood::Uplifting);
    }

    #[tokio::test]
    async fn test_mood_unconfigured_defaults_without_calls() {
        assert_eq!(
            unconfigured().classify_mood("no provider here").await,
            Mood::Uplifting
        );
    }

    #[tokio::test]
    async fn test_keywords_parsed_from_answer() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete()
            .returning(|_| Ok("Love, LOSS , night drive,, rain".to_string()));
        let extractor = extractor_with(mock);
        assert_eq!(
            extractor.extract_keywords("lyrics").await,
            vec!["love", "loss", "night drive", "rain"]
        );
    }

    #[tokio::test]
    async fn test_keywords_capped_at_five() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete()
            .returning(|_| Ok("a,b,c,d,e,f,g".to_string()));
        let extractor = extractor_with(mock);
        assert_eq!(extractor.extract_keywords("lyrics").await.len(), 5);
    }

    #[tokio::test]
    async fn test_keywords_provider_failure_yields_empty() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete().returning(|_| {
            Err(CompletionError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        });
        mock.expect_name().return_const("mock");
        let extractor = extractor_with(mock);
        assert!(extractor.extract_keywords("lyrics").await.is_empty());
    }

    #[tokio::test]
    async fn test_keywords_unconfigured_synthesizes_locally() {
        let extractor = unconfigured();
        let keywords = extractor
            .extract_keywords("The Moon and the RIVER carry moon dust far away tonight yes")
            .await;
        assert_eq!(
            keywords,
            vec!["moon", "river", "carry", "dust", "away"]
        );
    }

    #[test]
    fn test_local_keywords_rules() {
        // Length is checked before lowercasing; duplicates collapse
        assert_eq!(
            local_keywords("Sun sun SUNNY day day"),
            vec!["sunny"]
        );
        assert_eq!(local_keywords("a the and of"), Vec::<String>::new());
        assert_eq!(local_keywords(""), Vec::<String>::new());
    }

    #[test]
    fn test_parse_keyword_answer_drops_blanks() {
        assert_eq!(
            parse_keyword_answer(" , ,heart,  ,beat "),
            vec!["heart", "beat"]
        );
        assert_eq!(parse_keyword_answer(""), Vec::<String>::new());
    }
}
