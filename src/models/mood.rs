use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The closed set of moods the song matcher understands
///
/// The LLM is prompted to answer with exactly one of these labels; anything
/// else collapses to the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Uplifting,
    Melancholic,
    Energetic,
    Calm,
    Dark,
    Happy,
    Sad,
    Intense,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Uplifting,
        Mood::Melancholic,
        Mood::Energetic,
        Mood::Calm,
        Mood::Dark,
        Mood::Happy,
        Mood::Sad,
        Mood::Intense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Uplifting => "uplifting",
            Mood::Melancholic => "melancholic",
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Dark => "dark",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Intense => "intense",
        }
    }

    /// Parses a label, tolerating surrounding whitespace and any casing.
    /// Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Mood> {
        let normalized = label.trim().to_lowercase();
        Mood::ALL.iter().copied().find(|m| m.as_str() == normalized)
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_labels() {
        for mood in Mood::ALL {
            assert_eq!(Mood::parse(mood.as_str()), Some(mood));
        }
    }

    #[test]
    fn test_parse_tolerates_case_and_whitespace() {
        assert_eq!(Mood::parse("  Melancholic \n"), Some(Mood::Melancholic));
        assert_eq!(Mood::parse("DARK"), Some(Mood::Dark));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Mood::parse("joyful"), None);
        assert_eq!(Mood::parse(""), None);
        assert_eq!(Mood::parse("uplifting mood"), None);
    }

    #[test]
    fn test_default_is_uplifting() {
        assert_eq!(Mood::default(), Mood::Uplifting);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Mood::Energetic).unwrap(),
            "\"energetic\""
        );
        let parsed: Mood = serde_json::from_str("\"sad\"").unwrap();
        assert_eq!(parsed, Mood::Sad);
    }
}
