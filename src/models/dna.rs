use serde::{Deserialize, Serialize};

/// The five Cinematic DNA categories
///
/// Declaration order doubles as the tie-break order when picking the top
/// category of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnaCategory {
    SciFiDreamer,
    RomanticIdealist,
    ActionEnthusiast,
    ComedyLover,
    DramaSeeker,
}

impl DnaCategory {
    pub const ALL: [DnaCategory; 5] = [
        DnaCategory::SciFiDreamer,
        DnaCategory::RomanticIdealist,
        DnaCategory::ActionEnthusiast,
        DnaCategory::ComedyLover,
        DnaCategory::DramaSeeker,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            DnaCategory::SciFiDreamer => {
                "Sci-Fi Dreamer - You explore the boundaries of imagination and reality"
            }
            DnaCategory::RomanticIdealist => {
                "Romantic Idealist - You believe in the power of love and connection"
            }
            DnaCategory::ActionEnthusiast => {
                "Action Enthusiast - You crave adrenaline and excitement"
            }
            DnaCategory::ComedyLover => {
                "Comedy Lover - You find joy in laughter and lighthearted moments"
            }
            DnaCategory::DramaSeeker => {
                "Drama Seeker - You appreciate deep stories and emotional journeys"
            }
        }
    }
}

/// Integer percentage distribution over the five DNA categories
///
/// Values come out of a two-pass truncating normalization, so they may sum
/// to slightly less than 100. That undershoot is part of the published
/// behavior and is preserved as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaProfile {
    pub sci_fi_dreamer: u32,
    pub romantic_idealist: u32,
    pub action_enthusiast: u32,
    pub comedy_lover: u32,
    pub drama_seeker: u32,
}

impl DnaProfile {
    /// Profile reported when the log holds no view or like events
    pub const DEFAULT: DnaProfile = DnaProfile {
        sci_fi_dreamer: 30,
        romantic_idealist: 25,
        action_enthusiast: 20,
        comedy_lover: 15,
        drama_seeker: 10,
    };

    pub const ZERO: DnaProfile = DnaProfile {
        sci_fi_dreamer: 0,
        romantic_idealist: 0,
        action_enthusiast: 0,
        comedy_lover: 0,
        drama_seeker: 0,
    };

    pub fn get(&self, category: DnaCategory) -> u32 {
        match category {
            DnaCategory::SciFiDreamer => self.sci_fi_dreamer,
            DnaCategory::RomanticIdealist => self.romantic_idealist,
            DnaCategory::ActionEnthusiast => self.action_enthusiast,
            DnaCategory::ComedyLover => self.comedy_lover,
            DnaCategory::DramaSeeker => self.drama_seeker,
        }
    }

    pub fn add(&mut self, category: DnaCategory, value: u32) {
        match category {
            DnaCategory::SciFiDreamer => self.sci_fi_dreamer += value,
            DnaCategory::RomanticIdealist => self.romantic_idealist += value,
            DnaCategory::ActionEnthusiast => self.action_enthusiast += value,
            DnaCategory::ComedyLover => self.comedy_lover += value,
            DnaCategory::DramaSeeker => self.drama_seeker += value,
        }
    }

    pub fn sum(&self) -> u32 {
        DnaCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Category with the highest value; ties go to the earliest declared
    pub fn top_category(&self) -> DnaCategory {
        let mut top = DnaCategory::SciFiDreamer;
        for category in DnaCategory::ALL {
            if self.get(category) > self.get(top) {
                top = category;
            }
        }
        top
    }
}

/// The full Cinematic DNA payload for a user
#[derive(Debug, Clone, Serialize)]
pub struct DnaReport {
    pub profile: DnaProfile,
    pub top_category: DnaCategory,
    pub description: &'static str,
}

impl DnaReport {
    pub fn from_profile(profile: DnaProfile) -> Self {
        let top_category = profile.top_category();
        Self {
            profile,
            top_category,
            description: top_category.description(),
        }
    }
}
