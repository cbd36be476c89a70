use std::collections::HashMap;

use crate::models::{main_genre, DnaCategory, DnaProfile, DnaReport, InteractionEvent};

/// DNA category for a movie's main genre
///
/// Drama and every main genre outside the mapped four count toward Drama
/// Seeker.
pub fn category_for(main_genre: &str) -> DnaCategory {
    match main_genre {
        "Sci-Fi" => DnaCategory::SciFiDreamer,
        "Romance" => DnaCategory::RomanticIdealist,
        "Action" => DnaCategory::ActionEnthusiast,
        "Comedy" => DnaCategory::ComedyLover,
        _ => DnaCategory::DramaSeeker,
    }
}

/// Distills view and like events into a DNA profile
///
/// Each event's main genre is tallied, turned into a truncated integer
/// percentage of the tally, and the resulting per-category values are
/// normalized once more with the same truncation. Both passes truncate,
/// so the published percentages can sum below 100.
///
/// No events at all yields the default profile; events that carry only
/// blank genres yield the all-zero profile.
pub fn generate_profile(events: &[InteractionEvent]) -> DnaProfile {
    if events.is_empty() {
        return DnaProfile::DEFAULT;
    }

    let mut genre_counts: HashMap<&str, u32> = HashMap::new();
    for event in events {
        let genre = main_genre(&event.genre);
        if genre.is_empty() {
            continue;
        }
        *genre_counts.entry(genre).or_insert(0) += 1;
    }

    let total: u32 = genre_counts.values().sum();
    let mut interim = DnaProfile::ZERO;
    if total > 0 {
        for (genre, count) in &genre_counts {
            let share = (f64::from(*count) / f64::from(total) * 100.0) as u32;
            interim.add(category_for(genre), share);
        }
    }

    let interim_sum = interim.sum();
    if interim_sum == 0 {
        return interim;
    }

    let mut profile = DnaProfile::ZERO;
    for category in DnaCategory::ALL {
        let share = (f64::from(interim.get(category)) / f64::from(interim_sum) * 100.0) as u32;
        profile.add(category, share);
    }
    profile
}

/// Profile plus its top category and blurb, ready to serve
pub fn generate_report(events: &[InteractionEvent]) -> DnaReport {
    DnaReport::from_profile(generate_profile(events))
}
