pub mod dna;
pub mod interaction;
pub mod mood;
pub mod movie;

pub use dna::{DnaCategory, DnaProfile, DnaReport};
pub use interaction::{InteractionAction, InteractionEvent, NewInteraction};
pub use mood::Mood;
pub use movie::{main_genre, Movie, MovieRecord};
