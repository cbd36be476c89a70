//! Engine services: vector indices, recommenders, extraction, chat

pub mod chatbot;
pub mod cinesound;
pub mod dna;
pub mod extractor;
pub mod genres;
pub mod providers;
pub mod recommender;
pub mod sampling;
pub mod tfidf;
