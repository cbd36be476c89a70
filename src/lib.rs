//! CineFlix: a movie discovery service
//!
//! Serves catalog browsing, content-similarity recommendations, the
//! Parallel Universe genre jump, song-to-movie matching over a soundtrack
//! index, a Cinematic DNA profile aggregated from the interaction log,
//! and a catalog-aware chatbot.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
