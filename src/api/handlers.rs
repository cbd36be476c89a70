use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::MovieFilter;
use crate::error::{AppError, AppResult};
use crate::middleware::SessionId;
use crate::models::{DnaReport, InteractionAction, Mood, Movie, NewInteraction};
use crate::services::chatbot::ReplySource;
use crate::services::dna;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub struct CineSoundRequest {
    pub song: String,
}

#[derive(Debug, Serialize)]
pub struct CineSoundResponse {
    pub song: String,
    pub detected_mood: Mood,
    pub keywords: Vec<String>,
    pub recommendations: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesRequest {
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub genres: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Browses the catalog with optional filters
///
/// Without filters, a session with stored favourite genres sees only the
/// movies matching any favourite; a match on nothing stays empty. Any
/// explicit filter bypasses personalization.
pub async fn get_movies(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<Movie>>> {
    if !filter.is_empty() {
        let movies = state
            .catalog
            .filter(&filter)
            .into_iter()
            .cloned()
            .collect();
        return Ok(Json(movies));
    }

    let favourites = state.preferences.get(&session.as_str()).await?;
    let needles: Vec<&str> = favourites
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();
    if needles.is_empty() {
        return Ok(Json(state.catalog.movies().to_vec()));
    }

    let movies = state
        .catalog
        .with_genre(&needles)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(movies))
}

/// Similar-movie recommendations for a title
///
/// A known title records a view before ranking; blank and unknown titles
/// yield an empty list rather than an error.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<TitleRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    let title = request.title.trim();
    if title.is_empty() {
        return Ok(Json(RecommendationsResponse {
            recommendations: Vec::new(),
        }));
    }

    if let Some(movie) = state.catalog.find_by_title(title) {
        state.interactions.record_in_background(NewInteraction::new(
            InteractionAction::View,
            movie.title.clone(),
            movie.genre.clone(),
        ));
    }

    Ok(Json(RecommendationsResponse {
        recommendations: state.recommender.similar(title),
    }))
}

/// Movies from the genres opposite to the title's main genre
pub async fn parallel_universe(
    State(state): State<AppState>,
    Json(request): Json<TitleRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    Ok(Json(RecommendationsResponse {
        recommendations: state.recommender.parallel_universe(request.title.trim()),
    }))
}

/// Matches free-form song text to movies via the soundtrack index
pub async fn cinesound(
    State(state): State<AppState>,
    Json(request): Json<CineSoundRequest>,
) -> AppResult<Json<CineSoundResponse>> {
    let matched = state.song_matcher.match_song(&request.song).await?;
    Ok(Json(CineSoundResponse {
        song: request.song.trim().to_string(),
        detected_mood: matched.mood,
        keywords: matched.keywords,
        recommendations: matched.movies,
    }))
}

/// Cinematic DNA profile aggregated from the view and like log
pub async fn get_profile(State(state): State<AppState>) -> AppResult<Json<DnaReport>> {
    let events = state
        .interactions
        .scan(&[InteractionAction::View, InteractionAction::Like])
        .await?;
    Ok(Json(dna::generate_report(&events)))
}

/// Chat endpoint; only a model-backed reply records a chatbot interaction
///
/// Chatbot rows carry the user message in the title column and "N/A" as
/// the genre; the profile aggregator never sees them.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let reply = state.chatbot.reply(&request.message).await;

    if reply.source == ReplySource::Model {
        state.interactions.record_in_background(NewInteraction::new(
            InteractionAction::Chatbot,
            request.message.trim(),
            "N/A",
        ));
    }

    Ok(Json(ChatResponse {
        response: reply.text,
    }))
}

/// Records a view for a movie
pub async fn record_view(
    State(state): State<AppState>,
    Json(request): Json<InteractionRequest>,
) -> AppResult<Json<StatusResponse>> {
    record_interaction(&state, InteractionAction::View, request)
}

/// Records a like for a movie
pub async fn record_like(
    State(state): State<AppState>,
    Json(request): Json<InteractionRequest>,
) -> AppResult<Json<StatusResponse>> {
    record_interaction(&state, InteractionAction::Like, request)
}

/// The catalog genre wins over the client-supplied one for known titles
fn record_interaction(
    state: &AppState,
    action: InteractionAction,
    request: InteractionRequest,
) -> AppResult<Json<StatusResponse>> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Movie title cannot be empty".into()));
    }

    let genre = state
        .catalog
        .find_by_title(title)
        .map(|m| m.genre.clone())
        .or(request.genre)
        .unwrap_or_default();

    state
        .interactions
        .record_in_background(NewInteraction::new(action, title, genre));

    Ok(Json(StatusResponse { status: "recorded" }))
}

/// Stored favourite genres for the calling session
pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> AppResult<Json<PreferencesResponse>> {
    let genres = state.preferences.get(&session.as_str()).await?;
    Ok(Json(PreferencesResponse { genres }))
}

/// Replaces the favourite genres for the calling session
pub async fn put_preferences(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Json(request): Json<PreferencesRequest>,
) -> AppResult<Json<PreferencesResponse>> {
    let genres: Vec<String> = request
        .genres
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    state.preferences.put(&session.as_str(), &genres).await?;
    Ok(Json(PreferencesResponse { genres }))
}
