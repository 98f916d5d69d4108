use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use core_types::{
    AssignCategory, Category, Joke, JokeCounts, NewCategory, NewJoke, SetCounts, VoteAction,
    VoteRequest,
};
use database::AssignOutcome;
use serde_json::{Value, json};
use std::sync::Arc;

/// # GET /jokes/random
/// Responds with `null` when there are no jokes at all.
pub async fn get_random_joke(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<Joke>>, AppError> {
    let joke = state.db_repo.get_random_joke().await?;
    Ok(Json(joke))
}

/// # GET /jokes/random/:category
pub async fn get_random_joke_in_category(
    Path(category): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<Joke>>, AppError> {
    let joke = state.db_repo.get_random_joke_in_category(&category).await?;
    Ok(Json(joke))
}

/// # GET /categories
pub async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state.db_repo.get_all_categories().await?;
    Ok(Json(categories))
}

/// # GET /jokes
pub async fn get_jokes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Joke>>, AppError> {
    let jokes = state.db_repo.get_all_jokes().await?;
    Ok(Json(jokes))
}

/// # GET /jokes/:category
/// Shares its path with the id-based routes; here the segment is a category name.
pub async fn get_jokes_in_category(
    Path(category): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Joke>>, AppError> {
    let jokes = state.db_repo.get_jokes_in_category(&category).await?;
    Ok(Json(jokes))
}

/// # POST /jokes
pub async fn add_joke(
    State(state): State<Arc<AppState>>,
    Json(new_joke): Json<NewJoke>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = state.db_repo.save_joke(&new_joke).await?;
    tracing::info!(joke_id = id, category = ?new_joke.category, "Joke added.");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Joke added successfully", "id": id })),
    ))
}

/// # PUT /jokes/:id
/// Body: `{"action": "like"}` or `{"action": "dislike"}`.
/// Responds with the updated counters, or `null` for an unknown id.
pub async fn vote_on_joke(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(vote): Json<VoteRequest>,
) -> Result<Json<Option<JokeCounts>>, AppError> {
    // Validated before touching the database.
    let action = VoteAction::parse(vote.action.as_deref())?;
    let counts = state.db_repo.apply_vote(id, action).await?;
    Ok(Json(counts))
}

/// # PUT /jokes/:id/counts
/// Body: `{"likes": n, "dislikes": m}`; a missing counter is set to 0.
pub async fn set_joke_counts(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(counts): Json<SetCounts>,
) -> Result<Json<Option<JokeCounts>>, AppError> {
    let counts = state.db_repo.set_joke_counts(id, counts).await?;
    Ok(Json(counts))
}

/// # DELETE /jokes/:id
/// Deleting an id that does not exist still succeeds.
pub async fn delete_joke(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let deleted = state.db_repo.delete_joke(id).await?;
    tracing::info!(joke_id = id, deleted, "Joke deleted.");
    Ok(Json(json!({ "message": "Joke deleted successfully" })))
}

/// # POST /categories
pub async fn add_category(
    State(state): State<Arc<AppState>>,
    Json(new_category): Json<NewCategory>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = state
        .db_repo
        .save_category(new_category.name.as_deref())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Category added successfully", "id": id })),
    ))
}

/// # POST /jokes/:id/category
pub async fn assign_category(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(assignment): Json<AssignCategory>,
) -> Result<Json<Value>, AppError> {
    let not_found = || AppError::NotFound("Category not found".to_string());

    let category = assignment.category.ok_or_else(not_found)?;
    match state.db_repo.assign_category(id, &category).await? {
        AssignOutcome::CategoryNotFound => Err(not_found()),
        AssignOutcome::Assigned { category_id } => {
            tracing::info!(joke_id = id, category_id, "Category assigned to joke.");
            Ok(Json(json!({ "message": "Category assigned to joke successfully" })))
        }
    }
}

/// # DELETE /categories/:id
pub async fn delete_category(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    state.db_repo.delete_category(id).await?;
    Ok(Json(json!({ "id": id })))
}
