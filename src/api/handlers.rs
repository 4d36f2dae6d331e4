use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{GameRecord, LengthBucket, RecommendationFilter};
use crate::services::{loader, Recommender};

use super::AppState;

/// Multipart field carrying the library file
pub const UPLOAD_FIELD: &str = "file";

// Request/Response types

#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    pub genre: Option<String>,
    pub tag: Option<String>,
    #[serde(default)]
    pub unplayed_only: bool,
    pub length: Option<LengthBucket>,
}

impl From<RecommendQuery> for RecommendationFilter {
    fn from(query: RecommendQuery) -> Self {
        let mut filter = RecommendationFilter::new()
            .unplayed_only(query.unplayed_only)
            .length(query.length);
        if let Some(genre) = query.genre {
            filter = filter.genre(genre);
        }
        if let Some(tag) = query.tag {
            filter = filter.tag(tag);
        }
        filter
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub games_count: usize,
}

// Handlers

/// Landing endpoint
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to GameButler API!" }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let games_count = match state.recommender().await {
        Some(recommender) => recommender.len(),
        None => 0,
    };
    Json(json!({ "status": "ok", "games_count": games_count }))
}

/// Picks one game matching the query filters
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendQuery>,
) -> AppResult<Json<GameRecord>> {
    let recommender = state
        .recommender()
        .await
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            AppError::NotFound("No game library loaded. Please upload a CSV file.".to_string())
        })?;

    let filter = RecommendationFilter::from(query);
    tracing::info!(
        request_id = %request_id,
        genre = ?filter.genre,
        tag = ?filter.tag,
        unplayed_only = filter.unplayed_only,
        min_length = ?filter.min_length,
        max_length = ?filter.max_length,
        "Processing recommendation request"
    );

    let game = recommender.recommend(&filter).cloned().ok_or_else(|| {
        AppError::NotFound("No suitable game found matching your criteria.".to_string())
    })?;

    Ok(Json(game))
}

/// Replaces the served library with an uploaded CSV file
///
/// The upload is staged to a transient file, loaded, and the file removed.
/// A failed load leaves the previous library in place.
pub async fn upload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("library.csv").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read upload", e))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| {
        AppError::InvalidInput(format!("Missing '{}' field in upload", UPLOAD_FIELD))
    })?;

    let staged = state
        .upload_dir
        .join(format!("upload-{}.csv", Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&staged, &bytes).await {
        remove_staged(&staged, request_id).await;
        return Err(AppError::Internal(format!("Failed to stage upload: {}", e)));
    }

    let load_path = staged.clone();
    let loaded = tokio::task::spawn_blocking(move || loader::load(load_path)).await;
    remove_staged(&staged, request_id).await;

    let library = loaded
        .map_err(|e| AppError::Internal(format!("Library load task failed: {}", e)))?
        .map_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected library upload");
            AppError::Load(e)
        })?;

    let games_count = library.len();
    state.replace(Recommender::new(library)).await;

    tracing::info!(
        request_id = %request_id,
        file_name = %file_name,
        games_count,
        "Replaced game library"
    );

    Ok(Json(UploadResponse {
        message: format!("Successfully loaded library from {}", file_name),
        games_count,
    }))
}

/// Body-limit failures surface as 413, anything else as a bad request
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    let message = format!("{}: {}", context, err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::InvalidInput(message)
    }
}

async fn remove_staged(path: &std::path::Path, request_id: RequestId) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            request_id = %request_id,
            path = %path.display(),
            error = %e,
            "Failed to remove staged upload"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_maps_length_bucket_to_bounds() {
        let query = RecommendQuery {
            length: Some(LengthBucket::Medium),
            ..Default::default()
        };
        let filter = RecommendationFilter::from(query);
        assert_eq!(filter.min_length, Some(300.0));
        assert_eq!(filter.max_length, Some(1200.0));
        assert!(!filter.unplayed_only);
    }

    #[test]
    fn test_query_blank_genre_is_ignored() {
        let query = RecommendQuery {
            genre: Some(String::new()),
            tag: Some("Indie".to_string()),
            unplayed_only: true,
            length: None,
        };
        let filter = RecommendationFilter::from(query);
        assert_eq!(filter.genre, None);
        assert_eq!(filter.tag.as_deref(), Some("Indie"));
        assert!(filter.unplayed_only);
        assert_eq!(filter.min_length, None);
    }
}
