use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, HealthResponse, LikeEvent, RankQuery, RankRequest, RankResponse,
    RecordLikeRequest, RecordLikeResponse,
};
use crate::core::{MatchRanker, RankError};
use crate::services::LikeStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub ranker: MatchRanker,
    pub likes: Arc<dyn LikeStore>,
    pub max_top_n: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_matches))
        .route("/matches/{user_id}", web::get().to(rank_for_user))
        .route("/likes", web::post().to(record_like));
}

fn error_response(status: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status,
    };

    match status {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        502 => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank matches endpoint
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "topN": 5
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return error_response(400, "Validation failed", errors.to_string());
    }

    run_rank(&state, &req.user_id, req.top_n).await
}

/// Rank matches for a user given in the path
///
/// GET /api/v1/matches/{userId}?topN=5
async fn rank_for_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RankQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    run_rank(&state, &path.into_inner(), query.top_n).await
}

async fn run_rank(state: &AppState, user_id: &str, top_n: Option<usize>) -> HttpResponse {
    // Cap the result size to keep responses bounded
    let top_n = top_n
        .unwrap_or(state.ranker.options().default_top_n)
        .min(state.max_top_n);

    tracing::info!("Ranking matches for user: {}, topN: {}", user_id, top_n);

    match state.ranker.rank_detailed(user_id, Some(top_n)).await {
        Ok(outcome) => {
            tracing::info!(
                "Returning {} matches for user {} (from {} candidates)",
                outcome.matches.len(),
                user_id,
                outcome.total_candidates
            );

            HttpResponse::Ok().json(RankResponse {
                matches: outcome.matches,
                total_candidates: outcome.total_candidates,
            })
        }
        Err(RankError::NotFound(id)) => {
            tracing::info!("No profile for user {}", id);
            error_response(404, "Profile not found", format!("No profile for user {}", id))
        }
        Err(RankError::Gateway(e)) => {
            tracing::error!("Profile store failed while ranking for {}: {}", user_id, e);
            error_response(502, "Profile store unavailable", e.to_string())
        }
    }
}

/// Record like endpoint
///
/// POST /api/v1/likes
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "targetUserId": "string"
/// }
/// ```
async fn record_like(
    state: web::Data<AppState>,
    req: web::Json<RecordLikeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    if req.user_id == req.target_user_id {
        return error_response(400, "Invalid like", "Users cannot like themselves".to_string());
    }

    let like = LikeEvent::new(req.user_id.clone(), req.target_user_id.clone());

    match state.likes.record_like(&like).await {
        Ok(()) => {
            tracing::debug!("Recorded like: {} -> {}", like.user_id, like.target_user_id);
            HttpResponse::Ok().json(RecordLikeResponse {
                success: true,
                like_id: like.id,
            })
        }
        Err(e) => {
            tracing::error!("Failed to record like: {}", e);
            error_response(502, "Failed to record like", e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_error_response_status() {
        assert_eq!(error_response(404, "x", String::new()).status().as_u16(), 404);
        assert_eq!(error_response(502, "x", String::new()).status().as_u16(), 502);
        assert_eq!(error_response(400, "x", String::new()).status().as_u16(), 400);
    }
}
