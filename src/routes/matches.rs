use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::{Matcher, MatchingError};
use crate::models::{
    ComposeMatchesRequest, ErrorResponse, GenerateMatchesRequest, HealthResponse,
    MatchConfigOverrides, MatchesResponse, Player,
};
use crate::services::RosterStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterStore>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/generate", web::post().to(generate_matches))
        .route("/matches/compose", web::post().to(compose_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate matches for the roster's participating players
///
/// POST /api/v1/matches/generate
///
/// Request body (optional; every field optional):
/// ```json
/// {
///   "strategy": "adaptive_tolerance",
///   "toleranceMax": 5,
///   "randomSeed": 42
/// }
/// ```
async fn generate_matches(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let req = match parse_generate_body(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::info!("Rejected generate body: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_json".to_string(),
                message: format!("Invalid JSON: {}", e),
                status_code: 400,
            });
        }
    };

    let players = state.roster.eligible_players().await;

    tracing::info!("Generating matches for {} eligible players", players.len());

    run_matcher(&state.matcher, &req.config, &players)
}

/// An empty body means "use the configured defaults"
fn parse_generate_body(body: &[u8]) -> Result<GenerateMatchesRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateMatchesRequest::default());
    }
    serde_json::from_slice(body)
}

/// Compose matches for an explicit player list, ignoring the stored roster
///
/// POST /api/v1/matches/compose
///
/// Request body:
/// ```json
/// {
///   "players": [{"id": 1, "name": "Aoi", "gender": "female", "grade": 2, "level": 4}],
///   "strategy": "simple_random"
/// }
/// ```
async fn compose_matches(
    state: web::Data<AppState>,
    req: web::Json<ComposeMatchesRequest>,
) -> impl Responder {
    tracing::info!("Composing matches for {} supplied players", req.players.len());

    run_matcher(&state.matcher, &req.config, &req.players)
}

fn run_matcher(defaults: &Matcher, overrides: &MatchConfigOverrides, players: &[Player]) -> HttpResponse {
    let outcome = overrides
        .apply(defaults.config())
        .and_then(Matcher::new)
        .and_then(|matcher| {
            let result = matcher.generate(players)?;
            Ok((matcher, result))
        });

    match outcome {
        Ok((matcher, result)) => {
            let total_eligible = players.iter().filter(|p| p.participating).count();
            HttpResponse::Ok().json(MatchesResponse {
                run_id: uuid::Uuid::new_v4(),
                generated_at: chrono::Utc::now(),
                strategy: matcher.config().strategy,
                random_seed: matcher.config().random_seed,
                total_eligible,
                result,
            })
        }
        Err(e) => {
            tracing::warn!("Match generation rejected: {}", e);
            let error = match &e {
                MatchingError::InvalidPlayer { .. } => "Invalid player",
                MatchingError::Configuration(_) => "Invalid configuration",
            };
            HttpResponse::BadRequest().json(ErrorResponse {
                error: error.to_string(),
                message: e.to_string(),
                status_code: 400,
            })
        }
    }
}
