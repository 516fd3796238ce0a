use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::validate_player;
use crate::models::{ErrorResponse, Player, PlayerId, PlayerListResponse, PlayerRequest};
use crate::routes::matches::AppState;
use crate::services::RosterError;

/// Configure roster routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/players", web::get().to(list_players))
        .route("/players", web::post().to(add_player))
        .route("/players/{id}", web::get().to(get_player))
        .route("/players/{id}", web::put().to(update_player))
        .route("/players/{id}", web::delete().to(delete_player))
        .route("/players/{id}/participation", web::post().to(toggle_participation));
}

/// GET /api/v1/players
async fn list_players(state: web::Data<AppState>) -> impl Responder {
    let players = state.roster.list().await;
    let total = players.len();
    HttpResponse::Ok().json(PlayerListResponse { players, total })
}

async fn get_player(state: web::Data<AppState>, path: web::Path<PlayerId>) -> impl Responder {
    match state.roster.get(path.into_inner()).await {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => roster_error(e),
    }
}

/// POST /api/v1/players
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "gender": "male|female",
///   "grade": 2,
///   "level": 5,
///   "participating": true
/// }
/// ```
async fn add_player(state: web::Data<AppState>, req: web::Json<PlayerRequest>) -> impl Responder {
    if let Some(response) = reject_invalid(&state, &req) {
        return response;
    }

    let player = state.roster.add(req.into_inner()).await;
    tracing::info!("Added player {} to roster", player.id);
    HttpResponse::Created().json(player)
}

/// PUT /api/v1/players/{id}
async fn update_player(
    state: web::Data<AppState>,
    path: web::Path<PlayerId>,
    req: web::Json<PlayerRequest>,
) -> impl Responder {
    if let Some(response) = reject_invalid(&state, &req) {
        return response;
    }

    match state.roster.update(path.into_inner(), req.into_inner()).await {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => roster_error(e),
    }
}

/// DELETE /api/v1/players/{id}
async fn delete_player(state: web::Data<AppState>, path: web::Path<PlayerId>) -> impl Responder {
    match state.roster.remove(path.into_inner()).await {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => roster_error(e),
    }
}

/// POST /api/v1/players/{id}/participation
async fn toggle_participation(state: web::Data<AppState>, path: web::Path<PlayerId>) -> impl Responder {
    match state.roster.toggle_participation(path.into_inner()).await {
        Ok(player) => {
            tracing::debug!("Player {} participating: {}", player.id, player.participating);
            HttpResponse::Ok().json(player)
        }
        Err(e) => roster_error(e),
    }
}

/// Field validation plus the matcher's own player checks
fn reject_invalid(state: &AppState, req: &PlayerRequest) -> Option<HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for player request: {:?}", errors);
        return Some(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    let candidate = Player {
        id: 0,
        name: req.name.clone(),
        gender: req.gender,
        grade: req.grade,
        level: req.level,
        participating: req.participating,
    };
    if let Err(e) = validate_player(&candidate, &state.matcher.config().level_bounds) {
        return Some(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid player".to_string(),
            message: e.to_string(),
            status_code: 400,
        }));
    }

    None
}

fn roster_error(e: RosterError) -> HttpResponse {
    match e {
        RosterError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Player not found".to_string(),
            message: e.to_string(),
            status_code: 404,
        }),
        RosterError::InvalidInput(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid input".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
        RosterError::Io(_) | RosterError::Serialization(_) => {
            tracing::error!("Roster error: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Roster unavailable".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
