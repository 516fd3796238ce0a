// HTTP surface tests for Doubles Matcher

use actix_web::{http::StatusCode, test, web, App};
use doubles_matcher::core::Matcher;
use doubles_matcher::models::{Gender, MatchesResponse, Player, PlayerListResponse};
use doubles_matcher::routes::{configure_routes, matches::AppState};
use doubles_matcher::services::RosterStore;
use serde_json::json;
use std::sync::Arc;

fn create_roster() -> RosterStore {
    let players = [(1, "male", 3), (2, "male", 4), (3, "male", 4), (4, "male", 6), (5, "female", 2)]
        .iter()
        .map(|&(id, gender, level)| Player {
            id,
            name: format!("Player {}", id),
            gender: if gender == "male" { Gender::Male } else { Gender::Female },
            grade: 1,
            level,
            participating: true,
        })
        .collect();
    RosterStore::from_players(players).unwrap()
}

fn app_state() -> AppState {
    AppState {
        roster: Arc::new(create_roster()),
        matcher: Matcher::default(),
    }
}

#[actix_web::test]
async fn test_generate_matches_from_roster() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/generate")
        .set_json(json!({ "randomSeed": 7 }))
        .to_request();
    let resp: MatchesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.total_eligible, 5);
    assert_eq!(resp.result.matches.len(), 1);
    assert_eq!(resp.result.matches[0].gender, Gender::Male);
    assert_eq!(resp.result.unpaired.len(), 1);
    assert_eq!(resp.random_seed, Some(7));
    assert_eq!(resp.run_id.get_version_num(), 4);
}

#[actix_web::test]
async fn test_generate_matches_without_body() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/generate")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: MatchesResponse = test::read_body_json(resp).await;
    assert_eq!(body.total_eligible, 5);
    assert_eq!(body.result.matches.len(), 1);
    assert_eq!(body.random_seed, None);
}

#[actix_web::test]
async fn test_generate_rejects_malformed_body() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/generate")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"toleranceMax\": \"wide\"}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_compose_rejects_unknown_strategy() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/compose")
        .set_json(json!({ "players": [], "strategy": "elimination" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_compose_rejects_invalid_player() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/compose")
        .set_json(json!({
            "players": [{ "id": 1, "name": "X", "gender": "other", "grade": 1, "level": 3 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_toggle_participation_changes_eligibility() {
    let state = app_state();
    let roster = state.roster.clone();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/players/5/participation")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(roster.eligible_players().await.len(), 4);

    let req = test::TestRequest::delete().uri("/api/v1/players/99").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_add_and_list_players() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/players")
        .set_json(json!({ "name": "Aoi", "gender": "female", "grade": 2, "level": 4, "participating": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/players")
        .set_json(json!({ "name": "Bad", "gender": "female", "grade": 2, "level": 40 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/v1/players").to_request();
    let listing: PlayerListResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.total, 6);
    assert_eq!(listing.players.last().map(|p| p.name.as_str()), Some("Aoi"));
}
