use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use backend::infra::state::build_state;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

async fn call<S>(app: &S, uri: &str, body: Value) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    test::call_service(app, req).await
}

/// Create a session and join one guest. Returns (game id, host id, guest id).
async fn two_player_session<S>(app: &S, extra: Value) -> (String, String, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let mut body = extra;
    body["promptId"] = json!("summer");
    let created: Value = test::read_body_json(call(app, "/api/multiplayer/create", body).await).await;
    let game_id = created["gameId"].as_str().expect("gameId").to_string();
    let host = created["playerId"].as_str().expect("playerId").to_string();
    let joined: Value =
        test::read_body_json(call(app, "/api/multiplayer/join", json!({ "gameId": game_id })).await)
            .await;
    let guest = joined["playerId"].as_str().expect("playerId").to_string();
    (game_id, host, guest)
}

#[actix_web::test]
async fn missing_game_id_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let resp = call(&app, "/api/multiplayer/join", json!({ "gameId": "  " })).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Missing gameId.").await;

    let req = test::TestRequest::get()
        .uri("/api/multiplayer/state")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Missing gameId.").await;
    Ok(())
}

#[actix_web::test]
async fn missing_player_fields_are_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (game_id, host, _) = two_player_session(&app, json!({})).await;

    let resp = call(&app, "/api/multiplayer/start", json!({ "gameId": game_id })).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Missing playerId.").await;

    let resp = call(
        &app,
        "/api/multiplayer/pick",
        json!({ "gameId": game_id, "playerId": host }),
    )
    .await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Missing itemId.").await;

    let resp = call(
        &app,
        "/api/multiplayer/vote",
        json!({ "gameId": game_id, "playerId": host }),
    )
    .await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Missing voteFor.").await;
    Ok(())
}

#[actix_web::test]
async fn unknown_game_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let resp = call(&app, "/api/multiplayer/join", json!({ "gameId": "zzzzzz" })).await;
    assert_problem_details_structure(resp, 404, "SESSION_NOT_FOUND", "Game zzzzzz not found")
        .await;

    let req = test::TestRequest::get()
        .uri("/api/multiplayer/state?gameId=zzzzzz")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "SESSION_NOT_FOUND", "Game zzzzzz not found")
        .await;
    Ok(())
}

#[actix_web::test]
async fn create_rejects_bad_settings() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let resp = call(&app, "/api/multiplayer/create", json!({ "avatar": "robot" })).await;
    assert_problem_details_structure(resp, 400, "INVALID_AVATAR", "Invalid avatar.").await;

    let resp = call(&app, "/api/multiplayer/create", json!({ "durationSeconds": 0 })).await;
    assert_problem_details_structure(
        resp,
        400,
        "INVALID_DURATION",
        "durationSeconds must be positive, got 0",
    )
    .await;

    let resp = call(&app, "/api/multiplayer/create", json!({ "durationSeconds": 100000 })).await;
    assert_problem_details_structure(
        resp,
        400,
        "INVALID_DURATION",
        "durationSeconds must be at most 86400, got 100000",
    )
    .await;

    let resp = call(&app, "/api/multiplayer/create", json!({ "maxPlayers": 1 })).await;
    assert_problem_details_structure(
        resp,
        400,
        "INVALID_MAX_PLAYERS",
        "maxPlayers must be at least 2, got 1",
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn empty_catalog_has_no_items() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().build()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let resp = call(&app, "/api/multiplayer/create", json!({})).await;
    assert_problem_details_structure(resp, 404, "NO_ITEMS_FOUND", "No items found.").await;
    Ok(())
}

#[actix_web::test]
async fn join_full_session_conflicts() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (game_id, _, _) = two_player_session(&app, json!({ "maxPlayers": 2 })).await;

    let resp = call(&app, "/api/multiplayer/join", json!({ "gameId": game_id })).await;
    assert_problem_details_structure(resp, 409, "SESSION_FULL", "Game is full.").await;
    Ok(())
}

#[actix_web::test]
async fn start_rules() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let created: Value =
        test::read_body_json(call(&app, "/api/multiplayer/create", json!({ "promptId": "summer" })).await)
            .await;
    let game_id = created["gameId"].as_str().expect("gameId").to_string();
    let host = created["playerId"].as_str().expect("playerId").to_string();

    let resp = call(
        &app,
        "/api/multiplayer/start",
        json!({ "gameId": game_id, "playerId": host }),
    )
    .await;
    assert_problem_details_structure(
        resp,
        409,
        "NOT_ENOUGH_PLAYERS",
        "Need at least 2 players to start.",
    )
    .await;

    let joined: Value =
        test::read_body_json(call(&app, "/api/multiplayer/join", json!({ "gameId": game_id })).await)
            .await;
    let guest = joined["playerId"].as_str().expect("playerId");
    let resp = call(
        &app,
        "/api/multiplayer/start",
        json!({ "gameId": game_id, "playerId": guest }),
    )
    .await;
    assert_problem_details_structure(resp, 403, "FORBIDDEN", "Only the host can start.").await;
    Ok(())
}

#[actix_web::test]
async fn pick_and_vote_validation() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let (game_id, host, guest) = two_player_session(&app, json!({})).await;

    let resp = call(
        &app,
        "/api/multiplayer/pick",
        json!({ "gameId": game_id, "playerId": "ghost", "itemId": "shop_hat" }),
    )
    .await;
    assert_problem_details_structure(resp, 404, "PLAYER_NOT_FOUND", "Player not found.").await;

    let resp = call(
        &app,
        "/api/multiplayer/pick",
        json!({ "gameId": game_id, "playerId": guest, "itemId": "shop_coat" }),
    )
    .await;
    assert_problem_details_structure(resp, 400, "INVALID_ITEM", "Invalid itemId.").await;

    let resp = call(
        &app,
        "/api/multiplayer/vote",
        json!({ "gameId": game_id, "playerId": host, "voteFor": "ghost" }),
    )
    .await;
    assert_problem_details_structure(resp, 400, "INVALID_TARGET", "Invalid vote target.").await;

    let resp = call(
        &app,
        "/api/multiplayer/vote",
        json!({ "gameId": game_id, "playerId": host, "voteFor": host }),
    )
    .await;
    assert_problem_details_structure(resp, 400, "SELF_VOTE", "Cannot vote for yourself.").await;
    Ok(())
}
