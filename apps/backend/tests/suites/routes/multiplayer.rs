use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use backend::middleware::structured_logger::GameTag;
use serde_json::{json, Value};
use time::Duration;

use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

async fn post<S>(app: &S, uri: &str, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "{uri} failed: {}", resp.status());
    test::read_body_json(resp).await
}

async fn get_state<S>(app: &S, game_id: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(&format!("/api/multiplayer/state?gameId={game_id}"))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key]
        .as_str()
        .unwrap_or_else(|| panic!("{key} should be a string in {value}"))
}

#[actix_web::test]
async fn create_returns_waiting_session_with_host() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let body = post(
        &app,
        "/api/multiplayer/create",
        json!({ "promptId": "summer", "avatar": "boy", "name": "Ana" }),
    )
    .await;

    let game_id = str_field(&body, "gameId");
    let host_id = str_field(&body, "playerId");
    assert_eq!(game_id.len(), 6);
    assert_eq!(host_id.len(), 10);

    let view = &body["state"];
    assert_eq!(view["gameId"], game_id);
    assert_eq!(view["hostId"], host_id);
    assert_eq!(view["phase"], "waiting");
    assert_eq!(view["timeRemaining"], Value::Null);
    assert_eq!(view["winner"], Value::Null);
    assert_eq!(view["tie"], false);
    assert_eq!(view["maxPlayers"], 6);
    assert_eq!(view["players"][0]["name"], "Ana");
    assert_eq!(view["players"][0]["avatar"], "boy");

    // Summer prompt: two dresses, the sandals and the hat. The trench is outerwear.
    let items = view["items"].as_array().expect("items array");
    let ids: Vec<&str> = items.iter().map(|i| str_field(i, "id")).collect();
    assert_eq!(ids, vec!["shop_dress", "shop_dress_2", "shop_sandal", "shop_hat"]);
    assert!(items.iter().all(|i| i["status"] == "ready"));
    Ok(())
}

#[actix_web::test]
async fn create_uses_explicit_items_and_prompt_label() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let body = post(
        &app,
        "/api/multiplayer/create",
        json!({
            "prompt": "fall breeze",
            "durationSeconds": 45,
            "items": [{ "id": "own_1", "name": "Scarf", "imageUrl": "/scarf.png", "brand": "x" }]
        }),
    )
    .await;

    let view = &body["state"];
    assert_eq!(view["promptId"], "fall");
    assert_eq!(view["prompt"], "Fall Breeze");
    assert_eq!(view["durationSeconds"], 45);
    assert_eq!(view["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(view["items"][0]["brand"], "x");
    assert_eq!(view["items"][0]["status"], "ready");
    assert_eq!(view["players"][0]["name"], "Player 1");
    assert_eq!(view["players"][0]["avatar"], "girl");
    Ok(())
}

#[actix_web::test]
async fn join_adds_player_with_default_name() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let created = post(&app, "/api/multiplayer/create", json!({ "promptId": "summer" })).await;
    let game_id = str_field(&created, "gameId");

    let joined = post(
        &app,
        "/api/multiplayer/join",
        json!({ "gameId": game_id, "avatar": "boy" }),
    )
    .await;
    let guest_id = str_field(&joined, "playerId");
    assert_ne!(guest_id, str_field(&created, "playerId"));
    assert_eq!(joined["gameId"], game_id);

    let players = joined["state"]["players"].as_array().expect("players");
    assert_eq!(players.len(), 2);
    assert_eq!(players[1]["id"], guest_id);
    assert_eq!(players[1]["name"], "Player 2");
    assert_eq!(players[1]["avatar"], "boy");
    Ok(())
}

/// Create, join, start, pick and vote through the HTTP surface, then let the
/// draft clock run out. A split vote between two players is a tie.
#[actix_web::test]
async fn two_player_game_ends_in_a_tie() -> Result<(), Box<dyn std::error::Error>> {
    let (state, clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let created = post(
        &app,
        "/api/multiplayer/create",
        json!({ "promptId": "summer", "durationSeconds": 2, "maxPlayers": 2 }),
    )
    .await;
    let game_id = str_field(&created, "gameId").to_string();
    let host = str_field(&created, "playerId").to_string();

    let joined = post(&app, "/api/multiplayer/join", json!({ "gameId": game_id })).await;
    let guest = str_field(&joined, "playerId").to_string();

    let started = post(
        &app,
        "/api/multiplayer/start",
        json!({ "gameId": game_id, "playerId": host }),
    )
    .await;
    assert_eq!(started["phase"], "draft");
    assert_eq!(started["timeRemaining"], 2);

    let picked = post(
        &app,
        "/api/multiplayer/pick",
        json!({
            "gameId": game_id,
            "playerId": guest,
            "itemId": "shop_hat",
            "renderedImage": "/renders/guest.png"
        }),
    )
    .await;
    assert_eq!(picked["players"][1]["pickedItemId"], "shop_hat");
    assert_eq!(picked["players"][1]["renderedImage"], "/renders/guest.png");

    post(
        &app,
        "/api/multiplayer/vote",
        json!({ "gameId": game_id, "playerId": host, "voteFor": guest }),
    )
    .await;
    let voted = post(
        &app,
        "/api/multiplayer/vote",
        json!({ "gameId": game_id, "playerId": guest, "voteFor": host }),
    )
    .await;
    // Both votes are in but the draft clock is still running.
    assert_eq!(voted["phase"], "draft");
    assert_eq!(voted["votes"][&host], guest.as_str());

    clock.advance(Duration::seconds(2));
    let view = get_state(&app, &game_id).await;
    assert_eq!(view["phase"], "done");
    assert_eq!(view["timeRemaining"], 0);
    assert_eq!(view["winner"], Value::Null);
    assert_eq!(view["tie"], true);
    Ok(())
}

#[actix_web::test]
async fn three_player_game_has_a_winner() -> Result<(), Box<dyn std::error::Error>> {
    let (state, clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let created = post(
        &app,
        "/api/multiplayer/create",
        json!({ "promptId": "summer", "durationSeconds": 5 }),
    )
    .await;
    let game_id = str_field(&created, "gameId").to_string();
    let a = str_field(&created, "playerId").to_string();
    let mut others = Vec::new();
    for _ in 0..2 {
        let joined = post(&app, "/api/multiplayer/join", json!({ "gameId": game_id })).await;
        others.push(str_field(&joined, "playerId").to_string());
    }
    let (b, c) = (&others[0], &others[1]);

    post(
        &app,
        "/api/multiplayer/start",
        json!({ "gameId": game_id, "playerId": a }),
    )
    .await;

    clock.advance(Duration::seconds(6));
    let view = get_state(&app, &game_id).await;
    assert_eq!(view["phase"], "vote");
    assert_eq!(view["timeRemaining"], 0);

    for (voter, target) in [(&a, b), (b, c), (c, b)] {
        post(
            &app,
            "/api/multiplayer/vote",
            json!({ "gameId": game_id, "playerId": voter, "voteFor": target }),
        )
        .await;
    }

    let view = get_state(&app, &game_id).await;
    assert_eq!(view["phase"], "done");
    assert_eq!(view["winner"], b.as_str());
    assert_eq!(view["tie"], false);
    Ok(())
}

#[actix_web::test]
async fn start_is_idempotent_for_the_host() -> Result<(), Box<dyn std::error::Error>> {
    let (state, clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let created = post(&app, "/api/multiplayer/create", json!({ "promptId": "summer", "durationSeconds": 30 })).await;
    let game_id = str_field(&created, "gameId").to_string();
    let host = str_field(&created, "playerId").to_string();
    post(&app, "/api/multiplayer/join", json!({ "gameId": game_id })).await;

    let start = json!({ "gameId": game_id, "playerId": host });
    post(&app, "/api/multiplayer/start", start.clone()).await;
    clock.advance(Duration::seconds(10));
    let again = post(&app, "/api/multiplayer/start", start).await;

    // The countdown keeps the original start time.
    assert_eq!(again["phase"], "draft");
    assert_eq!(again["timeRemaining"], 20);
    Ok(())
}

#[actix_web::test]
async fn responses_are_tagged_with_the_game_id() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/multiplayer/create")
        .set_json(json!({ "promptId": "summer" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tag = resp.response().extensions().get::<GameTag>().cloned();
    let created: Value = test::read_body_json(resp).await;
    let game_id = str_field(&created, "gameId").to_string();
    assert_eq!(tag, Some(GameTag(game_id.clone())));

    let req = test::TestRequest::get()
        .uri(&format!("/api/multiplayer/state?gameId={game_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.response().extensions().get::<GameTag>(),
        Some(&GameTag(game_id))
    );
    Ok(())
}
