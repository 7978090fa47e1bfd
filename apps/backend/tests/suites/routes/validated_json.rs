use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::prompt::PROMPT_PRESETS;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::Value;

use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn malformed_json_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/multiplayer/create")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn wrong_field_type_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/multiplayer/create")
        .set_json(serde_json::json!({ "durationSeconds": "soon" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn empty_body_creates_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/multiplayer/create")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let prompt_id = body["state"]["promptId"].as_str().expect("promptId");
    assert!(PROMPT_PRESETS.iter().any(|p| p.id == prompt_id));
    assert_eq!(body["state"]["durationSeconds"], 90);
    Ok(())
}
