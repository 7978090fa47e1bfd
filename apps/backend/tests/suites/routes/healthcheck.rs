use actix_web::test;

use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn health_returns_ok_with_trace_header() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _clock) = build_test_state()?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-trace-id"));
    let body = test::read_body(resp).await;
    assert_eq!(body, "ok");
    Ok(())
}
