//! One `request_completed` event per request, tagged with the session it
//! touched.
//!
//! Handlers attach a [`GameTag`] to their response; when none is present the
//! `gameId` query parameter is used instead.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use tracing::{debug, error, info, warn, Level};

use crate::extractors::game_id::game_id_from_query;
use crate::middleware::request_trace::TraceId;

/// State polls arrive every second or so per client and log at debug.
const POLL_PATH: &str = "/api/multiplayer/state";

/// Response-extension marker naming the session a request touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTag(pub String);

/// `200 OK` JSON response tagged with `game_id` for the request log.
pub fn tagged_json<T: Serialize>(game_id: &str, body: &T) -> HttpResponse {
    let mut response = HttpResponse::Ok().json(body);
    response
        .extensions_mut()
        .insert(GameTag(game_id.to_string()));
    response
}

fn level_for(status: StatusCode, path: &str) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else if path == POLL_PATH {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let queried_game = game_id_from_query(req.query_string());
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, tagged_game) = match &result {
                Ok(res) => (
                    res.status(),
                    res.response().extensions().get::<GameTag>().map(|t| t.0.clone()),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };
            let game_id = tagged_game.or(queried_game).unwrap_or_else(|| "-".to_string());
            let duration_us = start.elapsed().as_micros() as u64;
            let status_code = status.as_u16();

            macro_rules! completed {
                ($emit:ident) => {
                    $emit!(
                        http.method = %method,
                        url.path = %path,
                        http.status_code = status_code,
                        duration_us,
                        game_id = %game_id,
                        trace_id = %trace_id,
                        message = "request_completed"
                    )
                };
            }

            let level = level_for(status, &path);
            if level == Level::ERROR {
                completed!(error);
            } else if level == Level::WARN {
                completed!(warn);
            } else if level == Level::DEBUG {
                completed!(debug);
            } else {
                completed!(info);
            }

            result
        })
    }
}
