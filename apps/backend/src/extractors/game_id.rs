use std::collections::HashMap;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Session id taken from the `gameId` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameId(pub String);

impl GameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trimmed, non-empty `gameId` from a raw query string.
pub fn game_id_from_query(query: &str) -> Option<String> {
    web::Query::<HashMap<String, String>>::from_query(query)
        .ok()
        .and_then(|q| q.get("gameId").map(|id| id.trim().to_string()))
        .filter(|id| !id.is_empty())
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let game_id = game_id_from_query(req.query_string())
            .map(GameId)
            .ok_or_else(|| DomainError::missing_field("gameId").into());

        ready(game_id)
    }
}
