//! Multiplayer session routes under `/api/multiplayer`.
//!
//! Handlers check required fields, call one `SessionService` operation and
//! return its view. Clients poll `GET /state` to see other players' progress.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::domain::item::Item;
use crate::domain::session::{PlayerId, SessionId};
use crate::domain::view::SessionView;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::game_id::GameId;
use crate::extractors::validated_json::ValidatedJson;
use crate::middleware::structured_logger::tagged_json;
use crate::services::sessions::{Enrollment, NewSession};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRequest {
    pub prompt_id: Option<String>,
    /// Prompt label, matched case-insensitively when `promptId` is absent.
    pub prompt: Option<String>,
    pub items: Option<Vec<Item>>,
    pub duration_seconds: Option<i64>,
    pub max_players: Option<usize>,
    pub limit: Option<usize>,
    pub per_category: Option<usize>,
    pub avatar: Option<String>,
    pub name: Option<String>,
}

impl From<CreateRequest> for NewSession {
    fn from(req: CreateRequest) -> Self {
        Self {
            prompt_id: req.prompt_id,
            prompt_label: req.prompt,
            items: req.items,
            duration_seconds: req.duration_seconds,
            max_players: req.max_players,
            limit: req.limit,
            per_category: req.per_category,
            avatar: req.avatar,
            name: req.name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinRequest {
    pub game_id: Option<String>,
    pub avatar: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartRequest {
    pub game_id: Option<String>,
    pub player_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickRequest {
    pub game_id: Option<String>,
    pub player_id: Option<String>,
    pub item_id: Option<String>,
    pub rendered_image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoteRequest {
    pub game_id: Option<String>,
    pub player_id: Option<String>,
    pub vote_for: Option<String>,
}

/// Body of create and join responses.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub game_id: SessionId,
    pub player_id: PlayerId,
    pub state: SessionView,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            game_id: enrollment.session_id,
            player_id: enrollment.player_id,
            state: enrollment.view,
        }
    }
}

/// A present, non-blank field, or 400 `BAD_REQUEST`.
fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::missing_field(field).into())
}

/// POST /api/multiplayer/create
async fn create(
    body: ValidatedJson<CreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let enrollment = app_state
        .sessions()
        .create_session(body.into_inner().into())?;
    let game_id = enrollment.session_id.clone();
    Ok(tagged_json(&game_id, &EnrollmentResponse::from(enrollment)))
}

/// POST /api/multiplayer/join
async fn join(
    body: ValidatedJson<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = required(&body.game_id, "gameId")?;
    let enrollment = app_state.sessions().join_session(
        game_id,
        body.avatar.as_deref(),
        body.name.as_deref(),
    )?;
    Ok(tagged_json(game_id, &EnrollmentResponse::from(enrollment)))
}

/// GET /api/multiplayer/state?gameId=...
async fn state(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state.sessions().get_state(game_id.as_str())?;
    Ok(tagged_json(game_id.as_str(), &view))
}

/// POST /api/multiplayer/start
async fn start(
    body: ValidatedJson<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = required(&body.game_id, "gameId")?;
    let player_id = required(&body.player_id, "playerId")?;
    let view = app_state.sessions().start_session(game_id, player_id)?;
    Ok(tagged_json(game_id, &view))
}

/// POST /api/multiplayer/pick
async fn pick(
    body: ValidatedJson<PickRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = required(&body.game_id, "gameId")?;
    let player_id = required(&body.player_id, "playerId")?;
    let item_id = required(&body.item_id, "itemId")?;
    let view = app_state.sessions().pick_item(
        game_id,
        player_id,
        item_id,
        body.rendered_image.clone(),
    )?;
    Ok(tagged_json(game_id, &view))
}

/// POST /api/multiplayer/vote
async fn vote(
    body: ValidatedJson<VoteRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = required(&body.game_id, "gameId")?;
    let player_id = required(&body.player_id, "playerId")?;
    let vote_for = required(&body.vote_for, "voteFor")?;
    let view = app_state
        .sessions()
        .cast_vote(game_id, player_id, vote_for)?;
    Ok(tagged_json(game_id, &view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/create").route(web::post().to(create)))
        .service(web::resource("/join").route(web::post().to(join)))
        .service(web::resource("/state").route(web::get().to(state)))
        .service(web::resource("/start").route(web::post().to(start)))
        .service(web::resource("/pick").route(web::post().to(pick)))
        .service(web::resource("/vote").route(web::post().to(vote)));
}
