use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        FromRequest, FromRequestParts, Path, Request, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::Deserialize;

use super::db::DbHandle;
#[cfg(test)]
use super::db::RoadmapDb;
use super::models::{DeleteOutcome, StatusPatch};
use crate::errors::StatusError;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub db: DbHandle,
}

pub type SharedState = Arc<AppState>;

// ── Organization context ──────────────────────────────────────────────

/// Header carrying the caller's organization, resolved upstream from the
/// session.
pub const ORG_HEADER: &str = "x-organization-id";

/// Organization every org-scoped handler operates on.
#[derive(Debug, Clone, Copy)]
pub struct OrgContext {
    pub org_id: i64,
}

impl<S> FromRequestParts<S> for OrgContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ORG_HEADER)
            .ok_or_else(|| ApiError::Unauthorized(format!("Missing {} header", ORG_HEADER)))?;
        let org_id = raw
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("Malformed {} header", ORG_HEADER))
            })?;
        Ok(Self { org_id })
    }
}

// ── Extractors with JSON error bodies ─────────────────────────────────

/// `Json<T>` whose rejection is an `ApiError`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `Path<T>` whose rejection is an `ApiError`.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

// ── Request payload types ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateBoardRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateStatusRequest {
    pub name: String,
    pub color: Option<String>,
    pub show_on_roadmap: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub show_on_roadmap: Option<bool>,
    /// Accepted only so that an attempt to change it can be refused.
    pub key: Option<String>,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    #[serde(rename = "orderedIds", alias = "ordered_ids")]
    pub ordered_ids: Vec<i64>,
}

#[derive(Deserialize, Default)]
pub struct DeleteStatusRequest {
    #[serde(rename = "reassignTo", alias = "reassign_to")]
    pub reassign_to: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub board_id: i64,
    pub title: String,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct SetPostStatusRequest {
    pub status: String,
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        let msg = err.to_string();
        match err {
            StatusError::Validation(_)
            | StatusError::InvalidTarget(_)
            | StatusError::InvalidOrder(_) => ApiError::BadRequest(msg),
            StatusError::NotFound { .. } | StatusError::OrganizationNotFound { .. } => {
                ApiError::NotFound(msg)
            }
            StatusError::DuplicateKey { .. } | StatusError::LastStatus { .. } => {
                ApiError::Conflict(msg)
            }
            StatusError::TransactionFailure(_) | StatusError::Database(_) => {
                tracing::error!(error = %msg, "request failed");
                ApiError::Internal(msg)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/orgs", post(create_organization))
        .route("/api/orgs/{id}", get(get_organization))
        .route("/api/boards", post(create_board))
        .route("/api/statuses", get(list_statuses).post(create_status))
        .route("/api/statuses/reorder", post(reorder_statuses))
        .route(
            "/api/statuses/{id}",
            patch(update_status).delete(delete_status),
        )
        .route(
            "/api/statuses/{id}/reassignment-targets",
            get(reassignment_targets),
        )
        .route("/api/posts", post(create_post))
        .route("/api/posts/{id}/status", patch(set_post_status))
        .route("/api/kanban", get(get_kanban))
        .route("/api/roadmap", get(get_roadmap))
        .route("/health", get(health_check))
}

// ── Helpers ───────────────────────────────────────────────────────────

/// The delete body is optional: empty means probe, `{reassignTo}` confirms.
fn parse_delete_body(body: &[u8]) -> Result<Option<String>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let req: DeleteStatusRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid delete body: {}", e)))?;
    Ok(req.reassign_to)
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn create_organization(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<CreateOrganizationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name;
    let org = state
        .db
        .call(move |db| db.create_organization(&name))
        .await?;
    Ok((StatusCode::CREATED, Json(org)))
}

async fn get_organization(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let org = state.db.call(move |db| db.require_organization(id)).await?;
    Ok(Json(org))
}

async fn create_board(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiJson(req): ApiJson<CreateBoardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name;
    let board = state
        .db
        .call(move |db| db.create_board(org.org_id, &name))
        .await?;
    Ok((StatusCode::CREATED, Json(board)))
}

async fn list_statuses(
    State(state): State<SharedState>,
    org: OrgContext,
) -> Result<impl IntoResponse, ApiError> {
    let statuses = state
        .db
        .call(move |db| db.list_statuses(org.org_id))
        .await?;
    tracing::debug!(org_id = org.org_id, count = statuses.len(), "listed statuses");
    Ok(Json(statuses))
}

async fn create_status(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiJson(req): ApiJson<CreateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name;
    let color = req.color.unwrap_or_default();
    let show_on_roadmap = req.show_on_roadmap.unwrap_or(true);
    let status = state
        .db
        .call(move |db| db.create_status(org.org_id, &name, &color, show_on_roadmap))
        .await?;
    Ok((StatusCode::CREATED, Json(status)))
}

async fn update_status(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.key.is_some() {
        return Err(ApiError::BadRequest(
            "Status key cannot be changed; only name, color and show_on_roadmap are editable"
                .into(),
        ));
    }
    let patch = StatusPatch {
        name: req.name,
        color: req.color,
        show_on_roadmap: req.show_on_roadmap,
    };
    let status = state
        .db
        .call(move |db| db.update_status(org.org_id, id, &patch))
        .await?;
    Ok(Json(status))
}

async fn reorder_statuses(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiJson(req): ApiJson<ReorderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ordered_ids = req.ordered_ids;
    state
        .db
        .call(move |db| db.reorder_statuses(org.org_id, &ordered_ids))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_status(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiPath(id): ApiPath<i64>,
    body: Bytes,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let reassign_to = parse_delete_body(&body)?;
    let outcome = state
        .db
        .call(move |db| db.delete_status(org.org_id, id, reassign_to.as_deref()))
        .await?;
    Ok(Json(outcome))
}

async fn reassignment_targets(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let targets = state
        .db
        .call(move |db| db.reassignment_targets(org.org_id, id))
        .await?;
    Ok(Json(targets))
}

async fn create_post(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .db
        .call(move |db| db.create_post(org.org_id, req.board_id, &req.title, req.status.as_deref()))
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn set_post_status(
    State(state): State<SharedState>,
    org: OrgContext,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<SetPostStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .db
        .call(move |db| db.set_post_status(org.org_id, id, &req.status))
        .await?;
    Ok(Json(post))
}

async fn get_kanban(
    State(state): State<SharedState>,
    org: OrgContext,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.db.call(move |db| db.kanban(org.org_id)).await?;
    Ok(Json(view))
}

async fn get_roadmap(
    State(state): State<SharedState>,
    org: OrgContext,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.db.call(move |db| db.roadmap(org.org_id)).await?;
    Ok(Json(view))
}
