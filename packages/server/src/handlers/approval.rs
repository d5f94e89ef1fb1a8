use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::approval::*;
use crate::services::approval::ApprovalService;
use crate::services::contest::ContestService;
use crate::state::AppState;

/// Permission required to list and decide participation requests.
pub const REVIEW_PERMISSION: &str = "approval:review";

#[utoipa::path(
    post,
    path = "/contests/{id}/participation",
    tag = "Participation",
    operation_id = "requestParticipation",
    summary = "Request to take part in a contest",
    description = "Creates a pending approval for the caller. The caller needs a profile image and the contest category must admit the caller's gender. A second request for the same contest fails with `ALREADY_REQUESTED`, whatever the state of the first.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 201, description = "Request recorded", body = ApprovalResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already requested (ALREADY_REQUESTED)", body = ErrorBody),
        (status = 422, description = "Not eligible (INELIGIBLE)", body = ErrorBody),
        (status = 503, description = "Data store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn request_participation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model = ApprovalService::new(&state.db)
        .request_participation(auth_user.user_id, id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApprovalResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/contests/{id}/approvals",
    tag = "Participation",
    operation_id = "listApprovals",
    summary = "List participation requests of a contest",
    description = "Requires `approval:review` permission. Ordered by request time.",
    params(("id" = i32, Path, description = "Contest ID"), ApprovalListQuery),
    responses(
        (status = 200, description = "Approvals", body = Vec<ApprovalListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(id))]
pub async fn list_approvals(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<ApprovalListQuery>,
) -> Result<Json<Vec<ApprovalListItem>>, AppError> {
    auth_user.require_permission(REVIEW_PERMISSION)?;
    ContestService::new(&state.db)
        .find_contest_for_user(auth_user.user_id, id)
        .await?;

    let rows = ApprovalService::new(&state.db)
        .list_approvals(id, query.status)
        .await?;

    let items = rows
        .into_iter()
        .map(|(approval, usr)| ApprovalListItem {
            user_id: approval.user_id,
            user_name: usr.map(|u| u.name).unwrap_or_default(),
            status: approval.status,
            requested_at: approval.requested_at,
            reviewed_at: approval.reviewed_at,
        })
        .collect();
    Ok(Json(items))
}

#[utoipa::path(
    patch,
    path = "/contests/{id}/approvals/{user_id}",
    tag = "Participation",
    operation_id = "reviewApproval",
    summary = "Approve or reject a participation request",
    description = "Requires `approval:review` permission. Only pending requests can be decided; a decided request returns 409.",
    params(
        ("id" = i32, Path, description = "Contest ID"),
        ("user_id" = i32, Path, description = "User who requested participation"),
    ),
    request_body = ReviewApprovalRequest,
    responses(
        (status = 200, description = "Decision recorded", body = ApprovalResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest or approval not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already reviewed (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id, status = %payload.status))]
pub async fn review_approval(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, user_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<ReviewApprovalRequest>,
) -> Result<Json<ApprovalResponse>, AppError> {
    auth_user.require_permission(REVIEW_PERMISSION)?;
    validate_review_approval(&payload)?;
    ContestService::new(&state.db)
        .find_contest_for_user(auth_user.user_id, id)
        .await?;

    let model = ApprovalService::new(&state.db)
        .review(id, user_id, payload.status)
        .await?;
    Ok(Json(model.into()))
}
