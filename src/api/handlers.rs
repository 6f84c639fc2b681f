//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{LeaveStatus, Member};

use super::request::{CheckRequest, GeneratePayrollRequest, LeaveDecisionRequest, LeaveSubmitRequest};
use super::response::{ApiError, ApiErrorResponse, LeaveDecisionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/attendance/:member_id", get(list_attendance_handler))
        .route("/leaves", post(submit_leave_handler))
        .route("/leaves/:id", put(decide_leave_handler))
        .route("/payroll/generate", post(generate_payroll_handler))
        .route("/payroll/:member_id", get(list_payroll_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection onto an API error body.
fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Looks up a member, surfacing 404 for unknown ids.
fn require_member(state: &AppState, id: &str) -> Result<Member, ApiErrorResponse> {
    match state.members().get_member(id) {
        Ok(Some(member)) => Ok(member),
        Ok(None) => Err(EngineError::MemberNotFound { id: id.to_string() }.into()),
        Err(err) => Err(err.into()),
    }
}

/// Handler for POST /attendance/check-in.
async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    if let Err(err) = require_member(&state, &request.member_id) {
        return err.into_response();
    }

    let at = request.at.unwrap_or_else(|| Utc::now().naive_utc());
    match state
        .attendance()
        .record_check_in(&request.member_id, at.date(), at)
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %request.member_id,
                date = %record.date,
                "member checked in"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "check-in failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /attendance/check-out.
async fn check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    if let Err(err) = require_member(&state, &request.member_id) {
        return err.into_response();
    }

    let at = request.at.unwrap_or_else(|| Utc::now().naive_utc());
    match state
        .attendance()
        .record_check_out(&request.member_id, at.date(), at)
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %request.member_id,
                date = %record.date,
                "member checked out"
            );
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "check-out failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /attendance/{member_id}.
async fn list_attendance_handler(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    if let Err(err) = require_member(&state, &member_id) {
        return err.into_response();
    }
    match state.attendance().list_member_attendance(&member_id) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /leaves.
async fn submit_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveSubmitRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    if let Err(err) = require_member(&state, &request.member_id) {
        return err.into_response();
    }

    match state.leaves().submit(
        &request.member_id,
        request.kind,
        request.start_date,
        request.end_date,
        request.reason,
    ) {
        Ok(leave) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %request.member_id,
                leave_id = leave.id,
                start_date = %leave.start_date,
                end_date = %leave.end_date,
                "leave request submitted"
            );
            (StatusCode::CREATED, Json(leave)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "leave submission failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for PUT /leaves/{id}.
///
/// Transitions a pending request to approved or rejected. Approval triggers
/// leave reconciliation synchronously: the leave transition is considered
/// committed first, so per-date reconciliation failures are reported in the
/// response but never revert the approval.
async fn decide_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<LeaveDecisionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    if request.status == LeaveStatus::Pending {
        let error = ApiError::validation_error("status must be 'approved' or 'rejected'");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let existing = match state.leaves().get_leave(id) {
        Ok(Some(leave)) => leave,
        Ok(None) => return ApiErrorResponse::from(EngineError::LeaveNotFound { id }).into_response(),
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };
    if existing.status != LeaveStatus::Pending {
        return ApiErrorResponse::from(EngineError::LeaveAlreadyDecided {
            id,
            status: existing.status,
        })
        .into_response();
    }

    let leave = match state
        .leaves()
        .set_status(id, request.status, request.approved_by)
    {
        Ok(leave) => leave,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "leave transition failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let reconciliation = if leave.status == LeaveStatus::Approved {
        Some(
            state
                .reconciler()
                .reconcile(&leave.member_id, leave.start_date, leave.end_date),
        )
    } else {
        None
    };

    info!(
        correlation_id = %correlation_id,
        leave_id = id,
        status = %leave.status,
        "leave request decided"
    );
    (
        StatusCode::OK,
        Json(LeaveDecisionResponse {
            leave,
            reconciliation,
        }),
    )
        .into_response()
}

/// Handler for POST /payroll/generate.
async fn generate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    info!(correlation_id = %correlation_id, month = %request.month, "payroll run requested");
    let outcome = state.generator().generate(request.month);
    (StatusCode::OK, Json(outcome)).into_response()
}

/// Handler for GET /payroll/{member_id}.
async fn list_payroll_handler(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    if let Err(err) = require_member(&state, &member_id) {
        return err.into_response();
    }
    match state.payroll().list_member_payroll(&member_id) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
