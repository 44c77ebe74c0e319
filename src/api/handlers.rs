//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::Operation;
use crate::config::ExternalLinks;
use crate::models::{CheckEntry, ClockAction, LocationPayrollStatus, Person, RosterEntry};

use super::request::{
    ActorQuery, ApproveRequest, ClockRequest, ManualEntryRequest, NotifyAdminRequest,
    StudentCheckRequest,
};
use super::response::{ApiError, ApiErrorResponse, ApproveResponse, ClockResponse, NotifyResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roster/:location", get(roster_handler))
        .route("/clock-in", post(clock_in_handler))
        .route("/clock-out", post(clock_out_handler))
        .route("/manual-entry", post(manual_entry_handler))
        .route("/students/:location", get(student_attendance_handler))
        .route("/students/check-in", post(student_check_in_handler))
        .route("/students/check-out", post(student_check_out_handler))
        .route("/payroll/approvals", get(approvals_handler))
        .route("/payroll/approve", post(approve_handler))
        .route("/payroll/notify-admin", post(notify_admin_handler))
        .route("/links", get(links_handler))
        .with_state(state)
}

/// Unwraps a JSON body, converting axum's rejection into the API error
/// format.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
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
            };
            Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

/// Unwraps query parameters, converting axum's rejection into the API
/// error format so GET and POST failures share one envelope.
fn parse_query<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "query string error");
            Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("VALIDATION_ERROR", body_text),
            })
        }
    }
}

/// Resolves the authenticated caller from the directory.
///
/// Roles and scopes are always re-derived server-side; claims in the
/// request body are never trusted.
fn resolve_actor(state: &AppState, actor_id: &str) -> Result<Person, ApiErrorResponse> {
    let person = state.directory().person(actor_id)?;
    person.ok_or_else(|| {
        ApiErrorResponse::from(crate::error::EngineError::person_not_found(actor_id))
    })
}

/// Handler for GET /roster/:location.
async fn roster_handler(
    State(state): State<AppState>,
    Path(location): Path<String>,
    query: Result<Query<ActorQuery>, QueryRejection>,
) -> Result<Json<Vec<RosterEntry>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(query, correlation_id)?;
    info!(correlation_id = %correlation_id, location, "roster requested");

    let actor = resolve_actor(&state, &query.actor_id)?;
    state
        .router()
        .authorize_at(&actor, Operation::ViewRoster, &location)?;

    let roster = state.tracker().roster(&location)?;
    Ok(Json(roster))
}

/// Handler for POST /clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Result<Json<ClockResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        person_id = %request.person_id,
        location = %request.location,
        "clock-in requested"
    );

    let actor = resolve_actor(&state, &request.actor_id)?;
    state
        .router()
        .authorize_target(&actor, Operation::ClockStaff, &request.person_id)?;
    state
        .router()
        .authorize_at(&actor, Operation::ClockStaff, &request.location)?;

    let entry = state
        .tracker()
        .clock_in(&request.person_id, &request.location)?;
    Ok(Json(ClockResponse {
        message: "Clock-in successful".to_string(),
        data: entry,
    }))
}

/// Handler for POST /clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Result<Json<ClockResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        person_id = %request.person_id,
        location = %request.location,
        "clock-out requested"
    );

    let actor = resolve_actor(&state, &request.actor_id)?;
    state
        .router()
        .authorize_target(&actor, Operation::ClockStaff, &request.person_id)?;
    state
        .router()
        .authorize_at(&actor, Operation::ClockStaff, &request.location)?;

    let entry = state
        .tracker()
        .clock_out(&request.person_id, &request.location)?;
    Ok(Json(ClockResponse {
        message: "Clock-out successful".to_string(),
        data: entry,
    }))
}

/// Handler for POST /manual-entry.
async fn manual_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManualEntryRequest>, JsonRejection>,
) -> Result<Json<ClockResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        first_name = %request.first_name,
        last_name = %request.last_name,
        location = %request.location,
        "manual entry requested"
    );

    let actor = resolve_actor(&state, &request.actor_id)?;
    state
        .router()
        .authorize_at(&actor, Operation::ManualEntry, &request.location)?;

    let entry = state.tracker().manual_entry(
        &request.first_name,
        &request.last_name,
        request.action,
        &request.location,
    )?;
    let message = match request.action {
        ClockAction::ClockIn => "Manual clock-in recorded",
        ClockAction::ClockOut => "Manual clock-out recorded",
    };
    Ok(Json(ClockResponse {
        message: message.to_string(),
        data: entry,
    }))
}

/// Handler for GET /students/:location.
async fn student_attendance_handler(
    State(state): State<AppState>,
    Path(location): Path<String>,
    query: Result<Query<ActorQuery>, QueryRejection>,
) -> Result<Json<Vec<CheckEntry>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(query, correlation_id)?;
    info!(correlation_id = %correlation_id, location, "student attendance requested");

    let actor = resolve_actor(&state, &query.actor_id)?;
    state
        .router()
        .authorize_at(&actor, Operation::ViewStudentAttendance, &location)?;

    let attendance = state.students().attendance(&location)?;
    Ok(Json(attendance))
}

/// Handler for POST /students/check-in.
async fn student_check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<StudentCheckRequest>, JsonRejection>,
) -> Result<Json<CheckEntry>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        student_id = %request.student_id,
        location = %request.location,
        "student check-in requested"
    );

    let actor = resolve_actor(&state, &request.actor_id)?;
    state.router().authorize_target(
        &actor,
        Operation::RecordStudentAttendance,
        &request.student_id,
    )?;
    state
        .router()
        .authorize_at(&actor, Operation::RecordStudentAttendance, &request.location)?;

    let entry = state
        .students()
        .check_in(&request.student_id, &request.location)?;
    Ok(Json(entry))
}

/// Handler for POST /students/check-out.
async fn student_check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<StudentCheckRequest>, JsonRejection>,
) -> Result<Json<CheckEntry>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        student_id = %request.student_id,
        location = %request.location,
        "student check-out requested"
    );

    let actor = resolve_actor(&state, &request.actor_id)?;
    state.router().authorize_target(
        &actor,
        Operation::RecordStudentAttendance,
        &request.student_id,
    )?;
    state
        .router()
        .authorize_at(&actor, Operation::RecordStudentAttendance, &request.location)?;

    let entry = state
        .students()
        .check_out(&request.student_id, &request.location)?;
    Ok(Json(entry))
}

/// Handler for GET /payroll/approvals.
///
/// Returns approval status for the caller's scoped locations only;
/// anything outside scope is never transmitted.
async fn approvals_handler(
    State(state): State<AppState>,
    query: Result<Query<ActorQuery>, QueryRejection>,
) -> Result<Json<BTreeMap<String, LocationPayrollStatus>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(query, correlation_id)?;
    info!(correlation_id = %correlation_id, "payroll approvals requested");

    let actor = resolve_actor(&state, &query.actor_id)?;
    state.router().authorize(&actor, Operation::ViewApprovals)?;

    let scope = state.router().scope(&actor);
    let approvals = state.coordinator().approvals(&scope)?;
    Ok(Json(approvals))
}

/// Handler for POST /payroll/approve.
async fn approve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> Result<Json<ApproveResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        location = %request.location,
        "payroll approval requested"
    );

    let actor = resolve_actor(&state, &request.actor_id)?;
    state
        .router()
        .authorize_at(&actor, Operation::ApproveLocation, &request.location)?;

    let approval = state.coordinator().approve(&request.location)?;
    Ok(Json(ApproveResponse {
        status: "success".to_string(),
        message: format!("Payroll for {} approved", request.location),
        approval,
    }))
}

/// Handler for POST /payroll/notify-admin.
///
/// The all-approved invariant is re-validated by the coordinator at
/// call time; the client's cached view is never trusted.
async fn notify_admin_handler(
    State(state): State<AppState>,
    payload: Result<Json<NotifyAdminRequest>, JsonRejection>,
) -> Result<Json<NotifyResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, "notify-admin requested");

    let actor = resolve_actor(&state, &request.actor_id)?;
    state.router().authorize(&actor, Operation::NotifyAdmin)?;

    let scope = state.router().scope(&actor);
    let notification = state.coordinator().notify_admin(&scope)?;
    Ok(Json(NotifyResponse {
        message: "Payroll approved for all locations; admin notified".to_string(),
        notification_id: notification.id,
    }))
}

/// Handler for GET /links.
///
/// Opaque pass-through of externally configured URLs (shared calendar,
/// signup forms); no authorization required and no logic applied.
async fn links_handler(State(state): State<AppState>) -> Json<ExternalLinks> {
    Json(state.config().config().links().clone())
}
