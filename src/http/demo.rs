//! `/demo` routes over the local record stores.
//!
//! These back the front-end's demo-only accounts and appointments. They
//! have no relation to the proxied services. Bodies are parsed by hand so a
//! bad body gets the same `{"error": ...}` envelope as everything else.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::http::request::parse_json;
use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::store::accounts::AuthResult;
use crate::store::{LoginOutcome, NewAppointment, SignupOutcome, StoreError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/demo/accounts/signup", post(signup))
        .route("/demo/accounts/login", post(login))
        .route("/demo/accounts/logout", post(logout))
        .route("/demo/session", get(current_session))
        .route("/demo/appointments", get(list_appointments).post(create_appointment))
        .route("/demo/appointments/{id}/join", post(join_appointment))
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

async fn signup(State(state): State<AppState>, body: Bytes) -> Result<Response, StoreError> {
    let creds: Credentials = match parse_json(&body) {
        Ok(creds) => creds,
        Err(rejection) => return Ok(rejection),
    };
    let outcome = state.inner.accounts.signup(&creds.email, &creds.password)?;
    let status = match outcome {
        SignupOutcome::Created => StatusCode::OK,
        SignupOutcome::DuplicateEmail => StatusCode::CONFLICT,
    };
    Ok((status, Json(AuthResult::from(outcome))).into_response())
}

async fn login(State(state): State<AppState>, body: Bytes) -> Result<Response, StoreError> {
    let creds: Credentials = match parse_json(&body) {
        Ok(creds) => creds,
        Err(rejection) => return Ok(rejection),
    };
    let outcome = state.inner.accounts.login(&creds.email, &creds.password)?;
    let status = match outcome {
        LoginOutcome::LoggedIn => {
            state.inner.session.login(&creds.email)?;
            StatusCode::OK
        }
        LoginOutcome::UnknownAccount => StatusCode::NOT_FOUND,
        LoginOutcome::WrongPassword => StatusCode::UNAUTHORIZED,
    };
    Ok((status, Json(AuthResult::from(outcome))).into_response())
}

async fn logout(State(state): State<AppState>) -> Result<Response, StoreError> {
    state.inner.session.logout()?;
    Ok(Json(json!({ "success": true })).into_response())
}

async fn current_session(State(state): State<AppState>) -> Result<Response, StoreError> {
    Ok(Json(state.inner.session.current()?).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentFilter {
    pub host: Option<String>,
    pub participant: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
}

async fn list_appointments(
    State(state): State<AppState>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Response, StoreError> {
    let store = &state.inner.appointments;
    let appointments = match filter {
        AppointmentFilter { host: Some(host), .. } => store.by_host(&host)?,
        AppointmentFilter { participant: Some(email), .. } => store.by_participant(&email)?,
        AppointmentFilter { building: Some(building), floor: Some(floor), .. } => {
            store.by_location(&building, &floor)?
        }
        AppointmentFilter { building: None, floor: None, .. } => store.all()?,
        _ => {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "building and floor must be given together",
            ))
        }
    };
    Ok(Json(appointments).into_response())
}

async fn create_appointment(State(state): State<AppState>, body: Bytes) -> Result<Response, StoreError> {
    let new: NewAppointment = match parse_json(&body) {
        Ok(new) => new,
        Err(rejection) => return Ok(rejection),
    };
    let appointment = state.inner.appointments.create(new)?;
    Ok((StatusCode::CREATED, Json(appointment)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub email: String,
}

async fn join_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, StoreError> {
    let join: JoinRequest = match parse_json(&body) {
        Ok(join) => join,
        Err(rejection) => return Ok(rejection),
    };
    let joined = state.inner.appointments.join(&id, &join.email)?;
    let status = if joined { StatusCode::OK } else { StatusCode::CONFLICT };
    Ok((status, Json(json!({ "success": joined }))).into_response())
}
