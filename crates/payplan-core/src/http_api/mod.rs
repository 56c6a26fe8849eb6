use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    Activity, CalendarError, Schedule, ScheduleError, ScheduleRequest, Session, SessionError,
    YearMonth, export, swiss_holidays,
};

#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<Session>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    fn session(&self) -> Arc<RwLock<Session>> {
        self.session.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

#[derive(Debug, Deserialize)]
struct TextPayload {
    text: String,
}

#[derive(Debug, Serialize)]
struct HolidayEntry {
    date: NaiveDate,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct MonthFacts {
    period: YearMonth,
    label: String,
    working_days: u32,
    milestone: NaiveDate,
    milestone_label: String,
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<CalendarError> for ApiError {
    fn from(value: CalendarError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::NoSchedule
            | SessionError::MonthOutOfRange { .. }
            | SessionError::WeekOutOfRange { .. } => ApiError::NotFound(value.to_string()),
            SessionError::Schedule(err) => ApiError::from(err),
        }
    }
}

impl From<export::ExportError> for ApiError {
    fn from(value: export::ExportError) -> Self {
        ApiError::internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/easter/:year", get(get_easter))
        .route("/holidays/:year", get(get_holidays))
        .route("/months/:period", get(get_month))
        .route(
            "/schedule",
            get(get_schedule).post(submit_schedule).delete(clear_schedule),
        )
        .route("/schedule/export.csv", get(export_csv))
        .route("/schedule/months/:index/deliverables", put(set_deliverables))
        .route(
            "/schedule/months/:index/weeks/:week/:activity",
            put(set_work_plan_entry),
        )
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, session: Session) -> std::io::Result<()> {
    let state = AppState::new(session);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "payplan HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_easter(Path(year): Path<i32>) -> Result<Json<serde_json::Value>, ApiError> {
    let easter = crate::easter_sunday(year)?;
    Ok(Json(json!({ "year": year, "easter_sunday": easter })))
}

async fn get_holidays(Path(year): Path<i32>) -> Result<Json<Vec<HolidayEntry>>, ApiError> {
    let holidays = swiss_holidays(year)?;
    let entries = holidays
        .iter()
        .map(|(date, kind)| HolidayEntry {
            date,
            name: kind.name(),
        })
        .collect();
    Ok(Json(entries))
}

async fn get_month(
    State(state): State<AppState>,
    Path(period): Path<String>,
) -> Result<Json<MonthFacts>, ApiError> {
    let period: YearMonth = period.parse()?;
    let session = state.session();
    let guard = session.read();
    let calendar = guard.calendar();
    let fmt = guard.formatter();
    let milestone = calendar.last_working_day_of_month(period)?;
    Ok(Json(MonthFacts {
        period,
        label: fmt.month_label(period),
        working_days: calendar.working_days_in_month(period)?,
        milestone,
        milestone_label: fmt.date(milestone),
    }))
}

async fn get_schedule(State(state): State<AppState>) -> Result<Json<Schedule>, ApiError> {
    let session = state.session();
    let guard = session.read();
    Ok(Json(guard.require_schedule()?.clone()))
}

async fn submit_schedule(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), ApiError> {
    let session = state.session();
    let schedule = {
        let mut guard = session.write();
        guard.submit(&request)?.clone()
    };
    Ok((StatusCode::CREATED, Json(schedule)))
}

async fn clear_schedule(State(state): State<AppState>) -> StatusCode {
    state.session().write().clear();
    StatusCode::NO_CONTENT
}

async fn set_deliverables(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<TextPayload>,
) -> Result<StatusCode, ApiError> {
    let session = state.session();
    session.write().set_deliverables(index, payload.text)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_work_plan_entry(
    State(state): State<AppState>,
    Path((index, week, activity)): Path<(usize, u32, String)>,
    Json(payload): Json<TextPayload>,
) -> Result<StatusCode, ApiError> {
    let activity: Activity = activity.parse().map_err(ApiError::invalid)?;
    let session = state.session();
    session
        .write()
        .set_work_plan_entry(index, week, activity, payload.text)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let session = state.session();
    let (body, file_name) = {
        let guard = session.read();
        let schedule = guard.require_schedule()?;
        (
            export::schedule_to_csv(schedule, guard.formatter())?,
            export::default_file_name(schedule, "csv"),
        )
    };
    let disposition = format!("attachment; filename=\"{file_name}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
