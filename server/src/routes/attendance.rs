use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use platform_api::{ApiError, ApiJson, ApiResult};
use platform_db::{AttendanceRepository, EmployeeRepository};
use products_hr::{
    fixtures, worked_hours,
    wire::{AttendanceStatus, AttendanceView, clock_time},
};
use serde::Deserialize;
use tracing::info;

use super::{EMPLOYEE_NOT_FOUND, db_error, demo_id, format_date, invalid, staff_code, today};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<AttendanceView>>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(fixtures::attendance(Utc::now())));
    };
    let rows = AttendanceRepository::new(db)
        .list()
        .await
        .map_err(db_error)?;
    Ok(Json(rows.into_iter().map(AttendanceView::from).collect()))
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Punch {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Deserialize)]
pub struct PunchRequest {
    #[serde(deserialize_with = "staff_code")]
    pub employee_id: String,
    #[serde(rename = "type")]
    pub kind: Punch,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeOnly {
    #[serde(deserialize_with = "staff_code")]
    pub employee_id: String,
}

pub async fn record(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PunchRequest>,
) -> ApiResult<(StatusCode, Json<AttendanceView>)> {
    punch(&state, &body.employee_id, body.kind).await
}

pub async fn check_in(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EmployeeOnly>,
) -> ApiResult<(StatusCode, Json<AttendanceView>)> {
    punch(&state, &body.employee_id, Punch::CheckIn).await
}

pub async fn check_out(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EmployeeOnly>,
) -> ApiResult<(StatusCode, Json<AttendanceView>)> {
    punch(&state, &body.employee_id, Punch::CheckOut).await
}

/// Check-in answers 201, check-out 200.
async fn punch(
    state: &AppState,
    employee_id: &str,
    kind: Punch,
) -> ApiResult<(StatusCode, Json<AttendanceView>)> {
    let now = Utc::now().fixed_offset();
    let date = format_date(today());

    let Some(db) = state.db.as_ref() else {
        let employee_name = fixtures::employees()
            .into_iter()
            .find(|e| e.employee_id == employee_id)
            .map(|e| e.full_name())
            .unwrap_or_else(|| employee_id.to_string());
        let stamp = Some(clock_time(&now));
        let (check_in, check_out, status, code) = match kind {
            Punch::CheckIn => (stamp, None, AttendanceStatus::Present, StatusCode::CREATED),
            Punch::CheckOut => (None, stamp, AttendanceStatus::CheckedOut, StatusCode::OK),
        };
        let echo = AttendanceView {
            id: demo_id(),
            employee_id: employee_id.to_string(),
            employee_name,
            date,
            check_in,
            check_out,
            worked_hours: 0.0,
            status,
            created_at: Some(now),
        };
        return Ok((code, Json(echo)));
    };

    let employee = EmployeeRepository::new(db)
        .find_by_staff_code(employee_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let repo = AttendanceRepository::new(db);
    // Check-out closes the latest open record so overnight shifts work.
    let open = match kind {
        Punch::CheckIn => repo.open_for_day(&employee.employee_id, &date).await,
        Punch::CheckOut => repo.open_for_employee(&employee.employee_id).await,
    }
    .map_err(db_error)?;

    match (kind, open) {
        (Punch::CheckIn, Some(_)) => Err(ApiError::bad_request("Zaten giriş yapılmış")),
        (Punch::CheckIn, None) => {
            let created = repo
                .check_in(&employee.employee_id, &employee.full_name(), &date, now)
                .await
                .map_err(db_error)?;
            info!(employee_id = %employee.employee_id, "checked in");
            Ok((StatusCode::CREATED, Json(created.into())))
        }
        (Punch::CheckOut, None) => Err(ApiError::bad_request("Giriş kaydı bulunamadı")),
        (Punch::CheckOut, Some(record)) => {
            let hours = match record.check_in_at {
                Some(check_in) => worked_hours(check_in, now).map_err(invalid)?,
                None => 0.0,
            };
            let closed = repo
                .check_out(record, now, hours)
                .await
                .map_err(db_error)?;
            info!(employee_id = %employee.employee_id, hours, "checked out");
            Ok((StatusCode::OK, Json(closed.into())))
        }
    }
}
