use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use platform_api::{ApiError, ApiJson, ApiPath, ApiResult};
use platform_db::{EmployeeRepository, LeaveRepository, NewLeave};
use products_hr::{
    fixtures, leave_days, parse_date,
    wire::{LeaveStatus, LeaveView},
};
use serde::Deserialize;
use tracing::info;

use super::{
    Ack, EMPLOYEE_NOT_FOUND, db_error, demo_id, format_date, invalid, present, staff_code,
};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<LeaveView>>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(fixtures::leave_records(Utc::now())));
    };
    let rows = LeaveRepository::new(db).list().await.map_err(db_error)?;
    Ok(Json(rows.into_iter().map(LeaveView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateLeave {
    #[serde(deserialize_with = "staff_code")]
    pub employee_id: String,
    #[serde(default)]
    pub leave_type: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateLeave>,
) -> ApiResult<(StatusCode, Json<LeaveView>)> {
    let start = parse_date(&body.start_date).map_err(invalid)?;
    let end = parse_date(&body.end_date).map_err(invalid)?;
    let days = leave_days(start, end).map_err(invalid)?;
    let leave_type = present(body.leave_type).unwrap_or_else(|| "annual".into());
    let reason = present(body.reason);

    let Some(db) = state.db.as_ref() else {
        let employee_name = fixtures::employees()
            .into_iter()
            .find(|e| e.employee_id == body.employee_id)
            .map(|e| e.full_name());
        let echo = LeaveView {
            id: demo_id(),
            employee_id: body.employee_id,
            employee_name,
            leave_type,
            start_date: format_date(start),
            end_date: format_date(end),
            days,
            reason,
            status: LeaveStatus::Pending,
            applied_at: Utc::now().fixed_offset(),
            approved_by: None,
            approved_at: None,
        };
        return Ok((StatusCode::CREATED, Json(echo)));
    };

    let employee = EmployeeRepository::new(db)
        .find_by_staff_code(&body.employee_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let created = LeaveRepository::new(db)
        .create(NewLeave {
            employee_id: employee.employee_id.clone(),
            employee_name: Some(employee.full_name()),
            leave_type,
            start_date: format_date(start),
            end_date: format_date(end),
            days,
            reason,
        })
        .await
        .map_err(db_error)?;
    info!(employee_id = %employee.employee_id, days, "leave requested");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Ack>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(Ack::ok()));
    };
    let id = i32::try_from(id).map_err(|_| ApiError::not_found("Leave record not found"))?;
    let result = LeaveRepository::new(db)
        .delete(id)
        .await
        .map_err(db_error)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Leave record not found"));
    }
    Ok(Json(Ack::ok()))
}
