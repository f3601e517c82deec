//! Shift types, the per-day shift calendar and the weekly view.

use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode};
use chrono::{Days, Utc};
use platform_api::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult};
use platform_db::{
    DbPool, EmployeeRepository, LeaveRepository, NewAssignment, NewShiftType,
    ShiftAssignmentRepository, ShiftTypeRepository,
};
use products_hr::{
    WeeklyInputs, WeeklySchedule, fixtures, parse_clock, parse_date, weekly_schedule,
    wire::{EmployeeView, LeaveView, ShiftAssignmentView, ShiftTypeView},
};
use sea_orm::DbErr;
use serde::Deserialize;
use tracing::info;

use super::{
    Ack, EMPLOYEE_NOT_FOUND, db_error, demo_id, format_date, invalid, present, staff_code, today,
};
use crate::state::AppState;

const SHIFT_TYPE_NOT_FOUND: &str = "Shift type not found";
const DUPLICATE_DAY: &str = "Bu tarihte zaten bir vardiya atanmış";

pub async fn list_types(State(state): State<AppState>) -> ApiResult<Json<Vec<ShiftTypeView>>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(fixtures::shift_types()));
    };
    let rows = ShiftTypeRepository::new(db)
        .list()
        .await
        .map_err(db_error)?;
    Ok(Json(rows.into_iter().map(ShiftTypeView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateShiftType {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

pub async fn create_type(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateShiftType>,
) -> ApiResult<(StatusCode, Json<ShiftTypeView>)> {
    let (Some(name), Some(start), Some(end)) =
        (present(body.name), present(body.start), present(body.end))
    else {
        return Err(ApiError::bad_request("Name, start and end are required"));
    };
    let start = parse_clock(&start).map_err(invalid)?;
    let end = parse_clock(&end).map_err(invalid)?;
    let color = present(body.color).unwrap_or_else(|| "bg-gray-500".into());

    let Some(db) = state.db.as_ref() else {
        let echo = ShiftTypeView {
            id: demo_id(),
            name,
            start,
            end,
            color,
            created_at: Some(Utc::now().fixed_offset()),
        };
        return Ok((StatusCode::CREATED, Json(echo)));
    };
    let created = ShiftTypeRepository::new(db)
        .create(NewShiftType {
            name,
            start_time: start,
            end_time: end,
            color,
        })
        .await
        .map_err(db_error)?;
    info!(shift_type = created.id, "shift type created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn remove_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Ack>> {
    let Some(db) = state.db.as_ref() else {
        return if fixtures::shift_types().iter().any(|st| st.id == id) {
            Ok(Json(Ack::ok()))
        } else {
            Err(ApiError::not_found(SHIFT_TYPE_NOT_FOUND))
        };
    };
    let id = i32::try_from(id).map_err(|_| ApiError::not_found(SHIFT_TYPE_NOT_FOUND))?;
    let repo = ShiftTypeRepository::new(db);
    if repo.find(id).await.map_err(db_error)?.is_none() {
        return Err(ApiError::not_found(SHIFT_TYPE_NOT_FOUND));
    }
    if repo.in_use(id).await.map_err(db_error)? {
        return Err(ApiError::bad_request_with(
            "Shift type is in use",
            "Remove its shift calendar entries first",
        ));
    }
    repo.delete(id).await.map_err(db_error)?;
    info!(shift_type = id, "shift type deleted");
    Ok(Json(Ack::ok()))
}

/// Resolves employee and shift names for stored assignments.
async fn assignment_views(
    db: &DbPool,
    rows: Vec<entity::shift_assignment::Model>,
) -> Result<Vec<ShiftAssignmentView>, DbErr> {
    let names: HashMap<String, String> = EmployeeRepository::new(db)
        .list()
        .await?
        .into_iter()
        .map(|e| (e.employee_id.clone(), e.full_name()))
        .collect();
    let shifts: HashMap<i32, String> = ShiftTypeRepository::new(db)
        .list()
        .await?
        .into_iter()
        .map(|st| (st.id, st.name))
        .collect();
    Ok(rows
        .into_iter()
        .map(|row| {
            let employee_name = names
                .get(&row.employee_id)
                .cloned()
                .unwrap_or_else(|| row.employee_id.clone());
            let shift_name = shifts.get(&row.shift_type_id).cloned().unwrap_or_default();
            ShiftAssignmentView::from_model(row, employee_name, shift_name)
        })
        .collect())
}

pub async fn list_calendar(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ShiftAssignmentView>>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(fixtures::shift_calendar(Utc::now())));
    };
    let rows = ShiftAssignmentRepository::new(db)
        .list()
        .await
        .map_err(db_error)?;
    Ok(Json(assignment_views(db, rows).await.map_err(db_error)?))
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignment {
    #[serde(deserialize_with = "staff_code")]
    pub employee_id: String,
    pub shift_type_id: i64,
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

fn optional_clock(value: Option<String>) -> ApiResult<Option<String>> {
    present(value)
        .map(|v| parse_clock(&v).map_err(invalid))
        .transpose()
}

/// Times default to the shift type's own hours.
pub async fn assign(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAssignment>,
) -> ApiResult<(StatusCode, Json<ShiftAssignmentView>)> {
    let date = format_date(parse_date(&body.date).map_err(invalid)?);
    let start_time = optional_clock(body.start_time)?;
    let end_time = optional_clock(body.end_time)?;

    let Some(db) = state.db.as_ref() else {
        let employee = fixtures::employees()
            .into_iter()
            .find(|e| e.employee_id == body.employee_id)
            .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
        let shift = fixtures::shift_types()
            .into_iter()
            .find(|st| st.id == body.shift_type_id)
            .ok_or_else(|| ApiError::not_found(SHIFT_TYPE_NOT_FOUND))?;
        let echo = ShiftAssignmentView {
            id: demo_id(),
            employee_name: employee.full_name(),
            employee_id: employee.employee_id,
            shift_type_id: shift.id,
            shift_name: shift.name,
            date,
            start_time: start_time.unwrap_or(shift.start),
            end_time: end_time.unwrap_or(shift.end),
            status: "scheduled".into(),
            created_at: Some(Utc::now().fixed_offset()),
        };
        return Ok((StatusCode::CREATED, Json(echo)));
    };

    let employee = EmployeeRepository::new(db)
        .find_by_staff_code(&body.employee_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let shift_type_id =
        i32::try_from(body.shift_type_id).map_err(|_| ApiError::not_found(SHIFT_TYPE_NOT_FOUND))?;
    let shift = ShiftTypeRepository::new(db)
        .find(shift_type_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(SHIFT_TYPE_NOT_FOUND))?;
    let calendar = ShiftAssignmentRepository::new(db);
    if calendar
        .find_for_day(&employee.employee_id, &date)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(ApiError::bad_request(DUPLICATE_DAY));
    }
    let created = calendar
        .create(NewAssignment {
            employee_id: employee.employee_id.clone(),
            shift_type_id: shift.id,
            date,
            start_time: start_time.unwrap_or_else(|| shift.start_time.clone()),
            end_time: end_time.unwrap_or_else(|| shift.end_time.clone()),
            status: "scheduled".into(),
        })
        .await
        .map_err(db_error)?;
    info!(employee_id = %employee.employee_id, date = %created.date, "shift assigned");
    let view = ShiftAssignmentView::from_model(created, employee.full_name(), shift.name);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn unassign(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Ack>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(Ack::ok()));
    };
    let id = i32::try_from(id).map_err(|_| ApiError::not_found("Shift assignment not found"))?;
    let result = ShiftAssignmentRepository::new(db)
        .delete(id)
        .await
        .map_err(db_error)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Shift assignment not found"));
    }
    Ok(Json(Ack::ok()))
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    #[serde(default)]
    pub start_date: Option<String>,
}

pub async fn weekly(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<WeekQuery>,
) -> ApiResult<Json<WeeklySchedule>> {
    let start = match present(query.start_date) {
        Some(raw) => parse_date(&raw).map_err(invalid)?,
        None => today(),
    };
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    let (start_key, end_key) = (format_date(start), format_date(end));

    let (employees, shift_types, assignments, leave): (
        Vec<EmployeeView>,
        Vec<ShiftTypeView>,
        Vec<ShiftAssignmentView>,
        Vec<LeaveView>,
    ) = match state.db.as_ref() {
        None => {
            let now = Utc::now();
            (
                fixtures::employees(),
                fixtures::shift_types(),
                fixtures::shift_calendar(now),
                fixtures::leave_records(now),
            )
        }
        Some(db) => {
            let rows = ShiftAssignmentRepository::new(db)
                .between(&start_key, &end_key)
                .await
                .map_err(db_error)?;
            let assignments = assignment_views(db, rows).await.map_err(db_error)?;
            let employees = EmployeeRepository::new(db)
                .list()
                .await
                .map_err(db_error)?;
            let shift_types = ShiftTypeRepository::new(db)
                .list()
                .await
                .map_err(db_error)?;
            let leave = LeaveRepository::new(db)
                .overlapping(&employee_id, &start_key, &end_key)
                .await
                .map_err(db_error)?;
            (
                employees.into_iter().map(EmployeeView::from).collect(),
                shift_types.into_iter().map(ShiftTypeView::from).collect(),
                assignments,
                leave.into_iter().map(LeaveView::from).collect(),
            )
        }
    };

    Ok(Json(weekly_schedule(&WeeklyInputs {
        employee_id: &employee_id,
        start,
        employees: &employees,
        shift_types: &shift_types,
        assignments: &assignments,
        leave: &leave,
    })))
}
