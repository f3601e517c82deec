//! JSON handlers, one module per resource.
//!
//! Every handler follows the same shape: with a store it runs single
//! queries through the `platform-db` repositories; without one it answers
//! from `products_hr::fixtures` and echoes writes with a timestamp id.

mod attendance;
mod auth;
mod employees;
mod leave;
mod payroll;
mod permissions;
mod roles;
mod shifts;
mod tasks;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use chrono::{NaiveDate, Utc};
use platform_api::ApiError;
pub(crate) use products_hr::staff_code;
use products_hr::HrError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::state::AppState;

pub(crate) const EMPLOYEE_NOT_FOUND: &str = "Personel bulunamadı";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route(
            "/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/employees/{id}",
            get(employees::show)
                .put(employees::update)
                .delete(employees::remove),
        )
        .route("/roles", get(roles::list).post(roles::create))
        .route("/roles/{id}", put(roles::update).delete(roles::remove))
        .route(
            "/shift-types",
            get(shifts::list_types).post(shifts::create_type),
        )
        .route("/shift-types/{id}", delete(shifts::remove_type))
        .route(
            "/shift-calendar",
            get(shifts::list_calendar).post(shifts::assign),
        )
        .route("/shift-calendar/{id}", delete(shifts::unassign))
        .route(
            "/shift-calendar/weekly/{employee_id}",
            get(shifts::weekly),
        )
        .route(
            "/attendance",
            get(attendance::list).post(attendance::record),
        )
        .route("/attendance/check-in", post(attendance::check_in))
        .route("/attendance/check-out", post(attendance::check_out))
        .route("/leave-records", get(leave::list).post(leave::create))
        .route("/leave-records/{id}", delete(leave::remove))
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route("/tasks/{id}", put(tasks::update).delete(tasks::remove))
        .route("/staff-permissions", get(permissions::by_query))
        .route("/staff/{id}/permissions", get(permissions::by_path))
        .route(
            "/avans",
            get(payroll::list_advances).post(payroll::create_advance),
        )
        .route("/avans/{id}", delete(payroll::remove_advance))
        .route(
            "/avans/employee/{employee_id}",
            get(payroll::employee_advances),
        )
        .route(
            "/yemek-ucreti",
            get(payroll::list_meal_allowances).post(payroll::set_meal_allowance),
        )
        .route(
            "/yemek-ucreti/employee/{employee_id}",
            get(payroll::employee_meal_allowance),
        )
        .route("/salary/{employee_id}/{month}", get(payroll::salary))
        .route("/salary-all/{month}", get(payroll::salary_all))
}

pub(crate) fn db_error(err: DbErr) -> ApiError {
    ApiError::internal(err)
}

pub(crate) fn invalid(err: HrError) -> ApiError {
    match err.detail() {
        Some(detail) => ApiError::bad_request_with(err.to_string(), detail),
        None => ApiError::bad_request(err.to_string()),
    }
}

/// Id for records echoed in demo mode.
pub(crate) fn demo_id() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Body returned by deletes and demo-mode updates.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: &'static str) -> Self {
        Self {
            success: true,
            message: Some(message),
        }
    }
}

/// Trimmed and non-empty, or `None`.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
