//! Advances, meal allowances and the monthly salary view.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use platform_api::{ApiError, ApiJson, ApiPath, ApiResult};
use platform_db::{
    AdvanceRepository, AttendanceRepository, DbPool, EmployeeRepository,
    MealAllowanceRepository, NewAdvance,
};
use products_hr::{
    MonthlySalary, SalaryInputs, fixtures, monthly_salary, parse_date, parse_month,
    wire::{AdvanceView, AttendanceStatus, EmployeeView, MealAllowanceView},
};
use sea_orm::DbErr;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{
    Ack, EMPLOYEE_NOT_FOUND, db_error, demo_id, format_date, invalid, present, staff_code, today,
};
use crate::state::AppState;

const ADVANCE_NOT_FOUND: &str = "Advance not found";

pub async fn list_advances(State(state): State<AppState>) -> ApiResult<Json<Vec<AdvanceView>>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(fixtures::advances(Utc::now())));
    };
    let rows = AdvanceRepository::new(db).list().await.map_err(db_error)?;
    Ok(Json(rows.into_iter().map(AdvanceView::from).collect()))
}

pub async fn employee_advances(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<String>,
) -> ApiResult<Json<Vec<AdvanceView>>> {
    let Some(db) = state.db.as_ref() else {
        let rows = fixtures::advances(Utc::now())
            .into_iter()
            .filter(|a| a.employee_id == employee_id)
            .collect();
        return Ok(Json(rows));
    };
    let rows = AdvanceRepository::new(db)
        .for_employee(&employee_id)
        .await
        .map_err(db_error)?;
    Ok(Json(rows.into_iter().map(AdvanceView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateAdvance {
    #[serde(deserialize_with = "staff_code")]
    pub employee_id: String,
    pub miktar: f64,
    #[serde(default)]
    pub tarih: Option<String>,
    #[serde(default)]
    pub aciklama: Option<String>,
    #[serde(default)]
    pub olusturan_id: Option<Value>,
}

pub async fn create_advance(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAdvance>,
) -> ApiResult<(StatusCode, Json<AdvanceView>)> {
    if body.miktar <= 0.0 {
        return Err(ApiError::bad_request("Amount must be positive"));
    }
    let date = match present(body.tarih) {
        Some(text) => parse_date(&text).map_err(invalid)?,
        None => today(),
    };
    let created_by = body.olusturan_id.and_then(|v| match v {
        Value::String(s) => present(Some(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    let new = NewAdvance {
        employee_id: body.employee_id,
        amount: body.miktar,
        date: format_date(date),
        description: body.aciklama.unwrap_or_default(),
        created_by,
    };

    let Some(db) = state.db.as_ref() else {
        let echo = AdvanceView {
            id: demo_id(),
            employee_id: new.employee_id,
            miktar: new.amount,
            tarih: new.date,
            aciklama: new.description,
            olusturan_id: new.created_by,
        };
        return Ok((StatusCode::CREATED, Json(echo)));
    };

    EmployeeRepository::new(db)
        .find_by_staff_code(&new.employee_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let created = AdvanceRepository::new(db)
        .create(new)
        .await
        .map_err(db_error)?;
    info!(employee_id = %created.employee_id, amount = created.amount, "advance recorded");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn remove_advance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Ack>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(Ack::ok()));
    };
    let id = i32::try_from(id).map_err(|_| ApiError::not_found(ADVANCE_NOT_FOUND))?;
    let result = AdvanceRepository::new(db)
        .delete(id)
        .await
        .map_err(db_error)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(ADVANCE_NOT_FOUND));
    }
    Ok(Json(Ack::ok()))
}

pub async fn list_meal_allowances(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MealAllowanceView>>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(fixtures::meal_allowances()));
    };
    let rows = MealAllowanceRepository::new(db)
        .list()
        .await
        .map_err(db_error)?;
    Ok(Json(rows.into_iter().map(MealAllowanceView::from).collect()))
}

pub async fn employee_meal_allowance(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<String>,
) -> ApiResult<Json<MealAllowanceView>> {
    let found = match state.db.as_ref() {
        Some(db) => MealAllowanceRepository::new(db)
            .for_employee(&employee_id)
            .await
            .map_err(db_error)?
            .map(MealAllowanceView::from),
        None => fixtures::meal_allowances()
            .into_iter()
            .find(|m| m.employee_id == employee_id),
    };
    Ok(Json(
        found.unwrap_or_else(|| MealAllowanceView::none_for(employee_id)),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SetMealAllowance {
    #[serde(deserialize_with = "staff_code")]
    pub employee_id: String,
    pub gunluk_ucret: f64,
}

pub async fn set_meal_allowance(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetMealAllowance>,
) -> ApiResult<Json<MealAllowanceView>> {
    if body.gunluk_ucret < 0.0 {
        return Err(ApiError::bad_request("Daily rate must not be negative"));
    }
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(MealAllowanceView {
            id: demo_id(),
            employee_id: body.employee_id,
            gunluk_ucret: body.gunluk_ucret,
        }));
    };
    EmployeeRepository::new(db)
        .find_by_staff_code(&body.employee_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let saved = MealAllowanceRepository::new(db)
        .upsert(&body.employee_id, body.gunluk_ucret)
        .await
        .map_err(db_error)?;
    Ok(Json(saved.into()))
}

pub async fn salary(
    State(state): State<AppState>,
    ApiPath((employee_id, month)): ApiPath<(String, String)>,
) -> ApiResult<Json<MonthlySalary>> {
    let month = parse_month(&month).map_err(invalid)?;
    let Some(db) = state.db.as_ref() else {
        let employee = fixtures::employees()
            .into_iter()
            .find(|e| e.employee_id == employee_id)
            .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
        return Ok(Json(demo_salary(&employee, &month)));
    };
    let employee = EmployeeRepository::new(db)
        .find_by_staff_code(&employee_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let view = EmployeeView::from(employee);
    Ok(Json(stored_salary(db, &view, &month).await.map_err(db_error)?))
}

pub async fn salary_all(
    State(state): State<AppState>,
    ApiPath(month): ApiPath<String>,
) -> ApiResult<Json<Vec<MonthlySalary>>> {
    let month = parse_month(&month).map_err(invalid)?;
    let Some(db) = state.db.as_ref() else {
        let rows = fixtures::employees()
            .iter()
            .map(|employee| demo_salary(employee, &month))
            .collect();
        return Ok(Json(rows));
    };
    let employees = EmployeeRepository::new(db).list().await.map_err(db_error)?;
    let mut rows = Vec::with_capacity(employees.len());
    for employee in employees {
        let view = EmployeeView::from(employee);
        rows.push(stored_salary(db, &view, &month).await.map_err(db_error)?);
    }
    Ok(Json(rows))
}

fn salary_for(
    employee: &EmployeeView,
    month: &str,
    worked_hours: &[f64],
    daily_meal_rate: f64,
    advances: &[f64],
) -> MonthlySalary {
    monthly_salary(&SalaryInputs {
        employee_id: &employee.employee_id,
        ad: &employee.ad,
        soyad: &employee.soyad,
        pozisyon: &employee.pozisyon,
        month,
        base_salary: employee.maas_tabani,
        worked_hours,
        daily_meal_rate,
        advances,
    })
}

async fn stored_salary(
    db: &DbPool,
    employee: &EmployeeView,
    month: &str,
) -> Result<MonthlySalary, DbErr> {
    let code = employee.employee_id.as_str();
    let hours: Vec<f64> = AttendanceRepository::new(db)
        .completed_in_month(code, month)
        .await?
        .into_iter()
        .map(|record| record.worked_hours)
        .collect();
    let daily_meal_rate = MealAllowanceRepository::new(db)
        .for_employee(code)
        .await?
        .map(|m| m.daily_rate)
        .unwrap_or(0.0);
    let advances: Vec<f64> = AdvanceRepository::new(db)
        .in_month(code, month)
        .await?
        .into_iter()
        .map(|a| a.amount)
        .collect();
    Ok(salary_for(employee, month, &hours, daily_meal_rate, &advances))
}

fn demo_salary(employee: &EmployeeView, month: &str) -> MonthlySalary {
    let now = Utc::now();
    let prefix = format!("{month}-");
    let code = employee.employee_id.as_str();
    let hours: Vec<f64> = fixtures::attendance(now)
        .into_iter()
        .filter(|r| {
            r.employee_id == code
                && r.date.starts_with(&prefix)
                && r.status == AttendanceStatus::CheckedOut
        })
        .map(|r| r.worked_hours)
        .collect();
    let daily_meal_rate = fixtures::meal_allowances()
        .into_iter()
        .find(|m| m.employee_id == code)
        .map(|m| m.gunluk_ucret)
        .unwrap_or(0.0);
    let advances: Vec<f64> = fixtures::advances(now)
        .into_iter()
        .filter(|a| a.employee_id == code && a.tarih.starts_with(&prefix))
        .map(|a| a.miktar)
        .collect();
    salary_for(employee, month, &hours, daily_meal_rate, &advances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_salary_for_a_month_without_records_is_zero() {
        let employee = fixtures::employees().remove(0);
        let salary = demo_salary(&employee, "1999-01");
        assert_eq!(salary.calisilan_gun, 0);
        assert_eq!(salary.toplam_avans, 0.0);
        assert_eq!(salary.toplam_maas, 0.0);
        assert_eq!(salary.temel_maas, employee.maas_tabani);
    }

    #[test]
    fn demo_salary_counts_current_month_fixtures() {
        let month = Utc::now().format("%Y-%m").to_string();
        let employee = fixtures::employees()
            .into_iter()
            .find(|e| e.employee_id == "3010")
            .unwrap();
        let salary = demo_salary(&employee, &month);
        assert_eq!(salary.ay, month);
        assert_eq!(salary.gunluk_yemek_ucreti, 150.0);
    }
}
