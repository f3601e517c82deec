use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use platform_api::{ApiError, ApiJson, ApiPath, ApiResult};
use platform_authn::hash_password;
use platform_db::{EmployeeChanges, EmployeeRepository, NewEmployee};
use products_hr::{Registration, fixtures, validate_registration, wire::EmployeeView};
use serde::Deserialize;
use tracing::{info, warn};

use super::{Ack, EMPLOYEE_NOT_FOUND, db_error, demo_id, invalid, present};
use crate::state::AppState;

const DUPLICATE: &str = "Bu email veya personel ID zaten kullanımda!";

/// Store rows, or the fixtures when the store is absent, failing or empty.
pub async fn list(State(state): State<AppState>) -> Json<Vec<EmployeeView>> {
    if let Some(db) = state.db.as_ref() {
        match EmployeeRepository::new(db).list().await {
            Ok(rows) if !rows.is_empty() => {
                return Json(rows.into_iter().map(EmployeeView::from).collect());
            }
            Ok(_) => info!("no employees stored, serving fixtures"),
            Err(err) => warn!(error = %err, "employee query failed, serving fixtures"),
        }
    }
    Json(fixtures::employees())
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployee {
    #[serde(flatten)]
    pub identity: Registration,
    #[serde(default)]
    pub rol: Option<String>,
    #[serde(default)]
    pub pozisyon: Option<String>,
    #[serde(default)]
    pub maas_tabani: Option<f64>,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateEmployee>,
) -> ApiResult<(StatusCode, Json<EmployeeView>)> {
    let valid = validate_registration(&body.identity).map_err(invalid)?;
    let role = present(body.rol).unwrap_or_else(|| "employee".into());
    let position = present(body.pozisyon).unwrap_or_else(|| "Worker".into());
    let base_salary = body.maas_tabani.unwrap_or(0.0);
    if base_salary < 0.0 {
        return Err(ApiError::bad_request("maas_tabani must not be negative"));
    }

    let Some(db) = state.db.as_ref() else {
        let echo = EmployeeView {
            id: demo_id(),
            employee_id: valid.employee_id,
            email: valid.email,
            ad: valid.ad,
            soyad: valid.soyad,
            rol: role,
            company_id: state.config.default_company_id,
            pozisyon: position,
            maas_tabani: base_salary,
            created_at: Some(Utc::now().fixed_offset()),
        };
        return Ok((StatusCode::CREATED, Json(echo)));
    };

    let repo = EmployeeRepository::new(db);
    if repo
        .find_conflict(&valid.email, &valid.employee_id)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(ApiError::bad_request(DUPLICATE));
    }
    let password = present(body.password).unwrap_or_else(|| valid.employee_id.clone());
    let password_hash = hash_password(&password).map_err(ApiError::internal)?;
    let created = repo
        .create(NewEmployee {
            employee_id: valid.employee_id,
            email: valid.email,
            first_name: valid.ad,
            last_name: valid.soyad,
            role,
            company_id: state.config.default_company_id,
            position,
            base_salary,
            password_hash: Some(password_hash),
        })
        .await
        .map_err(db_error)?;
    info!(employee_id = %created.employee_id, "employee created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<EmployeeView>> {
    let Some(db) = state.db.as_ref() else {
        return fixtures::employees()
            .into_iter()
            .find(|e| e.id == id)
            .map(Json)
            .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND));
    };
    let id = i32::try_from(id).map_err(|_| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    EmployeeRepository::new(db)
        .find_by_id(id)
        .await
        .map_err(db_error)?
        .map(|model| Json(model.into()))
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployee {
    pub email: Option<String>,
    pub ad: Option<String>,
    pub soyad: Option<String>,
    pub rol: Option<String>,
    pub pozisyon: Option<String>,
    pub maas_tabani: Option<f64>,
    pub password: Option<String>,
}

fn apply_to_view(mut view: EmployeeView, changes: &EmployeeChanges) -> EmployeeView {
    if let Some(email) = &changes.email {
        view.email = email.clone();
    }
    if let Some(ad) = &changes.first_name {
        view.ad = ad.clone();
    }
    if let Some(soyad) = &changes.last_name {
        view.soyad = soyad.clone();
    }
    if let Some(rol) = &changes.role {
        view.rol = rol.clone();
    }
    if let Some(pozisyon) = &changes.position {
        view.pozisyon = pozisyon.clone();
    }
    if let Some(salary) = changes.base_salary {
        view.maas_tabani = salary;
    }
    view
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateEmployee>,
) -> ApiResult<Json<EmployeeView>> {
    if body.maas_tabani.is_some_and(|salary| salary < 0.0) {
        return Err(ApiError::bad_request("maas_tabani must not be negative"));
    }
    let mut changes = EmployeeChanges {
        email: present(body.email).map(|email| email.to_lowercase()),
        first_name: present(body.ad),
        last_name: present(body.soyad),
        role: present(body.rol),
        position: present(body.pozisyon),
        base_salary: body.maas_tabani,
        password_hash: None,
    };

    let Some(db) = state.db.as_ref() else {
        return fixtures::employees()
            .into_iter()
            .find(|e| e.id == id)
            .map(|view| Json(apply_to_view(view, &changes)))
            .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND));
    };

    let id = i32::try_from(id).map_err(|_| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let repo = EmployeeRepository::new(db);
    if let Some(email) = changes.email.as_deref() {
        let taken = repo.find_by_email(email).await.map_err(db_error)?;
        if taken.is_some_and(|other| other.id != id) {
            return Err(ApiError::bad_request(DUPLICATE));
        }
    }
    if let Some(password) = present(body.password) {
        changes.password_hash = Some(hash_password(&password).map_err(ApiError::internal)?);
    }
    let updated = repo
        .update(id, changes)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    Ok(Json(updated.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Ack>> {
    let Some(db) = state.db.as_ref() else {
        return if fixtures::employees().iter().any(|e| e.id == id) {
            Ok(Json(Ack::ok()))
        } else {
            Err(ApiError::not_found(EMPLOYEE_NOT_FOUND))
        };
    };
    let id = i32::try_from(id).map_err(|_| ApiError::not_found(EMPLOYEE_NOT_FOUND))?;
    let result = EmployeeRepository::new(db)
        .delete(id)
        .await
        .map_err(db_error)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(EMPLOYEE_NOT_FOUND));
    }
    info!(id, "employee deleted");
    Ok(Json(Ack::ok()))
}
