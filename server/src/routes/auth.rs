use axum::{Json, extract::State};
use chrono::Utc;
use platform_api::{ApiError, ApiJson, ApiResult};
use platform_authn::{DemoAccount, hash_password, verify_password};
use platform_db::{EmployeeRepository, NewEmployee};
use products_hr::{
    Registration, ValidRegistration, validate_registration,
    wire::{EmployeeView, LoginResponse, RegisterResponse},
};
use sea_orm::DbErr;
use serde::Deserialize;
use tracing::{info, warn};

use super::{db_error, demo_id, invalid};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "Kullanıcı bulunamadı";
const WRONG_PASSWORD: &str = "Hatalı şifre";
const DUPLICATE: &str = "Bu email veya personel ID zaten kullanımda!";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn demo_profile(demo: &DemoAccount, company_id: i32) -> EmployeeView {
    let profile = &demo.profile;
    EmployeeView {
        id: profile.id,
        employee_id: profile.employee_id.clone(),
        email: demo.email.clone(),
        ad: profile.ad.clone(),
        soyad: profile.soyad.clone(),
        rol: profile.rol.clone(),
        company_id,
        pozisyon: profile.pozisyon.clone(),
        maas_tabani: profile.maas_tabani,
        created_at: None,
    }
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if let Some(demo) = state.demo.as_deref() {
        if demo.matches(&body.email, &body.password) {
            info!("demo login");
            return Ok(Json(LoginResponse {
                success: true,
                employee: demo_profile(demo, state.config.default_company_id),
            }));
        }
    }

    let Some(db) = state.db.as_ref() else {
        return Err(ApiError::unauthorized(USER_NOT_FOUND));
    };
    let email = body.email.trim().to_lowercase();
    let employee = EmployeeRepository::new(db)
        .find_by_email(&email)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::unauthorized(USER_NOT_FOUND))?;

    let Some(hash) = employee.password_hash.as_deref() else {
        return Err(ApiError::unauthorized(WRONG_PASSWORD));
    };
    let valid = verify_password(&body.password, hash).unwrap_or_else(|err| {
        warn!(employee_id = %employee.employee_id, error = %err, "unreadable password hash");
        false
    });
    if !valid {
        return Err(ApiError::unauthorized(WRONG_PASSWORD));
    }

    info!(employee_id = %employee.employee_id, "login succeeded");
    Ok(Json(LoginResponse {
        success: true,
        employee: employee.into(),
    }))
}

fn registered_profile(valid: &ValidRegistration, company_id: i32) -> EmployeeView {
    EmployeeView {
        id: demo_id(),
        employee_id: valid.employee_id.clone(),
        email: valid.email.clone(),
        ad: valid.ad.clone(),
        soyad: valid.soyad.clone(),
        rol: "employee".into(),
        company_id,
        pozisyon: "Worker".into(),
        maas_tabani: 25000.0,
        created_at: Some(Utc::now().fixed_offset()),
    }
}

enum Registered {
    Created(EmployeeView),
    Conflict,
}

async fn register_in_store(
    db: &platform_db::DbPool,
    profile: &EmployeeView,
    password_hash: String,
) -> Result<Registered, DbErr> {
    let employees = EmployeeRepository::new(db);
    if employees
        .find_conflict(&profile.email, &profile.employee_id)
        .await?
        .is_some()
    {
        return Ok(Registered::Conflict);
    }
    let created = employees
        .create(NewEmployee {
            employee_id: profile.employee_id.clone(),
            email: profile.email.clone(),
            first_name: profile.ad.clone(),
            last_name: profile.soyad.clone(),
            role: profile.rol.clone(),
            company_id: profile.company_id,
            position: profile.pozisyon.clone(),
            base_salary: profile.maas_tabani,
            password_hash: Some(password_hash),
        })
        .await?;
    Ok(Registered::Created(created.into()))
}

/// The staff code doubles as the initial password.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Registration>,
) -> ApiResult<Json<RegisterResponse>> {
    let valid = validate_registration(&body).map_err(invalid)?;
    let profile = registered_profile(&valid, state.config.default_company_id);
    let demo_response = |employee| {
        Json(RegisterResponse {
            success: true,
            message: "Kayıt başarılı! (Demo Mode)",
            employee,
        })
    };

    let Some(db) = state.db.as_ref() else {
        return Ok(demo_response(profile));
    };
    let password_hash = hash_password(&valid.employee_id).map_err(ApiError::internal)?;
    match register_in_store(db, &profile, password_hash).await {
        Ok(Registered::Created(employee)) => {
            info!(employee_id = %employee.employee_id, "employee registered");
            Ok(Json(RegisterResponse {
                success: true,
                message: "Kayıt başarılı!",
                employee,
            }))
        }
        Ok(Registered::Conflict) => Err(ApiError::bad_request_with(
            DUPLICATE,
            "Email or employee_id already exists",
        )),
        Err(err) => {
            warn!(error = %err, "store unavailable, registering in demo mode");
            Ok(demo_response(profile))
        }
    }
}
