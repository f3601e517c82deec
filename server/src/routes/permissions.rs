use axum::{Json, extract::State};
use platform_api::{ApiError, ApiPath, ApiQuery, ApiResult};
use platform_authz::PermissionSet;
use platform_db::{DbPool, EmployeeRepository, RoleRepository};
use sea_orm::DbErr;
use serde::Deserialize;
use tracing::warn;

use super::present;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StaffQuery {
    #[serde(rename = "staffId", default)]
    pub staff_id: Option<String>,
}

pub async fn by_query(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StaffQuery>,
) -> ApiResult<Json<PermissionSet>> {
    let staff_id =
        present(query.staff_id).ok_or_else(|| ApiError::bad_request("Staff ID is required"))?;
    Ok(Json(resolve(&state, &staff_id).await))
}

pub async fn by_path(
    State(state): State<AppState>,
    ApiPath(staff_id): ApiPath<String>,
) -> ApiResult<Json<PermissionSet>> {
    let staff_id =
        present(Some(staff_id)).ok_or_else(|| ApiError::bad_request("Staff ID is required"))?;
    Ok(Json(resolve(&state, &staff_id).await))
}

/// Configured admins first, then the employee's stored role, then defaults.
async fn resolve(state: &AppState, staff_id: &str) -> PermissionSet {
    if state.policy.is_admin_staff(staff_id) {
        return state.policy.staff_permissions(staff_id);
    }
    if let Some(db) = state.db.as_ref() {
        match stored_permissions(state, db, staff_id).await {
            Ok(Some(permissions)) => return permissions,
            Ok(None) => {}
            Err(err) => warn!(error = %err, staff_id, "permission lookup failed, using defaults"),
        }
    }
    state.policy.staff_permissions(staff_id)
}

async fn stored_permissions(
    state: &AppState,
    db: &DbPool,
    staff_id: &str,
) -> Result<Option<PermissionSet>, DbErr> {
    let Some(employee) = EmployeeRepository::new(db)
        .find_by_staff_code(staff_id)
        .await?
    else {
        return Ok(None);
    };
    if let Some(role) = RoleRepository::new(db).find(&employee.role).await? {
        if let Ok(permissions) = PermissionSet::from_json(&role.permissions) {
            return Ok(Some(permissions));
        }
        warn!(role = %role.id, "stored role has unreadable permissions");
    }
    Ok(state.policy.role_permissions(&employee.role).ok())
}
