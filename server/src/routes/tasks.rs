use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use platform_api::{ApiError, ApiJson, ApiPath, ApiResult};
use platform_db::{NewTask, TaskChanges, TaskRepository};
use products_hr::{
    fixtures,
    wire::{TaskStatus, TaskView, assignee_codes},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{Ack, db_error, demo_id, present};
use crate::state::AppState;

const TASK_NOT_FOUND: &str = "Task not found";

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskView>>> {
    let Some(db) = state.db.as_ref() else {
        let mut tasks = fixtures::tasks(Utc::now());
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        return Ok(Json(tasks));
    };
    let rows = TaskRepository::new(db).list().await.map_err(db_error)?;
    Ok(Json(rows.into_iter().map(TaskView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    #[serde(default)]
    pub baslik: Option<String>,
    #[serde(default)]
    pub aciklama: Option<String>,
    #[serde(default)]
    pub atanan_personel_ids: Vec<Value>,
    #[serde(default)]
    pub durum: Option<TaskStatus>,
    #[serde(default)]
    pub puan: Option<i32>,
    #[serde(default)]
    pub olusturan_id: Option<Value>,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub tekrarlayan: bool,
    #[serde(default)]
    pub tekrar_periyot: Option<String>,
    #[serde(default)]
    pub tekrar_sayi: Option<i32>,
    #[serde(default)]
    pub tekrar_birim: Option<String>,
}

/// Ratings run 1 to 5 and only land on completed tasks.
fn check_rating(rating: Option<i32>, status: TaskStatus) -> ApiResult<()> {
    let Some(rating) = rating else {
        return Ok(());
    };
    if !(1..=5).contains(&rating) {
        return Err(ApiError::bad_request("Puan 1-5 arasında olmalıdır"));
    }
    if status != TaskStatus::Completed {
        return Err(ApiError::bad_request("Sadece tamamlanan görevler puanlanabilir"));
    }
    Ok(())
}

/// Creator ids arrive as strings or numbers.
fn creator(value: Option<Value>) -> Option<String> {
    value.and_then(|v| assignee_codes(&Value::Array(vec![v])).pop())
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTask>,
) -> ApiResult<(StatusCode, Json<TaskView>)> {
    let title =
        present(body.baslik).ok_or_else(|| ApiError::bad_request("Task title is required"))?;
    let status = body.durum.unwrap_or(TaskStatus::Pending);
    check_rating(body.puan, status)?;
    let now = Utc::now().fixed_offset();
    let new = NewTask {
        title,
        description: body.aciklama.unwrap_or_default(),
        assignee_ids: assignee_codes(&Value::Array(body.atanan_personel_ids)),
        status,
        rating: body.puan,
        created_by: creator(body.olusturan_id),
        due_date: Some(body.due_date.unwrap_or(now + Duration::hours(24))),
        recurring: body.tekrarlayan,
        recurrence_period: present(body.tekrar_periyot),
        recurrence_every: body.tekrar_sayi,
        recurrence_unit: present(body.tekrar_birim),
    };

    let Some(db) = state.db.as_ref() else {
        let completed_at = (new.status == TaskStatus::Completed).then_some(now);
        let echo = TaskView {
            id: demo_id(),
            baslik: new.title,
            aciklama: new.description,
            atanan_personel_ids: new.assignee_ids,
            durum: new.status,
            puan: new.rating,
            olusturan_id: new.created_by,
            created_at: now,
            due_date: new.due_date,
            completed_at,
            tekrarlayan: new.recurring,
            tekrar_periyot: new.recurrence_period,
            tekrar_sayi: new.recurrence_every,
            tekrar_birim: new.recurrence_unit,
        };
        return Ok((StatusCode::CREATED, Json(echo)));
    };

    let created = TaskRepository::new(db)
        .create(new)
        .await
        .map_err(db_error)?;
    info!(task_id = created.id, "task created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    #[serde(default)]
    pub baslik: Option<String>,
    #[serde(default)]
    pub aciklama: Option<String>,
    #[serde(default)]
    pub atanan_personel_ids: Option<Vec<Value>>,
    #[serde(default)]
    pub durum: Option<TaskStatus>,
    #[serde(default)]
    pub puan: Option<i32>,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub tekrarlayan: Option<bool>,
    #[serde(default)]
    pub tekrar_periyot: Option<String>,
    #[serde(default)]
    pub tekrar_sayi: Option<i32>,
    #[serde(default)]
    pub tekrar_birim: Option<String>,
}

impl From<UpdateTask> for TaskChanges {
    fn from(body: UpdateTask) -> Self {
        Self {
            title: present(body.baslik),
            description: body.aciklama,
            assignee_ids: body
                .atanan_personel_ids
                .map(|ids| assignee_codes(&Value::Array(ids))),
            status: body.durum,
            rating: body.puan,
            due_date: body.due_date,
            recurring: body.tekrarlayan,
            recurrence_period: body.tekrar_periyot,
            recurrence_every: body.tekrar_sayi,
            recurrence_unit: body.tekrar_birim,
        }
    }
}

fn apply_to_view(mut view: TaskView, changes: TaskChanges) -> TaskView {
    if let Some(title) = changes.title {
        view.baslik = title;
    }
    if let Some(description) = changes.description {
        view.aciklama = description;
    }
    if let Some(ids) = changes.assignee_ids {
        view.atanan_personel_ids = ids;
    }
    if let Some(status) = changes.status {
        if status == TaskStatus::Completed && view.completed_at.is_none() {
            view.completed_at = Some(Utc::now().fixed_offset());
        }
        view.durum = status;
    }
    if changes.rating.is_some() {
        view.puan = changes.rating;
    }
    if changes.due_date.is_some() {
        view.due_date = changes.due_date;
    }
    if let Some(recurring) = changes.recurring {
        view.tekrarlayan = recurring;
    }
    if changes.recurrence_period.is_some() {
        view.tekrar_periyot = changes.recurrence_period;
    }
    if changes.recurrence_every.is_some() {
        view.tekrar_sayi = changes.recurrence_every;
    }
    if changes.recurrence_unit.is_some() {
        view.tekrar_birim = changes.recurrence_unit;
    }
    view
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateTask>,
) -> ApiResult<Json<TaskView>> {
    let changes = TaskChanges::from(body);

    let Some(db) = state.db.as_ref() else {
        let task = fixtures::tasks(Utc::now())
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))?;
        check_rating(changes.rating, changes.status.unwrap_or(task.durum))?;
        return Ok(Json(apply_to_view(task, changes)));
    };

    let id = i32::try_from(id).map_err(|_| ApiError::not_found(TASK_NOT_FOUND))?;
    let repo = TaskRepository::new(db);
    let existing = repo
        .find(id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))?;
    check_rating(changes.rating, changes.status.unwrap_or(existing.status))?;
    let updated = repo
        .update(id, changes)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))?;
    Ok(Json(updated.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Ack>> {
    let Some(db) = state.db.as_ref() else {
        return Ok(Json(Ack::ok()));
    };
    let id = i32::try_from(id).map_err(|_| ApiError::not_found(TASK_NOT_FOUND))?;
    let result = TaskRepository::new(db)
        .delete(id)
        .await
        .map_err(db_error)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(TASK_NOT_FOUND));
    }
    Ok(Json(Ack::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn completing_a_fixture_task_stamps_it_once() {
        let pending = fixtures::tasks(Utc::now()).remove(0);
        assert!(pending.completed_at.is_none());
        let done = apply_to_view(
            pending,
            TaskChanges {
                status: Some(TaskStatus::Completed),
                rating: Some(4),
                ..Default::default()
            },
        );
        assert!(done.completed_at.is_some());
        assert_eq!(done.puan, Some(4));

        let stamped = done.completed_at;
        let again = apply_to_view(
            done,
            TaskChanges {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );
        assert_eq!(again.completed_at, stamped);
    }

    #[test]
    fn update_body_reads_numeric_assignees() {
        let body: UpdateTask =
            serde_json::from_value(json!({"atanan_personel_ids": [3010, "1"], "baslik": " "}))
                .unwrap();
        let changes = TaskChanges::from(body);
        assert_eq!(changes.assignee_ids, Some(vec!["3010".into(), "1".into()]));
        assert_eq!(changes.title, None);
    }

    #[test]
    fn ratings_need_range_and_completion() {
        assert!(check_rating(None, TaskStatus::Pending).is_ok());
        assert!(check_rating(Some(5), TaskStatus::Completed).is_ok());
        assert!(check_rating(Some(1), TaskStatus::Completed).is_ok());
        for bad in [0, 6, -5, 99] {
            let err = check_rating(Some(bad), TaskStatus::Completed).unwrap_err();
            assert_eq!(err.to_string(), "Puan 1-5 arasında olmalıdır");
        }
        let err = check_rating(Some(3), TaskStatus::InProgress).unwrap_err();
        assert_eq!(err.to_string(), "Sadece tamamlanan görevler puanlanabilir");
    }

    #[test]
    fn creator_accepts_numbers() {
        assert_eq!(creator(Some(json!(1))), Some("1".into()));
        assert_eq!(creator(Some(json!("3010"))), Some("3010".into()));
        assert_eq!(creator(None), None);
    }
}
