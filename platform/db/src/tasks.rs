use chrono::{DateTime, FixedOffset, Utc};
use entity::task::{self, Status};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    QueryOrder,
};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assignee_ids: Vec<String>,
    pub status: Status,
    pub rating: Option<i32>,
    pub created_by: Option<String>,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub recurring: bool,
    pub recurrence_period: Option<String>,
    pub recurrence_every: Option<i32>,
    pub recurrence_unit: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Clone, Debug, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee_ids: Option<Vec<String>>,
    pub status: Option<Status>,
    pub rating: Option<i32>,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub recurring: Option<bool>,
    pub recurrence_period: Option<String>,
    pub recurrence_every: Option<i32>,
    pub recurrence_unit: Option<String>,
}

pub struct TaskRepository<'a> {
    db: &'a DatabaseConnection,
}

fn assignees(ids: Vec<String>) -> Value {
    Value::Array(ids.into_iter().map(Value::String).collect())
}

impl<'a> TaskRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<task::Model>, DbErr> {
        entity::prelude::Task::find()
            .order_by_desc(task::Column::CreatedAt)
            .order_by_desc(task::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find(&self, id: i32) -> Result<Option<task::Model>, DbErr> {
        entity::prelude::Task::find_by_id(id).one(self.db).await
    }

    pub async fn create(&self, new: NewTask) -> Result<task::Model, DbErr> {
        let now = Utc::now().fixed_offset();
        let completed_at = (new.status == Status::Completed).then_some(now);
        let model = task::ActiveModel {
            title: ActiveValue::Set(new.title),
            description: ActiveValue::Set(new.description),
            assignee_ids: ActiveValue::Set(assignees(new.assignee_ids)),
            status: ActiveValue::Set(new.status),
            rating: ActiveValue::Set(new.rating),
            created_by: ActiveValue::Set(new.created_by),
            created_at: ActiveValue::Set(now),
            due_date: ActiveValue::Set(new.due_date),
            completed_at: ActiveValue::Set(completed_at),
            recurring: ActiveValue::Set(new.recurring),
            recurrence_period: ActiveValue::Set(new.recurrence_period),
            recurrence_every: ActiveValue::Set(new.recurrence_every),
            recurrence_unit: ActiveValue::Set(new.recurrence_unit),
            ..Default::default()
        };
        model.insert(self.db).await
    }

    /// `completed_at` is stamped the first time the task reaches
    /// [`Status::Completed`] and kept afterwards.
    pub async fn update(
        &self,
        id: i32,
        changes: TaskChanges,
    ) -> Result<Option<task::Model>, DbErr> {
        let Some(existing) = self.find(id).await? else {
            return Ok(None);
        };
        let already_completed = existing.completed_at.is_some();
        let mut model: task::ActiveModel = existing.clone().into();
        if let Some(title) = changes.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            model.description = ActiveValue::Set(description);
        }
        if let Some(ids) = changes.assignee_ids {
            model.assignee_ids = ActiveValue::Set(assignees(ids));
        }
        if let Some(status) = changes.status {
            if status == Status::Completed && !already_completed {
                model.completed_at = ActiveValue::Set(Some(Utc::now().fixed_offset()));
            }
            model.status = ActiveValue::Set(status);
        }
        if let Some(rating) = changes.rating {
            model.rating = ActiveValue::Set(Some(rating));
        }
        if let Some(due) = changes.due_date {
            model.due_date = ActiveValue::Set(Some(due));
        }
        if let Some(recurring) = changes.recurring {
            model.recurring = ActiveValue::Set(recurring);
        }
        if let Some(period) = changes.recurrence_period {
            model.recurrence_period = ActiveValue::Set(Some(period));
        }
        if let Some(every) = changes.recurrence_every {
            model.recurrence_every = ActiveValue::Set(Some(every));
        }
        if let Some(unit) = changes.recurrence_unit {
            model.recurrence_unit = ActiveValue::Set(Some(unit));
        }
        if !model.is_changed() {
            return Ok(Some(existing));
        }
        model.update(self.db).await.map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Task::delete_by_id(id).exec(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use serde_json::json;

    fn cleaning() -> NewTask {
        NewTask {
            title: "Mutfak Temizliği".into(),
            description: "Günlük kontrol".into(),
            assignee_ids: vec!["1".into(), "3010".into()],
            status: Status::Pending,
            rating: None,
            created_by: Some("1".into()),
            due_date: None,
            recurring: false,
            recurrence_period: None,
            recurrence_every: None,
            recurrence_unit: None,
        }
    }

    #[tokio::test]
    async fn assignees_are_stored_as_json_array() -> Result<(), DbErr> {
        let db = setup().await?;
        let task = TaskRepository::new(&db).create(cleaning()).await?;
        assert_eq!(task.assignee_ids, json!(["1", "3010"]));
        assert!(task.completed_at.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn completion_is_stamped_once() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = TaskRepository::new(&db);
        let task = repo.create(cleaning()).await?;

        let done = repo
            .update(
                task.id,
                TaskChanges {
                    status: Some(Status::Completed),
                    ..Default::default()
                },
            )
            .await?
            .unwrap();
        let stamped = done.completed_at.unwrap();

        let rated = repo
            .update(
                task.id,
                TaskChanges {
                    status: Some(Status::Completed),
                    rating: Some(5),
                    ..Default::default()
                },
            )
            .await?
            .unwrap();
        assert_eq!(rated.completed_at, Some(stamped));
        assert_eq!(rated.rating, Some(5));
        Ok(())
    }

    #[tokio::test]
    async fn empty_update_returns_current_row() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = TaskRepository::new(&db);
        let task = repo.create(cleaning()).await?;

        let same = repo.update(task.id, TaskChanges::default()).await?.unwrap();
        assert_eq!(same, task);
        assert!(repo.update(task.id + 10, TaskChanges::default()).await?.is_none());
        Ok(())
    }
}
