use chrono::Utc;
use entity::role;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    QueryOrder,
};
use serde_json::Value;

pub struct RoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<role::Model>, DbErr> {
        entity::prelude::Role::find()
            .order_by_asc(role::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn find(&self, id: &str) -> Result<Option<role::Model>, DbErr> {
        entity::prelude::Role::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        id: &str,
        name: &str,
        permissions: Value,
    ) -> Result<role::Model, DbErr> {
        let model = role::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            permissions: ActiveValue::Set(permissions),
            created_at: ActiveValue::Set(Utc::now().fixed_offset()),
        };
        model.insert(self.db).await
    }

    /// Replaces the permission map. `None` when the role does not exist.
    pub async fn update_permissions(
        &self,
        id: &str,
        permissions: Value,
    ) -> Result<Option<role::Model>, DbErr> {
        let Some(existing) = self.find(id).await? else {
            return Ok(None);
        };
        let mut model: role::ActiveModel = existing.into();
        model.permissions = ActiveValue::Set(permissions);
        model.update(self.db).await.map(Some)
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::Role::delete_by_id(id.to_string())
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use serde_json::json;

    #[tokio::test]
    async fn create_update_delete() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = RoleRepository::new(&db);

        let created = repo
            .create("shift_lead", "Shift Lead", json!({"view_tasks": true}))
            .await?;
        assert_eq!(created.id, "shift_lead");
        assert!(repo.create("shift_lead", "Again", json!({})).await.is_err());

        let updated = repo
            .update_permissions("shift_lead", json!({"view_tasks": false, "kiosk": true}))
            .await?
            .unwrap();
        assert_eq!(updated.permissions["kiosk"], json!(true));
        assert!(repo.update_permissions("ghost", json!({})).await?.is_none());

        assert_eq!(repo.list().await?.len(), 1);
        assert_eq!(repo.delete("shift_lead").await?.rows_affected, 1);
        assert_eq!(repo.delete("shift_lead").await?.rows_affected, 0);
        Ok(())
    }
}
