use chrono::Utc;
use entity::employee;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    DeleteResult, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Fields required to create an employee.
#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub employee_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub company_id: i32,
    pub position: String,
    pub base_salary: f64,
    pub password_hash: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Clone, Debug, Default)]
pub struct EmployeeChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub base_salary: Option<f64>,
    pub password_hash: Option<String>,
}

pub struct EmployeeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewEmployee) -> Result<employee::Model, DbErr> {
        let model = employee::ActiveModel {
            employee_id: ActiveValue::Set(new.employee_id),
            email: ActiveValue::Set(new.email),
            first_name: ActiveValue::Set(new.first_name),
            last_name: ActiveValue::Set(new.last_name),
            role: ActiveValue::Set(new.role),
            company_id: ActiveValue::Set(new.company_id),
            position: ActiveValue::Set(new.position),
            base_salary: ActiveValue::Set(new.base_salary),
            password_hash: ActiveValue::Set(new.password_hash),
            created_at: ActiveValue::Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        model.insert(self.db).await
    }

    pub async fn list(&self) -> Result<Vec<employee::Model>, DbErr> {
        entity::prelude::Employee::find()
            .order_by_asc(employee::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Employee::find().count(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<employee::Model>, DbErr> {
        entity::prelude::Employee::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_staff_code(&self, code: &str) -> Result<Option<employee::Model>, DbErr> {
        entity::prelude::Employee::find()
            .filter(employee::Column::EmployeeId.eq(code))
            .one(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<employee::Model>, DbErr> {
        entity::prelude::Employee::find()
            .filter(employee::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Any employee already holding `email` or the staff `code`.
    pub async fn find_conflict(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<employee::Model>, DbErr> {
        entity::prelude::Employee::find()
            .filter(
                Condition::any()
                    .add(employee::Column::Email.eq(email))
                    .add(employee::Column::EmployeeId.eq(code)),
            )
            .one(self.db)
            .await
    }

    /// Returns `None` when no employee has `id`.
    pub async fn update(
        &self,
        id: i32,
        changes: EmployeeChanges,
    ) -> Result<Option<employee::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut model: employee::ActiveModel = existing.clone().into();
        if let Some(email) = changes.email {
            model.email = ActiveValue::Set(email);
        }
        if let Some(first_name) = changes.first_name {
            model.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            model.last_name = ActiveValue::Set(last_name);
        }
        if let Some(role) = changes.role {
            model.role = ActiveValue::Set(role);
        }
        if let Some(position) = changes.position {
            model.position = ActiveValue::Set(position);
        }
        if let Some(base_salary) = changes.base_salary {
            model.base_salary = ActiveValue::Set(base_salary);
        }
        if let Some(hash) = changes.password_hash {
            model.password_hash = ActiveValue::Set(Some(hash));
        }
        if !model.is_changed() {
            return Ok(Some(existing));
        }
        model.update(self.db).await.map(Some)
    }

    /// Check [`DeleteResult::rows_affected`] to learn whether a row existed.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Employee::delete_by_id(id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::{bare, setup};

    pub(crate) fn sample(code: &str) -> NewEmployee {
        NewEmployee {
            employee_id: code.to_string(),
            email: format!("employee{code}@company.com"),
            first_name: "Çalışan".into(),
            last_name: code.to_string(),
            role: "employee".into(),
            company_id: 1,
            position: "Worker".into(),
            base_salary: 30000.0,
            password_hash: None,
        }
    }

    #[tokio::test]
    async fn create_and_lookup() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = EmployeeRepository::new(&db);
        let created = repo.create(sample("3010")).await?;

        assert_eq!(repo.count().await?, 1);
        let by_code = repo.find_by_staff_code("3010").await?.unwrap();
        assert_eq!(by_code.id, created.id);
        let by_email = repo.find_by_email("employee3010@company.com").await?;
        assert!(by_email.is_some());
        assert!(repo.find_by_staff_code("9999").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_codes_are_rejected_by_the_store() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = EmployeeRepository::new(&db);
        repo.create(sample("3010")).await?;

        let mut dup = sample("3010");
        dup.email = "other@company.com".into();
        assert!(repo.create(dup).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn conflict_matches_email_or_code() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = EmployeeRepository::new(&db);
        repo.create(sample("3010")).await?;

        assert!(repo.find_conflict("employee3010@company.com", "0001").await?.is_some());
        assert!(repo.find_conflict("fresh@company.com", "3010").await?.is_some());
        assert!(repo.find_conflict("fresh@company.com", "0001").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_touches_only_given_fields() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = EmployeeRepository::new(&db);
        let created = repo.create(sample("3010")).await?;

        let changes = EmployeeChanges {
            position: Some("Chef".into()),
            base_salary: Some(42000.0),
            ..Default::default()
        };
        let updated = repo.update(created.id, changes).await?.unwrap();
        assert_eq!(updated.position, "Chef");
        assert_eq!(updated.base_salary, 42000.0);
        assert_eq!(updated.email, created.email);

        assert!(repo.update(created.id + 1, EmployeeChanges::default()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = EmployeeRepository::new(&db);
        let created = repo.create(sample("3010")).await?;

        assert_eq!(repo.delete(created.id + 1).await?.rows_affected, 0);
        assert_eq!(repo.delete(created.id).await?.rows_affected, 1);
        assert!(repo.find_by_id(created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn missing_tables_surface_errors() -> Result<(), DbErr> {
        let db = bare().await?;
        assert!(EmployeeRepository::new(&db).list().await.is_err());
        Ok(())
    }
}
