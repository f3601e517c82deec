//! Salary advances and daily meal allowances.

use entity::{advance, meal_allowance};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder,
};

#[derive(Clone, Debug)]
pub struct NewAdvance {
    pub employee_id: String,
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub created_by: Option<String>,
}

pub struct AdvanceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdvanceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<advance::Model>, DbErr> {
        entity::prelude::Advance::find()
            .order_by_desc(advance::Column::Date)
            .order_by_desc(advance::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn for_employee(&self, employee_id: &str) -> Result<Vec<advance::Model>, DbErr> {
        entity::prelude::Advance::find()
            .filter(advance::Column::EmployeeId.eq(employee_id))
            .order_by_desc(advance::Column::Date)
            .all(self.db)
            .await
    }

    /// Advances dated inside `month` (`YYYY-MM`).
    pub async fn in_month(
        &self,
        employee_id: &str,
        month: &str,
    ) -> Result<Vec<advance::Model>, DbErr> {
        let prefix = format!("{month}-");
        entity::prelude::Advance::find()
            .filter(advance::Column::EmployeeId.eq(employee_id))
            .filter(advance::Column::Date.starts_with(&prefix))
            .all(self.db)
            .await
    }

    pub async fn create(&self, new: NewAdvance) -> Result<advance::Model, DbErr> {
        let model = advance::ActiveModel {
            employee_id: ActiveValue::Set(new.employee_id),
            amount: ActiveValue::Set(new.amount),
            date: ActiveValue::Set(new.date),
            description: ActiveValue::Set(new.description),
            created_by: ActiveValue::Set(new.created_by),
            ..Default::default()
        };
        model.insert(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Advance::delete_by_id(id)
            .exec(self.db)
            .await
    }
}

pub struct MealAllowanceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MealAllowanceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<meal_allowance::Model>, DbErr> {
        entity::prelude::MealAllowance::find()
            .order_by_asc(meal_allowance::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Option<meal_allowance::Model>, DbErr> {
        entity::prelude::MealAllowance::find()
            .filter(meal_allowance::Column::EmployeeId.eq(employee_id))
            .one(self.db)
            .await
    }

    /// One allowance per employee; an existing row gets the new rate.
    pub async fn upsert(
        &self,
        employee_id: &str,
        daily_rate: f64,
    ) -> Result<meal_allowance::Model, DbErr> {
        if let Some(existing) = self.for_employee(employee_id).await? {
            let mut model: meal_allowance::ActiveModel = existing.into();
            model.daily_rate = ActiveValue::Set(daily_rate);
            return model.update(self.db).await;
        }
        let model = meal_allowance::ActiveModel {
            employee_id: ActiveValue::Set(employee_id.to_string()),
            daily_rate: ActiveValue::Set(daily_rate),
            ..Default::default()
        };
        model.insert(self.db).await
    }
}
