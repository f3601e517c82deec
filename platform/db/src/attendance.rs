use chrono::{DateTime, FixedOffset, Utc};
use entity::attendance::{self, Status};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct AttendanceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AttendanceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<attendance::Model>, DbErr> {
        entity::prelude::Attendance::find()
            .order_by_desc(attendance::Column::CreatedAt)
            .order_by_desc(attendance::Column::Id)
            .all(self.db)
            .await
    }

    /// The record for `date` that has not been checked out yet.
    pub async fn open_for_day(
        &self,
        employee_id: &str,
        date: &str,
    ) -> Result<Option<attendance::Model>, DbErr> {
        entity::prelude::Attendance::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.eq(date))
            .filter(attendance::Column::Status.eq(Status::Present))
            .one(self.db)
            .await
    }

    /// The latest record of the employee that has not been checked out,
    /// whatever its date.
    pub async fn open_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Option<attendance::Model>, DbErr> {
        entity::prelude::Attendance::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Status.eq(Status::Present))
            .order_by_desc(attendance::Column::CreatedAt)
            .order_by_desc(attendance::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn check_in(
        &self,
        employee_id: &str,
        employee_name: &str,
        date: &str,
        at: DateTime<FixedOffset>,
    ) -> Result<attendance::Model, DbErr> {
        let model = attendance::ActiveModel {
            employee_id: ActiveValue::Set(employee_id.to_string()),
            employee_name: ActiveValue::Set(employee_name.to_string()),
            date: ActiveValue::Set(date.to_string()),
            check_in_at: ActiveValue::Set(Some(at)),
            check_out_at: ActiveValue::Set(None),
            worked_hours: ActiveValue::Set(0.0),
            status: ActiveValue::Set(Status::Present),
            created_at: ActiveValue::Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        model.insert(self.db).await
    }

    /// Closes an open record with the computed hours.
    pub async fn check_out(
        &self,
        open: attendance::Model,
        at: DateTime<FixedOffset>,
        worked_hours: f64,
    ) -> Result<attendance::Model, DbErr> {
        let mut model: attendance::ActiveModel = open.into();
        model.check_out_at = ActiveValue::Set(Some(at));
        model.worked_hours = ActiveValue::Set(worked_hours);
        model.status = ActiveValue::Set(Status::CheckedOut);
        model.update(self.db).await
    }

    /// Closed records of one employee whose date falls in `month` (`YYYY-MM`).
    pub async fn completed_in_month(
        &self,
        employee_id: &str,
        month: &str,
    ) -> Result<Vec<attendance::Model>, DbErr> {
        let prefix = format!("{month}-");
        entity::prelude::Attendance::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.starts_with(&prefix))
            .filter(attendance::Column::Status.eq(Status::CheckedOut))
            .all(self.db)
            .await
    }
}
