use chrono::Utc;
use entity::leave_record::{self, Status};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder,
};

#[derive(Clone, Debug)]
pub struct NewLeave {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub days: i32,
    pub reason: Option<String>,
}

pub struct LeaveRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaveRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<leave_record::Model>, DbErr> {
        entity::prelude::LeaveRecord::find()
            .order_by_desc(leave_record::Column::AppliedAt)
            .all(self.db)
            .await
    }

    /// New requests always start out pending.
    pub async fn create(&self, new: NewLeave) -> Result<leave_record::Model, DbErr> {
        let model = leave_record::ActiveModel {
            employee_id: ActiveValue::Set(new.employee_id),
            employee_name: ActiveValue::Set(new.employee_name),
            leave_type: ActiveValue::Set(new.leave_type),
            start_date: ActiveValue::Set(new.start_date),
            end_date: ActiveValue::Set(new.end_date),
            days: ActiveValue::Set(new.days),
            reason: ActiveValue::Set(new.reason),
            status: ActiveValue::Set(Status::Pending),
            applied_at: ActiveValue::Set(Utc::now().fixed_offset()),
            approved_by: ActiveValue::Set(None),
            approved_at: ActiveValue::Set(None),
            ..Default::default()
        };
        model.insert(self.db).await
    }

    /// Leave of one employee overlapping `[start, end]`.
    pub async fn overlapping(
        &self,
        employee_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<leave_record::Model>, DbErr> {
        entity::prelude::LeaveRecord::find()
            .filter(leave_record::Column::EmployeeId.eq(employee_id))
            .filter(leave_record::Column::StartDate.lte(end))
            .filter(leave_record::Column::EndDate.gte(start))
            .filter(leave_record::Column::Status.ne(Status::Rejected))
            .all(self.db)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::LeaveRecord::delete_by_id(id)
            .exec(self.db)
            .await
    }
}
