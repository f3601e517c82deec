//! Shift types and the per-day shift calendar.

use chrono::Utc;
use entity::{shift_assignment, shift_type};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

#[derive(Clone, Debug)]
pub struct NewShiftType {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
}

#[derive(Clone, Debug)]
pub struct NewAssignment {
    pub employee_id: String,
    pub shift_type_id: i32,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

pub struct ShiftTypeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShiftTypeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<shift_type::Model>, DbErr> {
        entity::prelude::ShiftType::find()
            .order_by_asc(shift_type::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find(&self, id: i32) -> Result<Option<shift_type::Model>, DbErr> {
        entity::prelude::ShiftType::find_by_id(id).one(self.db).await
    }

    pub async fn create(&self, new: NewShiftType) -> Result<shift_type::Model, DbErr> {
        let model = shift_type::ActiveModel {
            name: ActiveValue::Set(new.name),
            start_time: ActiveValue::Set(new.start_time),
            end_time: ActiveValue::Set(new.end_time),
            color: ActiveValue::Set(new.color),
            created_at: ActiveValue::Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        model.insert(self.db).await
    }

    /// Whether any calendar entry still points at the shift type.
    pub async fn in_use(&self, id: i32) -> Result<bool, DbErr> {
        let refs = entity::prelude::ShiftAssignment::find()
            .filter(shift_assignment::Column::ShiftTypeId.eq(id))
            .count(self.db)
            .await?;
        Ok(refs > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ShiftType::delete_by_id(id)
            .exec(self.db)
            .await
    }
}

pub struct ShiftAssignmentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShiftAssignmentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<shift_assignment::Model>, DbErr> {
        entity::prelude::ShiftAssignment::find()
            .order_by_asc(shift_assignment::Column::Date)
            .order_by_asc(shift_assignment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_for_day(
        &self,
        employee_id: &str,
        date: &str,
    ) -> Result<Option<shift_assignment::Model>, DbErr> {
        entity::prelude::ShiftAssignment::find()
            .filter(shift_assignment::Column::EmployeeId.eq(employee_id))
            .filter(shift_assignment::Column::Date.eq(date))
            .one(self.db)
            .await
    }

    /// Assignments for every employee with `start <= date <= end`.
    pub async fn between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<shift_assignment::Model>, DbErr> {
        entity::prelude::ShiftAssignment::find()
            .filter(shift_assignment::Column::Date.gte(start))
            .filter(shift_assignment::Column::Date.lte(end))
            .order_by_asc(shift_assignment::Column::Date)
            .all(self.db)
            .await
    }

    pub async fn create(&self, new: NewAssignment) -> Result<shift_assignment::Model, DbErr> {
        let model = shift_assignment::ActiveModel {
            employee_id: ActiveValue::Set(new.employee_id),
            shift_type_id: ActiveValue::Set(new.shift_type_id),
            date: ActiveValue::Set(new.date),
            start_time: ActiveValue::Set(new.start_time),
            end_time: ActiveValue::Set(new.end_time),
            status: ActiveValue::Set(new.status),
            created_at: ActiveValue::Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        model.insert(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ShiftAssignment::delete_by_id(id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;

    fn morning() -> NewShiftType {
        NewShiftType {
            name: "Sabah Vardiyası".into(),
            start_time: "08:00".into(),
            end_time: "16:00".into(),
            color: "bg-blue-500".into(),
        }
    }

    fn assignment(code: &str, shift_type_id: i32, date: &str) -> NewAssignment {
        NewAssignment {
            employee_id: code.into(),
            shift_type_id,
            date: date.into(),
            start_time: "08:00".into(),
            end_time: "16:00".into(),
            status: "scheduled".into(),
        }
    }

    #[tokio::test]
    async fn shift_type_in_use_until_assignments_go() -> Result<(), DbErr> {
        let db = setup().await?;
        let types = ShiftTypeRepository::new(&db);
        let calendar = ShiftAssignmentRepository::new(&db);

        let shift = types.create(morning()).await?;
        assert!(!types.in_use(shift.id).await?);

        let entry = calendar.create(assignment("3010", shift.id, "2025-10-27")).await?;
        assert!(types.in_use(shift.id).await?);

        calendar.delete(entry.id).await?;
        assert!(!types.in_use(shift.id).await?);
        assert_eq!(types.delete(shift.id).await?.rows_affected, 1);
        Ok(())
    }

    #[tokio::test]
    async fn one_assignment_per_employee_and_day() -> Result<(), DbErr> {
        let db = setup().await?;
        let shift = ShiftTypeRepository::new(&db).create(morning()).await?;
        let calendar = ShiftAssignmentRepository::new(&db);

        calendar.create(assignment("3010", shift.id, "2025-10-27")).await?;
        assert!(
            calendar
                .find_for_day("3010", "2025-10-27")
                .await?
                .is_some()
        );
        assert!(
            calendar
                .create(assignment("3010", shift.id, "2025-10-27"))
                .await
                .is_err()
        );
        calendar.create(assignment("1", shift.id, "2025-10-27")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn between_is_inclusive() -> Result<(), DbErr> {
        let db = setup().await?;
        let shift = ShiftTypeRepository::new(&db).create(morning()).await?;
        let calendar = ShiftAssignmentRepository::new(&db);
        for date in ["2025-10-26", "2025-10-27", "2025-11-02", "2025-11-03"] {
            calendar.create(assignment("3010", shift.id, date)).await?;
        }

        let week = calendar.between("2025-10-27", "2025-11-02").await?;
        let dates: Vec<_> = week.iter().map(|entry| entry.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-10-27", "2025-11-02"]);
        Ok(())
    }
}
