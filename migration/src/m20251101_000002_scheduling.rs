use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum ShiftTypes {
    Table,
    Id,
    Name,
    StartTime,
    EndTime,
    Color,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ShiftAssignments {
    Table,
    Id,
    EmployeeId,
    ShiftTypeId,
    Date,
    StartTime,
    EndTime,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    Table,
    Id,
    EmployeeId,
    EmployeeName,
    Date,
    CheckInAt,
    CheckOutAt,
    WorkedHours,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LeaveRecords {
    Table,
    Id,
    EmployeeId,
    EmployeeName,
    LeaveType,
    StartDate,
    EndDate,
    Days,
    Reason,
    Status,
    AppliedAt,
    ApprovedBy,
    ApprovedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    AssigneeIds,
    Status,
    Rating,
    CreatedBy,
    CreatedAt,
    DueDate,
    CompletedAt,
    Recurring,
    RecurrencePeriod,
    RecurrenceEvery,
    RecurrenceUnit,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShiftTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShiftTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShiftTypes::Name).string_len(128).not_null())
                    .col(ColumnDef::new(ShiftTypes::StartTime).string_len(5).not_null())
                    .col(ColumnDef::new(ShiftTypes::EndTime).string_len(5).not_null())
                    .col(ColumnDef::new(ShiftTypes::Color).string_len(64).not_null())
                    .col(
                        ColumnDef::new(ShiftTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShiftAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShiftAssignments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShiftAssignments::EmployeeId)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShiftAssignments::ShiftTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShiftAssignments::Date).string_len(10).not_null())
                    .col(
                        ColumnDef::new(ShiftAssignments::StartTime)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShiftAssignments::EndTime)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShiftAssignments::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShiftAssignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shift_assignments_employee_date")
                    .table(ShiftAssignments::Table)
                    .col(ShiftAssignments::EmployeeId)
                    .col(ShiftAssignments::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::EmployeeId).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Attendance::EmployeeName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::Date).string_len(10).not_null())
                    .col(ColumnDef::new(Attendance::CheckInAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Attendance::CheckOutAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Attendance::WorkedHours)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Attendance::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_employee_date")
                    .table(Attendance::Table)
                    .col(Attendance::EmployeeId)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LeaveRecords::EmployeeId)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRecords::EmployeeName).string_len(256))
                    .col(ColumnDef::new(LeaveRecords::LeaveType).string_len(32).not_null())
                    .col(ColumnDef::new(LeaveRecords::StartDate).string_len(10).not_null())
                    .col(ColumnDef::new(LeaveRecords::EndDate).string_len(10).not_null())
                    .col(ColumnDef::new(LeaveRecords::Days).integer().not_null())
                    .col(ColumnDef::new(LeaveRecords::Reason).text())
                    .col(ColumnDef::new(LeaveRecords::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(LeaveRecords::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRecords::ApprovedBy).string_len(16))
                    .col(ColumnDef::new(LeaveRecords::ApprovedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Tasks::Description).text().not_null())
                    .col(ColumnDef::new(Tasks::AssigneeIds).json().not_null())
                    .col(ColumnDef::new(Tasks::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Tasks::Rating).integer())
                    .col(ColumnDef::new(Tasks::CreatedBy).string_len(16))
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tasks::DueDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Tasks::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tasks::Recurring)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tasks::RecurrencePeriod).string_len(16))
                    .col(ColumnDef::new(Tasks::RecurrenceEvery).integer())
                    .col(ColumnDef::new(Tasks::RecurrenceUnit).string_len(16))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShiftAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShiftTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}
