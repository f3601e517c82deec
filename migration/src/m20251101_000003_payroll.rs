use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Advances {
    Table,
    Id,
    EmployeeId,
    Amount,
    Date,
    Description,
    CreatedBy,
}

#[derive(DeriveIden)]
enum MealAllowances {
    Table,
    Id,
    EmployeeId,
    DailyRate,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Advances::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Advances::EmployeeId).string_len(16).not_null())
                    .col(ColumnDef::new(Advances::Amount).double().not_null())
                    .col(ColumnDef::new(Advances::Date).string_len(10).not_null())
                    .col(ColumnDef::new(Advances::Description).text().not_null())
                    .col(ColumnDef::new(Advances::CreatedBy).string_len(16))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MealAllowances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MealAllowances::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MealAllowances::EmployeeId)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MealAllowances::DailyRate).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_meal_allowances_employee")
                    .table(MealAllowances::Table)
                    .col(MealAllowances::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MealAllowances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Advances::Table).to_owned())
            .await?;
        Ok(())
    }
}
