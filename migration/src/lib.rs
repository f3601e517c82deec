pub use sea_orm_migration::prelude::*;

mod m20251101_000001_hr_core;
mod m20251101_000002_scheduling;
mod m20251101_000003_payroll;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_hr_core::Migration),
            Box::new(m20251101_000002_scheduling::Migration),
            Box::new(m20251101_000003_payroll::Migration),
        ]
    }
}
