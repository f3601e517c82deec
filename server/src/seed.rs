//! Loads the demo fixtures into an empty store.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use platform_authn::hash_password;
use platform_db::{
    AdvanceRepository, DbPool, EmployeeRepository, LeaveRepository, MealAllowanceRepository,
    NewAdvance, NewAssignment, NewEmployee, NewLeave, NewShiftType, NewTask, RoleRepository,
    ShiftAssignmentRepository, ShiftTypeRepository, TaskRepository,
};
use products_hr::fixtures;
use tracing::info;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub employees: usize,
    pub roles: usize,
    pub shift_types: usize,
    pub assignments: usize,
    pub leave_records: usize,
    pub tasks: usize,
    pub advances: usize,
    pub meal_allowances: usize,
}

/// Returns `None` when the store already holds employees.
pub async fn seed_demo_data(db: &DbPool) -> Result<Option<SeedReport>> {
    let employees = EmployeeRepository::new(db);
    if employees.count().await.context("failed to count employees")? > 0 {
        info!("store already has employees, skipping seed");
        return Ok(None);
    }

    let now = Utc::now();
    let mut report = SeedReport::default();

    for employee in fixtures::employees() {
        let password_hash = hash_password(&employee.employee_id)
            .with_context(|| format!("failed to hash password for {}", employee.employee_id))?;
        employees
            .create(NewEmployee {
                employee_id: employee.employee_id,
                email: employee.email,
                first_name: employee.ad,
                last_name: employee.soyad,
                role: employee.rol,
                company_id: employee.company_id,
                position: employee.pozisyon,
                base_salary: employee.maas_tabani,
                password_hash: Some(password_hash),
            })
            .await
            .context("failed to insert employee")?;
        report.employees += 1;
    }

    let roles = RoleRepository::new(db);
    for role in fixtures::roles() {
        if roles.find(&role.id).await?.is_some() {
            continue;
        }
        roles
            .create(&role.id, &role.name, role.permissions.to_json())
            .await
            .with_context(|| format!("failed to insert role {}", role.id))?;
        report.roles += 1;
    }

    let shift_types = ShiftTypeRepository::new(db);
    let mut type_ids = HashMap::new();
    for shift in fixtures::shift_types() {
        let created = shift_types
            .create(NewShiftType {
                name: shift.name,
                start_time: shift.start,
                end_time: shift.end,
                color: shift.color,
            })
            .await
            .context("failed to insert shift type")?;
        type_ids.insert(shift.id, created.id);
        report.shift_types += 1;
    }

    let assignments = ShiftAssignmentRepository::new(db);
    for entry in fixtures::shift_calendar(now) {
        let Some(&shift_type_id) = type_ids.get(&entry.shift_type_id) else {
            continue;
        };
        assignments
            .create(NewAssignment {
                employee_id: entry.employee_id,
                shift_type_id,
                date: entry.date,
                start_time: entry.start_time,
                end_time: entry.end_time,
                status: entry.status,
            })
            .await
            .context("failed to insert shift assignment")?;
        report.assignments += 1;
    }

    let leave = LeaveRepository::new(db);
    for record in fixtures::leave_records(now) {
        leave
            .create(NewLeave {
                employee_id: record.employee_id,
                employee_name: record.employee_name,
                leave_type: record.leave_type,
                start_date: record.start_date,
                end_date: record.end_date,
                days: record.days,
                reason: record.reason,
            })
            .await
            .context("failed to insert leave record")?;
        report.leave_records += 1;
    }

    let tasks = TaskRepository::new(db);
    for task in fixtures::tasks(now) {
        tasks
            .create(NewTask {
                title: task.baslik,
                description: task.aciklama,
                assignee_ids: task.atanan_personel_ids,
                status: task.durum,
                rating: task.puan,
                created_by: task.olusturan_id,
                due_date: task.due_date,
                recurring: task.tekrarlayan,
                recurrence_period: task.tekrar_periyot,
                recurrence_every: task.tekrar_sayi,
                recurrence_unit: task.tekrar_birim,
            })
            .await
            .context("failed to insert task")?;
        report.tasks += 1;
    }

    let advances = AdvanceRepository::new(db);
    for advance in fixtures::advances(now) {
        advances
            .create(NewAdvance {
                employee_id: advance.employee_id,
                amount: advance.miktar,
                date: advance.tarih,
                description: advance.aciklama,
                created_by: advance.olusturan_id,
            })
            .await
            .context("failed to insert advance")?;
        report.advances += 1;
    }

    let meals = MealAllowanceRepository::new(db);
    for allowance in fixtures::meal_allowances() {
        meals
            .upsert(&allowance.employee_id, allowance.gunluk_ucret)
            .await
            .context("failed to insert meal allowance")?;
        report.meal_allowances += 1;
    }

    info!(?report, "demo data seeded");
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use platform_db::{DatabaseSettings, connect};

    async fn setup() -> Result<DbPool> {
        let db = connect(&DatabaseSettings::new("sqlite::memory:")).await?;
        Migrator::up(&db, None).await?;
        Ok(db)
    }

    #[tokio::test]
    async fn seeds_once() -> Result<()> {
        let db = setup().await?;
        let report = seed_demo_data(&db).await?.expect("first run seeds");
        assert_eq!(report.employees, fixtures::employees().len());
        assert_eq!(report.shift_types, 3);
        assert_eq!(report.assignments, fixtures::shift_calendar(Utc::now()).len());
        assert_eq!(report.meal_allowances, 2);

        assert_eq!(seed_demo_data(&db).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn seeded_staff_can_verify_their_code() -> Result<()> {
        let db = setup().await?;
        seed_demo_data(&db).await?;
        let employee = EmployeeRepository::new(&db)
            .find_by_staff_code("3010")
            .await?
            .expect("seeded employee");
        let hash = employee.password_hash.expect("hash stored");
        assert!(platform_authn::verify_password("3010", &hash)?);
        Ok(())
    }
}
