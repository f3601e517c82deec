//! Demo data served when no store is configured or the store is empty.
//!
//! Dates are derived from `now` so the calendar always shows the current
//! week.

use chrono::{DateTime, Days, Duration, Utc};
use platform_authz::RolePreset;

use crate::wire::{
    AdvanceView, AttendanceStatus, AttendanceView, EmployeeView, LeaveStatus, LeaveView,
    MealAllowanceView, RoleView, ShiftAssignmentView, ShiftTypeView, TaskStatus, TaskView,
};

fn day(now: DateTime<Utc>, offset: i64) -> String {
    let date = now.date_naive();
    let shifted = if offset >= 0 {
        date.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(date).format("%Y-%m-%d").to_string()
}

pub fn employees() -> Vec<EmployeeView> {
    vec![
        EmployeeView {
            id: 1,
            employee_id: "1".into(),
            email: "demo@test.com".into(),
            ad: "Demo".into(),
            soyad: "User".into(),
            rol: "admin".into(),
            company_id: 1,
            pozisyon: "Administrator".into(),
            maas_tabani: 50000.0,
            created_at: None,
        },
        EmployeeView {
            id: 3010,
            employee_id: "3010".into(),
            email: "employee3010@company.com".into(),
            ad: "Çalışan".into(),
            soyad: "3010".into(),
            rol: "employee".into(),
            company_id: 1,
            pozisyon: "Worker".into(),
            maas_tabani: 30000.0,
            created_at: None,
        },
    ]
}

pub fn roles() -> Vec<RoleView> {
    RolePreset::ALL
        .into_iter()
        .map(|preset| RoleView {
            id: preset.id().to_string(),
            name: preset.display_name().to_string(),
            permissions: preset.permissions(),
            created_at: None,
            record_id: None,
        })
        .collect()
}

pub fn shift_types() -> Vec<ShiftTypeView> {
    let shift = |id, name: &str, start: &str, end: &str, color: &str| ShiftTypeView {
        id,
        name: name.into(),
        start: start.into(),
        end: end.into(),
        color: color.into(),
        created_at: None,
    };
    vec![
        shift(1, "Sabah Vardiyası", "08:00", "16:00", "bg-blue-500"),
        shift(2, "Öğle Vardiyası", "12:00", "20:00", "bg-green-500"),
        shift(3, "Gece Vardiyası", "20:00", "04:00", "bg-purple-500"),
    ]
}

/// Seven days starting today: the demo admin on mornings, employee 3010 on
/// afternoons.
pub fn shift_calendar(now: DateTime<Utc>) -> Vec<ShiftAssignmentView> {
    let types = shift_types();
    let people = employees();
    let mut calendar = Vec::with_capacity(14);
    for offset in 0..7 {
        let date = day(now, offset);
        for (person, shift) in people.iter().zip(types.iter()) {
            calendar.push(ShiftAssignmentView {
                id: (calendar.len() + 1) as i64,
                employee_id: person.employee_id.clone(),
                employee_name: person.full_name(),
                shift_type_id: shift.id,
                shift_name: shift.name.clone(),
                date: date.clone(),
                start_time: shift.start.clone(),
                end_time: shift.end.clone(),
                status: "scheduled".into(),
                created_at: None,
            });
        }
    }
    calendar
}

pub fn attendance(now: DateTime<Utc>) -> Vec<AttendanceView> {
    let today = day(now, 0);
    vec![
        AttendanceView {
            id: 1,
            employee_id: "1".into(),
            employee_name: "Demo User".into(),
            date: today.clone(),
            check_in: Some("08:30".into()),
            check_out: None,
            worked_hours: 0.0,
            status: AttendanceStatus::Present,
            created_at: None,
        },
        AttendanceView {
            id: 2,
            employee_id: "3010".into(),
            employee_name: "Çalışan 3010".into(),
            date: today,
            check_in: Some("09:15".into()),
            check_out: Some("17:45".into()),
            worked_hours: 8.5,
            status: AttendanceStatus::CheckedOut,
            created_at: None,
        },
    ]
}

pub fn leave_records(now: DateTime<Utc>) -> Vec<LeaveView> {
    let stamp = now.fixed_offset();
    vec![
        LeaveView {
            id: 1,
            employee_id: "1".into(),
            employee_name: Some("Demo User".into()),
            leave_type: "annual".into(),
            start_date: day(now, 14),
            end_date: day(now, 16),
            days: 3,
            reason: Some("Yıllık izin".into()),
            status: LeaveStatus::Approved,
            applied_at: stamp,
            approved_by: Some("1".into()),
            approved_at: Some(stamp),
        },
        LeaveView {
            id: 2,
            employee_id: "3010".into(),
            employee_name: Some("Çalışan 3010".into()),
            leave_type: "sick".into(),
            start_date: day(now, 12),
            end_date: day(now, 12),
            days: 1,
            reason: Some("Sağlık raporu".into()),
            status: LeaveStatus::Pending,
            applied_at: stamp - Duration::days(1),
            approved_by: None,
            approved_at: None,
        },
    ]
}

pub fn tasks(now: DateTime<Utc>) -> Vec<TaskView> {
    let stamp = now.fixed_offset();
    let task = |id: i64, title: &str, body: &str, assignees: &[&str], status| TaskView {
        id,
        baslik: title.into(),
        aciklama: body.into(),
        atanan_personel_ids: assignees.iter().map(|code| code.to_string()).collect(),
        durum: status,
        puan: None,
        olusturan_id: Some("1".into()),
        created_at: stamp,
        due_date: Some(stamp + Duration::hours(24)),
        completed_at: None,
        tekrarlayan: false,
        tekrar_periyot: None,
        tekrar_sayi: None,
        tekrar_birim: None,
    };
    let mut stock_count = task(
        2,
        "Stok Sayımı",
        "Haftalık stok sayım işlemi",
        &["1"],
        TaskStatus::InProgress,
    );
    stock_count.due_date = Some(stamp + Duration::hours(48));
    stock_count.tekrarlayan = true;
    stock_count.tekrar_periyot = Some("weekly".into());
    stock_count.tekrar_sayi = Some(1);
    stock_count.tekrar_birim = Some("week".into());

    let mut feedback = task(
        3,
        "Müşteri Hizmetleri",
        "Müşteri geri bildirimlerini değerlendir",
        &["3010"],
        TaskStatus::Completed,
    );
    feedback.created_at = stamp - Duration::hours(24);
    feedback.due_date = Some(stamp);
    feedback.completed_at = Some(stamp);
    feedback.puan = Some(5);

    vec![
        task(
            1,
            "Mutfak Temizliği",
            "Günlük mutfak temizlik kontrolleri yapılacak",
            &["1", "3010"],
            TaskStatus::Pending,
        ),
        stock_count,
        feedback,
    ]
}

pub fn advances(now: DateTime<Utc>) -> Vec<AdvanceView> {
    vec![AdvanceView {
        id: 1,
        employee_id: "3010".into(),
        miktar: 1000.0,
        tarih: day(now, 0),
        aciklama: "Ay ortası avans".into(),
        olusturan_id: Some("1".into()),
    }]
}

pub fn meal_allowances() -> Vec<MealAllowanceView> {
    vec![
        MealAllowanceView {
            id: 1,
            employee_id: "1".into(),
            gunluk_ucret: 200.0,
        },
        MealAllowanceView {
            id: 2,
            employee_id: "3010".into(),
            gunluk_ucret: 150.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 30, 10, 0, 0).unwrap()
    }

    #[test]
    fn calendar_covers_a_week_from_today() {
        let calendar = shift_calendar(now());
        assert_eq!(calendar.len(), 14);
        assert_eq!(calendar[0].date, "2025-10-30");
        assert_eq!(calendar[13].date, "2025-11-05");
        assert_eq!(calendar[1].shift_name, "Öğle Vardiyası");
        assert_eq!(calendar[1].employee_name, "Çalışan 3010");
        let ids: std::collections::HashSet<_> = calendar.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn roles_mirror_presets() {
        let roles = roles();
        assert_eq!(roles.len(), 6);
        assert_eq!(roles[0].id, "admin");
        assert_eq!(roles[5].permissions.len(), 1);
    }

    #[test]
    fn tasks_default_due_a_day_later() {
        let tasks = tasks(now());
        let first = &tasks[0];
        assert_eq!(first.due_date, Some(first.created_at + Duration::hours(24)));
        assert!(tasks[2].completed_at.is_some());
        assert!(tasks[1].tekrarlayan);
    }

    #[test]
    fn leave_fixtures_are_consistent() {
        for record in leave_records(now()) {
            let start = crate::parse_date(&record.start_date).unwrap();
            let end = crate::parse_date(&record.end_date).unwrap();
            assert_eq!(crate::leave_days(start, end), Ok(record.days));
        }
    }
}
