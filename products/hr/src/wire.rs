//! JSON shapes returned to the SPA.
//!
//! Field names follow the SPA's existing contract, partly Turkish. Password
//! hashes never leave the store.

use chrono::{DateTime, FixedOffset};
use entity::{advance, attendance, employee, leave_record, meal_allowance, role, shift_type, task};
use platform_authz::PermissionSet;
use serde::{Deserialize, Serialize};

pub use entity::attendance::Status as AttendanceStatus;
pub use entity::leave_record::Status as LeaveStatus;
pub use entity::task::Status as TaskStatus;

pub type Timestamp = DateTime<FixedOffset>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: i64,
    pub employee_id: String,
    pub email: String,
    pub ad: String,
    pub soyad: String,
    pub rol: String,
    pub company_id: i32,
    pub pozisyon: String,
    pub maas_tabani: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl EmployeeView {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.ad, self.soyad)
    }
}

impl From<employee::Model> for EmployeeView {
    fn from(model: employee::Model) -> Self {
        Self {
            id: i64::from(model.id),
            employee_id: model.employee_id,
            email: model.email,
            ad: model.first_name,
            soyad: model.last_name,
            rol: model.role,
            company_id: model.company_id,
            pozisyon: model.position,
            maas_tabani: model.base_salary,
            created_at: Some(model.created_at),
        }
    }
}

/// Successful login: the profile plus `success: true`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(flatten)]
    pub employee: EmployeeView,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    pub employee: EmployeeView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoleView {
    pub id: String,
    pub name: String,
    pub permissions: PermissionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl From<role::Model> for RoleView {
    fn from(model: role::Model) -> Self {
        let permissions = PermissionSet::from_json(&model.permissions).unwrap_or_default();
        Self {
            id: model.id,
            name: model.name,
            permissions,
            created_at: Some(model.created_at),
            record_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShiftTypeView {
    pub id: i64,
    pub name: String,
    pub start: String,
    pub end: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl From<shift_type::Model> for ShiftTypeView {
    fn from(model: shift_type::Model) -> Self {
        Self {
            id: i64::from(model.id),
            name: model.name,
            start: model.start_time,
            end: model.end_time,
            color: model.color,
            created_at: Some(model.created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShiftAssignmentView {
    pub id: i64,
    pub employee_id: String,
    pub employee_name: String,
    pub shift_type_id: i64,
    pub shift_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl ShiftAssignmentView {
    /// Names are resolved by the caller; the row stores only references.
    pub fn from_model(
        model: entity::shift_assignment::Model,
        employee_name: impl Into<String>,
        shift_name: impl Into<String>,
    ) -> Self {
        Self {
            id: i64::from(model.id),
            employee_id: model.employee_id,
            employee_name: employee_name.into(),
            shift_type_id: i64::from(model.shift_type_id),
            shift_name: shift_name.into(),
            date: model.date,
            start_time: model.start_time,
            end_time: model.end_time,
            status: model.status,
            created_at: Some(model.created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttendanceView {
    pub id: i64,
    pub employee_id: String,
    pub employee_name: String,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub worked_hours: f64,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// `HH:MM` of a timestamp in its own offset.
pub fn clock_time(at: &Timestamp) -> String {
    at.format("%H:%M").to_string()
}

impl From<attendance::Model> for AttendanceView {
    fn from(model: attendance::Model) -> Self {
        Self {
            id: i64::from(model.id),
            employee_id: model.employee_id,
            employee_name: model.employee_name,
            date: model.date,
            check_in: model.check_in_at.as_ref().map(clock_time),
            check_out: model.check_out_at.as_ref().map(clock_time),
            worked_hours: model.worked_hours,
            status: model.status,
            created_at: Some(model.created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaveView {
    pub id: i64,
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub days: i32,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub applied_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<Timestamp>,
}

impl From<leave_record::Model> for LeaveView {
    fn from(model: leave_record::Model) -> Self {
        Self {
            id: i64::from(model.id),
            employee_id: model.employee_id,
            employee_name: model.employee_name,
            leave_type: model.leave_type,
            start_date: model.start_date,
            end_date: model.end_date,
            days: model.days,
            reason: model.reason,
            status: model.status,
            applied_at: model.applied_at,
            approved_by: model.approved_by,
            approved_at: model.approved_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub baslik: String,
    pub aciklama: String,
    pub atanan_personel_ids: Vec<String>,
    pub durum: TaskStatus,
    pub puan: Option<i32>,
    pub olusturan_id: Option<String>,
    pub created_at: Timestamp,
    pub due_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    pub tekrarlayan: bool,
    pub tekrar_periyot: Option<String>,
    pub tekrar_sayi: Option<i32>,
    pub tekrar_birim: Option<String>,
}

/// Reads a stored assignee list. Numbers are accepted and stringified.
pub fn assignee_codes(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(code) => Some(code.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

impl From<task::Model> for TaskView {
    fn from(model: task::Model) -> Self {
        Self {
            id: i64::from(model.id),
            baslik: model.title,
            aciklama: model.description,
            atanan_personel_ids: assignee_codes(&model.assignee_ids),
            durum: model.status,
            puan: model.rating,
            olusturan_id: model.created_by,
            created_at: model.created_at,
            due_date: model.due_date,
            completed_at: model.completed_at,
            tekrarlayan: model.recurring,
            tekrar_periyot: model.recurrence_period,
            tekrar_sayi: model.recurrence_every,
            tekrar_birim: model.recurrence_unit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdvanceView {
    pub id: i64,
    pub employee_id: String,
    pub miktar: f64,
    pub tarih: String,
    pub aciklama: String,
    pub olusturan_id: Option<String>,
}

impl From<advance::Model> for AdvanceView {
    fn from(model: advance::Model) -> Self {
        Self {
            id: i64::from(model.id),
            employee_id: model.employee_id,
            miktar: model.amount,
            tarih: model.date,
            aciklama: model.description,
            olusturan_id: model.created_by,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MealAllowanceView {
    pub id: i64,
    pub employee_id: String,
    pub gunluk_ucret: f64,
}

impl MealAllowanceView {
    /// Returned when an employee has no allowance on record.
    pub fn none_for(employee_id: impl Into<String>) -> Self {
        Self {
            id: 0,
            employee_id: employee_id.into(),
            gunluk_ucret: 0.0,
        }
    }
}

impl From<meal_allowance::Model> for MealAllowanceView {
    fn from(model: meal_allowance::Model) -> Self {
        Self {
            id: i64::from(model.id),
            employee_id: model.employee_id,
            gunluk_ucret: model.daily_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn stamp() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 10, 27, 8, 5, 0).unwrap().fixed_offset()
    }

    #[test]
    fn employee_view_hides_password_and_uses_wire_names() {
        let model = employee::Model {
            id: 7,
            employee_id: "3010".into(),
            email: "employee3010@company.com".into(),
            first_name: "Çalışan".into(),
            last_name: "3010".into(),
            role: "employee".into(),
            company_id: 1,
            position: "Worker".into(),
            base_salary: 30000.0,
            password_hash: Some("$argon2id$secret".into()),
            created_at: stamp(),
        };
        let body = serde_json::to_value(EmployeeView::from(model)).unwrap();
        assert_eq!(body["ad"], "Çalışan");
        assert_eq!(body["maas_tabani"], 30000.0);
        let text = body.to_string();
        assert!(!text.contains("argon2"));
        assert!(body.get("password_hash").is_none());
    }

    #[test]
    fn login_response_flattens_profile() {
        let view = EmployeeView {
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
        };
        let body = serde_json::to_value(LoginResponse {
            success: true,
            employee: view,
        })
        .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["rol"], "admin");
        assert!(body.get("created_at").is_none());
    }

    #[test]
    fn attendance_formats_clock_times() {
        let model = attendance::Model {
            id: 1,
            employee_id: "3010".into(),
            employee_name: "Çalışan 3010".into(),
            date: "2025-10-27".into(),
            check_in_at: Some(stamp()),
            check_out_at: None,
            worked_hours: 0.0,
            status: AttendanceStatus::Present,
            created_at: stamp(),
        };
        let body = serde_json::to_value(AttendanceView::from(model)).unwrap();
        assert_eq!(body["check_in"], "08:05");
        assert_eq!(body["check_out"], serde_json::Value::Null);
        assert_eq!(body["status"], "present");
    }

    #[test]
    fn task_view_reads_assignees_and_status() {
        let model = task::Model {
            id: 2,
            title: "Stok Sayımı".into(),
            description: String::new(),
            assignee_ids: json!(["1", 3010, null]),
            status: TaskStatus::InProgress,
            rating: None,
            created_by: Some("1".into()),
            created_at: stamp(),
            due_date: None,
            completed_at: None,
            recurring: false,
            recurrence_period: None,
            recurrence_every: None,
            recurrence_unit: None,
        };
        let body = serde_json::to_value(TaskView::from(model)).unwrap();
        assert_eq!(body["atanan_personel_ids"], json!(["1", "3010"]));
        assert_eq!(body["durum"], "in_progress");
        assert!(body.get("completed_at").is_none());
    }

    #[test]
    fn role_view_tolerates_bad_permissions() {
        let model = role::Model {
            id: "odd".into(),
            name: "Odd".into(),
            permissions: json!(["not", "a", "map"]),
            created_at: stamp(),
        };
        let view = RoleView::from(model);
        assert!(view.permissions.is_empty());
        let body = serde_json::to_value(view).unwrap();
        assert!(body.get("_id").is_none());
    }
}
