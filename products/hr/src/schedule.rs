//! Weekly schedule assembly for `GET /api/shift-calendar/weekly/{employee_id}`.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::wire::{EmployeeView, LeaveStatus, LeaveView, ShiftAssignmentView, ShiftTypeView};

/// Seven consecutive dates starting at `start`.
pub fn week_from(start: NaiveDate) -> Vec<NaiveDate> {
    (0..7u64)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Leave,
    Shift,
    Off,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamMember {
    pub id: i64,
    pub employee_id: String,
    pub ad: String,
    pub soyad: String,
    pub pozisyon: String,
}

impl From<&EmployeeView> for TeamMember {
    fn from(employee: &EmployeeView) -> Self {
        Self {
            id: employee.id,
            employee_id: employee.employee_id.clone(),
            ad: employee.ad.clone(),
            soyad: employee.soyad.clone(),
            pozisyon: employee.pozisyon.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayEntry {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: DayKind,
    pub shift_type: Option<ShiftTypeView>,
    pub shift_type_name: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub leave_type: Option<String>,
    pub team_members: Vec<TeamMember>,
}

impl DayEntry {
    fn off(date: String) -> Self {
        Self {
            date,
            kind: DayKind::Off,
            shift_type: None,
            shift_type_name: None,
            start: None,
            end: None,
            leave_type: None,
            team_members: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct WeeklySchedule {
    pub employee: Option<TeamMember>,
    pub start_date: String,
    pub end_date: String,
    pub shifts: Vec<DayEntry>,
}

/// Data for one employee's week. Assignments and leave may include other
/// employees; they are used to find team members.
pub struct WeeklyInputs<'a> {
    pub employee_id: &'a str,
    pub start: NaiveDate,
    pub employees: &'a [EmployeeView],
    pub shift_types: &'a [ShiftTypeView],
    pub assignments: &'a [ShiftAssignmentView],
    pub leave: &'a [LeaveView],
}

/// Leave wins over a scheduled shift on the same day. Rejected leave is
/// ignored.
pub fn weekly_schedule(inputs: &WeeklyInputs<'_>) -> WeeklySchedule {
    let dates = week_from(inputs.start);
    let shifts = dates
        .iter()
        .map(|date| day_entry(inputs, date.format("%Y-%m-%d").to_string()))
        .collect();
    let end = dates.last().copied().unwrap_or(inputs.start);

    WeeklySchedule {
        employee: inputs
            .employees
            .iter()
            .find(|e| e.employee_id == inputs.employee_id)
            .map(TeamMember::from),
        start_date: inputs.start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        shifts,
    }
}

fn day_entry(inputs: &WeeklyInputs<'_>, date: String) -> DayEntry {
    let on_leave = inputs.leave.iter().find(|leave| {
        leave.employee_id == inputs.employee_id
            && leave.status != LeaveStatus::Rejected
            && leave.start_date.as_str() <= date.as_str()
            && date.as_str() <= leave.end_date.as_str()
    });
    if let Some(leave) = on_leave {
        return DayEntry {
            kind: DayKind::Leave,
            leave_type: Some(leave.leave_type.clone()),
            ..DayEntry::off(date)
        };
    }

    let Some(assignment) = inputs
        .assignments
        .iter()
        .find(|a| a.employee_id == inputs.employee_id && a.date == date)
    else {
        return DayEntry::off(date);
    };

    let shift_type = inputs
        .shift_types
        .iter()
        .find(|st| st.id == assignment.shift_type_id)
        .cloned();
    let team_members = inputs
        .assignments
        .iter()
        .filter(|other| {
            other.date == date
                && other.shift_type_id == assignment.shift_type_id
                && other.employee_id != inputs.employee_id
        })
        .filter_map(|other| {
            inputs
                .employees
                .iter()
                .find(|e| e.employee_id == other.employee_id)
                .map(TeamMember::from)
        })
        .collect();
    let shift_type_name = shift_type
        .as_ref()
        .map(|st| st.name.clone())
        .unwrap_or_else(|| assignment.shift_name.clone());

    DayEntry {
        kind: DayKind::Shift,
        shift_type,
        shift_type_name: Some(shift_type_name),
        start: Some(assignment.start_time.clone()),
        end: Some(assignment.end_time.clone()),
        team_members,
        ..DayEntry::off(date)
    }
}
