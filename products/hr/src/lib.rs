//! HR vertical slice.
//!
//! Everything here is pure: wire types with the field names the SPA reads,
//! input validation, payroll arithmetic, weekly schedule assembly and the
//! demo fixtures served when no store is configured. Handlers in `server`
//! combine these with the repositories from `platform-db`.

pub mod fixtures;
pub mod payroll;
pub mod schedule;
pub mod validation;
pub mod wire;

use thiserror::Error;

pub use payroll::{MonthlySalary, SalaryInputs, earned, hourly_from_daily, monthly_salary};
pub use schedule::{
    DayEntry, DayKind, TeamMember, WeeklyInputs, WeeklySchedule, week_from, weekly_schedule,
};
pub use validation::{
    Registration, ValidRegistration, leave_days, parse_clock, parse_date, parse_month, role_slug,
    staff_code, validate_registration, worked_hours,
};

/// Validation failures. Display text is what the SPA shows to the user.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HrError {
    #[error("Tüm alanları doldurunuz!")]
    MissingFields,
    #[error("Personel ID tam 4 haneli olmalıdır!")]
    InvalidStaffCode,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid time: {0}")]
    InvalidTime(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("End date must not be before start date")]
    EndBeforeStart,
    #[error("Check-out must not be before check-in")]
    CheckOutBeforeCheckIn,
    #[error("Workday hours must be positive")]
    NonPositiveHours,
}

impl HrError {
    /// Secondary message sent as `detail` next to the error.
    pub fn detail(&self) -> Option<&'static str> {
        match self {
            HrError::MissingFields => Some("Ad, soyad, email ve employee_id gerekli"),
            HrError::InvalidStaffCode => Some("employee_id 4 haneli olmalı"),
            HrError::InvalidDate(_) => Some("Expected YYYY-MM-DD"),
            HrError::InvalidTime(_) => Some("Expected HH:MM"),
            HrError::InvalidMonth(_) => Some("Expected YYYY-MM"),
            _ => None,
        }
    }
}
