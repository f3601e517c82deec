//! sea-orm entities for the back-office store.
//!
//! Records are flat. References between them (employee codes, shift type ids,
//! assignee lists) are plain values resolved by the handlers, not foreign keys.

pub mod advance;
pub mod attendance;
pub mod employee;
pub mod leave_record;
pub mod meal_allowance;
pub mod role;
pub mod shift_assignment;
pub mod shift_type;
pub mod task;

pub mod prelude {
    pub use super::advance::Entity as Advance;
    pub use super::attendance::Entity as Attendance;
    pub use super::employee::Entity as Employee;
    pub use super::leave_record::Entity as LeaveRecord;
    pub use super::meal_allowance::Entity as MealAllowance;
    pub use super::role::Entity as Role;
    pub use super::shift_assignment::Entity as ShiftAssignment;
    pub use super::shift_type::Entity as ShiftType;
    pub use super::task::Entity as Task;
}
