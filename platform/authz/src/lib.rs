//! Authorization primitives for the HR back office.
//!
//! One permission table serves every surface: role presets, the staff
//! defaults used when nothing else is known about a staff member, and the
//! flat `{capability: bool}` maps the SPA consumes.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("unknown role {0}")]
    UnknownRole(String),
    #[error("permissions must be a JSON object of booleans")]
    InvalidPermissions,
}

/// Capability keys understood by the SPA.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Capability {
    Dashboard,
    ViewDashboard,
    Employees,
    ViewEmployees,
    ManageEmployees,
    AddEmployee,
    EditEmployee,
    DeleteEmployee,
    Reports,
    ViewReports,
    ViewSalary,
    ViewTasks,
    ManageTasks,
    AssignTasks,
    ManageShifts,
    ManageShiftTypes,
    ManageLeave,
    ViewAttendance,
    ManageRoles,
    ManagePermissions,
    ViewStock,
    EditStock,
    AddStock,
    DeleteStock,
    PosView,
    PosEdit,
    PosAdmin,
    AdminPanel,
    SystemSettings,
    Timesheet,
    Kiosk,
}

impl Capability {
    pub const ALL: [Capability; 31] = [
        Capability::Dashboard,
        Capability::ViewDashboard,
        Capability::Employees,
        Capability::ViewEmployees,
        Capability::ManageEmployees,
        Capability::AddEmployee,
        Capability::EditEmployee,
        Capability::DeleteEmployee,
        Capability::Reports,
        Capability::ViewReports,
        Capability::ViewSalary,
        Capability::ViewTasks,
        Capability::ManageTasks,
        Capability::AssignTasks,
        Capability::ManageShifts,
        Capability::ManageShiftTypes,
        Capability::ManageLeave,
        Capability::ViewAttendance,
        Capability::ManageRoles,
        Capability::ManagePermissions,
        Capability::ViewStock,
        Capability::EditStock,
        Capability::AddStock,
        Capability::DeleteStock,
        Capability::PosView,
        Capability::PosEdit,
        Capability::PosAdmin,
        Capability::AdminPanel,
        Capability::SystemSettings,
        Capability::Timesheet,
        Capability::Kiosk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Dashboard => "dashboard",
            Capability::ViewDashboard => "view_dashboard",
            Capability::Employees => "employees",
            Capability::ViewEmployees => "view_employees",
            Capability::ManageEmployees => "manage_employees",
            Capability::AddEmployee => "add_employee",
            Capability::EditEmployee => "edit_employee",
            Capability::DeleteEmployee => "delete_employee",
            Capability::Reports => "reports",
            Capability::ViewReports => "view_reports",
            Capability::ViewSalary => "view_salary",
            Capability::ViewTasks => "view_tasks",
            Capability::ManageTasks => "manage_tasks",
            Capability::AssignTasks => "assign_tasks",
            Capability::ManageShifts => "manage_shifts",
            Capability::ManageShiftTypes => "manage_shifts_types",
            Capability::ManageLeave => "manage_leave",
            Capability::ViewAttendance => "view_attendance",
            Capability::ManageRoles => "manage_roles",
            Capability::ManagePermissions => "manage_permissions",
            Capability::ViewStock => "can_view_stock",
            Capability::EditStock => "can_edit_stock",
            Capability::AddStock => "can_add_stock",
            Capability::DeleteStock => "can_delete_stock",
            Capability::PosView => "POS_VIEW",
            Capability::PosEdit => "POS_EDIT",
            Capability::PosAdmin => "POS_ADMIN",
            Capability::AdminPanel => "admin_panel",
            Capability::SystemSettings => "system_settings",
            Capability::Timesheet => "timesheet",
            Capability::Kiosk => "kiosk",
        }
    }
}

/// Flat capability map. Keys outside [`Capability`] survive so custom roles
/// round-trip unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<String, bool>);

impl PermissionSet {
    pub fn from_capabilities(caps: &[Capability]) -> Self {
        Self(
            caps.iter()
                .map(|cap| (cap.as_str().to_string(), true))
                .collect(),
        )
    }

    /// Parse a stored JSON document. Non-boolean values are rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, AuthzError> {
        serde_json::from_value(value.clone()).map_err(|_| AuthzError::InvalidPermissions)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), serde_json::Value::Bool(*value)))
                .collect(),
        )
    }

    /// Overlay `other` on top of `self`; keys present in `other` win.
    pub fn merge(&mut self, other: &PermissionSet) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), *value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RolePreset {
    Admin,
    Manager,
    Chef,
    Waiter,
    Employee,
    Kiosk,
}

const ADMIN_CAPS: &[Capability] = &[
    Capability::Dashboard,
    Capability::ViewDashboard,
    Capability::Employees,
    Capability::ViewEmployees,
    Capability::ManageEmployees,
    Capability::AddEmployee,
    Capability::EditEmployee,
    Capability::DeleteEmployee,
    Capability::Reports,
    Capability::ViewReports,
    Capability::ViewSalary,
    Capability::ViewTasks,
    Capability::ManageTasks,
    Capability::AssignTasks,
    Capability::ManageShifts,
    Capability::ManageShiftTypes,
    Capability::ManageLeave,
    Capability::ViewAttendance,
    Capability::ManageRoles,
    Capability::ManagePermissions,
    Capability::ViewStock,
    Capability::EditStock,
    Capability::AddStock,
    Capability::DeleteStock,
    Capability::PosView,
    Capability::PosEdit,
    Capability::PosAdmin,
    Capability::AdminPanel,
    Capability::SystemSettings,
];

const MANAGER_CAPS: &[Capability] = &[
    Capability::Dashboard,
    Capability::ViewDashboard,
    Capability::Employees,
    Capability::ViewEmployees,
    Capability::ManageEmployees,
    Capability::AddEmployee,
    Capability::EditEmployee,
    Capability::Reports,
    Capability::ViewReports,
    Capability::ViewSalary,
    Capability::ViewTasks,
    Capability::ManageTasks,
    Capability::AssignTasks,
    Capability::ManageShifts,
    Capability::ManageShiftTypes,
    Capability::ManageLeave,
    Capability::ViewAttendance,
    Capability::ViewStock,
    Capability::EditStock,
    Capability::PosView,
    Capability::PosEdit,
];

const CHEF_CAPS: &[Capability] = &[
    Capability::Dashboard,
    Capability::ViewDashboard,
    Capability::ViewEmployees,
    Capability::ViewTasks,
    Capability::ManageTasks,
    Capability::AssignTasks,
    Capability::ViewAttendance,
    Capability::ViewStock,
    Capability::EditStock,
    Capability::AddStock,
    Capability::PosView,
];

const WAITER_CAPS: &[Capability] = &[
    Capability::Dashboard,
    Capability::ViewDashboard,
    Capability::ViewTasks,
    Capability::ViewAttendance,
    Capability::ViewStock,
    Capability::PosView,
    Capability::PosEdit,
];

const EMPLOYEE_CAPS: &[Capability] = &[
    Capability::Dashboard,
    Capability::ViewDashboard,
    Capability::ViewTasks,
    Capability::Timesheet,
    Capability::ViewAttendance,
];

const KIOSK_CAPS: &[Capability] = &[Capability::Kiosk];

impl RolePreset {
    pub const ALL: [RolePreset; 6] = [
        RolePreset::Admin,
        RolePreset::Manager,
        RolePreset::Chef,
        RolePreset::Waiter,
        RolePreset::Employee,
        RolePreset::Kiosk,
    ];

    pub fn id(self) -> &'static str {
        match self {
            RolePreset::Admin => "admin",
            RolePreset::Manager => "manager",
            RolePreset::Chef => "chef",
            RolePreset::Waiter => "waiter",
            RolePreset::Employee => "employee",
            RolePreset::Kiosk => "kiosk",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RolePreset::Admin => "Administrator",
            RolePreset::Manager => "Yönetici",
            RolePreset::Chef => "Şef",
            RolePreset::Waiter => "Garson",
            RolePreset::Employee => "Çalışan",
            RolePreset::Kiosk => "Kiosk",
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            RolePreset::Admin => ADMIN_CAPS,
            RolePreset::Manager => MANAGER_CAPS,
            RolePreset::Chef => CHEF_CAPS,
            RolePreset::Waiter => WAITER_CAPS,
            RolePreset::Employee => EMPLOYEE_CAPS,
            RolePreset::Kiosk => KIOSK_CAPS,
        }
    }

    pub fn permissions(self) -> PermissionSet {
        PermissionSet::from_capabilities(self.capabilities())
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.id() == id)
    }
}

/// Staff without a known role get the employee preset plus point-of-sale
/// read access.
pub fn staff_default_permissions() -> PermissionSet {
    let mut set = RolePreset::Employee.permissions();
    set.merge(&PermissionSet::from_capabilities(&[Capability::PosView]));
    set
}

#[derive(Clone, Debug)]
pub struct PolicyEngine {
    admin_staff_ids: HashSet<String>,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(["1", "demo"])
    }
}

impl PolicyEngine {
    pub fn new<I, S>(admin_staff_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_staff_ids: admin_staff_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_admin_staff(&self, staff_id: &str) -> bool {
        self.admin_staff_ids.contains(staff_id)
    }

    /// Permissions for a staff id when no stored role applies.
    pub fn staff_permissions(&self, staff_id: &str) -> PermissionSet {
        if self.is_admin_staff(staff_id) {
            RolePreset::Admin.permissions()
        } else {
            staff_default_permissions()
        }
    }

    pub fn role_permissions(&self, role_id: &str) -> Result<PermissionSet, AuthzError> {
        RolePreset::from_id(role_id)
            .map(RolePreset::permissions)
            .ok_or_else(|| AuthzError::UnknownRole(role_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    impl PermissionSet {
        fn grants(&self, cap: Capability) -> bool {
            self.0.get(cap.as_str()).copied().unwrap_or(false)
        }
    }

    #[test]
    fn admin_staff_get_every_admin_capability() {
        let engine = PolicyEngine::default();
        let perms = engine.staff_permissions("1");
        assert_eq!(perms.len(), ADMIN_CAPS.len());
        assert!(perms.grants(Capability::PosAdmin));
        assert!(perms.grants(Capability::ManageRoles));
        assert!(!perms.grants(Capability::Kiosk));
    }

    #[test]
    fn unknown_staff_get_defaults_with_pos_view() {
        let engine = PolicyEngine::new(["9999"]);
        let perms = engine.staff_permissions("1");
        assert!(perms.grants(Capability::Timesheet));
        assert!(perms.grants(Capability::PosView));
        assert!(!perms.grants(Capability::ManageEmployees));
        assert!(engine.staff_permissions("9999").grants(Capability::AdminPanel));
    }

    #[test]
    fn permission_sets_serialize_as_flat_objects() {
        let body = serde_json::to_value(RolePreset::Kiosk.permissions()).unwrap();
        assert_eq!(body, json!({"kiosk": true}));
    }

    #[test]
    fn custom_keys_survive_round_trip() {
        let stored = json!({"view_tasks": true, "custom_flag": false});
        let set = PermissionSet::from_json(&stored).unwrap();
        assert!(set.grants(Capability::ViewTasks));
        assert_eq!(set.to_json(), stored);
        assert!(PermissionSet::from_json(&json!({"view_tasks": "yes"})).is_err());
    }

    #[test]
    fn merge_prefers_overlay() {
        let mut base = RolePreset::Waiter.permissions();
        let overlay = PermissionSet::from_json(&json!({"POS_EDIT": false})).unwrap();
        base.merge(&overlay);
        assert!(!base.grants(Capability::PosEdit));
        assert!(base.grants(Capability::PosView));
    }

    #[test]
    fn role_presets_resolve_by_id() {
        let engine = PolicyEngine::default();
        assert!(engine.role_permissions("chef").unwrap().grants(Capability::AddStock));
        assert!(matches!(
            engine.role_permissions("owner"),
            Err(AuthzError::UnknownRole(_))
        ));
        assert_eq!(RolePreset::from_id("manager"), Some(RolePreset::Manager));
    }

    #[test]
    fn capability_keys_are_distinct() {
        let keys: HashSet<&str> = Capability::ALL.iter().map(|cap| cap.as_str()).collect();
        assert_eq!(keys.len(), 31);
    }
}
