use std::sync::Arc;

use platform_authn::DemoAccount;
use platform_authz::PolicyEngine;
use platform_db::DbPool;

use crate::config::AppConfig;

/// Shared, immutable per-process state. `db` is `None` in demo mode.
#[derive(Clone)]
pub struct AppState {
    pub db: Option<DbPool>,
    pub config: Arc<AppConfig>,
    pub policy: Arc<PolicyEngine>,
    pub demo: Option<Arc<DemoAccount>>,
}

impl AppState {
    pub fn new(db: Option<DbPool>, config: AppConfig) -> Self {
        let policy = PolicyEngine::new(config.admin_staff_ids.iter().cloned());
        let demo = config
            .demo_login
            .as_ref()
            .map(|login| Arc::new(DemoAccount::new(&login.email, &login.password)));
        Self {
            db,
            config: Arc::new(config),
            policy: Arc::new(policy),
            demo,
        }
    }

    pub fn demo_mode(&self) -> bool {
        self.db.is_none()
    }
}
