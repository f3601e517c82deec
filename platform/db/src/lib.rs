//! Database primitives: settings, the shared pool and one repository per
//! stored resource.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde::Deserialize;
use thiserror::Error;

pub mod attendance;
pub mod employees;
pub mod leave;
pub mod payroll;
pub mod roles;
pub mod scheduling;
pub mod tasks;

pub use attendance::AttendanceRepository;
pub use employees::{EmployeeChanges, EmployeeRepository, NewEmployee};
pub use leave::{LeaveRepository, NewLeave};
pub use payroll::{AdvanceRepository, MealAllowanceRepository, NewAdvance};
pub use roles::RoleRepository;
pub use scheduling::{NewAssignment, NewShiftType, ShiftAssignmentRepository, ShiftTypeRepository};
pub use tasks::{NewTask, TaskChanges, TaskRepository};

/// Shared connection pool.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error(transparent)]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            max_connections: default_max_connections(),
        }
    }

    /// Reads `DATABASE_URL`; a blank value counts as unset.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(default_max_connections);
        Self {
            url,
            max_connections,
        }
    }

    pub fn database_url(&self) -> DbResult<&str> {
        self.url.as_deref().ok_or(DbError::MissingUrl)
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    // Every connection to an in-memory SQLite database sees its own schema.
    let max_connections = if url.contains(":memory:") {
        1
    } else {
        settings.max_connections
    };
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let pool = Database::connect(options).await?;
    tracing::info!(max_connections, "database pool ready");
    Ok(pool)
}

#[cfg(test)]
pub(crate) mod test_support {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection, DbErr};

    pub async fn setup() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;
        Ok(db)
    }

    /// Connection without any tables, for error paths.
    pub async fn bare() -> Result<DatabaseConnection, DbErr> {
        Database::connect("sqlite::memory:").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_is_reported() {
        let settings = DatabaseSettings::default();
        assert!(!settings.is_configured());
        assert!(matches!(settings.database_url(), Err(DbError::MissingUrl)));
    }

    #[tokio::test]
    async fn connects_to_sqlite() {
        let settings = DatabaseSettings::new("sqlite::memory:");
        assert_eq!(settings.database_url().unwrap(), "sqlite::memory:");
        assert!(connect(&settings).await.is_ok());
    }
}
