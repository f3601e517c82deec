use anyhow::{Context, Result};

/// Credentials accepted by `POST /api/login` without a store lookup.
#[derive(Clone, Debug)]
pub struct DemoLogin {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub demo_login: Option<DemoLogin>,
    pub admin_staff_ids: Vec<String>,
    pub default_company_id: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:3000".into()],
            demo_login: Some(DemoLogin {
                email: "demo@test.com".into(),
                password: "demo123".into(),
            }),
            admin_staff_ids: vec!["1".into(), "demo".into()],
            default_company_id: 1,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.cors_allowed_origins);

        let demo_enabled = lookup("DEMO_LOGIN_ENABLED")
            .map(|val| env_bool(&val))
            .unwrap_or(true);
        let demo_login = demo_enabled.then(|| DemoLogin {
            email: lookup("DEMO_LOGIN_EMAIL").unwrap_or_else(|| "demo@test.com".into()),
            password: lookup("DEMO_LOGIN_PASSWORD").unwrap_or_else(|| "demo123".into()),
        });

        let admin_staff_ids = lookup("ADMIN_STAFF_IDS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.admin_staff_ids);

        let default_company_id = match lookup("DEFAULT_COMPANY_ID") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid DEFAULT_COMPANY_ID {raw:?}"))?,
            None => defaults.default_company_id,
        };

        Ok(Self {
            cors_allowed_origins,
            demo_login,
            admin_staff_ids,
            default_company_id,
        })
    }
}

fn env_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_enable_demo_login() {
        let cfg = config(&[]).unwrap();
        let demo = cfg.demo_login.unwrap();
        assert_eq!(demo.email, "demo@test.com");
        assert_eq!(demo.password, "demo123");
        assert_eq!(cfg.admin_staff_ids, vec!["1", "demo"]);
        assert_eq!(cfg.default_company_id, 1);
    }

    #[test]
    fn lists_and_flags_are_parsed() {
        let cfg = config(&[
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("DEMO_LOGIN_ENABLED", "false"),
            ("ADMIN_STAFF_IDS", "0001,0002"),
            ("DEFAULT_COMPANY_ID", " 7 "),
        ])
        .unwrap();
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(cfg.demo_login.is_none());
        assert_eq!(cfg.admin_staff_ids, vec!["0001", "0002"]);
        assert_eq!(cfg.default_company_id, 7);
    }

    #[test]
    fn bad_company_id_is_an_error() {
        assert!(config(&[("DEFAULT_COMPANY_ID", "acme")]).is_err());
    }
}
