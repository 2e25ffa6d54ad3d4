use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_cors: bool,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HS256 signing secret for session tokens. An empty secret makes
    /// signing fail, so production must set AUTH_SECRET explicitly.
    pub auth_secret: String,
    pub token_expiry_days: i64,
    /// Allow the login endpoint to create the admin account when the
    /// credential store is empty. Development convenience only; the
    /// sanctioned provisioning path is the seed_admin binary.
    pub allow_bootstrap_login: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment picks the defaults, specific env vars override them
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs = v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }

        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("AUTH_SECRET") {
            self.security.auth_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_TOKEN_EXPIRY_DAYS") {
            self.security.token_expiry_days = v.parse().unwrap_or(self.security.token_expiry_days);
        }
        if let Ok(v) = env::var("SECURITY_ALLOW_BOOTSTRAP_LOGIN") {
            self.security.allow_bootstrap_login = v.parse().unwrap_or(self.security.allow_bootstrap_login);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
            },
            api: ApiConfig {
                enable_cors: true,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                auth_secret: "dev-secret-change-me".to_string(),
                token_expiry_days: 7,
                allow_bootstrap_login: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
            },
            api: ApiConfig {
                enable_cors: true,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                token_expiry_days: 7,
                allow_bootstrap_login: false,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 5,
            },
            api: ApiConfig {
                enable_cors: true,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                token_expiry_days: 7,
                allow_bootstrap_login: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
