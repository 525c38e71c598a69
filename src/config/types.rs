//! Settings record built from the process environment at startup.

use crate::error::ConfigError;

/// Immutable snapshot of every environment-derived operational parameter.
/// Built once by [`Settings::from_env`] and shared behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub smtp: SmtpSettings,
    pub sms: SmsSettings,
    pub qris: QrisSettings,
    pub cors_allowed_origins: Vec<String>,
    pub logging: LoggingSettings,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
    pub port: String,
    pub host: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    /// Full connection string (`DATABASE_URL`). Required by both binaries.
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtSettings {
    pub secret: String,
    pub expiration: String,
    pub refresh_secret: String,
    pub refresh_expiration: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmsSettings {
    pub provider: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

/// QRIS payment provider credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrisSettings {
    pub merchant_id: String,
    pub merchant_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub environment: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl AppSettings {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    /// `host:port` as handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoggingSettings {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Settings {
    /// Connection string for the server and migration binaries. Absent is fatal for both.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .ok_or(ConfigError::MissingVar { key: "DATABASE_URL" })
    }
}
