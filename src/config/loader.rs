//! Load settings from environment variables, falling back to defaults for unset or empty keys.

use crate::config::types::*;

/// Read `key` through `lookup`; unset and empty both yield `default`.
fn var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Split a comma separated origin list, trimming entries and dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Settings {
    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Never fails: every key has a default
    /// except `DATABASE_URL`, which stays `None` until a binary requires it.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| var_or(&lookup, key, default);

        Settings {
            app: AppSettings {
                env: get("APP_ENV", "development"),
                name: get("APP_NAME", "MyApp"),
                port: get("APP_PORT", "8080"),
                host: get("APP_HOST", "0.0.0.0"),
            },
            database: DatabaseSettings {
                host: get("DB_HOST", "localhost"),
                port: get("DB_PORT", "5432"),
                user: get("DB_USER", "postgres"),
                password: get("DB_PASSWORD", "postgres"),
                name: get("DB_NAME", "myapp_dev"),
                ssl_mode: get("DB_SSL_MODE", "disable"),
                url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            },
            jwt: JwtSettings {
                secret: get("JWT_SECRET", "your-secret-key"),
                expiration: get("JWT_EXPIRATION", "24h"),
                refresh_secret: get("JWT_REFRESH_SECRET", "your-refresh-secret"),
                refresh_expiration: get("JWT_REFRESH_EXPIRATION", "168h"),
            },
            smtp: SmtpSettings {
                host: get("SMTP_HOST", ""),
                port: get("SMTP_PORT", "587"),
                user: get("SMTP_USER", ""),
                password: get("SMTP_PASSWORD", ""),
                from_email: get("SMTP_FROM_EMAIL", "noreply@example.com"),
                from_name: get("SMTP_FROM_NAME", "MyApp"),
            },
            sms: SmsSettings {
                provider: get("SMS_PROVIDER", "twilio"),
                account_sid: get("SMS_ACCOUNT_SID", ""),
                auth_token: get("SMS_AUTH_TOKEN", ""),
                from_number: get("SMS_FROM_NUMBER", ""),
            },
            qris: QrisSettings {
                merchant_id: get("QRIS_MERCHANT_ID", ""),
                merchant_name: get("QRIS_MERCHANT_NAME", ""),
                api_key: get("QRIS_API_KEY", ""),
                api_secret: get("QRIS_API_SECRET", ""),
                environment: get("QRIS_ENVIRONMENT", "sandbox"),
            },
            cors_allowed_origins: parse_origins(&get("CORS_ALLOWED_ORIGINS", "http://localhost:3000")),
            logging: LoggingSettings {
                level: get("LOG_LEVEL", "info"),
                format: get("LOG_FORMAT", "json"),
            },
        }
    }
}
