use std::path::PathBuf;

use anyhow::{Context, Result};

/// Service configuration loaded from environment variables. SMTP settings
/// are optional; without host + user + pass the service falls back to the
/// disposable file transport for development use.
#[derive(Debug, Clone)]
pub struct Config {
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_secure: bool,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub from_email: Option<String>,
    pub port: u16,
    /// Where the disposable transport spools `.eml` files.
    pub spool_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            smtp_host: optional_env("SMTP_HOST"),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            smtp_secure: std::env::var("SMTP_SECURE").as_deref() == Ok("true"),
            smtp_user: optional_env("SMTP_USER"),
            smtp_pass: optional_env("SMTP_PASS"),
            from_email: optional_env("FROM_EMAIL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3020".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            spool_dir: optional_env("MAIL_SPOOL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join("mailer-spool")),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Sender address: `FROM_EMAIL`, else the SMTP user, else a no-reply
    /// placeholder (only reachable on the disposable transport).
    pub fn sender(&self) -> String {
        self.from_email
            .clone()
            .or_else(|| self.smtp_user.clone())
            .unwrap_or_else(|| "no-reply@example.com".to_string())
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
