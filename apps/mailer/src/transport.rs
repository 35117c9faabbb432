//! Mail transports behind a trait object, selected per request.
//!
//! Production: SMTP relay from `SMTP_HOST`/`SMTP_USER`/`SMTP_PASS`. Without a
//! full SMTP configuration the service provisions a disposable file
//! transport instead: the message lands as an `.eml` in the spool directory
//! and its path comes back as a human-viewable preview link.

use std::path::PathBuf;

use async_trait::async_trait;
use lettre::transport::file::FileTransport;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::Config;
use crate::errors::MailError;

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers the message. Returns a preview URL only when the transport
    /// is not a real relay.
    async fn deliver(&self, message: Message) -> Result<Option<String>, MailError>;

    /// Transport label for logs and tests.
    fn kind(&self) -> &'static str;
}

/// Picks the transport for one request from the configuration as it is now.
pub fn select_transport(config: &Config) -> Result<Box<dyn MailTransport>, MailError> {
    match (&config.smtp_host, &config.smtp_user, &config.smtp_pass) {
        (Some(host), Some(user), Some(pass)) => Ok(Box::new(SmtpMailer::new(
            host,
            config.smtp_port,
            config.smtp_secure,
            user,
            pass,
        )?)),
        _ => Ok(Box::new(FileMailer::new(config.spool_dir.clone())?)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SMTP
// ────────────────────────────────────────────────────────────────────────────

pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        secure: bool,
        user: &str,
        pass: &str,
    ) -> Result<Self, MailError> {
        let credentials = Credentials::new(user.to_string(), pass.to_string());
        // secure = implicit TLS; otherwise STARTTLS on the submission port
        let builder = if secure {
            SmtpTransport::relay(host)?
        } else {
            SmtpTransport::starttls_relay(host)?
        };
        Ok(SmtpMailer {
            transport: builder.port(port).credentials(credentials).build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, message: Message) -> Result<Option<String>, MailError> {
        let transport = self.transport.clone();
        // lettre's blocking client; keep the send off the async runtime
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;
        Ok(None)
    }

    fn kind(&self) -> &'static str {
        "smtp"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Disposable file transport
// ────────────────────────────────────────────────────────────────────────────

pub struct FileMailer {
    spool_dir: PathBuf,
}

impl FileMailer {
    pub fn new(spool_dir: PathBuf) -> Result<Self, MailError> {
        std::fs::create_dir_all(&spool_dir)?;
        Ok(FileMailer { spool_dir })
    }
}

#[async_trait]
impl MailTransport for FileMailer {
    async fn deliver(&self, message: Message) -> Result<Option<String>, MailError> {
        let id = FileTransport::new(&self.spool_dir).send(&message)?;
        let path = self.spool_dir.join(format!("{id}.eml"));
        Ok(Some(format!("file://{}", path.display())))
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(smtp: bool, spool_dir: PathBuf) -> Config {
        Config {
            smtp_host: smtp.then(|| "smtp.example.com".to_string()),
            smtp_port: 587,
            smtp_secure: false,
            smtp_user: smtp.then(|| "relay".to_string()),
            smtp_pass: smtp.then(|| "hunter2".to_string()),
            from_email: None,
            port: 3020,
            spool_dir,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn full_smtp_configuration_selects_the_relay() {
        let dir = tempfile::tempdir().unwrap();
        let transport = select_transport(&config(true, dir.path().to_path_buf())).unwrap();
        assert_eq!(transport.kind(), "smtp");
    }

    #[test]
    fn missing_smtp_configuration_falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let transport = select_transport(&config(false, dir.path().to_path_buf())).unwrap();
        assert_eq!(transport.kind(), "file");
    }

    #[test]
    fn partial_smtp_configuration_is_not_enough() {
        let dir = tempfile::tempdir().unwrap();
        let mut partial = config(true, dir.path().to_path_buf());
        partial.smtp_pass = None;
        let transport = select_transport(&partial).unwrap();
        assert_eq!(transport.kind(), "file");
    }

    #[tokio::test]
    async fn file_transport_spools_and_links_the_message() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = FileMailer::new(dir.path().to_path_buf()).unwrap();
        let message = Message::builder()
            .from("no-reply@example.com".parse().unwrap())
            .to("a@b.com".parse().unwrap())
            .subject("Password reset")
            .body("token: 1234".to_string())
            .unwrap();

        let preview = mailer.deliver(message).await.unwrap().expect("preview url");
        assert!(preview.starts_with("file://"));
        let path = preview.trim_start_matches("file://");
        let spooled = std::fs::read_to_string(path).unwrap();
        assert!(spooled.contains("Subject: Password reset"));
        assert!(spooled.contains("token: 1234"));
    }
}
