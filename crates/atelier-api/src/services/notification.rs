//! Contact notification e-mails sent via SMTP.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use atelier_core::models::ContactSubmission;
use atelier_core::Config;

/// Tells the site owner a contact submission was stored.
///
/// Delivery is best effort: callers log the error and move on.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), String>;
}

/// SMTP notifier built on lettre.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    recipients: Vec<String>,
}

impl EmailService {
    /// Create email service from config. Returns `None` if SMTP or recipients are not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if config.contact_notify_to().is_empty() {
            tracing::debug!("Contact notifications disabled (CONTACT_NOTIFY_TO not set)");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port();

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
            recipients: config.contact_notify_to().to_vec(),
        })
    }

    /// Send a plain-text email to the given recipients.
    pub async fn send(&self, to: &[String], subject: &str, body_plain: &str) -> Result<(), String> {
        if to.is_empty() {
            return Ok(());
        }
        let to_addrs: Vec<Mailbox> = to.iter().filter_map(|s| s.parse().ok()).collect();
        if to_addrs.is_empty() {
            return Err("No valid recipient addresses".to_string());
        }
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let mut builder = Message::builder().from(from_addr).subject(subject);
        for mb in &to_addrs {
            builder = builder.to(mb.clone());
        }
        let email = builder
            .header(ContentType::TEXT_PLAIN)
            .body(body_plain.to_string())
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        info!(count = to_addrs.len(), "Notification email sent");
        Ok(())
    }
}

#[async_trait]
impl ContactNotifier for EmailService {
    #[tracing::instrument(skip(self, submission), fields(submission_id = %submission.id))]
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), String> {
        let subject = format!("New contact request from {}", submission.name);
        self.send(&self.recipients, &subject, &notification_body(submission))
            .await
    }
}

pub(crate) fn notification_body(submission: &ContactSubmission) -> String {
    format!(
        "A new contact request was submitted on the website.\n\n\
         Name: {}\n\
         Phone: {}\n\
         Email: {}\n\
         Received: {}\n\n\
         Message:\n{}\n",
        submission.name,
        submission.phone,
        submission.email,
        submission.created_at.to_rfc3339(),
        submission.query
    )
}
