//! Repository and service wiring

use std::sync::Arc;
use std::time::Duration;

use atelier_core::Config;
use atelier_db::{ContactRepository, ContactStore};
use atelier_services::{DnsMxResolver, EmailValidator};
use sqlx::PgPool;

use crate::services::notification::{ContactNotifier, EmailService};
use crate::state::AppState;

/// Build the shared application state from config and a connected pool
pub fn initialize_services(config: &Config, pool: PgPool) -> Arc<AppState> {
    let contacts: Arc<dyn ContactStore> = Arc::new(ContactRepository::new(pool));

    let email_validator = if config.email_mx_check_enabled() {
        let timeout = Duration::from_millis(config.email_mx_timeout_ms());
        tracing::info!(timeout_ms = config.email_mx_timeout_ms(), "MX lookups enabled");
        EmailValidator::with_resolver(Arc::new(DnsMxResolver::from_system_conf(timeout)))
    } else {
        tracing::info!("MX lookups disabled (EMAIL_MX_CHECK_ENABLED=false)");
        EmailValidator::new()
    };

    let notifier = EmailService::from_config(config)
        .map(|service| Arc::new(service) as Arc<dyn ContactNotifier>);
    if notifier.is_none() {
        tracing::warn!("Contact notifications are not configured; submissions are stored only");
    }

    Arc::new(AppState {
        config: config.clone(),
        contacts,
        notifier,
        email_validator: Arc::new(email_validator),
    })
}
