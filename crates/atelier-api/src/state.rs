use std::sync::Arc;

use atelier_core::Config;
use atelier_db::ContactStore;
use atelier_services::EmailValidator;

use crate::services::notification::ContactNotifier;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub contacts: Arc<dyn ContactStore>,
    /// `None` when SMTP or notification recipients are not configured
    pub notifier: Option<Arc<dyn ContactNotifier>>,
    pub email_validator: Arc<EmailValidator>,
}
