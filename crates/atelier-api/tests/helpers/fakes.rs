//! In-memory stand-ins for the database, SMTP and DNS.

use std::sync::Mutex;

use async_trait::async_trait;
use atelier_api::ContactNotifier;
use atelier_core::models::{ContactSubmission, NewContactSubmission};
use atelier_core::AppError;
use atelier_db::ContactStore;
use atelier_services::{MxLookup, MxResolver};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Contact store keeping rows in a Vec; `failing()` makes every call error like a dead pool.
#[derive(Default)]
pub struct InMemoryContactStore {
    rows: Mutex<Vec<ContactSubmission>>,
    fail: bool,
}

impl InMemoryContactStore {
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn rows(&self) -> Vec<ContactSubmission> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn create(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, AppError> {
        if self.fail {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let row = ContactSubmission {
            id: Uuid::new_v4(),
            name: submission.name,
            phone: submission.phone,
            email: submission.email,
            query: submission.query,
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Notifier forwarding the id of every notified submission to a channel.
pub struct RecordingNotifier {
    sent: mpsc::UnboundedSender<Uuid>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Uuid>) {
        let (sent, received) = mpsc::unbounded_channel();
        (Self { sent }, received)
    }
}

#[async_trait]
impl ContactNotifier for RecordingNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), String> {
        self.sent
            .send(submission.id)
            .map_err(|e| e.to_string())
    }
}

/// Notifier that always fails, as an unreachable SMTP relay would.
pub struct FailingNotifier;

#[async_trait]
impl ContactNotifier for FailingNotifier {
    async fn notify(&self, _submission: &ContactSubmission) -> Result<(), String> {
        Err("connection refused".to_string())
    }
}

/// Resolver answering the same lookup for every domain.
pub struct FixedResolver(pub MxLookup);

#[async_trait]
impl MxResolver for FixedResolver {
    async fn lookup_mx(&self, _domain: &str) -> MxLookup {
        self.0.clone()
    }
}
