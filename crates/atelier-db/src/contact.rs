use atelier_core::models::{ContactSubmission, NewContactSubmission};
use atelier_core::AppError;
use sqlx::{PgPool, Postgres};

/// Trait for contact submission persistence
#[async_trait::async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a submission and return the stored row
    async fn create(&self, submission: NewContactSubmission)
        -> Result<ContactSubmission, AppError>;

    /// Cheap round-trip used by the readiness probe
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed contact repository
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContactStore for ContactRepository {
    #[tracing::instrument(skip(self, submission), fields(
        db.system = "postgresql",
        db.table = "contact_submissions",
        db.operation = "insert"
    ))]
    async fn create(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, AppError> {
        let row = sqlx::query_as::<Postgres, ContactSubmission>(
            r#"
            INSERT INTO contact_submissions (name, phone, email, query)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, phone, email, query, created_at
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.phone)
        .bind(&submission.email)
        .bind(&submission.query)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "Failed to insert contact submission");
            AppError::Database(e)
        })?;

        tracing::info!(submission_id = %row.id, "Contact submission stored");

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.system = "postgresql", db.operation = "select"))]
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
