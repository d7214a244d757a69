//! PostgreSQL implementation of DonationRepository.
//!
//! Confirmation uses the same pending-status guard as membership
//! payments, so replayed gateway callbacks never settle twice.

use crate::domain::donation::{Donation, DonationError};
use crate::domain::foundation::{DonationId, Money, Timestamp, UserId};
use crate::domain::membership::{PaymentMethod, PaymentRecordStatus};
use crate::ports::{DonationConfirmOutcome, DonationRepository, DonationStats};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the DonationRepository port.
pub struct PostgresDonationRepository {
    pool: PgPool,
}

impl PostgresDonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DonationRow {
    id: Uuid,
    donor_name: String,
    donor_user_id: Option<Uuid>,
    amount: i64,
    currency: String,
    method: String,
    status: String,
    transaction_ref: Option<String>,
    message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DonationRow> for Donation {
    type Error = DonationError;

    fn try_from(row: DonationRow) -> Result<Self, Self::Error> {
        let method: PaymentMethod = row.method.parse().map_err(|e| {
            DonationError::infrastructure(format!("Invalid method: {}", e))
        })?;
        let status: PaymentRecordStatus = row.status.parse().map_err(|e| {
            DonationError::infrastructure(format!("Invalid status: {}", e))
        })?;

        Ok(Donation {
            id: DonationId::from_uuid(row.id),
            donor_name: row.donor_name,
            donor_user_id: row.donor_user_id.map(UserId::from_uuid),
            amount: Money::new(row.amount),
            currency: row.currency,
            method,
            status,
            transaction_ref: row.transaction_ref,
            message: row.message,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn infra(context: &str, e: sqlx::Error) -> DonationError {
    DonationError::infrastructure(format!("Failed to {}: {}", context, e))
}

#[async_trait]
impl DonationRepository for PostgresDonationRepository {
    async fn save(&self, donation: &Donation) -> Result<(), DonationError> {
        sqlx::query(
            r#"
            INSERT INTO donations (
                id, donor_name, donor_user_id, amount, currency, method,
                status, transaction_ref, message, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(donation.id.as_uuid())
        .bind(&donation.donor_name)
        .bind(donation.donor_user_id.map(|u| *u.as_uuid()))
        .bind(donation.amount.units())
        .bind(&donation.currency)
        .bind(donation.method.as_str())
        .bind(donation.status.as_str())
        .bind(&donation.transaction_ref)
        .bind(&donation.message)
        .bind(donation.created_at.as_datetime())
        .bind(donation.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("donations_transaction_ref_key") {
                    return DonationError::duplicate_transaction(
                        donation.transaction_ref.clone().unwrap_or_default(),
                    );
                }
            }
            infra("save donation", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &DonationId) -> Result<Option<Donation>, DonationError> {
        let row: Option<DonationRow> =
            sqlx::query_as("SELECT * FROM donations WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| infra("find donation", e))?;

        row.map(Donation::try_from).transpose()
    }

    async fn find_by_transaction_ref(
        &self,
        transaction_ref: &str,
    ) -> Result<Option<Donation>, DonationError> {
        let row: Option<DonationRow> =
            sqlx::query_as("SELECT * FROM donations WHERE transaction_ref = $1")
                .bind(transaction_ref)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| infra("find donation by transaction", e))?;

        row.map(Donation::try_from).transpose()
    }

    async fn confirm(
        &self,
        transaction_ref: &str,
        success: bool,
        now: Timestamp,
    ) -> Result<DonationConfirmOutcome, DonationError> {
        // The status guard makes replayed callbacks match zero rows.
        let settled: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE donations
            SET status = $2, updated_at = $3
            WHERE transaction_ref = $1 AND status = 'pending'
            RETURNING id
            "#,
        )
        .bind(transaction_ref)
        .bind(if success { "completed" } else { "failed" })
        .bind(now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infra("confirm donation", e))?;

        if let Some((id,)) = settled {
            return Ok(DonationConfirmOutcome::Applied {
                donation_id: DonationId::from_uuid(id),
            });
        }

        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM donations WHERE transaction_ref = $1")
                .bind(transaction_ref)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| infra("check transaction reference", e))?;

        Ok(match exists {
            Some(_) => DonationConfirmOutcome::AlreadyProcessed,
            None => DonationConfirmOutcome::NotFound,
        })
    }

    async fn stats(&self) -> Result<DonationStats, DonationError> {
        let row: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(amount), 0)::BIGINT
            FROM donations
            WHERE status = 'completed'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| infra("load donation stats", e))?;

        Ok(DonationStats {
            count: row.0,
            total_amount: Money::new(row.1),
        })
    }
}
