//! PostgreSQL implementation of MembershipRepository.
//!
//! Memberships live in two tables: `memberships` (lifecycle fields plus
//! the running dues summary) and `membership_payments` (append-only
//! ledger). The summary columns are only ever advanced with relative
//! arithmetic inside `record_payment`/`confirm_payment`, so concurrent
//! settlements cannot lose updates.

use crate::domain::foundation::{MembershipId, Money, PaymentId, Timestamp, UserId};
use crate::domain::membership::{
    Applicant, DuesStatus, FeeSnapshot, Membership, MembershipError, MembershipNumber,
    MembershipStatus, MembershipTier, PaymentMethod, PaymentPlan, PaymentProgress,
    PaymentRecord, PaymentRecordStatus,
};
use crate::ports::{ConfirmOutcome, MembershipRepository, MembershipStats, ProgressAdvance};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the MembershipRepository port.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new PostgresMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the payment ledger for one membership, oldest entry first.
    async fn ledger_for(&self, id: Uuid) -> Result<Vec<PaymentRecord>, MembershipError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, membership_id, amount, method, status, transaction_ref, paid_at
            FROM membership_payments
            WHERE membership_id = $1
            ORDER BY paid_at ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infra("load payment ledger", e))?;

        rows.into_iter().map(PaymentRecord::try_from).collect()
    }

    async fn hydrate_row(
        &self,
        row: Option<MembershipRow>,
    ) -> Result<Option<Membership>, MembershipError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let payments = self.ledger_for(row.id).await?;
        hydrate(row, payments).map(Some)
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    tier: String,
    status: String,
    monthly_amount: i64,
    annual_amount: i64,
    currency: String,
    selected_plan: String,
    selected_amount: i64,
    total_paid: i64,
    last_payment_date: Option<DateTime<Utc>>,
    next_payment_date: Option<DateTime<Utc>>,
    payment_status: String,
    overdue_amount: i64,
    consecutive_payments: i32,
    membership_number: Option<String>,
    approval_date: Option<DateTime<Utc>>,
    start_date: Option<DateTime<Utc>>,
    expiry_date: Option<DateTime<Utc>>,
    last_renewal_date: Option<DateTime<Utc>>,
    renewal_reminder_sent: bool,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Database row representation of a ledger entry.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    #[allow(dead_code)]
    membership_id: Uuid,
    amount: i64,
    method: String,
    status: String,
    transaction_ref: Option<String>,
    paid_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = MembershipError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(PaymentRecord {
            id: PaymentId::from_uuid(row.id),
            amount: Money::new(row.amount),
            method: parse_column::<PaymentMethod>(&row.method, "method")?,
            status: parse_column::<PaymentRecordStatus>(&row.status, "status")?,
            transaction_ref: row.transaction_ref,
            paid_at: Timestamp::from_datetime(row.paid_at),
        })
    }
}

fn hydrate(row: MembershipRow, payments: Vec<PaymentRecord>) -> Result<Membership, MembershipError> {
    Ok(Membership {
        id: MembershipId::from_uuid(row.id),
        applicant: Applicant {
            user_id: UserId::from_uuid(row.user_id),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
        },
        tier: parse_column::<MembershipTier>(&row.tier, "tier")?,
        status: parse_column::<MembershipStatus>(&row.status, "status")?,
        fees: FeeSnapshot {
            monthly_amount: Money::new(row.monthly_amount),
            annual_amount: Money::new(row.annual_amount),
            currency: row.currency,
            selected_plan: parse_column::<PaymentPlan>(&row.selected_plan, "selected_plan")?,
            selected_amount: Money::new(row.selected_amount),
        },
        payments,
        progress: PaymentProgress {
            total_paid: Money::new(row.total_paid),
            last_payment_date: row.last_payment_date.map(Timestamp::from_datetime),
            next_payment_date: row.next_payment_date.map(Timestamp::from_datetime),
            payment_status: parse_dues_status(&row.payment_status)?,
            overdue_amount: Money::new(row.overdue_amount),
            consecutive_payments: row.consecutive_payments.max(0) as u32,
        },
        membership_number: row
            .membership_number
            .as_deref()
            .map(|n| {
                n.parse::<MembershipNumber>().map_err(|e| {
                    MembershipError::infrastructure(format!("Invalid membership_number: {}", e))
                })
            })
            .transpose()?,
        approval_date: row.approval_date.map(Timestamp::from_datetime),
        start_date: row.start_date.map(Timestamp::from_datetime),
        expiry_date: row.expiry_date.map(Timestamp::from_datetime),
        last_renewal_date: row.last_renewal_date.map(Timestamp::from_datetime),
        renewal_reminder_sent: row.renewal_reminder_sent,
        notes: row.notes,
        created_at: Timestamp::from_datetime(row.created_at),
        updated_at: Timestamp::from_datetime(row.updated_at),
    })
}

fn parse_column<T>(s: &str, column: &str) -> Result<T, MembershipError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    s.parse().map_err(|e| {
        MembershipError::infrastructure(format!("Invalid {} value '{}': {}", column, s, e))
    })
}

fn parse_dues_status(s: &str) -> Result<DuesStatus, MembershipError> {
    match s {
        "up_to_date" => Ok(DuesStatus::UpToDate),
        "overdue" => Ok(DuesStatus::Overdue),
        "pending" => Ok(DuesStatus::Pending),
        other => Err(MembershipError::infrastructure(format!(
            "Invalid payment_status value: {}",
            other
        ))),
    }
}

fn dues_status_to_string(status: DuesStatus) -> &'static str {
    match status {
        DuesStatus::UpToDate => "up_to_date",
        DuesStatus::Overdue => "overdue",
        DuesStatus::Pending => "pending",
    }
}

fn infra(context: &str, e: sqlx::Error) -> MembershipError {
    MembershipError::infrastructure(format!("Failed to {}: {}", context, e))
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), MembershipError> {
        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, user_id, full_name, email, phone, tier, status,
                monthly_amount, annual_amount, currency, selected_plan, selected_amount,
                total_paid, last_payment_date, next_payment_date, payment_status,
                overdue_amount, consecutive_payments,
                membership_number, approval_date, start_date, expiry_date,
                last_renewal_date, renewal_reminder_sent, notes, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27
            )
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.applicant.user_id.as_uuid())
        .bind(&membership.applicant.full_name)
        .bind(&membership.applicant.email)
        .bind(&membership.applicant.phone)
        .bind(membership.tier.as_str())
        .bind(membership.status.as_str())
        .bind(membership.fees.monthly_amount.units())
        .bind(membership.fees.annual_amount.units())
        .bind(&membership.fees.currency)
        .bind(membership.fees.selected_plan.as_str())
        .bind(membership.fees.selected_amount.units())
        .bind(membership.progress.total_paid.units())
        .bind(membership.progress.last_payment_date.map(|t| *t.as_datetime()))
        .bind(membership.progress.next_payment_date.map(|t| *t.as_datetime()))
        .bind(dues_status_to_string(membership.progress.payment_status))
        .bind(membership.progress.overdue_amount.units())
        .bind(membership.progress.consecutive_payments as i32)
        .bind(membership.membership_number.as_ref().map(|n| n.as_str()))
        .bind(membership.approval_date.map(|t| *t.as_datetime()))
        .bind(membership.start_date.map(|t| *t.as_datetime()))
        .bind(membership.expiry_date.map(|t| *t.as_datetime()))
        .bind(membership.last_renewal_date.map(|t| *t.as_datetime()))
        .bind(membership.renewal_reminder_sent)
        .bind(&membership.notes)
        .bind(membership.created_at.as_datetime())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("memberships_user_id_key") {
                    return MembershipError::already_exists(membership.applicant.user_id);
                }
            }
            infra("save membership", e)
        })?;

        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), MembershipError> {
        // Deliberately leaves total_paid and consecutive_payments alone;
        // those columns only move through record_payment/confirm_payment.
        let result = sqlx::query(
            r#"
            UPDATE memberships SET
                status = $2,
                payment_status = $3,
                overdue_amount = $4,
                membership_number = $5,
                approval_date = $6,
                start_date = $7,
                expiry_date = $8,
                next_payment_date = $9,
                last_renewal_date = $10,
                renewal_reminder_sent = $11,
                notes = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.status.as_str())
        .bind(dues_status_to_string(membership.progress.payment_status))
        .bind(membership.progress.overdue_amount.units())
        .bind(membership.membership_number.as_ref().map(|n| n.as_str()))
        .bind(membership.approval_date.map(|t| *t.as_datetime()))
        .bind(membership.start_date.map(|t| *t.as_datetime()))
        .bind(membership.expiry_date.map(|t| *t.as_datetime()))
        .bind(membership.progress.next_payment_date.map(|t| *t.as_datetime()))
        .bind(membership.last_renewal_date.map(|t| *t.as_datetime()))
        .bind(membership.renewal_reminder_sent)
        .bind(&membership.notes)
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("memberships_membership_number_key") {
                    return MembershipError::infrastructure("Membership number collision");
                }
            }
            infra("update membership", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(MembershipError::not_found(membership.id));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &MembershipId,
    ) -> Result<Option<Membership>, MembershipError> {
        let row: Option<MembershipRow> =
            sqlx::query_as("SELECT * FROM memberships WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| infra("find membership", e))?;

        self.hydrate_row(row).await
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipError> {
        let row: Option<MembershipRow> =
            sqlx::query_as("SELECT * FROM memberships WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| infra("find membership", e))?;

        self.hydrate_row(row).await
    }

    async fn find_by_transaction_ref(
        &self,
        transaction_ref: &str,
    ) -> Result<Option<Membership>, MembershipError> {
        let row: Option<MembershipRow> = sqlx::query_as(
            r#"
            SELECT m.* FROM memberships m
            JOIN membership_payments p ON p.membership_id = m.id
            WHERE p.transaction_ref = $1
            "#,
        )
        .bind(transaction_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infra("find membership by transaction", e))?;

        self.hydrate_row(row).await
    }

    async fn record_payment(
        &self,
        id: &MembershipId,
        record: &PaymentRecord,
        advance: Option<&ProgressAdvance>,
    ) -> Result<(), MembershipError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| infra("open transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO membership_payments (
                id, membership_id, amount, method, status, transaction_ref, paid_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(id.as_uuid())
        .bind(record.amount.units())
        .bind(record.method.as_str())
        .bind(record.status.as_str())
        .bind(&record.transaction_ref)
        .bind(record.paid_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some("membership_payments_transaction_ref_key") => {
                        return MembershipError::duplicate_transaction(
                            record.transaction_ref.clone().unwrap_or_default(),
                        );
                    }
                    Some("membership_payments_membership_id_fkey") => {
                        return MembershipError::not_found(*id);
                    }
                    _ => {}
                }
            }
            infra("record payment", e)
        })?;

        let result = match advance {
            Some(advance) => {
                // Relative arithmetic: concurrent settlements both land.
                sqlx::query(
                    r#"
                    UPDATE memberships SET
                        total_paid = total_paid + $2,
                        consecutive_payments = consecutive_payments + 1,
                        last_payment_date = $3,
                        next_payment_date = $4,
                        payment_status = 'up_to_date',
                        overdue_amount = 0,
                        updated_at = $3
                    WHERE id = $1
                    "#,
                )
                .bind(id.as_uuid())
                .bind(advance.amount.units())
                .bind(advance.last_payment_date.as_datetime())
                .bind(advance.next_payment_date.as_datetime())
                .execute(&mut *tx)
                .await
            }
            None => {
                sqlx::query("UPDATE memberships SET updated_at = $2 WHERE id = $1")
                    .bind(id.as_uuid())
                    .bind(record.paid_at.as_datetime())
                    .execute(&mut *tx)
                    .await
            }
        }
        .map_err(|e| infra("advance dues summary", e))?;

        if result.rows_affected() == 0 {
            return Err(MembershipError::not_found(*id));
        }

        tx.commit().await.map_err(|e| infra("commit payment", e))?;
        Ok(())
    }

    async fn confirm_payment(
        &self,
        transaction_ref: &str,
        success: bool,
        now: Timestamp,
    ) -> Result<ConfirmOutcome, MembershipError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| infra("open transaction", e))?;

        // The status guard makes replayed callbacks match zero rows.
        let settled: Option<(Uuid, i64)> = sqlx::query_as(
            r#"
            UPDATE membership_payments
            SET status = $2, paid_at = CASE WHEN $3 THEN $4 ELSE paid_at END
            WHERE transaction_ref = $1 AND status = 'pending'
            RETURNING membership_id, amount
            "#,
        )
        .bind(transaction_ref)
        .bind(if success { "completed" } else { "failed" })
        .bind(success)
        .bind(now.as_datetime())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| infra("confirm payment", e))?;

        let Some((membership_uuid, amount)) = settled else {
            let exists: Option<(Uuid,)> = sqlx::query_as(
                "SELECT membership_id FROM membership_payments WHERE transaction_ref = $1",
            )
            .bind(transaction_ref)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| infra("check transaction reference", e))?;

            tx.commit().await.map_err(|e| infra("commit", e))?;
            return Ok(match exists {
                Some(_) => ConfirmOutcome::AlreadyProcessed,
                None => ConfirmOutcome::NotFound,
            });
        };

        if success {
            sqlx::query(
                r#"
                UPDATE memberships SET
                    total_paid = total_paid + $2,
                    consecutive_payments = consecutive_payments + 1,
                    last_payment_date = $3,
                    next_payment_date = $3 + make_interval(days =>
                        CASE WHEN selected_plan = 'monthly' THEN 30 ELSE 365 END),
                    payment_status = 'up_to_date',
                    overdue_amount = 0,
                    updated_at = $3
                WHERE id = $1
                "#,
            )
            .bind(membership_uuid)
            .bind(amount)
            .bind(now.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| infra("advance dues summary", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| infra("commit confirmation", e))?;

        Ok(ConfirmOutcome::Applied {
            membership_id: MembershipId::from_uuid(membership_uuid),
            amount: Money::new(amount),
        })
    }

    async fn find_expiring_within_days(
        &self,
        days: u32,
    ) -> Result<Vec<Membership>, MembershipError> {
        let now = Utc::now();
        let threshold = now + chrono::Duration::days(i64::from(days));

        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT * FROM memberships
            WHERE status = 'active'
              AND expiry_date IS NOT NULL
              AND expiry_date > $1
              AND expiry_date <= $2
            ORDER BY expiry_date ASC
            "#,
        )
        .bind(now)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infra("find expiring memberships", e))?;

        let mut memberships = Vec::with_capacity(rows.len());
        for row in rows {
            let payments = self.ledger_for(row.id).await?;
            memberships.push(hydrate(row, payments)?);
        }
        Ok(memberships)
    }

    async fn find_past_expiry(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Membership>, MembershipError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT * FROM memberships
            WHERE status = 'active'
              AND expiry_date IS NOT NULL
              AND expiry_date < $1
            ORDER BY expiry_date ASC
            "#,
        )
        .bind(*now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infra("find lapsed memberships", e))?;

        let mut memberships = Vec::with_capacity(rows.len());
        for row in rows {
            let payments = self.ledger_for(row.id).await?;
            memberships.push(hydrate(row, payments)?);
        }
        Ok(memberships)
    }

    async fn stats(&self) -> Result<MembershipStats, MembershipError> {
        let row: (i64, i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'pending'),
                COUNT(*) FILTER (WHERE status = 'active'),
                COUNT(*) FILTER (WHERE status = 'suspended'),
                COUNT(*) FILTER (WHERE status = 'expired'),
                COUNT(*) FILTER (WHERE status = 'cancelled'),
                COALESCE(SUM(total_paid), 0)::BIGINT
            FROM memberships
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| infra("load membership stats", e))?;

        Ok(MembershipStats {
            total: row.0,
            pending: row.1,
            active: row.2,
            suspended: row.3,
            expired: row.4,
            cancelled: row.5,
            total_collected: Money::new(row.6),
        })
    }
}
