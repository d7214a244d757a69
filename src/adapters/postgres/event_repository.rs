//! PostgreSQL implementation of EventRepository.
//!
//! Registration is the only contended path: the capacity check is
//! repeated inside the INSERT's WHERE clause so the last spot can only
//! be taken once.

use crate::domain::event::{Event, EventError, EventRegistration};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::EventRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the EventRepository port.
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: String,
    starts_at: DateTime<Utc>,
    location: String,
    capacity: Option<i32>,
    registered_count: i64,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            starts_at: Timestamp::from_datetime(row.starts_at),
            location: row.location,
            capacity: row.capacity.map(|c| c.max(0) as u32),
            registered_count: row.registered_count.max(0) as u32,
            created_by: UserId::from_uuid(row.created_by),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const EVENT_SELECT: &str = r#"
    SELECT e.id, e.title, e.description, e.starts_at, e.location, e.capacity,
           (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id)
               AS registered_count,
           e.created_by, e.created_at, e.updated_at
    FROM events e
"#;

fn infra(context: &str, e: sqlx::Error) -> EventError {
    EventError::infrastructure(format!("Failed to {}: {}", context, e))
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn save(&self, event: &Event) -> Result<(), EventError> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, starts_at, location, capacity,
                created_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.starts_at.as_datetime())
        .bind(&event.location)
        .bind(event.capacity.map(|c| c as i32))
        .bind(event.created_by.as_uuid())
        .bind(event.created_at.as_datetime())
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| infra("save event", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError> {
        let query = format!("{} WHERE e.id = $1", EVENT_SELECT);
        let row: Option<EventRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infra("find event", e))?;

        Ok(row.map(Event::from))
    }

    async fn list_upcoming(&self) -> Result<Vec<Event>, EventError> {
        let query = format!("{} WHERE e.starts_at > $1 ORDER BY e.starts_at ASC", EVENT_SELECT);
        let rows: Vec<EventRow> = sqlx::query_as(&query)
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| infra("list upcoming events", e))?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn add_registration(
        &self,
        registration: &EventRegistration,
    ) -> Result<(), EventError> {
        let event_id = registration.event_id;

        // Capacity is re-checked inside the INSERT so two concurrent
        // registrations cannot both take the last spot.
        let result = sqlx::query(
            r#"
            INSERT INTO event_registrations (event_id, user_id, registered_at)
            SELECT $1, $2, $3
            WHERE (
                SELECT e.capacity IS NULL
                    OR (SELECT COUNT(*) FROM event_registrations r
                        WHERE r.event_id = e.id) < e.capacity
                FROM events e WHERE e.id = $1
            )
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(registration.user_id.as_uuid())
        .bind(registration.registered_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some("event_registrations_pkey") => {
                        return EventError::already_registered(event_id);
                    }
                    Some("event_registrations_event_id_fkey") => {
                        return EventError::not_found(event_id);
                    }
                    _ => {}
                }
            }
            infra("register for event", e)
        })?;

        if result.rows_affected() == 0 {
            // The WHERE clause filtered the insert: event missing or full.
            let exists: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM events WHERE id = $1")
                    .bind(event_id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| infra("check event", e))?;

            return Err(match exists {
                Some(_) => EventError::full(event_id),
                None => EventError::not_found(event_id),
            });
        }

        Ok(())
    }
}
