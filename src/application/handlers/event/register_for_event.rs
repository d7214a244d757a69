//! RegisterForEventHandler - Member registration for an event.

use std::sync::Arc;

use crate::domain::event::{EventError, EventRegistration};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::EventRepository;

/// Command to register the caller for an event.
#[derive(Debug, Clone)]
pub struct RegisterForEventCommand {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterForEventResult {
    pub registration: EventRegistration,
    pub spots_remaining: Option<u32>,
}

/// Handler for event registration.
///
/// The snapshot check gives a friendly error early; the repository
/// repeats the capacity check atomically, so two racing registrations
/// for the last spot cannot both land.
pub struct RegisterForEventHandler {
    repository: Arc<dyn EventRepository>,
}

impl RegisterForEventHandler {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RegisterForEventCommand,
    ) -> Result<RegisterForEventResult, EventError> {
        let now = Timestamp::now();
        let event = self
            .repository
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| EventError::not_found(cmd.event_id))?;
        event.check_registration(now)?;

        let registration = EventRegistration {
            event_id: cmd.event_id,
            user_id: cmd.user_id,
            registered_at: now,
        };
        self.repository.add_registration(&registration).await?;

        let spots_remaining = event
            .capacity
            .map(|cap| cap.saturating_sub(event.registered_count + 1));
        tracing::info!(
            event_id = %cmd.event_id,
            user_id = %cmd.user_id,
            "Event registration added"
        );
        Ok(RegisterForEventResult {
            registration,
            spots_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::MockEventRepository;
    use crate::domain::event::Event;

    fn future_event(capacity: Option<u32>) -> Event {
        Event::create(
            "Cleanup Drive",
            "",
            Timestamp::now().add_days(7),
            "Riverside",
            capacity,
            UserId::new(),
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn registers_member_and_reports_spots() {
        let event = future_event(Some(2));
        let event_id = event.id;
        let repo = Arc::new(MockEventRepository::with_event(event));
        let handler = RegisterForEventHandler::new(repo.clone());

        let result = handler
            .handle(RegisterForEventCommand {
                event_id,
                user_id: UserId::new(),
            })
            .await
            .unwrap();

        assert_eq!(result.spots_remaining, Some(1));
        assert_eq!(repo.registrations().len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_registration() {
        let event = future_event(None);
        let event_id = event.id;
        let handler =
            RegisterForEventHandler::new(Arc::new(MockEventRepository::with_event(event)));
        let user_id = UserId::new();
        let cmd = RegisterForEventCommand { event_id, user_id };

        handler.handle(cmd.clone()).await.unwrap();
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(EventError::AlreadyRegistered(_))));
    }

    #[tokio::test]
    async fn rejects_registration_when_full() {
        let event = future_event(Some(1));
        let event_id = event.id;
        let handler =
            RegisterForEventHandler::new(Arc::new(MockEventRepository::with_event(event)));

        handler
            .handle(RegisterForEventCommand {
                event_id,
                user_id: UserId::new(),
            })
            .await
            .unwrap();
        let result = handler
            .handle(RegisterForEventCommand {
                event_id,
                user_id: UserId::new(),
            })
            .await;

        assert!(matches!(result, Err(EventError::Full(_))));
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let handler = RegisterForEventHandler::new(Arc::new(MockEventRepository::new()));

        let result = handler
            .handle(RegisterForEventCommand {
                event_id: EventId::new(),
                user_id: UserId::new(),
            })
            .await;

        assert!(matches!(result, Err(EventError::NotFound(_))));
    }
}
