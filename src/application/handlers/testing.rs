//! In-memory port implementations shared by handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::donation::{Donation, DonationError};
use crate::domain::event::{Event, EventError, EventRegistration};
use crate::domain::foundation::{
    DomainError, DonationId, EventId, MembershipId, Money, Timestamp, UserId,
};
use crate::domain::membership::{
    Applicant, FeeSchedule, Membership, MembershipError, MembershipStatus, MembershipTier,
    PaymentPlan, PaymentRecord, PaymentRecordStatus,
};
use crate::domain::user::User;
use crate::ports::{
    ConfirmOutcome, DonationConfirmOutcome, DonationRepository, DonationStats,
    EventRepository, GatewayError, MembershipRepository, MembershipStats, MobileMoneyGateway,
    ProgressAdvance, PushRequest, PushResponse, UserRepository,
};

/// Approved gold monthly membership, ready for payment and lifecycle tests.
pub fn active_membership() -> Membership {
    let fees = FeeSchedule::default().snapshot(MembershipTier::Gold, PaymentPlan::Monthly);
    let mut membership = Membership::apply(
        Applicant {
            user_id: UserId::new(),
            full_name: "Amina Odhiambo".to_string(),
            email: "amina@example.com".to_string(),
            phone: "254712345678".to_string(),
        },
        MembershipTier::Gold,
        fees,
        Timestamp::now(),
    )
    .unwrap();
    membership.approve("UMJ", Timestamp::now()).unwrap();
    membership
}

// ════════════════════════════════════════════════════════════════════════════
// Membership repository
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockMembershipRepository {
    memberships: Mutex<HashMap<MembershipId, Membership>>,
    fail: bool,
}

impl MockMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            memberships: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    pub fn with_membership(membership: Membership) -> Self {
        let repo = Self::new();
        repo.memberships
            .lock()
            .unwrap()
            .insert(membership.id, membership);
        repo
    }

    pub fn stored(&self, id: &MembershipId) -> Option<Membership> {
        self.memberships.lock().unwrap().get(id).cloned()
    }

    fn check_fail(&self) -> Result<(), MembershipError> {
        if self.fail {
            Err(MembershipError::infrastructure("Simulated failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MembershipRepository for MockMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), MembershipError> {
        self.check_fail()?;
        let mut store = self.memberships.lock().unwrap();
        if store
            .values()
            .any(|m| m.applicant.user_id == membership.applicant.user_id)
        {
            return Err(MembershipError::already_exists(membership.applicant.user_id));
        }
        store.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), MembershipError> {
        self.check_fail()?;
        let mut store = self.memberships.lock().unwrap();
        if !store.contains_key(&membership.id) {
            return Err(MembershipError::not_found(membership.id));
        }
        store.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &MembershipId,
    ) -> Result<Option<Membership>, MembershipError> {
        self.check_fail()?;
        Ok(self.memberships.lock().unwrap().get(id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipError> {
        self.check_fail()?;
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .values()
            .find(|m| m.applicant.user_id == *user_id)
            .cloned())
    }

    async fn find_by_transaction_ref(
        &self,
        transaction_ref: &str,
    ) -> Result<Option<Membership>, MembershipError> {
        self.check_fail()?;
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .values()
            .find(|m| {
                m.payments
                    .iter()
                    .any(|p| p.transaction_ref.as_deref() == Some(transaction_ref))
            })
            .cloned())
    }

    async fn record_payment(
        &self,
        id: &MembershipId,
        record: &PaymentRecord,
        advance: Option<&ProgressAdvance>,
    ) -> Result<(), MembershipError> {
        self.check_fail()?;
        let mut store = self.memberships.lock().unwrap();

        if let Some(ref tx) = record.transaction_ref {
            if store.values().any(|m| {
                m.payments
                    .iter()
                    .any(|p| p.transaction_ref.as_deref() == Some(tx.as_str()))
            }) {
                return Err(MembershipError::duplicate_transaction(tx.clone()));
            }
        }

        let membership = store
            .get_mut(id)
            .ok_or_else(|| MembershipError::not_found(*id))?;
        membership.payments.push(record.clone());
        if let Some(advance) = advance {
            membership.progress.total_paid += advance.amount;
            membership.progress.consecutive_payments += 1;
            membership.progress.last_payment_date = Some(advance.last_payment_date);
            membership.progress.next_payment_date = Some(advance.next_payment_date);
        }
        Ok(())
    }

    async fn confirm_payment(
        &self,
        transaction_ref: &str,
        success: bool,
        now: Timestamp,
    ) -> Result<ConfirmOutcome, MembershipError> {
        self.check_fail()?;
        let mut store = self.memberships.lock().unwrap();
        for membership in store.values_mut() {
            let Some(position) = membership
                .payments
                .iter()
                .position(|p| p.transaction_ref.as_deref() == Some(transaction_ref))
            else {
                continue;
            };

            if membership.payments[position].status != PaymentRecordStatus::Pending {
                return Ok(ConfirmOutcome::AlreadyProcessed);
            }

            let amount = membership.payments[position].amount;
            if success {
                let plan = membership.plan();
                membership.payments[position].status = PaymentRecordStatus::Completed;
                membership.progress.apply_completed(amount, plan, now);
            } else {
                membership.payments[position].status = PaymentRecordStatus::Failed;
            }
            return Ok(ConfirmOutcome::Applied {
                membership_id: membership.id,
                amount,
            });
        }
        Ok(ConfirmOutcome::NotFound)
    }

    async fn find_expiring_within_days(
        &self,
        days: u32,
    ) -> Result<Vec<Membership>, MembershipError> {
        self.check_fail()?;
        let threshold = Timestamp::now().add_days(i64::from(days));
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .values()
            .filter(|m| {
                m.status == MembershipStatus::Active
                    && matches!(m.expiry_date, Some(e) if e.is_before(&threshold))
            })
            .cloned()
            .collect())
    }

    async fn find_past_expiry(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Membership>, MembershipError> {
        self.check_fail()?;
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .values()
            .filter(|m| {
                m.status == MembershipStatus::Active
                    && matches!(m.expiry_date, Some(e) if e.is_before(&now))
            })
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<MembershipStats, MembershipError> {
        self.check_fail()?;
        let store = self.memberships.lock().unwrap();
        let mut stats = MembershipStats {
            total: store.len() as i64,
            ..Default::default()
        };
        for membership in store.values() {
            match membership.status {
                MembershipStatus::Pending => stats.pending += 1,
                MembershipStatus::Active => stats.active += 1,
                MembershipStatus::Suspended => stats.suspended += 1,
                MembershipStatus::Expired => stats.expired += 1,
                MembershipStatus::Cancelled => stats.cancelled += 1,
            }
            stats.total_collected += membership.progress.total_paid;
        }
        Ok(stats)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mobile money gateway
// ════════════════════════════════════════════════════════════════════════════

pub struct MockGateway {
    pub pushes: Mutex<Vec<PushRequest>>,
    fail: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl MobileMoneyGateway for MockGateway {
    async fn access_token(&self) -> Result<String, GatewayError> {
        if self.fail {
            return Err(GatewayError::Auth("Simulated auth failure".to_string()));
        }
        Ok("test-token".to_string())
    }

    async fn initiate_push(&self, request: PushRequest) -> Result<PushResponse, GatewayError> {
        if self.fail {
            return Err(GatewayError::Http("Simulated gateway failure".to_string()));
        }
        let sequence = {
            let mut pushes = self.pushes.lock().unwrap();
            pushes.push(request);
            pushes.len()
        };
        Ok(PushResponse {
            checkout_request_id: format!("ws_CO_test_{}", sequence),
            merchant_request_id: format!("mr_test_{}", sequence),
            response_code: "0".to_string(),
            customer_message: "Success. Request accepted for processing".to_string(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Event repository
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockEventRepository {
    events: Mutex<HashMap<EventId, Event>>,
    registrations: Mutex<Vec<EventRegistration>>,
}

impl MockEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(event: Event) -> Self {
        let repo = Self::new();
        repo.events.lock().unwrap().insert(event.id, event);
        repo
    }

    pub fn registrations(&self) -> Vec<EventRegistration> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn save(&self, event: &Event) -> Result<(), EventError> {
        self.events.lock().unwrap().insert(event.id, event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError> {
        let mut event = self.events.lock().unwrap().get(id).cloned();
        if let Some(ref mut event) = event {
            event.registered_count = self
                .registrations
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.event_id == *id)
                .count() as u32;
        }
        Ok(event)
    }

    async fn list_upcoming(&self) -> Result<Vec<Event>, EventError> {
        let now = Timestamp::now();
        let mut upcoming: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.starts_at.is_after(&now))
            .cloned()
            .collect();
        upcoming.sort_by_key(|e| *e.starts_at.as_datetime());
        Ok(upcoming)
    }

    async fn add_registration(
        &self,
        registration: &EventRegistration,
    ) -> Result<(), EventError> {
        let events = self.events.lock().unwrap();
        let event = events
            .get(&registration.event_id)
            .ok_or_else(|| EventError::not_found(registration.event_id))?;

        let mut registrations = self.registrations.lock().unwrap();
        if registrations
            .iter()
            .any(|r| r.event_id == registration.event_id && r.user_id == registration.user_id)
        {
            return Err(EventError::already_registered(registration.event_id));
        }
        let taken = registrations
            .iter()
            .filter(|r| r.event_id == registration.event_id)
            .count() as u32;
        if matches!(event.capacity, Some(cap) if taken >= cap) {
            return Err(EventError::full(registration.event_id));
        }
        registrations.push(registration.clone());
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Donation repository
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockDonationRepository {
    donations: Mutex<HashMap<DonationId, Donation>>,
}

impl MockDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_donation(donation: Donation) -> Self {
        let repo = Self::new();
        repo.donations.lock().unwrap().insert(donation.id, donation);
        repo
    }

    pub fn stored(&self, id: &DonationId) -> Option<Donation> {
        self.donations.lock().unwrap().get(id).cloned()
    }

    pub fn all(&self) -> Vec<Donation> {
        self.donations.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl DonationRepository for MockDonationRepository {
    async fn save(&self, donation: &Donation) -> Result<(), DonationError> {
        self.donations
            .lock()
            .unwrap()
            .insert(donation.id, donation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DonationId) -> Result<Option<Donation>, DonationError> {
        Ok(self.donations.lock().unwrap().get(id).cloned())
    }

    async fn find_by_transaction_ref(
        &self,
        transaction_ref: &str,
    ) -> Result<Option<Donation>, DonationError> {
        Ok(self
            .donations
            .lock()
            .unwrap()
            .values()
            .find(|d| d.transaction_ref.as_deref() == Some(transaction_ref))
            .cloned())
    }

    async fn confirm(
        &self,
        transaction_ref: &str,
        success: bool,
        now: Timestamp,
    ) -> Result<DonationConfirmOutcome, DonationError> {
        let mut store = self.donations.lock().unwrap();
        for donation in store.values_mut() {
            if donation.transaction_ref.as_deref() != Some(transaction_ref) {
                continue;
            }
            return Ok(if donation.confirm(success, now)? {
                DonationConfirmOutcome::Applied {
                    donation_id: donation.id,
                }
            } else {
                DonationConfirmOutcome::AlreadyProcessed
            });
        }
        Ok(DonationConfirmOutcome::NotFound)
    }

    async fn stats(&self) -> Result<DonationStats, DonationError> {
        let store = self.donations.lock().unwrap();
        let completed: Vec<&Donation> = store.values().filter(|d| d.is_completed()).collect();
        Ok(DonationStats {
            count: completed.len() as i64,
            total_amount: completed.iter().map(|d| d.amount).sum::<Money>(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// User repository
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        let repo = Self::new();
        repo.users.lock().unwrap().insert(user.id, user);
        repo
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut store = self.users.lock().unwrap();
        if store.values().any(|u| u.email == user.email) {
            return Err(DomainError::validation("email", "Email is already registered"));
        }
        store.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}
