//! Property tests for dues arithmetic and the payment ledger.

use proptest::prelude::*;

use umoja_hub::domain::foundation::{Money, Timestamp, UserId};
use umoja_hub::domain::membership::{
    Applicant, FeeSchedule, Membership, MembershipTier, PaymentMethod, PaymentPlan,
    PaymentRecordStatus,
};

fn schedule() -> FeeSchedule {
    FeeSchedule {
        gold_annual: Money::new(5000),
        silver_annual: Money::new(3000),
        bronze_annual: Money::new(1500),
        currency: "KES".to_string(),
    }
}

fn active_membership(tier: MembershipTier, plan: PaymentPlan, now: Timestamp) -> Membership {
    let mut membership = Membership::apply(
        Applicant {
            user_id: UserId::new(),
            full_name: "Amina Odhiambo".to_string(),
            email: "amina@example.org".to_string(),
            phone: "254712345678".to_string(),
        },
        tier,
        schedule().snapshot(tier, plan),
        now,
    )
    .unwrap();
    membership.approve("UMJ", now).unwrap();
    membership
}

fn tier_strategy() -> impl Strategy<Value = MembershipTier> {
    prop_oneof![
        Just(MembershipTier::Gold),
        Just(MembershipTier::Silver),
        Just(MembershipTier::Bronze),
    ]
}

fn plan_strategy() -> impl Strategy<Value = PaymentPlan> {
    prop_oneof![Just(PaymentPlan::Monthly), Just(PaymentPlan::Annual)]
}

proptest! {
    /// The running total always equals the sum of completed ledger
    /// entries, regardless of how payments arrive or settle.
    #[test]
    fn total_paid_equals_sum_of_completed_entries(
        tier in tier_strategy(),
        plan in plan_strategy(),
        payments in prop::collection::vec((1i64..=10_000, any::<bool>(), any::<bool>()), 0..12),
    ) {
        let now = Timestamp::now();
        let mut membership = active_membership(tier, plan, now);

        for (i, (amount, pending, settle_success)) in payments.iter().enumerate() {
            let reference = format!("ws_CO_prop_{}", i);
            if *pending {
                membership
                    .record_payment(
                        Money::new(*amount),
                        PaymentMethod::MobileMoney,
                        Some(reference.clone()),
                        PaymentRecordStatus::Pending,
                        now,
                    )
                    .unwrap();
                membership
                    .confirm_payment(&reference, *settle_success, now)
                    .unwrap();
            } else {
                membership
                    .record_payment(
                        Money::new(*amount),
                        PaymentMethod::Cash,
                        Some(reference),
                        PaymentRecordStatus::Completed,
                        now,
                    )
                    .unwrap();
            }
        }

        prop_assert_eq!(membership.progress.total_paid, membership.completed_total());
    }

    /// Settling the same reference twice never credits twice.
    #[test]
    fn replayed_confirmation_credits_once(
        amount in 1i64..=10_000,
    ) {
        let now = Timestamp::now();
        let mut membership =
            active_membership(MembershipTier::Gold, PaymentPlan::Monthly, now);

        membership
            .record_payment(
                Money::new(amount),
                PaymentMethod::MobileMoney,
                Some("ws_CO_replay".to_string()),
                PaymentRecordStatus::Pending,
                now,
            )
            .unwrap();

        prop_assert!(membership.confirm_payment("ws_CO_replay", true, now).unwrap());
        prop_assert!(!membership.confirm_payment("ws_CO_replay", true, now).unwrap());
        prop_assert_eq!(membership.progress.total_paid, Money::new(amount));
    }

    /// Monthly overdue amounts are one installment per full 30-day
    /// period past the due date, never negative and never fractional.
    #[test]
    fn monthly_overdue_is_whole_installments(
        tier in tier_strategy(),
        days_late in 0i64..400,
    ) {
        let now = Timestamp::now();
        let mut membership = active_membership(tier, PaymentPlan::Monthly, now);
        let installment = membership.fees.selected_amount;

        membership
            .record_payment(
                Money::new(installment.units()),
                PaymentMethod::Cash,
                None,
                PaymentRecordStatus::Completed,
                now,
            )
            .unwrap();

        // One period forward, then `days_late` past that due date.
        let later = now.add_days(30 + days_late);
        membership.check_payment_status(later);

        let expected = installment.times(days_late / 30);
        prop_assert_eq!(membership.progress.overdue_amount, expected);
    }

    /// Annual plans owe the unpaid remainder, clamped at zero.
    #[test]
    fn annual_overdue_is_unpaid_remainder(
        tier in tier_strategy(),
        paid in 0i64..=6_000,
    ) {
        let now = Timestamp::now();
        let mut membership = active_membership(tier, PaymentPlan::Annual, now);
        let annual = membership.fees.annual_amount;

        if paid > 0 {
            membership
                .record_payment(
                    Money::new(paid),
                    PaymentMethod::BankTransfer,
                    None,
                    PaymentRecordStatus::Completed,
                    now,
                )
                .unwrap();
        }

        // Well past the annual due date.
        let later = now.add_days(365 + 31);
        membership.check_payment_status(later);

        let expected = annual.saturating_sub(Money::new(paid));
        prop_assert_eq!(membership.progress.overdue_amount, expected);
        prop_assert!(membership.progress.overdue_amount >= Money::ZERO);
    }
}
