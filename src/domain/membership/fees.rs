//! Fee schedule and the per-membership fee snapshot.
//!
//! The schedule is organization configuration injected at startup; each
//! membership captures a snapshot of the amounts in force when the
//! application was submitted, so later schedule changes never rewrite
//! existing obligations.

use super::{MembershipTier, PaymentPlan};
use crate::domain::foundation::Money;
use serde::{Deserialize, Serialize};

/// Annual dues per tier plus the billing currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    pub gold_annual: Money,
    pub silver_annual: Money,
    pub bronze_annual: Money,
    pub currency: String,
}

impl FeeSchedule {
    /// Annual amount for a tier.
    pub fn annual_for(&self, tier: MembershipTier) -> Money {
        match tier {
            MembershipTier::Gold => self.gold_annual,
            MembershipTier::Silver => self.silver_annual,
            MembershipTier::Bronze => self.bronze_annual,
        }
    }

    /// Monthly installment for a tier, derived from the annual amount.
    pub fn monthly_for(&self, tier: MembershipTier) -> Money {
        self.annual_for(tier).divided_monthly()
    }

    /// Captures the amounts for a tier and plan into an immutable snapshot.
    pub fn snapshot(&self, tier: MembershipTier, plan: PaymentPlan) -> FeeSnapshot {
        let annual_amount = self.annual_for(tier);
        let monthly_amount = self.monthly_for(tier);
        let selected_amount = match plan {
            PaymentPlan::Monthly => monthly_amount,
            PaymentPlan::Annual => annual_amount,
        };
        FeeSnapshot {
            monthly_amount,
            annual_amount,
            currency: self.currency.clone(),
            selected_plan: plan,
            selected_amount,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            gold_annual: Money::new(5000),
            silver_annual: Money::new(3000),
            bronze_annual: Money::new(1500),
            currency: "KES".to_string(),
        }
    }
}

/// Amounts frozen onto a membership at application time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSnapshot {
    pub monthly_amount: Money,
    pub annual_amount: Money,
    pub currency: String,
    pub selected_plan: PaymentPlan,
    pub selected_amount: Money,
}

impl FeeSnapshot {
    /// Amount due for one billing period under the selected plan.
    pub fn installment(&self) -> Money {
        self.selected_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_published_fees() {
        let schedule = FeeSchedule::default();
        assert_eq!(schedule.annual_for(MembershipTier::Gold), Money::new(5000));
        assert_eq!(
            schedule.annual_for(MembershipTier::Silver),
            Money::new(3000)
        );
        assert_eq!(
            schedule.annual_for(MembershipTier::Bronze),
            Money::new(1500)
        );
    }

    #[test]
    fn monthly_amounts_are_rounded_twelfths() {
        let schedule = FeeSchedule::default();
        assert_eq!(schedule.monthly_for(MembershipTier::Gold), Money::new(417));
        assert_eq!(
            schedule.monthly_for(MembershipTier::Silver),
            Money::new(250)
        );
        assert_eq!(
            schedule.monthly_for(MembershipTier::Bronze),
            Money::new(125)
        );
    }

    #[test]
    fn snapshot_selects_monthly_amount_for_monthly_plan() {
        let snapshot =
            FeeSchedule::default().snapshot(MembershipTier::Gold, PaymentPlan::Monthly);
        assert_eq!(snapshot.selected_amount, Money::new(417));
        assert_eq!(snapshot.annual_amount, Money::new(5000));
        assert_eq!(snapshot.selected_plan, PaymentPlan::Monthly);
    }

    #[test]
    fn snapshot_selects_annual_amount_for_annual_plan() {
        let snapshot =
            FeeSchedule::default().snapshot(MembershipTier::Bronze, PaymentPlan::Annual);
        assert_eq!(snapshot.selected_amount, Money::new(1500));
        assert_eq!(snapshot.installment(), Money::new(1500));
    }
}
