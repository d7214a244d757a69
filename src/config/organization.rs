//! Organization configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::Money;
use crate::domain::membership::FeeSchedule;

/// Organization configuration (identity and fee schedule)
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// Short code stamped into membership numbers
    #[serde(default = "default_org_code")]
    pub org_code: String,

    /// Currency code for dues and donations
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Annual fee for the gold tier, whole currency units
    #[serde(default = "default_gold_annual")]
    pub gold_annual: i64,

    /// Annual fee for the silver tier
    #[serde(default = "default_silver_annual")]
    pub silver_annual: i64,

    /// Annual fee for the bronze tier
    #[serde(default = "default_bronze_annual")]
    pub bronze_annual: i64,
}

impl OrganizationConfig {
    /// Fee schedule applied to new applications.
    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            gold_annual: Money::new(self.gold_annual),
            silver_annual: Money::new(self.silver_annual),
            bronze_annual: Money::new(self.bronze_annual),
            currency: self.currency.clone(),
        }
    }

    /// Validate organization configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let code_ok = (2..=5).contains(&self.org_code.len())
            && self.org_code.chars().all(|c| c.is_ascii_uppercase());
        if !code_ok {
            return Err(ValidationError::InvalidOrgCode);
        }
        if self.bronze_annual <= 0
            || self.silver_annual < self.bronze_annual
            || self.gold_annual < self.silver_annual
        {
            return Err(ValidationError::InvalidFeeSchedule);
        }
        Ok(())
    }
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            org_code: default_org_code(),
            currency: default_currency(),
            gold_annual: default_gold_annual(),
            silver_annual: default_silver_annual(),
            bronze_annual: default_bronze_annual(),
        }
    }
}

fn default_org_code() -> String {
    "UMJ".to_string()
}

fn default_currency() -> String {
    "KES".to_string()
}

fn default_gold_annual() -> i64 {
    5000
}

fn default_silver_annual() -> i64 {
    3000
}

fn default_bronze_annual() -> i64 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::{MembershipTier, PaymentPlan};

    #[test]
    fn test_defaults_match_standard_schedule() {
        let config = OrganizationConfig::default();
        assert!(config.validate().is_ok());

        let snapshot = config
            .fee_schedule()
            .snapshot(MembershipTier::Gold, PaymentPlan::Annual);
        assert_eq!(snapshot.annual_amount, Money::new(5000));
        assert_eq!(snapshot.currency, "KES");
    }

    #[test]
    fn test_validation_rejects_lowercase_code() {
        let config = OrganizationConfig {
            org_code: "umj".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unordered_fees() {
        let config = OrganizationConfig {
            silver_annual: 6000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
