//! Subscription package catalog types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The billing period a package is stored and charged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// Lowercase label for terminal output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The billing period the UI is currently presenting prices under.
///
/// Deliberately distinct from [`BillingCycle`]: the yearly-discount rule
/// depends on the *stored* cycle versus the *displayed* cycle, and keeping
/// the two as separate types makes that asymmetry visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayCycle {
    Monthly,
    Yearly,
}

impl DisplayCycle {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for DisplayCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DisplayCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!(
                "unknown billing cycle '{other}' (expected 'monthly' or 'yearly')"
            )),
        }
    }
}

/// A subscription plan from the remote catalog.
///
/// Externally owned and read-only to this layer; fetched fresh on every
/// command that needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPackage {
    /// Catalog identifier (the API historically used both `id` and `_id`;
    /// normalization happens at the parse boundary).
    pub id: String,
    /// Human-readable plan name.
    pub name: String,
    /// Optional marketing description.
    pub description: Option<String>,
    /// Base price in the store currency, non-negative.
    pub base_price: f64,
    /// The cycle the plan is charged under.
    pub billing_cycle: BillingCycle,
    /// Percentage discount applied when a monthly plan is displayed yearly.
    /// Pass-through: out-of-range values are not validated here.
    pub yearly_discount: u8,
    /// Downloads permitted per day under this plan.
    pub daily_download_limit: u32,
    /// Ordered feature bullet list for display.
    pub features: Vec<String>,
    /// Whether the plan is currently offered.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_cycle_parses_case_insensitively() {
        assert_eq!("monthly".parse::<DisplayCycle>(), Ok(DisplayCycle::Monthly));
        assert_eq!("YEARLY".parse::<DisplayCycle>(), Ok(DisplayCycle::Yearly));
        assert!("fortnightly".parse::<DisplayCycle>().is_err());
    }

    #[test]
    fn billing_cycle_serializes_uppercase() {
        let json = serde_json::to_string(&BillingCycle::Monthly).unwrap();
        assert_eq!(json, "\"MONTHLY\"");
        let cycle: BillingCycle = serde_json::from_str("\"YEARLY\"").unwrap();
        assert_eq!(cycle, BillingCycle::Yearly);
    }

    #[test]
    fn billing_cycle_labels_are_lowercase() {
        assert_eq!(BillingCycle::Weekly.label(), "weekly");
        assert_eq!(DisplayCycle::Yearly.to_string(), "yearly");
    }
}
