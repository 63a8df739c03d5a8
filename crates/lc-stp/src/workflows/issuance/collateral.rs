use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CollateralType, StpDecision};

/// Fraction of the LC amount below which eligible collateral still earns a
/// manual review instead of an outright decline.
const REVIEW_THRESHOLD: f64 = 0.75;

/// Haircut schedule: fraction of collateral value forfeited per class.
/// Injected into the engine so tests can substitute alternate schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaircutSchedule {
    haircuts: BTreeMap<CollateralType, f64>,
}

impl Default for HaircutSchedule {
    fn default() -> Self {
        let mut haircuts = BTreeMap::new();
        haircuts.insert(CollateralType::FixedDeposit, 0.0);
        haircuts.insert(CollateralType::Cash, 0.0);
        haircuts.insert(CollateralType::GovtBond, 0.10);
        haircuts.insert(CollateralType::LiquidSecurity, 0.15);
        haircuts.insert(CollateralType::Receivables, 0.25);
        haircuts.insert(CollateralType::Property, 0.40);
        haircuts.insert(CollateralType::Machinery, 0.50);
        Self { haircuts }
    }
}

impl HaircutSchedule {
    pub fn haircut_for(&self, kind: CollateralType) -> f64 {
        self.haircuts.get(&kind).copied().unwrap_or(0.0)
    }
}

/// Result of one collateral adequacy run. The reason always states the
/// comparison numerically so the audit trail is self-explanatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StpOutcome {
    pub decision: StpDecision,
    /// Haircut applied, as a percentage; absent when the type is unrecognised.
    pub margin_pct: Option<f64>,
    pub eligible_value: f64,
    pub reason: String,
}

/// Stateless decision engine applying the haircut schedule.
#[derive(Debug, Clone, Default)]
pub struct CollateralDecisionEngine {
    schedule: HaircutSchedule,
}

impl CollateralDecisionEngine {
    pub fn new(schedule: HaircutSchedule) -> Self {
        Self { schedule }
    }

    /// Decide adequacy of the offered collateral against the face amount.
    /// Total over all inputs: an unrecognised type tag becomes REVIEW, never
    /// an error.
    pub fn decide(&self, collateral_type: &str, collateral_value: f64, lc_amount: f64) -> StpOutcome {
        let Some(kind) = CollateralType::from_tag(collateral_type) else {
            return StpOutcome {
                decision: StpDecision::Review,
                margin_pct: None,
                eligible_value: 0.0,
                reason: format!(
                    "Collateral type '{}' is not in the approved schedule; routed for manual review",
                    collateral_type.trim()
                ),
            };
        };

        let haircut = self.schedule.haircut_for(kind);
        let eligible = collateral_value * (1.0 - haircut);
        let review_floor = lc_amount * REVIEW_THRESHOLD;

        let (decision, reason) = if eligible >= lc_amount {
            (
                StpDecision::Yes,
                format!(
                    "Eligible collateral {:.2} ({} after {:.0}% haircut) covers LC amount {:.2}",
                    eligible,
                    kind.label(),
                    haircut * 100.0,
                    lc_amount
                ),
            )
        } else if eligible >= review_floor {
            (
                StpDecision::Review,
                format!(
                    "Eligible collateral {:.2} ({} after {:.0}% haircut) is below LC amount {:.2} but above the {:.0}% review floor {:.2}",
                    eligible,
                    kind.label(),
                    haircut * 100.0,
                    lc_amount,
                    REVIEW_THRESHOLD * 100.0,
                    review_floor
                ),
            )
        } else {
            (
                StpDecision::No,
                format!(
                    "Eligible collateral {:.2} ({} after {:.0}% haircut) is below the {:.0}% review floor {:.2} for LC amount {:.2}",
                    eligible,
                    kind.label(),
                    haircut * 100.0,
                    REVIEW_THRESHOLD * 100.0,
                    review_floor,
                    lc_amount
                ),
            )
        };

        StpOutcome {
            decision,
            margin_pct: Some(haircut * 100.0),
            eligible_value: eligible,
            reason,
        }
    }
}
