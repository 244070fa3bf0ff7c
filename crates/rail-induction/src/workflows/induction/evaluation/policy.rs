use super::super::domain::OperationalStatus;
use super::config::InductionThresholds;
use super::rules::ComplianceLedger;

/// One row of the induction priority table.
///
/// Rows are evaluated top to bottom and the first matching predicate wins.
#[derive(Clone, Copy)]
pub struct PolicyRule {
    pub name: &'static str,
    pub decision: OperationalStatus,
    pub confidence: u8,
    pub reason: &'static str,
    pub(crate) applies: fn(&ComplianceLedger, &InductionThresholds) -> bool,
}

impl std::fmt::Debug for PolicyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyRule")
            .field("name", &self.name)
            .field("decision", &self.decision)
            .field("confidence", &self.confidence)
            .finish()
    }
}

pub static POLICY_TABLE: [PolicyRule; 7] = [
    PolicyRule {
        name: "critical_safety",
        decision: OperationalStatus::Maintenance,
        confidence: 95,
        reason: "Critical safety issues: expired certificates or open critical jobs",
        applies: |ledger, _| {
            !ledger.justification.fitness_check || !ledger.justification.job_card_check
        },
    },
    PolicyRule {
        name: "high_priority_jobs",
        decision: OperationalStatus::Maintenance,
        confidence: 85,
        reason: "High priority maintenance pending",
        applies: |ledger, _| ledger.open_high_jobs > 0,
    },
    PolicyRule {
        // Contract shortfall is recovered by running the vehicle, not resting it.
        name: "branding_shortfall",
        decision: OperationalStatus::Service,
        confidence: 90,
        reason: "Critical branding commitment requires immediate service hours",
        applies: |ledger, _| !ledger.justification.branding_check,
    },
    PolicyRule {
        name: "overused",
        decision: OperationalStatus::Standby,
        confidence: 75,
        reason: "Train usage significantly above average, recommended rest period",
        applies: |ledger, thresholds| {
            ledger
                .mileage_variance
                .is_some_and(|variance| variance > thresholds.mileage_variance_pct)
        },
    },
    PolicyRule {
        name: "underused_branded",
        decision: OperationalStatus::Service,
        confidence: 90,
        reason: "Low mileage train with active branding commitments, optimal for service",
        applies: |ledger, thresholds| {
            ledger.outstanding_branding > 0
                && ledger
                    .mileage_variance
                    .is_some_and(|variance| variance < -thresholds.mileage_variance_pct)
        },
    },
    PolicyRule {
        name: "moderate_concerns",
        decision: OperationalStatus::Standby,
        confidence: 70,
        reason: "Multiple moderate concerns, standby recommended for assessment",
        applies: |ledger, thresholds| ledger.warning_count() >= thresholds.moderate_warning_count,
    },
    PolicyRule {
        name: "nominal",
        decision: OperationalStatus::Service,
        confidence: 95,
        reason: "All systems nominal, train ready for revenue service",
        applies: |_, _| true,
    },
];

/// The matched row, as applied to one vehicle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Verdict {
    pub rule: &'static str,
    pub decision: OperationalStatus,
    pub confidence: u8,
    pub reason: &'static str,
}

impl From<&PolicyRule> for Verdict {
    fn from(rule: &PolicyRule) -> Self {
        Self {
            rule: rule.name,
            decision: rule.decision,
            confidence: rule.confidence,
            reason: rule.reason,
        }
    }
}

pub(crate) fn decide(ledger: &ComplianceLedger, thresholds: &InductionThresholds) -> Verdict {
    let fallback = &POLICY_TABLE[POLICY_TABLE.len() - 1];
    POLICY_TABLE
        .iter()
        .find(|rule| (rule.applies)(ledger, thresholds))
        .unwrap_or(fallback)
        .into()
}
