use serde::{Deserialize, Serialize};

/// Policy thresholds applied by the domain checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InductionThresholds {
    pub mileage_window_days: i64,
    pub cleaning_lookahead_hours: i64,
    pub branding_critical_pct: f64,
    pub branding_warning_pct: f64,
    pub mileage_variance_pct: f64,
    pub moderate_warning_count: usize,
}

impl Default for InductionThresholds {
    fn default() -> Self {
        Self {
            mileage_window_days: 30,
            cleaning_lookahead_hours: 24,
            branding_critical_pct: 50.0,
            branding_warning_pct: 80.0,
            mileage_variance_pct: 20.0,
            moderate_warning_count: 2,
        }
    }
}
