//! Qualitative risk tiers.
//!
//! The 15% / 50% cut-offs are carried over unchanged from the web client. They have not
//! been validated as clinical guidance.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

pub const MEDIUM_THRESHOLD_PERCENT: f64 = 15.0;
pub const HIGH_THRESHOLD_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// `> 50` is high, `(15, 50]` is medium, `<= 15` is low.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent > HIGH_THRESHOLD_PERCENT {
            RiskTier::High
        } else if percent > MEDIUM_THRESHOLD_PERCENT {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Low => "Low risk of heart disease. Keep up regular check-ups.",
            Self::Medium => "Moderate risk of heart disease. A follow-up with a doctor is recommended.",
            Self::High => "High risk of heart disease. Please consult a cardiologist soon.",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}
