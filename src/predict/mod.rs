//! Prediction request adapter: turns a validated record into a request against the
//! prediction endpoint and maps whatever comes back into a display-ready result.

pub mod api;
pub mod risk;

use std::fmt;

pub use api::{
    interpret_response,
    PredictionClient,
};
use chrono::{
    DateTime,
    Utc,
};
pub use risk::RiskTier;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::PredictError;

/// Probability exactly as the endpoint sent it: a fraction or a percentage string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Probability {
    Number(f64),
    Text(String),
}

impl Probability {
    /// Normalizes to a percentage in `[0, 100]`.
    ///
    /// Numbers are fractions in `[0, 1]`. Strings are percentages with an optional
    /// trailing `%`, e.g. `"75.20%"`.
    pub fn percent(&self) -> Result<f64, PredictError> {
        let percent = match self {
            Probability::Number(fraction) => {
                if !(0.0..=1.0).contains(fraction) {
                    return Err(PredictError::MalformedResponse(format!(
                        "probability {} is not a fraction between 0 and 1",
                        fraction
                    )));
                }
                fraction * 100.0
            }
            Probability::Text(text) => {
                let trimmed = text.trim();
                let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
                digits.parse::<f64>().map_err(|_| {
                    PredictError::MalformedResponse(format!(
                        "probability '{}' is not a percentage",
                        text
                    ))
                })?
            }
        };

        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(PredictError::MalformedResponse(format!(
                "probability {} is outside 0-100%",
                percent
            )));
        }

        Ok(percent)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probability::Number(fraction) => write!(f, "{:.2}%", fraction * 100.0),
            Probability::Text(text) => write!(f, "{}", text.trim()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 1 when the model predicts heart disease.
    pub prediction: u8,
    pub probability: Probability,
    pub percent: f64,
    pub tier: RiskTier,
    pub received_at: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(prediction: u8, probability: Probability) -> Result<Self, PredictError> {
        if prediction > 1 {
            return Err(PredictError::MalformedResponse(format!(
                "prediction must be 0 or 1, got {}",
                prediction
            )));
        }

        let percent = probability.percent()?;

        Ok(Self {
            prediction,
            probability,
            percent,
            tier: RiskTier::from_percent(percent),
            received_at: Utc::now(),
        })
    }

    pub fn is_positive(&self) -> bool {
        self.prediction == 1
    }

    pub fn headline(&self) -> &'static str {
        if self.is_positive() {
            "High Risk"
        } else {
            "Low Risk"
        }
    }

    pub fn probability_text(&self) -> String {
        format!("Probability of Heart Disease: {}", self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_percent_from_text() {
        assert_eq!(Probability::Text("75.20%".into()).percent().unwrap(), 75.2);
        assert_eq!(Probability::Text(" 10.00 % ".into()).percent().unwrap(), 10.0);
        assert_eq!(Probability::Text("30".into()).percent().unwrap(), 30.0);
    }

    #[test]
    fn test_percent_from_fraction() {
        let percent = Probability::Number(0.3).percent().unwrap();
        assert!((percent - 30.0).abs() < 1e-9);
        assert_eq!(Probability::Number(1.0).percent().unwrap(), 100.0);
    }

    #[test]
    fn test_percent_rejects_garbage() {
        for probability in [
            Probability::Text("high".into()),
            Probability::Text("%".into()),
            Probability::Text("120%".into()),
            Probability::Number(1.5),
            Probability::Number(-0.1),
        ] {
            let error = probability.percent().unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Semantic, "{:?}", probability);
        }
    }

    #[test]
    fn test_result_classification() {
        let high = PredictionResult::new(1, Probability::Text("75.20%".into())).unwrap();
        assert_eq!(high.tier, RiskTier::High);
        assert_eq!(high.headline(), "High Risk");
        assert_eq!(high.probability_text(), "Probability of Heart Disease: 75.20%");

        let low = PredictionResult::new(0, Probability::Text("10.00%".into())).unwrap();
        assert_eq!(low.tier, RiskTier::Low);
        assert_eq!(low.headline(), "Low Risk");

        let medium = PredictionResult::new(0, Probability::Text("30.00%".into())).unwrap();
        assert_eq!(medium.tier, RiskTier::Medium);
    }

    #[test]
    fn test_result_rejects_non_binary_prediction() {
        assert!(PredictionResult::new(2, Probability::Number(0.2)).is_err());
    }
}
