//! Framingham-style field set (10-year coronary heart disease study).

use serde::{
    Deserialize,
    Serialize,
};

use super::FieldSpec;

pub static FIELDS: [FieldSpec; 13] = [
    FieldSpec::whole("age", "Age", "e.g., 52", 18.0, 100.0),
    FieldSpec::flag("sex", "Male", "checked for male"),
    FieldSpec::whole("cigsPerDay", "Cigarettes Per Day", "e.g., 0", 0.0, 100.0),
    FieldSpec::flag("BPMeds", "On BP Medication", "checked for yes"),
    FieldSpec::flag("prevalentStroke", "Prevalent Stroke", "checked for yes"),
    FieldSpec::flag("prevalentHyp", "Prevalent Hypertension", "checked for yes"),
    FieldSpec::flag("diabetes", "Diabetes", "checked for yes"),
    FieldSpec::numeric("totChol", "Total Cholesterol", "e.g., 250", 100.0, 700.0),
    FieldSpec::numeric("sysBP", "Systolic Blood Pressure", "e.g., 120", 70.0, 300.0),
    FieldSpec::numeric("diaBP", "Diastolic Blood Pressure", "e.g., 80", 40.0, 160.0),
    FieldSpec::numeric("BMI", "BMI", "e.g., 28.5", 10.0, 60.0),
    FieldSpec::numeric("heartRate", "Heart Rate", "e.g., 75", 30.0, 220.0),
    FieldSpec::numeric("glucose", "Glucose", "e.g., 85", 40.0, 400.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FraminghamRecord {
    pub age: f64,
    pub sex: f64,
    #[serde(rename = "cigsPerDay")]
    pub cigs_per_day: f64,
    #[serde(rename = "BPMeds")]
    pub bp_meds: f64,
    #[serde(rename = "prevalentStroke")]
    pub prevalent_stroke: f64,
    #[serde(rename = "prevalentHyp")]
    pub prevalent_hyp: f64,
    pub diabetes: f64,
    #[serde(rename = "totChol")]
    pub tot_chol: f64,
    #[serde(rename = "sysBP")]
    pub sys_bp: f64,
    #[serde(rename = "diaBP")]
    pub dia_bp: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "heartRate")]
    pub heart_rate: f64,
    pub glucose: f64,
}

impl FraminghamRecord {
    /// Order matches `FIELDS`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.age,
            self.sex,
            self.cigs_per_day,
            self.bp_meds,
            self.prevalent_stroke,
            self.prevalent_hyp,
            self.diabetes,
            self.tot_chol,
            self.sys_bp,
            self.dia_bp,
            self.bmi,
            self.heart_rate,
            self.glucose,
        ]
    }

    /// # Errors
    /// Returns an error if the slice does not hold exactly one value per field.
    pub fn from_values(v: &[f64]) -> Result<Self, String> {
        if v.len() != FIELDS.len() {
            return Err(format!("expected {} values, got {}", FIELDS.len(), v.len()));
        }

        Ok(Self {
            age: v[0],
            sex: v[1],
            cigs_per_day: v[2],
            bp_meds: v[3],
            prevalent_stroke: v[4],
            prevalent_hyp: v[5],
            diabetes: v[6],
            tot_chol: v[7],
            sys_bp: v[8],
            dia_bp: v[9],
            bmi: v[10],
            heart_rate: v[11],
            glucose: v[12],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys_follow_field_order() {
        let values: Vec<f64> = (0..FIELDS.len()).map(|i| i as f64).collect();
        let record = FraminghamRecord::from_values(&values).expect("13 values");
        assert_eq!(record.to_vec(), values);

        let payload = serde_json::to_value(record).unwrap();
        for (i, field) in FIELDS.iter().enumerate() {
            assert_eq!(payload[field.name].as_f64(), Some(i as f64), "field {}", field.name);
        }
    }

    #[test]
    fn test_from_values_rejects_wrong_length() {
        assert!(FraminghamRecord::from_values(&[52.0, 1.0]).is_err());
    }
}
