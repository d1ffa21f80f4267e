//! UCI Cleveland field set. Categorical codes follow the 0-based encoding
//! (`cp` 0-3, `restecg` 0-2, `slope` 0-2, `ca` 0-4, `thal` 0-3).

use serde::{
    Deserialize,
    Serialize,
};

use super::FieldSpec;

pub static FIELDS: [FieldSpec; 13] = [
    FieldSpec::whole("age", "Age", "e.g., 54", 18.0, 100.0),
    FieldSpec::flag("sex", "Male", "checked for male"),
    FieldSpec::whole("cp", "Chest Pain Type", "0-3", 0.0, 3.0),
    FieldSpec::numeric("trestbps", "Resting Blood Pressure", "e.g., 130", 70.0, 250.0),
    FieldSpec::numeric("chol", "Serum Cholesterol", "e.g., 246", 100.0, 600.0),
    FieldSpec::flag("fbs", "Fasting Blood Sugar > 120", "checked for yes"),
    FieldSpec::whole("restecg", "Resting ECG", "0-2", 0.0, 2.0),
    FieldSpec::numeric("thalach", "Max Heart Rate", "e.g., 150", 60.0, 220.0),
    FieldSpec::flag("exang", "Exercise Induced Angina", "checked for yes"),
    FieldSpec::numeric("oldpeak", "ST Depression", "e.g., 1.0", 0.0, 10.0),
    FieldSpec::whole("slope", "ST Slope", "0-2", 0.0, 2.0),
    FieldSpec::whole("ca", "Major Vessels", "0-4", 0.0, 4.0),
    FieldSpec::whole("thal", "Thalassemia", "0-3", 0.0, 3.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClevelandRecord {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    pub thalach: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub slope: f64,
    pub ca: f64,
    pub thal: f64,
}

impl ClevelandRecord {
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.age,
            self.sex,
            self.cp,
            self.trestbps,
            self.chol,
            self.fbs,
            self.restecg,
            self.thalach,
            self.exang,
            self.oldpeak,
            self.slope,
            self.ca,
            self.thal,
        ]
    }

    pub fn from_values(v: &[f64]) -> Result<Self, String> {
        if v.len() != FIELDS.len() {
            return Err(format!("expected {} values, got {}", FIELDS.len(), v.len()));
        }

        Ok(Self {
            age: v[0],
            sex: v[1],
            cp: v[2],
            trestbps: v[3],
            chol: v[4],
            fbs: v[5],
            restecg: v[6],
            thalach: v[7],
            exang: v[8],
            oldpeak: v[9],
            slope: v[10],
            ca: v[11],
            thal: v[12],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        PatientInput,
        PatientRecord,
        Schema,
    };

    #[test]
    fn test_validate_cleveland_input() {
        let input: PatientInput = [
            ("age", "63"),
            ("sex", "1"),
            ("cp", "3"),
            ("trestbps", "145"),
            ("chol", "233"),
            ("fbs", "1"),
            ("restecg", "0"),
            ("thalach", "150"),
            ("exang", "0"),
            ("oldpeak", "2.3"),
            ("slope", "0"),
            ("ca", "0"),
            ("thal", "1"),
        ]
        .into_iter()
        .collect();

        let record = Schema::Cleveland.validate(&input).expect("valid cleveland input");
        assert_eq!(record.schema(), Schema::Cleveland);
        match record {
            PatientRecord::Cleveland(r) => {
                assert!((r.oldpeak - 2.3).abs() < f64::EPSILON);
                assert!((r.thalach - 150.0).abs() < f64::EPSILON);
            }
            other => panic!("Expected Cleveland record, got {:?}", other),
        }
    }
}
