//! Clinical field catalogues and the typed patient records built from raw form input.
//!
//! Two incompatible schemas exist behind the same prediction endpoint. A form instance
//! works with exactly one of them; inputs are never merged across schemas.

pub mod cleveland;
pub mod framingham;

use std::{
    collections::HashMap,
    fmt,
    str::FromStr,
};

pub use cleveland::ClevelandRecord;
pub use framingham::FraminghamRecord;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    #[default]
    Framingham,
    Cleveland,
}

impl Schema {
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Schema::Framingham => &framingham::FIELDS,
            Schema::Cleveland => &cleveland::FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.name == name)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Schema::Framingham => "Framingham (10-year CHD)",
            Schema::Cleveland => "UCI Cleveland",
        }
    }

    /// Every field present and blank, except flags which start unchecked.
    pub fn blank_input(&self) -> PatientInput {
        let mut input = PatientInput::default();
        for field in self.fields() {
            let value = match field.kind {
                FieldKind::Flag => "0",
                FieldKind::Numeric => "",
            };
            input.set(field.name, value);
        }
        input
    }

    /// Checks completeness, numeric form and ranges, then builds the typed record.
    ///
    /// All problems are collected so the form can show them together. Keys that do not
    /// belong to this schema are rejected rather than dropped.
    pub fn validate(&self, input: &PatientInput) -> Result<PatientRecord, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let mut unknown: Vec<&str> =
            input.keys().filter(|key| self.field(key).is_none()).collect();
        unknown.sort_unstable();
        for key in unknown {
            errors.push(key, format!("is not a {} field", self));
        }

        let mut values = Vec::with_capacity(self.fields().len());
        for field in self.fields() {
            match input.get(field.name).map(str::trim) {
                None | Some("") => errors.push(field.name, "is required"),
                Some(raw) => match field.coerce(raw) {
                    Ok(value) => values.push(value),
                    Err(problem) => errors.push(field.name, problem),
                },
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let record = match self {
            Schema::Framingham => FraminghamRecord::from_values(&values).map(PatientRecord::Framingham),
            Schema::Cleveland => ClevelandRecord::from_values(&values).map(PatientRecord::Cleveland),
        };

        record.map_err(|problem| ValidationErrors::single(self.to_string(), problem))
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Framingham => write!(f, "framingham"),
            Schema::Cleveland => write!(f, "cleveland"),
        }
    }
}

impl FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "framingham" => Ok(Schema::Framingham),
            "cleveland" | "uci" => Ok(Schema::Cleveland),
            other => Err(format!("unknown schema '{}' (expected framingham or cleveland)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    /// Checkbox-style field; only 0 and 1 are accepted.
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Name used both as the form key and as the JSON key sent to the endpoint.
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    pub integer: bool,
}

impl FieldSpec {
    pub const fn numeric(
        name: &'static str,
        label: &'static str,
        placeholder: &'static str,
        min: f64,
        max: f64,
    ) -> Self {
        Self { name, label, placeholder, kind: FieldKind::Numeric, min, max, integer: false }
    }

    pub const fn whole(
        name: &'static str,
        label: &'static str,
        placeholder: &'static str,
        min: f64,
        max: f64,
    ) -> Self {
        Self { name, label, placeholder, kind: FieldKind::Numeric, min, max, integer: true }
    }

    pub const fn flag(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self { name, label, placeholder, kind: FieldKind::Flag, min: 0.0, max: 1.0, integer: true }
    }

    pub fn is_flag(&self) -> bool {
        self.kind == FieldKind::Flag
    }

    pub fn range_hint(&self) -> String {
        match self.kind {
            FieldKind::Flag => "yes / no".to_string(),
            FieldKind::Numeric => format!("{} – {}", self.min, self.max),
        }
    }

    /// Parses a non-blank raw value. Never substitutes a default.
    pub fn coerce(&self, raw: &str) -> Result<f64, String> {
        let value: f64 = raw.parse().map_err(|_| format!("'{}' is not a number", raw))?;

        if !value.is_finite() {
            return Err(format!("'{}' is not a finite number", raw));
        }

        if self.kind == FieldKind::Flag {
            if value != 0.0 && value != 1.0 {
                return Err(format!("must be 0 or 1, got {}", value));
            }
            return Ok(value);
        }

        if self.integer && value.fract() != 0.0 {
            return Err(format!("must be a whole number, got {}", value));
        }

        if !(self.min..=self.max).contains(&value) {
            return Err(format!("{} is out of range [{}, {}]", value, self.min, self.max));
        }

        Ok(value)
    }
}

/// Raw string values as captured from form controls, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInput {
    values: HashMap<String, String>,
}

impl PatientInput {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn set_flag(&mut self, name: impl Into<String>, checked: bool) {
        self.set(name, if checked { "1" } else { "0" });
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn value_mut(&mut self, name: &str) -> Option<&mut String> {
        self.values.get_mut(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).map(str::trim) == Some("1")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PatientInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = PatientInput::default();
        for (name, value) in iter {
            input.set(name, value);
        }
        input
    }
}

/// A validated submission. Serializes to the flat numeric JSON object the endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatientRecord {
    Framingham(FraminghamRecord),
    Cleveland(ClevelandRecord),
}

impl PatientRecord {
    pub fn schema(&self) -> Schema {
        match self {
            PatientRecord::Framingham(_) => Schema::Framingham,
            PatientRecord::Cleveland(_) => Schema::Cleveland,
        }
    }

    /// Values in the schema's field order.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            PatientRecord::Framingham(record) => record.to_vec(),
            PatientRecord::Cleveland(record) => record.to_vec(),
        }
    }

    pub fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub problem: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, problem: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, problem);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, problem: impl Into<String>) {
        self.0.push(FieldError { field: field.into(), problem: problem.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
