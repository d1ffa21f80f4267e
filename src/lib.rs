//! Desktop client for a heart disease prediction service.
//!
//! Patient attributes are collected in a form, validated against one clinical schema,
//! posted as JSON to an external prediction endpoint, and the returned classification is
//! shown with a qualitative risk tier.

pub mod config;
pub mod core;
pub mod form;
pub mod gui;
pub mod persistence;
pub mod predict;
pub mod schema;

pub use crate::core::{
    ErrorKind,
    PredictError,
};
pub use config::Config;
pub use form::{
    PredictionForm,
    SubmitAttempt,
};
pub use predict::{
    PredictionClient,
    PredictionResult,
    RiskTier,
};
pub use schema::{
    PatientInput,
    PatientRecord,
    Schema,
};
