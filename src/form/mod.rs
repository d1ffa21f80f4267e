//! Submission lifecycle of one prediction form.
//!
//! `Idle` → `Submitting` → `Settled`. A settled form holds either a result or an error,
//! never both, and starting a new submission discards whichever it held.

use tracing::{
    info,
    warn,
};
use uuid::Uuid;

use crate::{
    core::PredictError,
    predict::PredictionResult,
    schema::{
        PatientInput,
        PatientRecord,
        Schema,
    },
};

pub type Outcome = Result<PredictionResult, PredictError>;

#[derive(Debug)]
pub enum SubmissionState {
    Idle,
    Submitting { submission_id: Uuid },
    Settled(Outcome),
}

#[derive(Debug)]
pub enum SubmitAttempt {
    /// Validation passed; the caller must send `record` and later call `settle`.
    Started { submission_id: Uuid, record: PatientRecord },
    /// Validation failed and the form settled with the error. Nothing was sent.
    Rejected,
    /// A submission is already in flight.
    Ignored,
}

pub struct PredictionForm {
    schema: Schema,
    input: PatientInput,
    state: SubmissionState,
}

impl PredictionForm {
    pub fn new(schema: Schema) -> Self {
        Self { schema, input: schema.blank_input(), state: SubmissionState::Idle }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn input(&self) -> &PatientInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut PatientInput {
        &mut self.input
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if let SubmissionState::Submitting { submission_id } = self.state {
            warn!(%submission_id, "Ignoring submit while a prediction is in flight");
            return SubmitAttempt::Ignored;
        }

        self.state = SubmissionState::Idle;

        match self.schema.validate(&self.input) {
            Ok(record) => {
                let submission_id = Uuid::new_v4();
                info!(%submission_id, schema = %self.schema, "Submitting patient data");
                self.state = SubmissionState::Submitting { submission_id };
                SubmitAttempt::Started { submission_id, record }
            }
            Err(errors) => {
                info!(invalid_fields = errors.len(), "Submission rejected by validation");
                self.state = SubmissionState::Settled(Err(PredictError::Validation(errors)));
                SubmitAttempt::Rejected
            }
        }
    }

    /// Accepts the outcome of the in-flight submission. Outcomes for any other id are
    /// dropped and `false` is returned.
    pub fn settle(&mut self, submission_id: Uuid, outcome: Outcome) -> bool {
        match self.state {
            SubmissionState::Submitting { submission_id: current } if current == submission_id => {
                self.state = SubmissionState::Settled(outcome);
                true
            }
            _ => {
                warn!(%submission_id, "Discarding outcome of a stale submission");
                false
            }
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.state {
            SubmissionState::Settled(Ok(result)) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PredictError> {
        match &self.state {
            SubmissionState::Settled(Err(error)) => Some(error),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(PredictError::user_message)
    }

    /// Clears the inputs. A settled outcome is cleared too; an in-flight one is kept so
    /// its answer still has somewhere to land.
    pub fn reset(&mut self) {
        self.input = self.schema.blank_input();
        if !self.is_loading() {
            self.state = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::{
        core::{
            errors::SERVER_UNREACHABLE_ERROR,
            ErrorKind,
        },
        predict::{
            interpret_response,
            RiskTier,
        },
    };

    fn filled_form() -> PredictionForm {
        let mut form = PredictionForm::new(Schema::Framingham);
        for (name, value) in [
            ("age", "45"),
            ("cigsPerDay", "10"),
            ("totChol", "210"),
            ("sysBP", "130"),
            ("diaBP", "85"),
            ("BMI", "24.1"),
            ("heartRate", "70"),
            ("glucose", "90"),
        ] {
            form.input_mut().set(name, value);
        }
        form.input_mut().set_flag("sex", true);
        form
    }

    fn start(form: &mut PredictionForm) -> Uuid {
        match form.begin_submit() {
            SubmitAttempt::Started { submission_id, .. } => submission_id,
            other => panic!("Expected Started, got {:?}", other),
        }
    }

    #[test]
    fn test_second_submit_is_ignored_while_in_flight() {
        let mut form = filled_form();
        let first = start(&mut form);
        assert!(form.is_loading());
        assert!(!form.can_submit());

        assert!(matches!(form.begin_submit(), SubmitAttempt::Ignored));
        assert!(matches!(
            form.state(),
            SubmissionState::Submitting { submission_id } if *submission_id == first
        ));
    }

    #[test]
    fn test_settle_with_result() {
        let mut form = filled_form();
        let id = start(&mut form);

        let outcome =
            interpret_response(StatusCode::OK, r#"{"prediction": 1, "probability": "75.20%"}"#);
        assert!(form.settle(id, outcome));

        assert!(!form.is_loading());
        assert_eq!(form.result().map(|r| r.tier), Some(RiskTier::High));
        assert!(form.error().is_none());
    }

    #[test]
    fn test_network_failure_returns_loading_to_false() {
        let mut form = filled_form();
        let id = start(&mut form);

        // reqwest cannot build a transport error by hand, so go through a real refusal.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let error = runtime.block_on(reqwest::get(url)).unwrap_err();

        assert!(form.settle(id, Err(PredictError::from(error))));
        assert!(!form.is_loading());
        assert!(form.can_submit());
        assert_eq!(form.error().map(PredictError::kind), Some(ErrorKind::Transport));
        assert_eq!(form.error_message().as_deref(), Some(SERVER_UNREACHABLE_ERROR));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_new_submission_clears_previous_outcome() {
        let mut form = filled_form();
        let id = start(&mut form);
        let outcome = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "model unavailable"}"#,
        );
        form.settle(id, outcome);
        assert_eq!(form.error_message().as_deref(), Some("model unavailable"));

        start(&mut form);
        assert!(form.error().is_none());
        assert!(form.result().is_none());
    }

    #[test]
    fn test_invalid_input_is_rejected_without_request() {
        let mut form = PredictionForm::new(Schema::Framingham);
        assert!(matches!(form.begin_submit(), SubmitAttempt::Rejected));
        assert!(!form.is_loading());
        assert_eq!(form.error().map(PredictError::kind), Some(ErrorKind::Validation));
        assert!(form.error_message().unwrap().contains("age is required"));
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut form = filled_form();
        let id = start(&mut form);

        let outcome =
            interpret_response(StatusCode::OK, r#"{"prediction": 0, "probability": "10%"}"#);
        assert!(!form.settle(Uuid::new_v4(), outcome));
        assert!(form.is_loading());

        let outcome =
            interpret_response(StatusCode::OK, r#"{"prediction": 0, "probability": "10%"}"#);
        assert!(form.settle(id, outcome));
        assert!(!form.settle(id, Err(PredictError::MalformedResponse("late".into()))));
    }

    #[test]
    fn test_reset_clears_inputs_and_outcome() {
        let mut form = PredictionForm::new(Schema::Framingham);
        form.begin_submit();
        assert!(form.error().is_some());

        form.input_mut().set("age", "50");
        form.reset();
        assert_eq!(form.input().get("age"), Some(""));
        assert!(matches!(form.state(), SubmissionState::Idle));
    }
}
