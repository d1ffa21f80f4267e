use uuid::Uuid;

use crate::form::Outcome;

#[derive(Debug)]
pub enum TaskResult {
    Prediction { submission_id: Uuid, outcome: Outcome },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Prediction { outcome: Ok(_), .. } => "prediction",
            TaskResult::Prediction { outcome: Err(_), .. } => "prediction_failed",
        }
    }
}
