use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;
use tracing::{
    info,
    warn,
};
use uuid::Uuid;

use super::TaskResult;
use crate::{
    core::PredictError,
    predict::PredictionClient,
    schema::PatientRecord,
};

/// Runs network work off the UI thread and hands results back through a channel.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    client: PredictionClient,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new(client: PredictionClient) -> Result<Self, PredictError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, client, receiver, sender })
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }

    /// Drains finished tasks without blocking.
    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn submit_prediction(&self, submission_id: Uuid, record: PatientRecord) {
        let (sender, runtime) = self.task_context();
        let client = self.client.clone();

        thread::spawn(move || {
            let outcome = runtime.block_on(async { client.predict(&record).await });

            match &outcome {
                Ok(result) => info!(
                    %submission_id,
                    prediction = result.prediction,
                    tier = %result.tier,
                    "Prediction received"
                ),
                Err(e) => warn!(%submission_id, kind = ?e.kind(), "Prediction failed: {}", e),
            }

            if sender.send(TaskResult::Prediction { submission_id, outcome }).is_err() {
                warn!(%submission_id, "Prediction finished after the form was closed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::{
        Duration,
        Instant,
    };

    use super::*;
    use crate::{
        config::Config,
        core::{
            errors::SERVER_UNREACHABLE_ERROR,
            ErrorKind,
        },
        schema::FraminghamRecord,
    };

    fn closed_port_config() -> Config {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        Config {
            endpoint: format!("http://127.0.0.1:{}/api/predict", port).parse().unwrap(),
            timeout_secs: 5,
            ..Config::default()
        }
    }

    #[test]
    fn test_unreachable_server_settles_with_transport_error() {
        let client = PredictionClient::new(&closed_port_config()).unwrap();
        let mut manager = TaskManager::new(client).unwrap();
        let submission_id = Uuid::new_v4();

        manager.submit_prediction(
            submission_id,
            PatientRecord::Framingham(FraminghamRecord::default()),
        );

        let deadline = Instant::now() + Duration::from_secs(10);
        let result = loop {
            if let Some(result) = manager.poll_results().pop() {
                break result;
            }
            assert!(Instant::now() < deadline, "no task result within 10s");
            thread::sleep(Duration::from_millis(20));
        };

        let TaskResult::Prediction { submission_id: returned, outcome } = result;
        assert_eq!(returned, submission_id);
        let error = outcome.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.user_message(), SERVER_UNREACHABLE_ERROR);
    }

    #[test]
    fn test_poll_results_is_empty_when_idle() {
        let client = PredictionClient::new(&Config::default()).unwrap();
        let mut manager = TaskManager::new(client).unwrap();
        assert!(manager.poll_results().is_empty());
    }
}
