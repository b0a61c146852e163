use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::dismiss::DismissTimer;
use super::state::{UiState, ViewModel};
use super::view::{ScrollTarget, View};
use crate::api::{ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::model::{ClassificationResult, FileUpload, InputForm, LabelStyle, SubmissionInput};

pub const MISSING_INPUT_MESSAGE: &str = "Please enter some text or select a file.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process the email.";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Unknown error while processing the email.";
pub const CONNECTIVITY_MESSAGE: &str =
    "Could not reach the server. Check that the backend is running.";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("no text or file to submit")]
    MissingInput,

    #[error("a submission is already in progress")]
    Busy,

    #[error("a result is being shown; reset the form before submitting again")]
    FormHidden,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmissionError {
    /// Text shown in the error panel.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::MissingInput => MISSING_INPUT_MESSAGE.to_string(),
            SubmissionError::Api(ApiError::Http { detail, .. }) => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            SubmissionError::Api(ApiError::Unsuccessful) => UNKNOWN_FAILURE_MESSAGE.to_string(),
            SubmissionError::Api(err) => {
                let message = err.to_string();
                if message.trim().is_empty() {
                    CONNECTIVITY_MESSAGE.to_string()
                } else {
                    message
                }
            }
            other => other.to_string(),
        }
    }
}

struct Shared<V> {
    state: UiState,
    form: InputForm,
    view: V,
    label_style: LabelStyle,
    dismiss: DismissTimer,
    error_generation: u64,
}

impl<V: View> Shared<V> {
    fn view_model(&self) -> ViewModel {
        ViewModel::build(&self.state, &self.form, self.label_style)
    }

    fn render(&mut self) {
        let model = self.view_model();
        self.view.render(&model);
    }
}

fn lock<V>(shared: &Mutex<Shared<V>>) -> MutexGuard<'_, Shared<V>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Puts the controller back into `Idle` if a submission future is dropped
/// before the response arrives.
struct LoadingGuard<V: View> {
    shared: Arc<Mutex<Shared<V>>>,
}

impl<V: View> Drop for LoadingGuard<V> {
    fn drop(&mut self) {
        let mut shared = lock(&self.shared);
        if shared.state.is_loading() {
            shared.state = UiState::Idle;
            shared.render();
        }
    }
}

/// Drives one form: input exclusivity, submission, error auto-dismiss and reset.
pub struct SubmissionClient<V: View> {
    api: ApiClient,
    error_dismiss: Duration,
    shared: Arc<Mutex<Shared<V>>>,
}

impl<V: View> SubmissionClient<V> {
    pub fn new(config: ClientConfig, view: V) -> Self {
        let mut shared = Shared {
            state: UiState::Idle,
            form: InputForm::new(),
            view,
            label_style: config.label_style,
            dismiss: DismissTimer::new(),
            error_generation: 0,
        };
        shared.render();

        Self {
            error_dismiss: config.error_dismiss,
            api: ApiClient::new(config),
            shared: Arc::new(Mutex::new(shared)),
        }
    }

    pub fn state(&self) -> UiState {
        lock(&self.shared).state.clone()
    }

    pub fn view_model(&self) -> ViewModel {
        lock(&self.shared).view_model()
    }

    pub fn form(&self) -> InputForm {
        lock(&self.shared).form.clone()
    }

    pub fn on_file_selected(&self, file: Option<FileUpload>) {
        let mut shared = lock(&self.shared);
        shared.form.select_file(file);
        shared.render();
    }

    pub fn on_text_input(&self, text: impl Into<String>) {
        let mut shared = lock(&self.shared);
        shared.form.input_text(text);
        shared.render();
    }

    /// Sets text and file together, bypassing the exclusivity handlers.
    pub fn set_inputs(&self, text: impl Into<String>, file: Option<FileUpload>) {
        let mut shared = lock(&self.shared);
        shared.form.force(text, file);
        shared.render();
    }

    pub async fn submit(&self) -> Result<ClassificationResult, SubmissionError> {
        let submission_id = Uuid::new_v4();

        let input = {
            let mut shared = lock(&self.shared);
            match shared.state {
                UiState::Loading => return Err(SubmissionError::Busy),
                UiState::Result(_) => return Err(SubmissionError::FormHidden),
                UiState::Idle | UiState::Error(_) => {}
            }

            let Some(input) = shared.form.submission() else {
                let err = SubmissionError::MissingInput;
                debug!(%submission_id, "nothing to submit");
                self.show_error(&mut shared, err.user_message());
                return Err(err);
            };

            shared.dismiss.cancel();
            shared.state = UiState::Loading;
            shared.render();
            input
        };

        let guard = LoadingGuard {
            shared: self.shared.clone(),
        };

        let kind = match &input {
            SubmissionInput::Text(_) => "text",
            SubmissionInput::File(_) => "file",
        };
        info!(%submission_id, kind, base_url = self.api.base_url(), "submitting email for classification");

        let outcome = self.api.classify(&input).await.map_err(SubmissionError::from);

        {
            let mut shared = lock(&self.shared);
            match &outcome {
                Ok(result) => {
                    info!(%submission_id, category = %result.category, "classification received");
                    shared.state = UiState::Result(result.clone());
                    shared.render();
                    shared.view.scroll_to(ScrollTarget::Result);
                }
                Err(err) => {
                    warn!(%submission_id, error = %err, "classification failed");
                    self.show_error(&mut shared, err.user_message());
                }
            }
        }

        drop(guard);
        outcome
    }

    pub fn reset(&self) {
        let mut shared = lock(&self.shared);
        shared.dismiss.cancel();
        shared.error_generation += 1;
        shared.form.reset();
        if !shared.state.is_loading() {
            shared.state = UiState::Idle;
        }
        shared.render();
        shared.view.scroll_to(ScrollTarget::Top);
    }

    /// Fire-and-forget `GET /`. Failures are logged, never rendered.
    pub fn spawn_liveness_probe(&self) -> JoinHandle<()> {
        let api = self.api.clone();
        tokio::spawn(async move {
            match api.probe().await {
                Ok(true) => debug!(base_url = api.base_url(), "api reachable"),
                Ok(false) => warn!(base_url = api.base_url(), "api may not be reachable"),
                Err(err) => warn!(
                    base_url = api.base_url(),
                    error = %err,
                    "could not connect to the api; check that the backend is running"
                ),
            }
        })
    }

    fn show_error(&self, shared: &mut Shared<V>, message: String) {
        shared.error_generation += 1;
        let generation = shared.error_generation;
        shared.state = UiState::Error(message);
        shared.render();

        let weak: Weak<Mutex<Shared<V>>> = Arc::downgrade(&self.shared);
        shared.dismiss.schedule(self.error_dismiss, move || {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            let mut shared = lock(&strong);
            if shared.error_generation == generation && matches!(shared.state, UiState::Error(_)) {
                shared.state = UiState::Idle;
                shared.render();
            }
        });
    }
}
