pub mod api;
pub mod config;
pub mod model;
pub mod terminal;
pub mod ui;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, ConfigError};
pub use model::{ClassificationResult, FileUpload, SubmissionInput};
pub use ui::{SubmissionClient, SubmissionError, UiState, View, ViewModel};
