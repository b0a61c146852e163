pub mod controller;
pub mod dismiss;
pub mod state;
pub mod view;

pub use controller::{SubmissionClient, SubmissionError};
pub use dismiss::DismissTimer;
pub use state::{ResultPanel, UiState, ViewModel};
pub use view::{ScrollTarget, View};
