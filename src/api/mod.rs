mod client;

pub use client::ApiClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("classification request failed with status {status}")]
    Http { status: u16, detail: Option<String> },

    #[error("the API could not classify the email")]
    Unsuccessful,

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}
