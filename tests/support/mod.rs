#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use mailsort::ui::{ScrollTarget, View, ViewModel};
use mailsort::{ClientConfig, SubmissionClient};
use serde_json::json;
use tokio::net::TcpListener;

/// One multipart request as the stub API saw it.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    pub fields: Vec<String>,
    pub text: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_bytes: Option<Vec<u8>>,
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<Captured>>>,
    probes: Arc<AtomicUsize>,
    status: StatusCode,
    body: String,
    root_status: StatusCode,
    delay: Duration,
}

pub struct StubApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
    probes: Arc<AtomicUsize>,
}

impl StubApi {
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

pub struct StubBuilder {
    status: StatusCode,
    body: String,
    root_status: StatusCode,
    delay: Duration,
}

impl StubBuilder {
    pub fn root_status(mut self, status: StatusCode) -> Self {
        self.root_status = status;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn spawn(self) -> StubApi {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let probes = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            requests: requests.clone(),
            probes: probes.clone(),
            status: self.status,
            body: self.body,
            root_status: self.root_status,
            delay: self.delay,
        };

        let app = Router::new()
            .route("/", get(root))
            .route("/classify", post(classify))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        StubApi {
            base_url: format!("http://{addr}"),
            requests,
            probes,
        }
    }
}

pub fn respond_json(status: StatusCode, body: serde_json::Value) -> StubBuilder {
    respond_raw(status, body.to_string())
}

pub fn respond_raw(status: StatusCode, body: impl Into<String>) -> StubBuilder {
    StubBuilder {
        status,
        body: body.into(),
        root_status: StatusCode::OK,
        delay: Duration::ZERO,
    }
}

pub fn classified(category: &str, response: &str) -> StubBuilder {
    respond_json(
        StatusCode::OK,
        json!({
            "success": true,
            "category": category,
            "response": response,
            "original_text": "Olá, preciso de ajuda com o sistema"
        }),
    )
}

async fn root(State(state): State<StubState>) -> impl IntoResponse {
    state.probes.fetch_add(1, Ordering::SeqCst);
    (
        state.root_status,
        Json(json!({ "message": "Email Classifier API is online", "status": "active" })),
    )
}

async fn classify(State(state): State<StubState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut captured = Captured::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let file_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default();

        match name.as_str() {
            "text" => captured.text = Some(String::from_utf8_lossy(&bytes).into_owned()),
            "file" => {
                captured.file_name = file_name;
                captured.file_type = file_type;
                captured.file_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
        captured.fields.push(name);
    }

    state.requests.lock().unwrap().push(captured);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Records every frame and scroll request the controller emits.
#[derive(Clone, Default)]
pub struct RecordingView {
    frames: Arc<Mutex<Vec<ViewModel>>>,
    scrolls: Arc<Mutex<Vec<ScrollTarget>>>,
}

impl RecordingView {
    pub fn frames(&self) -> Vec<ViewModel> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last(&self) -> ViewModel {
        self.frames().last().cloned().expect("no frame rendered")
    }

    pub fn scrolls(&self) -> Vec<ScrollTarget> {
        self.scrolls.lock().unwrap().clone()
    }
}

impl View for RecordingView {
    fn render(&mut self, model: &ViewModel) {
        self.frames.lock().unwrap().push(model.clone());
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        self.scrolls.lock().unwrap().push(target);
    }
}

pub fn client_for(config: ClientConfig) -> (SubmissionClient<RecordingView>, RecordingView) {
    let view = RecordingView::default();
    let client = SubmissionClient::new(config, view.clone());
    (client, view)
}
