use crate::model::{CategoryBadge, ClassificationResult, InputForm, LabelStyle};

/// Where a submission cycle currently stands. Every visibility flag in
/// [`ViewModel`] is derived from this, so panels cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Result(ClassificationResult),
}

impl UiState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Error(_) => "error",
            UiState::Result(_) => "result",
        }
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub badge: CategoryBadge,
    pub response: String,
    pub preview: Option<String>,
}

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub form_visible: bool,
    pub submit_enabled: bool,
    pub loader_visible: bool,
    pub text: String,
    pub file_label: String,
    pub error: Option<String>,
    pub result: Option<ResultPanel>,
}

impl ViewModel {
    pub fn build(state: &UiState, form: &InputForm, style: LabelStyle) -> Self {
        let loading = state.is_loading();
        let result = match state {
            UiState::Result(result) => Some(ResultPanel {
                badge: result.badge(),
                response: result.response.clone(),
                preview: result.preview.clone(),
            }),
            _ => None,
        };
        let error = match state {
            UiState::Error(message) => Some(message.clone()),
            _ => None,
        };

        Self {
            form_visible: result.is_none(),
            submit_enabled: !loading,
            loader_visible: loading,
            text: form.text().to_string(),
            file_label: form.label().render(style),
            error,
            result,
        }
    }
}
