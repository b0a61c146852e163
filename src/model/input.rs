use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

pub const FILE_LABEL_PLACEHOLDER: &str = "Choose file (.txt or .pdf)";
const FILE_ICON: &str = "📄";

/// A file picked by the user, held in memory until it is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("filename", &self.filename)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .with_context(|| format!("{} has no usable file name", path.display()))?;

        Ok(Self { filename, bytes })
    }

    /// Content type sent with the multipart part. The server decides what it accepts.
    pub fn mime_type(&self) -> &'static str {
        let ext = PathBuf::from(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("txt") => "text/plain",
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        }
    }
}

/// Exactly one kind of content per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    Text(String),
    File(FileUpload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    #[default]
    Plain,
    Icon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLabel {
    Placeholder,
    Selected(String),
}

impl FileLabel {
    pub fn render(&self, style: LabelStyle) -> String {
        match (self, style) {
            (FileLabel::Placeholder, _) => FILE_LABEL_PLACEHOLDER.to_string(),
            (FileLabel::Selected(name), LabelStyle::Plain) => name.clone(),
            (FileLabel::Selected(name), LabelStyle::Icon) => format!("{FILE_ICON} {name}"),
        }
    }
}

/// The text area and file chooser. At most one of them holds content at a time.
#[derive(Debug, Clone)]
pub struct InputForm {
    text: String,
    file: Option<FileUpload>,
    label: FileLabel,
}

impl Default for InputForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InputForm {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            file: None,
            label: FileLabel::Placeholder,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file(&self) -> Option<&FileUpload> {
        self.file.as_ref()
    }

    pub fn label(&self) -> &FileLabel {
        &self.label
    }

    pub fn select_file(&mut self, file: Option<FileUpload>) {
        match file {
            Some(file) => {
                debug!(filename = %file.filename, size = file.bytes.len(), "file selected");
                self.label = FileLabel::Selected(file.filename.clone());
                self.file = Some(file);
                self.text.clear();
            }
            None => {
                self.file = None;
                self.label = FileLabel::Placeholder;
            }
        }
    }

    pub fn input_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if !self.text.trim().is_empty() {
            self.clear_file();
        }
    }

    /// Snapshot of what would be sent. Text wins if both are somehow present.
    pub fn submission(&self) -> Option<SubmissionInput> {
        let has_text = !self.text.trim().is_empty();
        match (has_text, &self.file) {
            (true, Some(file)) => {
                debug!(filename = %file.filename, "text and file both present; sending text only");
                Some(SubmissionInput::Text(self.text.clone()))
            }
            (true, None) => Some(SubmissionInput::Text(self.text.clone())),
            (false, Some(file)) => Some(SubmissionInput::File(file.clone())),
            (false, None) => None,
        }
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.clear_file();
    }

    /// Sets both fields without enforcing exclusivity. Only for callers that
    /// manipulate the form programmatically.
    pub fn force(&mut self, text: impl Into<String>, file: Option<FileUpload>) {
        self.text = text.into();
        self.label = match &file {
            Some(f) => FileLabel::Selected(f.filename.clone()),
            None => FileLabel::Placeholder,
        };
        self.file = file;
    }

    fn clear_file(&mut self) {
        self.file = None;
        self.label = FileLabel::Placeholder;
    }
}
