use std::io::{self, Write};

use crate::ui::{ScrollTarget, View, ViewModel};

/// Prints state transitions as they happen instead of redrawing a screen.
pub struct TerminalView<W: Write + Send + 'static = io::Stdout> {
    out: W,
    last: Option<ViewModel>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_changes(&mut self, model: &ViewModel) -> io::Result<()> {
        let prev = self.last.as_ref();

        if prev.is_some_and(|p| p.file_label != model.file_label) {
            writeln!(self.out, "📎 {}", model.file_label)?;
        }

        if model.loader_visible && !prev.is_some_and(|p| p.loader_visible) {
            writeln!(self.out, "⏳ Classifying...")?;
        }

        if let Some(message) = &model.error {
            if prev.and_then(|p| p.error.as_ref()) != Some(message) {
                writeln!(self.out, "❌ {message}")?;
            }
        }

        if let Some(panel) = &model.result {
            if prev.and_then(|p| p.result.as_ref()) != Some(panel) {
                writeln!(
                    self.out,
                    "🏷️  Category: {} [{}]",
                    panel.badge.label, panel.badge.variant
                )?;
                writeln!(self.out, "💬 Suggested response:")?;
                writeln!(self.out, "{}", panel.response)?;
                if let Some(preview) = &panel.preview {
                    writeln!(self.out, "📝 Original: {preview}")?;
                }
            }
        }

        self.out.flush()
    }
}

impl<W: Write + Send + 'static> View for TerminalView<W> {
    fn render(&mut self, model: &ViewModel) {
        if let Err(err) = self.write_changes(model) {
            tracing::error!(?err, "failed to write to terminal");
        }
        self.last = Some(model.clone());
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        if target == ScrollTarget::Top {
            let _ = writeln!(self.out);
        }
    }
}
