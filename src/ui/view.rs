use super::state::ViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Result,
    Top,
}

/// Output side of the submission controller. Implementations own whatever
/// widgets, terminal handles or buffers they draw into.
pub trait View: Send + 'static {
    fn render(&mut self, model: &ViewModel);

    fn scroll_to(&mut self, _target: ScrollTarget) {}
}

impl View for Box<dyn View> {
    fn render(&mut self, model: &ViewModel) {
        (**self).render(model)
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        (**self).scroll_to(target)
    }
}
