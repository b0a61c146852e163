use std::time::Duration;

use tokio::task::JoinHandle;

/// A single delayed callback. Scheduling again aborts whatever was pending.
#[derive(Debug, Default)]
pub struct DismissTimer {
    handle: Option<JoinHandle<()>>,
}

impl DismissTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be called from inside a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
