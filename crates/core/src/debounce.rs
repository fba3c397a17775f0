use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A cancellable one-shot timer. Arming it again replaces the pending task.
///
/// The timer lives on the current tokio runtime. Armed outside a runtime,
/// the task runs immediately and nothing is left pending.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(1500);

    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Runs `task` once the window elapses without another `arm` or `cancel`.
    pub fn arm<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        match Handle::try_current() {
            Ok(runtime) => {
                self.pending = Some(runtime.spawn(async move {
                    tokio::time::sleep(window).await;
                    task();
                }));
            }
            Err(_) => {
                log::debug!("No runtime to debounce on, running task now");
                task();
            }
        }
    }

    /// Cancels the pending task. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
