use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// How long a validation message stays visible.
pub const ERROR_DISPLAY: Duration = Duration::from_millis(3000);

/// Transient error display: holds at most one message and clears it after
/// [`ERROR_DISPLAY`]. Showing a newer message first aborts the pending clear
/// task so an older timer cannot wipe the replacement early.
///
/// `show` spawns the clear task, so it must be called from within a tokio
/// runtime.
#[derive(Debug, Default)]
pub struct ErrorSlot {
    message: Arc<Mutex<Option<&'static str>>>,
    clear_timer: Mutex<Option<JoinHandle<()>>>,
}

impl ErrorSlot {
    pub fn show(&self, message: &'static str) {
        if let Some(previous) = self
            .clear_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            previous.abort();
        }

        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = Some(message);

        let slot = Arc::clone(&self.message);
        let timer = tokio::spawn(async move {
            sleep(ERROR_DISPLAY).await;
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        });

        *self
            .clear_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(timer);
    }

    #[must_use]
    pub fn current(&self) -> Option<&'static str> {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
