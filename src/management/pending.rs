use tokio::sync::{Mutex, Notify};

/// Transient state of one authorization attempt.
///
/// Holds the first non-empty code delivered to the callback route. Later codes
/// never replace it.
#[derive(Debug, Default)]
pub struct PendingFlow {
    code: Mutex<Option<String>>,
    arrived: Notify,
}

impl PendingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `code` if none was captured yet. Returns whether it was stored.
    pub async fn capture(&self, code: &str) -> bool {
        if code.is_empty() {
            return false;
        }

        let mut slot = self.code.lock().await;
        if slot.is_some() {
            return false;
        }
        *slot = Some(code.to_string());
        drop(slot);

        self.arrived.notify_one();
        true
    }

    pub async fn captured(&self) -> Option<String> {
        self.code.lock().await.clone()
    }

    /// Resolves once a code has been captured.
    pub async fn wait(&self) -> String {
        loop {
            let notified = self.arrived.notified();
            if let Some(code) = self.captured().await {
                return code;
            }
            notified.await;
        }
    }
}
