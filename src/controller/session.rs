use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::loader::RosterSource;

use super::RosterController;

/// A view session: one controller plus the async plumbing to load it.
///
/// The controller lock is never held across the network call, so user
/// actions stay responsive while the roster is loading.
#[derive(Clone, Debug)]
pub struct RosterSession {
    controller: Arc<Mutex<RosterController>>,
}

impl RosterSession {
    pub fn new(controller: RosterController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, RosterController> {
        self.controller.lock().await
    }

    /// Runs the session's single load. Returns whether the result was
    /// applied; false means the load was already started elsewhere or the
    /// session ended before the response arrived.
    pub async fn load<S>(&self, source: &S) -> bool
    where
        S: RosterSource + ?Sized,
    {
        let ticket = match self.controller.lock().await.begin_load() {
            Some(ticket) => ticket,
            None => return false,
        };
        let result = source.fetch().await;
        self.controller.lock().await.finish_load(ticket, result)
    }

    /// Same as [`RosterSession::load`] but on a background task.
    pub fn spawn_load(&self, source: Arc<dyn RosterSource>) -> JoinHandle<bool> {
        let session = self.clone();
        tokio::spawn(async move { session.load(source.as_ref()).await })
    }

    pub async fn teardown(&self) {
        self.controller.lock().await.teardown();
    }
}
