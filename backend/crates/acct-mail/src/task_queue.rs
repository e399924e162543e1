use crate::{MailError, MailTask, Result as MailErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use log::debug;
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};

/// Producer side of the mail queue, cloned into every handler
#[derive(Clone)]
pub struct TaskQueue {
    sender: Sender<MailTask>,
}

impl TaskQueue {
    /// Create a bounded queue. The receiver goes to the [`crate::MailWorker`].
    pub fn channel(capacity: usize) -> (Self, Receiver<MailTask>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Queue a task without waiting. Fails when the queue is full or the
    /// worker is gone; delivery itself is never awaited.
    #[track_caller]
    pub fn enqueue(&self, task: MailTask) -> MailErrorResult<()> {
        debug!("Queueing mail task: {}", task);

        self.sender.try_send(task).map_err(|e| match e {
            TrySendError::Full(_) => MailError::QueueFull {
                location: ErrorLocation::from(Location::caller()),
            },
            TrySendError::Closed(_) => MailError::QueueClosed {
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }
}
