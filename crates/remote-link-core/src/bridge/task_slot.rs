use tokio::task::JoinHandle;

/// Holder for at most one in-flight background task.
///
/// Putting a new task in the slot aborts the previous one. Dropping the slot
/// aborts whatever is still in it.
#[derive(Debug, Default)]
pub(crate) struct TaskSlot {
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    /// Store `handle`, aborting the task it supersedes.
    ///
    /// Returns `true` if a previous task was still running.
    pub(crate) fn replace(&mut self, handle: JoinHandle<()>) -> bool {
        match self.handle.replace(handle) {
            Some(previous) => {
                let superseded = !previous.is_finished();
                previous.abort();
                superseded
            }
            None => false,
        }
    }

    /// Abort the held task, if any.
    ///
    /// Returns `true` if a task was still running.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    /// Whether the held task has not completed yet.
    pub(crate) fn is_in_flight(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
