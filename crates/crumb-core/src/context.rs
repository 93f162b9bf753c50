use crate::{Error, Result};

use std::{future::Future, sync::Arc, time::Duration};
use tokio::{sync::watch, time::Instant};

/// Cancellable execution context carried by every terminal and persistence
/// call.
///
/// Clones share the cancellation flag: cancelling any clone cancels them all.
/// A pending connection call driven through [`Context::run`] is abandoned as
/// soon as the context is cancelled or its deadline passes, and the call
/// returns a cancellation error instead of its result.
#[derive(Debug, Clone)]
pub struct Context {
    cancel: Arc<watch::Sender<bool>>,
    deadline: Option<Deadline>,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    timeout: Duration,
}

impl Context {
    /// A context that is never cancelled unless asked to.
    pub fn background() -> Context {
        let (cancel, _) = watch::channel(false);
        Context {
            cancel: Arc::new(cancel),
            deadline: None,
        }
    }

    /// A context that times out `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Context {
        Context::background().timeout(timeout)
    }

    /// A clone of this context bounded by `timeout` from now. Keeps the
    /// earlier deadline if this context already has one.
    pub fn timeout(&self, timeout: Duration) -> Context {
        let deadline = Deadline {
            at: Instant::now() + timeout,
            timeout,
        };

        Context {
            cancel: self.cancel.clone(),
            deadline: match self.deadline {
                Some(current) if current.at <= deadline.at => Some(current),
                _ => Some(deadline),
            },
        }
    }

    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Returns the error a call under this context should fail with, if any.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::cancelled());
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline.at => {
                Err(Error::timed_out(deadline.timeout))
            }
            _ => Ok(()),
        }
    }

    /// Drives `fut` to completion unless the context is cancelled or times
    /// out first.
    pub async fn run<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        self.check()?;

        let mut cancelled = self.cancel.subscribe();
        let deadline = self.deadline;

        let res = tokio::select! {
            biased;
            _ = cancelled.wait_for(|cancelled| *cancelled) => Err(Error::cancelled()),
            _ = sleep_until(deadline) => Err(deadline_error(deadline)),
            res = fut => res,
        };

        if let Err(err) = &res {
            if err.is_cancelled() {
                tracing::warn!(error = %err, "pending connection call abandoned");
            }
        }

        res
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::background()
    }
}

async fn sleep_until(deadline: Option<Deadline>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.at).await,
        None => std::future::pending().await,
    }
}

fn deadline_error(deadline: Option<Deadline>) -> Error {
    match deadline {
        Some(deadline) => Error::timed_out(deadline.timeout),
        None => Error::cancelled(),
    }
}
