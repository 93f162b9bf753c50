use super::Error;

/// Error when the caller cancels the execution context of a pending call.
#[derive(Debug)]
pub(super) struct Cancelled;

impl std::error::Error for Cancelled {}

impl core::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl Error {
    pub fn cancelled() -> Error {
        Error::from(super::ErrorKind::Cancelled(Cancelled))
    }

    /// Returns `true` if the operation was cancelled or ran past its deadline.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.root().kind(),
            super::ErrorKind::Cancelled(_) | super::ErrorKind::TimedOut(_)
        )
    }
}
