use std::time::Duration;

use super::{Error, ErrorKind};

#[derive(Debug)]
pub(super) struct TimedOut {
    duration: Duration,
}

impl Error {
    pub fn timed_out(duration: Duration) -> Error {
        ErrorKind::TimedOut(TimedOut { duration }).into()
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::TimedOut(_))
    }
}

impl std::error::Error for TimedOut {}

impl core::fmt::Display for TimedOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation timed out after {:?}", self.duration)
    }
}
