//! Small helpers without a better home.

use std::time::{Duration, Instant};

/// Whether `s` is exactly one of `list`.
pub fn string_in_slice<S: AsRef<str>>(s: &str, list: &[S]) -> bool {
    list.iter().any(|k| k.as_ref() == s)
}

/// Logs how long a scope took, at debug level, when dropped.
///
/// ```
/// let _t = findkit_core::util::TimeTrack::new("rebuild index");
/// // ... work ...
/// ```
#[derive(Debug)]
pub struct TimeTrack {
    name: String,
    start: Instant,
}

impl TimeTrack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The line logged on drop: `"{name} took {elapsed:?}"`.
    pub fn report(&self) -> String {
        format!("{} took {:?}", self.name, self.elapsed())
    }
}

impl Drop for TimeTrack {
    fn drop(&mut self) {
        log::debug!("{}", self.report());
    }
}
