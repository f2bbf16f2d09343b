use std::time::Duration;

use serde::Deserialize;

use crate::errors::DeserializationError;

/// How a closure capture is carried out.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConfig {
    /// Upper bound for waiting on the pause event. Waits forever if absent.
    pub pause_timeout_ms: Option<u64>,
    /// Whether to send `Debugger.resume` once the variables are captured.
    pub resume_after_capture: bool,
}

impl CaptureConfig {
    pub fn from_json(json: &str) -> Result<Self, DeserializationError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_pause_timeout(mut self, timeout: Duration) -> Self {
        self.pause_timeout_ms = Some(saturating_millis(timeout));
        self
    }

    pub fn pause_timeout(&self) -> Option<Duration> {
        self.pause_timeout_ms.map(Duration::from_millis)
    }
}

/// Whole milliseconds in `duration`, clamped to `u64::MAX`.
pub(crate) fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
