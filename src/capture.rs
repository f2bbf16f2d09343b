use std::time::Duration;

use tracing::{debug, info_span, warn, Instrument, Span};

use crate::{
    config::{saturating_millis, CaptureConfig},
    errors::CaptureError,
    events::PausedEventBody,
    scope::{extract_closure_variables, VariableSnapshot},
    session::DebugSession,
    waiter::wait_for_pause,
};

/// Waits for the next pause, giving up after `timeout`. The listener is
/// removed when the wait times out.
pub async fn wait_for_pause_with_timeout<S: DebugSession + ?Sized>(
    session: &S,
    timeout: Duration,
) -> Result<PausedEventBody, CaptureError> {
    match tokio::time::timeout(timeout, wait_for_pause(session)).await {
        Ok(event) => Ok(event?),
        Err(_) => {
            session.pause_slot().clear();
            Err(CaptureError::PauseTimeout {
                timeout_ms: saturating_millis(timeout),
            })
        }
    }
}

/// Waits for the session to pause and captures the closure variables of the
/// paused function.
pub async fn capture_closure_variables<S: DebugSession + ?Sized>(
    session: &S,
    config: &CaptureConfig,
    span: &Span,
) -> Result<VariableSnapshot, CaptureError> {
    let capture_span = info_span!(parent: span, "capture_closure_variables");
    async {
        let event = match config.pause_timeout() {
            Some(timeout) => wait_for_pause_with_timeout(session, timeout).await?,
            None => wait_for_pause(session).await?,
        };
        debug!(
            "Paused ({}) with {} call frames.",
            event.reason,
            event.call_frames.len(),
        );

        let snapshot = extract_closure_variables(session, &event, &Span::current()).await;

        if config.resume_after_capture {
            if let Err(error) = session.resume().await {
                warn!("Failed to resume after capturing: {error}");
            }
        }
        Ok::<_, CaptureError>(snapshot)
    }
    .instrument(capture_span)
    .await
}
