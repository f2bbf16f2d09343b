use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot;

use crate::{
    errors::SessionError,
    events::PausedEventBody,
    session::{DebugSession, PauseResult},
};

/// Resolves with the next `Debugger.paused` event of a session.
///
/// Created by [`wait_for_pause`]. Resolves exactly once; pause events emitted
/// after that go to whoever registers next. No timeout is applied here; see
/// [`crate::capture::wait_for_pause_with_timeout`] for a bounded wait.
#[derive(Debug)]
#[must_use = "a pause waiter does nothing unless awaited"]
pub struct PauseWaiter {
    receiver: oneshot::Receiver<PauseResult>,
}

impl Future for PauseWaiter {
    type Output = Result<PausedEventBody, SessionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or_else(|_| Err(SessionError::Closed)))
    }
}

/// Registers a one-shot listener for the next pause of `session`.
///
/// Only one wait per session may be outstanding; registering a second one
/// resolves the first with [`SessionError::ListenerReplaced`].
pub fn wait_for_pause<S: DebugSession + ?Sized>(session: &S) -> PauseWaiter {
    PauseWaiter {
        receiver: session.pause_slot().register(),
    }
}
