use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::{
    errors::SessionError,
    events::PausedEventBody,
    requests::{Command, GetPropertiesArguments, GetScriptSourceArguments, ResumeArguments},
    responses::{GetPropertiesResponse, GetScriptSourceResponse, ResponseBody},
};

pub type PauseResult = Result<PausedEventBody, SessionError>;

/// The single outstanding "next pause" registration of a session.
///
/// A registration is fulfilled at most once: delivering takes the sender out
/// of the slot, so later pause events find it empty until someone registers
/// again.
#[derive(Debug, Default)]
pub struct PauseSlot {
    pending: Mutex<Option<oneshot::Sender<PauseResult>>>,
}

impl PauseSlot {
    fn pending(&self) -> MutexGuard<'_, Option<oneshot::Sender<PauseResult>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs a fresh listener. A listener that is still waiting gets
    /// resolved with [`SessionError::ListenerReplaced`].
    pub fn register(&self) -> oneshot::Receiver<PauseResult> {
        let (sender, receiver) = oneshot::channel();
        if let Some(previous) = self.pending().replace(sender) {
            if !previous.is_closed() {
                warn!("Replacing a pause listener that is still waiting.");
                let _ = previous.send(Err(SessionError::ListenerReplaced));
            }
        }
        receiver
    }

    /// Hands `event` to the registered listener, if any. Returns whether
    /// someone received it.
    pub fn deliver(&self, event: PausedEventBody) -> bool {
        let Some(sender) = self.pending().take() else {
            debug!("Pause event arrived without a registered listener.");
            return false;
        };
        sender.send(Ok(event)).is_ok()
    }

    /// Resolves a waiting listener with [`SessionError::Closed`].
    pub fn close(&self) {
        if let Some(sender) = self.pending().take() {
            let _ = sender.send(Err(SessionError::Closed));
        }
    }

    /// Drops the current registration without resolving it.
    pub fn clear(&self) {
        self.pending().take();
    }

    pub fn is_registered(&self) -> bool {
        self.pending().as_ref().is_some_and(|it| !it.is_closed())
    }
}

/// A live channel to a script debugger. The caller owns it for the whole
/// debugging episode; nothing in this crate opens or closes one.
#[async_trait]
pub trait DebugSession: Send + Sync {
    /// Sends `command` and waits for its response.
    async fn send_command(&self, command: Command) -> Result<ResponseBody, SessionError>;

    /// Where `Debugger.paused` events of this session are delivered.
    fn pause_slot(&self) -> &PauseSlot;

    async fn enable(&self) -> Result<(), SessionError> {
        self.send_command(Command::Enable).await.map(|_| ())
    }

    async fn resume(&self) -> Result<(), SessionError> {
        self.send_command(Command::Resume(ResumeArguments::default()))
            .await
            .map(|_| ())
    }

    async fn get_properties(
        &self,
        args: GetPropertiesArguments,
    ) -> Result<GetPropertiesResponse, SessionError> {
        match self.send_command(Command::GetProperties(args)).await? {
            ResponseBody::GetProperties(response) => Ok(response),
            _ => Err(SessionError::UnexpectedResponse {
                method: "Runtime.getProperties",
            }),
        }
    }

    async fn get_script_source(
        &self,
        args: GetScriptSourceArguments,
    ) -> Result<GetScriptSourceResponse, SessionError> {
        match self.send_command(Command::GetScriptSource(args)).await? {
            ResponseBody::GetScriptSource(response) => Ok(response),
            _ => Err(SessionError::UnexpectedResponse {
                method: "Debugger.getScriptSource",
            }),
        }
    }
}
