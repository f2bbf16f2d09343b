use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::{self, oneshot},
    task::JoinHandle,
};
use tracing::{debug, error, trace, warn};

use crate::{
    errors::{DeserializationError, SessionError},
    events::{Event, ScriptParsedEventBody},
    line_reader::LineReader,
    requests::{Command, Request},
    responses::{Response, ResponseBody, ResponseError},
    session::{DebugSession, PauseSlot},
    types::ScriptId,
};

type ResponseSender = oneshot::Sender<Result<Value, ResponseError>>;

/// Raw shape shared by responses and events.
#[derive(Deserialize, Debug)]
struct IncomingMessage {
    id: Option<u64>,
    method: Option<String>,
    #[serde(default)]
    params: Value,
    result: Option<Value>,
    error: Option<ResponseError>,
}

#[derive(Debug, Default)]
struct PendingResponses {
    senders: FxHashMap<u64, ResponseSender>,
    closed: bool,
}

/// State the dispatcher task shares with the client.
#[derive(Debug, Default)]
struct Shared {
    pending: Mutex<PendingResponses>,
    pause_slot: PauseSlot,
    scripts: Mutex<Vec<ScriptParsedEventBody>>,
}

impl Shared {
    fn pending(&self) -> MutexGuard<'_, PendingResponses> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn scripts(&self) -> MutexGuard<'_, Vec<ScriptParsedEventBody>> {
        self.scripts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle_message(&self, line: &str) -> Result<(), DeserializationError> {
        let message: IncomingMessage = serde_json::from_str(line)?;
        if let Some(id) = message.id {
            let result = match message.error {
                Some(error) => Err(error),
                None => Ok(message.result.unwrap_or(Value::Null)),
            };
            self.handle_response(Response { id, result });
        } else if let Some(method) = message.method {
            match Event::from_method(&method, message.params)? {
                Some(event) => self.handle_event(event),
                None => trace!("Ignoring event `{method}`."),
            }
        } else {
            warn!("Dropping a message that is neither a response nor an event.");
        }
        Ok(())
    }

    fn handle_response(&self, response: Response) {
        let Some(sender) = self.pending().senders.remove(&response.id) else {
            warn!("Received a response to unknown request {}.", response.id);
            return;
        };
        if sender.send(response.result).is_err() {
            debug!("Request {} was abandoned before its response arrived.", response.id);
        }
    }

    fn handle_event(&self, event: Event) {
        match event {
            Event::Paused(body) => {
                debug!("Debugger paused: {}", body.reason);
                if !self.pause_slot.deliver(body) {
                    debug!("Nobody was waiting for this pause.");
                }
            }
            Event::Resumed => debug!("Debugger resumed."),
            Event::ScriptParsed(body) => {
                trace!("Script {} parsed from `{}`.", body.script_id, body.url);
                self.scripts().push(body);
            }
        }
    }

    /// Fails every outstanding request and the pause listener.
    fn close(&self) {
        let mut pending = self.pending();
        pending.closed = true;
        pending.senders.clear();
        drop(pending);
        self.pause_slot.close();
    }
}

async fn dispatch<R: LineReader>(mut reader: R, shared: Arc<Shared>) {
    loop {
        let line = match reader.read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("The debugger closed the channel.");
                break;
            }
            Err(error) => {
                error!("Failed to read from the debugger channel: {error}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        trace!("Received: {line}");
        if let Err(error) = shared.handle_message(&line) {
            error!("Dropping malformed message: {error}");
        }
    }
    shared.close();
}

/// A [`DebugSession`] speaking newline-delimited JSON over a byte stream.
///
/// Responses are matched to requests by id; `Debugger.paused` goes to the
/// session's [`PauseSlot`] and `Debugger.scriptParsed` is recorded.
pub struct Client<W> {
    shared: Arc<Shared>,
    writer: sync::Mutex<W>,
    next_id: AtomicU64,
}

impl<W: AsyncWrite + Unpin + Send> Client<W> {
    /// Starts reading from `reader` on a background task. The task ends once
    /// the reader reaches end of stream.
    pub fn connect<R>(reader: R, writer: W) -> (Self, JoinHandle<()>)
    where
        R: LineReader + Send + 'static,
    {
        let shared = Arc::<Shared>::default();
        let dispatcher = tokio::spawn(dispatch(reader, shared.clone()));
        let client = Self {
            shared,
            writer: sync::Mutex::new(writer),
            next_id: AtomicU64::new(1),
        };
        (client, dispatcher)
    }

    /// Scripts announced so far, in the order the debugger parsed them.
    pub fn parsed_scripts(&self) -> Vec<ScriptParsedEventBody> {
        self.shared.scripts().clone()
    }

    pub fn script_ids_for_url(&self, url: &str) -> Vec<ScriptId> {
        self.shared
            .scripts()
            .iter()
            .filter(|it| it.url == url)
            .map(|it| it.script_id.clone())
            .collect()
    }

    async fn write(&self, request: &Request) -> Result<(), SessionError> {
        let json = serde_json::to_string(request)?;
        trace!("Sending `{}` ({}): {json}", request.command.method(), request.id);
        let mut writer = self.writer.lock().await;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> DebugSession for Client<W> {
    async fn send_command(&self, command: Command) -> Result<ResponseBody, SessionError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = oneshot::channel();
        {
            let mut pending = self.shared.pending();
            if pending.closed {
                return Err(SessionError::Closed);
            }
            pending.senders.insert(id, sender);
        }

        let request = Request { id, command };
        if let Err(error) = self.write(&request).await {
            self.shared.pending().senders.remove(&id);
            return Err(error);
        }

        match receiver.await.map_err(|_| SessionError::Closed)? {
            Ok(result) => Ok(ResponseBody::from_result(&request.command, result)?),
            Err(error) => Err(SessionError::ProtocolError {
                code: error.code,
                message: error.message,
            }),
        }
    }

    fn pause_slot(&self) -> &PauseSlot {
        &self.shared.pause_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        line_reader::StreamLineReader,
        requests::GetPropertiesArguments,
        types::{RemoteObject, RemoteObjectId},
        waiter::wait_for_pause,
    };
    use serde_json::json;
    use tokio::io::{
        duplex, split, AsyncBufReadExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
    };

    type TestClient = Client<WriteHalf<DuplexStream>>;

    /// The debugger's end of the channel.
    struct Debugger {
        requests: Lines<BufReader<ReadHalf<DuplexStream>>>,
        writer: WriteHalf<DuplexStream>,
    }

    impl Debugger {
        async fn next_request(&mut self) -> Value {
            let line = self.requests.next_line().await.unwrap().unwrap();
            serde_json::from_str(&line).unwrap()
        }
        async fn send_raw(&mut self, bytes: &[u8]) {
            self.writer.write_all(bytes).await.unwrap();
        }
        async fn send(&mut self, message: Value) {
            let mut line = message.to_string();
            line.push('\n');
            self.writer.write_all(line.as_bytes()).await.unwrap();
        }
    }

    fn connect() -> (TestClient, JoinHandle<()>, Debugger) {
        let (client_end, debugger_end) = duplex(64 * 1024);
        let (client_read, client_write) = split(client_end);
        let (client, dispatcher) = Client::connect(StreamLineReader::new(client_read), client_write);
        let (debugger_read, debugger_write) = split(debugger_end);
        let debugger = Debugger {
            requests: BufReader::new(debugger_read).lines(),
            writer: debugger_write,
        };
        (client, dispatcher, debugger)
    }

    #[tokio::test]
    async fn request_and_response_are_matched_by_id() {
        let (client, _dispatcher, mut debugger) = connect();
        let debugger = tokio::spawn(async move {
            let request = debugger.next_request().await;
            assert_eq!(request["method"], "Runtime.getProperties");
            assert_eq!(request["params"]["objectId"], "scope-1");
            assert_eq!(request["params"]["ownProperties"], false);
            debugger
                .send(json!({
                    "id": request["id"],
                    "result": { "result": [
                        { "name": "count", "value": { "type": "number", "value": 3 }, "configurable": true, "enumerable": true },
                    ] },
                }))
                .await;
            debugger
        });

        let response = client
            .get_properties(GetPropertiesArguments::for_scope(RemoteObjectId::from("scope-1")))
            .await
            .unwrap();
        assert_eq!(response.result.len(), 1);
        assert_eq!(
            response.result[0].value,
            Some(RemoteObject::primitive("number", json!(3))),
        );
        debugger.await.unwrap();
    }

    #[tokio::test]
    async fn error_responses_become_protocol_errors() {
        let (client, _dispatcher, mut debugger) = connect();
        tokio::spawn(async move {
            let request = debugger.next_request().await;
            debugger
                .send(json!({
                    "id": request["id"],
                    "error": { "code": -32000, "message": "No script for id: 9" },
                }))
                .await;
            debugger
        });

        let error = client
            .get_script_source(crate::requests::GetScriptSourceArguments {
                script_id: "9".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            SessionError::ProtocolError { code: -32000, .. }
        ));
    }

    #[tokio::test]
    async fn events_reach_the_waiter_and_registry() {
        let (client, _dispatcher, mut debugger) = connect();
        let waiter = wait_for_pause(&client);
        debugger
            .send(json!({
                "method": "Debugger.scriptParsed",
                "params": { "scriptId": "5", "url": "file:///app.js" },
            }))
            .await;
        debugger
            .send(json!({ "method": "Runtime.executionContextCreated", "params": {} }))
            .await;
        debugger.send(json!("garbage")).await;
        debugger
            .send(json!({
                "method": "Debugger.paused",
                "params": { "callFrames": [], "reason": "other" },
            }))
            .await;

        let event = waiter.await.unwrap();
        assert_eq!(event.reason, "other");
        assert_eq!(client.script_ids_for_url("file:///app.js"), vec![ScriptId::from("5")]);
        assert!(client.script_ids_for_url("file:///other.js").is_empty());
        assert_eq!(client.parsed_scripts().len(), 1);
    }

    #[tokio::test]
    async fn invalid_utf8_line_keeps_the_session_alive() {
        let (client, dispatcher, mut debugger) = connect();
        let waiter = wait_for_pause(&client);
        debugger
            .send_raw(b"{\"method\":\"Runtime.consoleAPICalled\",\"params\":{\"x\":\"\xff\"}}\n")
            .await;
        debugger.send_raw(b"\xfe\xfd not even json\n").await;
        debugger
            .send(json!({
                "method": "Debugger.paused",
                "params": { "callFrames": [], "reason": "other" },
            }))
            .await;

        assert_eq!(waiter.await.unwrap().reason, "other");
        assert!(!dispatcher.is_finished());

        let responder = tokio::spawn(async move {
            let request = debugger.next_request().await;
            debugger.send(json!({ "id": request["id"], "result": {} })).await;
            debugger
        });
        client.enable().await.unwrap();
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn closing_the_channel_fails_outstanding_work() {
        let (client, dispatcher, mut debugger) = connect();
        let waiter = wait_for_pause(&client);
        tokio::spawn(async move {
            debugger.next_request().await;
            drop(debugger);
        });

        assert!(matches!(client.enable().await, Err(SessionError::Closed)));
        assert!(matches!(waiter.await, Err(SessionError::Closed)));
        dispatcher.await.unwrap();
        assert!(matches!(client.resume().await, Err(SessionError::Closed)));
    }
}
