use std::sync::Mutex;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::{
    errors::SessionError,
    events::PausedEventBody,
    requests::Command,
    responses::{GetPropertiesResponse, GetScriptSourceResponse, ResponseBody},
    session::{DebugSession, PauseSlot},
    types::{
        CallFrame, Location, PropertyDescriptor, RemoteObject, RemoteObjectId, Scope, ScopeType,
        ScriptId,
    },
};

/// An in-memory session answering from canned tables.
#[derive(Debug, Default)]
pub struct FakeSession {
    properties: FxHashMap<RemoteObjectId, Vec<PropertyDescriptor>>,
    scripts: FxHashMap<ScriptId, String>,
    sent: Mutex<Vec<Command>>,
    pause_slot: PauseSlot,
}

impl FakeSession {
    pub fn with_properties(mut self, object_id: &str, properties: Vec<PropertyDescriptor>) -> Self {
        self.properties.insert(object_id.into(), properties);
        self
    }
    pub fn with_script(mut self, script_id: &str, source: &str) -> Self {
        self.scripts.insert(script_id.into(), source.to_string());
        self
    }
    pub fn sent(&self) -> Vec<Command> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DebugSession for FakeSession {
    async fn send_command(&self, command: Command) -> Result<ResponseBody, SessionError> {
        self.sent.lock().unwrap().push(command.clone());
        match command {
            Command::Enable | Command::Resume(_) => Ok(ResponseBody::Empty),
            Command::GetProperties(args) => self
                .properties
                .get(&args.object_id)
                .map(|result| {
                    ResponseBody::GetProperties(GetPropertiesResponse {
                        result: result.clone(),
                    })
                })
                .ok_or_else(|| not_found("Could not find object with given id")),
            Command::GetScriptSource(args) => self
                .scripts
                .get(&args.script_id)
                .map(|source| {
                    ResponseBody::GetScriptSource(GetScriptSourceResponse {
                        script_source: source.clone(),
                        bytecode: None,
                    })
                })
                .ok_or_else(|| not_found("No script for id")),
        }
    }

    fn pause_slot(&self) -> &PauseSlot {
        &self.pause_slot
    }
}

fn not_found(message: &str) -> SessionError {
    SessionError::ProtocolError {
        code: -32000,
        message: message.to_string(),
    }
}

pub fn scope(kind: ScopeType, object_id: &str) -> Scope {
    Scope {
        kind,
        object: RemoteObject {
            kind: "object".to_string(),
            object_id: Some(object_id.into()),
            ..Default::default()
        },
        name: None,
        start_location: None,
        end_location: None,
    }
}

pub fn frame(function_name: &str, scope_chain: Vec<Scope>) -> CallFrame {
    CallFrame {
        call_frame_id: format!("frame-{function_name}"),
        function_name: function_name.to_string(),
        location: Location {
            script_id: "1".into(),
            line_number: 0,
            column_number: None,
        },
        url: None,
        scope_chain,
        this_object: None,
    }
}

pub fn paused_event(call_frames: Vec<CallFrame>, reason: &str) -> PausedEventBody {
    PausedEventBody {
        call_frames,
        reason: reason.to_string(),
        data: None,
        hit_breakpoints: None,
    }
}

pub fn number(value: i64) -> RemoteObject {
    RemoteObject::primitive("number", value.into())
}

pub fn data_property(name: &str, value: RemoteObject) -> PropertyDescriptor {
    PropertyDescriptor {
        name: name.to_string(),
        value: Some(value),
        writable: Some(true),
        configurable: true,
        enumerable: true,
        ..Default::default()
    }
}

pub fn accessor_property(name: &str) -> PropertyDescriptor {
    PropertyDescriptor {
        name: name.to_string(),
        get: Some(RemoteObject {
            kind: "function".to_string(),
            ..Default::default()
        }),
        configurable: true,
        ..Default::default()
    }
}
