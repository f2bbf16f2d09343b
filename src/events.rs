use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::DeserializationError,
    types::{CallFrame, ScriptId},
};

/// Arguments for a `Debugger.paused` event. This is what a breakpoint hit
/// looks like on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PausedEventBody {
    /// Call stack the virtual machine stopped on, innermost first.
    pub call_frames: Vec<CallFrame>,
    /// Pause reason.
    /// Values: 'ambiguous', 'assert', 'debugCommand', 'DOM', 'EventListener',
    /// 'exception', 'instrumentation', 'OOM', 'other', 'promiseRejection',
    /// 'XHR', 'step'
    pub reason: String,
    /// Object containing break-specific auxiliary properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Hit breakpoints IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_breakpoints: Option<Vec<String>>,
}

/// Arguments for a `Debugger.scriptParsed` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptParsedEventBody {
    /// Identifier of the script parsed.
    pub script_id: ScriptId,
    /// URL or name of the script parsed (if any).
    pub url: String,
    /// URL of source map associated with script (if any).
    #[serde(rename = "sourceMapURL", default, skip_serializing_if = "Option::is_none")]
    pub source_map_url: Option<String>,
    /// Content hash of the script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Fired when the virtual machine stopped on breakpoint or exception or
    /// any other stop criteria.
    Paused(PausedEventBody),
    /// Fired when the virtual machine resumed execution.
    Resumed,
    /// Fired when the virtual machine parses a script. This event is also
    /// fired for all known and uncollected scripts upon enabling the debugger.
    ScriptParsed(ScriptParsedEventBody),
}

impl Event {
    /// Builds an event from its method name and parameters. Returns `None`
    /// for methods this crate does not care about.
    pub fn from_method(method: &str, params: Value) -> Result<Option<Self>, DeserializationError> {
        Ok(match method {
            "Debugger.paused" => Some(Event::Paused(serde_json::from_value(params)?)),
            "Debugger.resumed" => Some(Event::Resumed),
            "Debugger.scriptParsed" => Some(Event::ScriptParsed(serde_json::from_value(params)?)),
            _ => None,
        })
    }
}
