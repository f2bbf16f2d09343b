use serde::Serialize;

use crate::types::{RemoteObjectId, ScriptId};

/// Arguments for a `Runtime.getProperties` request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertiesArguments {
    /// Identifier of the object to return properties for.
    pub object_id: RemoteObjectId,
    /// If true, returns properties belonging only to the element itself, not
    /// to its prototype chain.
    pub own_properties: bool,
    /// If true, returns accessor properties (with getter/setter) only;
    /// internal properties are not returned either.
    pub accessor_properties_only: bool,
    /// Whether preview should be generated for the results.
    pub generate_preview: bool,
}

impl GetPropertiesArguments {
    /// The flags used to enumerate a scope object: the whole prototype chain,
    /// data and accessor properties alike, no previews.
    pub fn for_scope(object_id: RemoteObjectId) -> Self {
        Self {
            object_id,
            own_properties: false,
            accessor_properties_only: false,
            generate_preview: false,
        }
    }
}

/// Arguments for a `Debugger.getScriptSource` request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetScriptSourceArguments {
    /// Id of the script to get source for.
    pub script_id: ScriptId,
}

/// Arguments for a `Debugger.resume` request.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeArguments {
    /// Set to true to terminate execution upon resuming execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_on_resume: Option<bool>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "method", content = "params")]
pub enum Command {
    /// Enables the debugger for the session. The debugger answers by
    /// replaying `Debugger.scriptParsed` for every known script.
    #[serde(rename = "Debugger.enable")]
    Enable,
    /// Resumes JavaScript execution.
    #[serde(rename = "Debugger.resume")]
    Resume(ResumeArguments),
    /// Returns properties of a given object. Object group of the result is
    /// inherited from the target object.
    #[serde(rename = "Runtime.getProperties")]
    GetProperties(GetPropertiesArguments),
    /// Returns source for the script with given id.
    #[serde(rename = "Debugger.getScriptSource")]
    GetScriptSource(GetScriptSourceArguments),
}

impl Command {
    pub fn method(&self) -> &'static str {
        match self {
            Command::Enable => "Debugger.enable",
            Command::Resume(_) => "Debugger.resume",
            Command::GetProperties(_) => "Runtime.getProperties",
            Command::GetScriptSource(_) => "Debugger.getScriptSource",
        }
    }
}

/// Represents a request to the debugger.
///
/// Serialized as `{"id": …, "method": …, "params": …}`.
#[derive(Serialize, Debug, Clone)]
pub struct Request {
    /// Message id, echoed back by the matching response.
    pub id: u64,
    #[serde(flatten)]
    pub command: Command,
}
