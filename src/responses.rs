use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{errors::DeserializationError, requests::Command, types::PropertyDescriptor};

/// Error object returned instead of a `result` when a request fails.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertiesResponse {
    /// Object properties.
    pub result: Vec<PropertyDescriptor>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetScriptSourceResponse {
    /// Script source (empty in case of Wasm bytecode).
    pub script_source: String,
    /// Wasm bytecode, base64-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    GetProperties(GetPropertiesResponse),
    GetScriptSource(GetScriptSourceResponse),
    /// Commands whose result carries nothing of interest.
    Empty,
}

impl ResponseBody {
    /// Interprets the raw `result` of a response to `command`.
    pub fn from_result(command: &Command, result: Value) -> Result<Self, DeserializationError> {
        Ok(match command {
            Command::GetProperties(_) => ResponseBody::GetProperties(serde_json::from_value(result)?),
            Command::GetScriptSource(_) => {
                ResponseBody::GetScriptSource(serde_json::from_value(result)?)
            }
            Command::Enable | Command::Resume(_) => ResponseBody::Empty,
        })
    }
}

/// Represents a response message, either carrying a `result` or an `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The id of the request this answers.
    pub id: u64,
    pub result: Result<Value, ResponseError>,
}
