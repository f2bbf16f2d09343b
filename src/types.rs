use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_via_str;

/// Identifier the debugger assigns to every parsed script.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ScriptId(pub String);

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScriptId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque handle to an object living in the debuggee. Only valid while the
/// debuggee stays paused.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RemoteObjectId(pub String);

impl fmt::Display for RemoteObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Mirror of a debuggee value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// Values: 'object', 'function', 'undefined', 'string', 'number',
    /// 'boolean', 'symbol', 'bigint'
    #[serde(rename = "type")]
    pub kind: String,
    /// Object subtype hint, e.g. 'array', 'null', 'regexp', 'date', 'map'.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Object class (constructor) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Remote object value in case of primitive values or JSON values (if it
    /// was requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Primitive value which can not be JSON-stringified, e.g. `NaN`,
    /// `Infinity` or `-0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unserializable_value: Option<String>,
    /// String representation of the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unique object identifier (for non-primitive values).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RemoteObjectId>,
}

impl RemoteObject {
    pub fn primitive(kind: &str, value: Value) -> Self {
        Self {
            kind: kind.to_string(),
            value: Some(value),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub script_id: ScriptId,
    /// Line number in the script (0-based).
    pub line_number: usize,
    /// Column number in the script (0-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeType {
    Global,
    Local,
    With,
    Closure,
    Catch,
    Block,
    Script,
    Eval,
    Module,
    WasmExpressionStack,
    Other(String),
}

impl FromStr for ScopeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(ScopeType::Global),
            "local" => Ok(ScopeType::Local),
            "with" => Ok(ScopeType::With),
            "closure" => Ok(ScopeType::Closure),
            "catch" => Ok(ScopeType::Catch),
            "block" => Ok(ScopeType::Block),
            "script" => Ok(ScopeType::Script),
            "eval" => Ok(ScopeType::Eval),
            "module" => Ok(ScopeType::Module),
            "wasm-expression-stack" => Ok(ScopeType::WasmExpressionStack),
            other => Ok(ScopeType::Other(other.to_string())),
        }
    }
}

#[allow(clippy::to_string_trait_impl)]
impl ToString for ScopeType {
    fn to_string(&self) -> String {
        match self {
            ScopeType::Global => "global",
            ScopeType::Local => "local",
            ScopeType::With => "with",
            ScopeType::Closure => "closure",
            ScopeType::Catch => "catch",
            ScopeType::Block => "block",
            ScopeType::Script => "script",
            ScopeType::Eval => "eval",
            ScopeType::Module => "module",
            ScopeType::WasmExpressionStack => "wasm-expression-stack",
            ScopeType::Other(other) => other.as_str(),
        }
        .to_string()
    }
}

serde_via_str! { ScopeType }

/// One entry of a call frame's scope chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    #[serde(rename = "type")]
    pub kind: ScopeType,
    /// Object representing the scope. For `global` and `with` scopes it
    /// represents the actual object; for the rest of the scopes, it is an
    /// artificial transient object enumerating scope variables as its
    /// properties.
    pub object: RemoteObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Location in the source code where the scope starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Location>,
    /// Location in the source code where the scope ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_location: Option<Location>,
}

/// A paused stack frame. Frames arrive innermost first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    pub call_frame_id: String,
    /// Name of the JavaScript function called on this call frame.
    pub function_name: String,
    /// Location in the source code.
    pub location: Location,
    /// JavaScript script name or url. Deprecated upstream but still sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Scope chain for this call frame, innermost first.
    pub scope_chain: Vec<Scope>,
    #[serde(rename = "this", default, skip_serializing_if = "Option::is_none")]
    pub this_object: Option<RemoteObject>,
}

/// A property of a remote object. Accessor properties carry `get`/`set`
/// instead of a `value`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name or symbol description.
    pub name: String,
    /// The value associated with the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RemoteObject>,
    /// True if the value associated with the property may be changed (data
    /// descriptors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,
    /// A function which serves as a getter for the property, or `undefined`
    /// if there is no getter (accessor descriptors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<RemoteObject>,
    /// A function which serves as a setter for the property, or `undefined`
    /// if there is no setter (accessor descriptors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<RemoteObject>,
    #[serde(default)]
    pub configurable: bool,
    #[serde(default)]
    pub enumerable: bool,
    /// True if the result was thrown during the evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_thrown: Option<bool>,
    /// True if the property is owned for the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_own: Option<bool>,
}
