use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{warn, Span};

use crate::errors::SourceMapError;

lazy_static! {
    static ref SOURCE_MAPPING_URL: Regex =
        Regex::new(r#"(?m)//[#@] sourceMappingURL=([^\s'"]+)[ \t]*\r?$"#).unwrap();
}

const INLINE_MARKER: &str = "base64,";

/// A source map document. Only the common fields are typed; everything else
/// (index map `sections`, vendor extensions) is kept in `extra` so that the
/// document serializes back unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMapRef<'a> {
    /// The base64 payload of a `data:` URL.
    Inline(&'a str),
    /// Anything else, left unresolved.
    External(&'a str),
}

impl<'a> SourceMapRef<'a> {
    pub fn value(&self) -> &'a str {
        match *self {
            SourceMapRef::Inline(it) | SourceMapRef::External(it) => it,
        }
    }
}

/// Finds the `//# sourceMappingURL=` (or legacy `//@`) marker in `text`.
///
/// When several markers are present, the first one from the top wins.
pub fn source_map_ref(text: &str) -> Option<SourceMapRef<'_>> {
    let value = SOURCE_MAPPING_URL.captures(text)?.get(1)?.as_str();
    Some(match value.split_once(INLINE_MARKER) {
        Some((_, payload)) => SourceMapRef::Inline(payload),
        None => SourceMapRef::External(value),
    })
}

/// Like [`source_map_ref`], but flattened: the inline payload or the
/// external reference, whichever the marker holds.
pub fn extract_source_map_url(text: &str) -> Option<&str> {
    source_map_ref(text).map(|it| it.value())
}

/// Decodes an inline base64 payload into a [`SourceMap`]. Failures are
/// logged and yield `None`.
pub fn decode_source_map(payload: &str, span: &Span) -> Option<SourceMap> {
    match try_decode_source_map(payload) {
        Ok(source_map) => Some(source_map),
        Err(error) => {
            warn!(parent: span, "Failed to decode inline source map: {error}");
            None
        }
    }
}

fn try_decode_source_map(payload: &str) -> Result<SourceMap, SourceMapError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}
