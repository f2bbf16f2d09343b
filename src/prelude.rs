#[doc(hidden)]
pub use crate::{
    capture::{capture_closure_variables, wait_for_pause_with_timeout},
    client::Client,
    config::CaptureConfig,
    errors::{CaptureError, SessionError, SourceMapError},
    events::{Event, PausedEventBody, ScriptParsedEventBody},
    line_reader::{LineReader, StreamLineReader},
    requests::{Command, Request},
    resolver::{resolve_many, resolve_one, ScriptLookupResult, ScriptSource},
    responses::{Response, ResponseBody},
    scope::{extract_closure_variables, VariableSnapshot},
    session::{DebugSession, PauseSlot},
    source_map::{decode_source_map, extract_source_map_url, source_map_ref, SourceMap, SourceMapRef},
    types,
    waiter::{wait_for_pause, PauseWaiter},
};
