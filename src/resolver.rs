use tracing::{debug, warn, Span};

use crate::{
    errors::SessionError,
    requests::GetScriptSourceArguments,
    session::DebugSession,
    source_map::{decode_source_map, source_map_ref, SourceMap, SourceMapRef},
    types::ScriptId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    pub script_id: ScriptId,
    pub source: String,
    /// Wasm bytecode, base64-encoded. The source is empty in that case.
    pub bytecode: Option<String>,
}

impl ScriptSource {
    /// Decodes the inline source map embedded in this script. External
    /// references aren't followed.
    pub fn inline_source_map(&self, span: &Span) -> Option<SourceMap> {
        match source_map_ref(&self.source)? {
            SourceMapRef::Inline(payload) => decode_source_map(payload, span),
            SourceMapRef::External(url) => {
                debug!(parent: span, "Script {} references external source map {url}.", self.script_id);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLookupResult {
    Resolved(ScriptSource),
    Failed { script_id: ScriptId, message: String },
}

impl ScriptLookupResult {
    pub fn script_id(&self) -> &ScriptId {
        match self {
            ScriptLookupResult::Resolved(source) => &source.script_id,
            ScriptLookupResult::Failed { script_id, .. } => script_id,
        }
    }
    pub fn source(&self) -> Option<&ScriptSource> {
        match self {
            ScriptLookupResult::Resolved(source) => Some(source),
            ScriptLookupResult::Failed { .. } => None,
        }
    }
}

/// Asks the debugger for one script's source. A failure is logged here so
/// both resolvers report it the same way.
async fn fetch<S: DebugSession + ?Sized>(
    session: &S,
    script_id: &ScriptId,
    span: &Span,
) -> Result<ScriptSource, SessionError> {
    let result = session
        .get_script_source(GetScriptSourceArguments {
            script_id: script_id.clone(),
        })
        .await;
    match result {
        Ok(response) => Ok(ScriptSource {
            script_id: script_id.clone(),
            source: response.script_source,
            bytecode: response.bytecode,
        }),
        Err(error) => {
            warn!(parent: span, "Failed to get source of script {script_id}: {error}");
            Err(error)
        }
    }
}

/// Fetches the source of a single script. A failed lookup is logged and
/// reported as `None`.
pub async fn resolve_one<S: DebugSession + ?Sized>(
    session: &S,
    script_id: &ScriptId,
    span: &Span,
) -> Option<ScriptSource> {
    fetch(session, script_id, span).await.ok()
}

/// Fetches the sources of `script_ids` one after another.
///
/// The result has one entry per requested id, in request order. A failing
/// id becomes a [`ScriptLookupResult::Failed`] entry and the remaining ids
/// are still resolved.
pub async fn resolve_many<S: DebugSession + ?Sized>(
    session: &S,
    script_ids: &[ScriptId],
    span: &Span,
) -> Vec<ScriptLookupResult> {
    let mut results = Vec::with_capacity(script_ids.len());
    for script_id in script_ids {
        let result = match fetch(session, script_id, span).await {
            Ok(source) => ScriptLookupResult::Resolved(source),
            Err(error) => ScriptLookupResult::Failed {
                script_id: script_id.clone(),
                message: error.to_string(),
            },
        };
        results.push(result);
    }
    results
}
