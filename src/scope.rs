use rustc_hash::FxHashMap;
use tracing::{debug, warn, Span};

use crate::{
    events::PausedEventBody,
    requests::GetPropertiesArguments,
    session::DebugSession,
    types::{RemoteObject, Scope, ScopeType},
};

/// Variables captured by the closure of a paused function, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableSnapshot {
    variables: FxHashMap<String, RemoteObject>,
}

impl VariableSnapshot {
    pub fn get(&self, name: &str) -> Option<&RemoteObject> {
        self.variables.get(name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
    pub fn len(&self) -> usize {
        self.variables.len()
    }
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RemoteObject)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Later inserts of the same name win.
    pub fn insert(&mut self, name: String, value: RemoteObject) -> Option<RemoteObject> {
        self.variables.insert(name, value)
    }
}

impl IntoIterator for VariableSnapshot {
    type Item = (String, RemoteObject);
    type IntoIter = std::collections::hash_map::IntoIter<String, RemoteObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.into_iter()
    }
}

/// Collects the closure variables visible from the innermost frame of `event`.
///
/// Closure scopes are enumerated one after another in scope-chain order; a
/// name seen in a later scope overwrites the earlier value. Properties
/// without a value (accessors, unresolved entries) are left out. A scope
/// whose properties can't be fetched is logged and skipped.
pub async fn extract_closure_variables<S: DebugSession + ?Sized>(
    session: &S,
    event: &PausedEventBody,
    span: &Span,
) -> VariableSnapshot {
    let mut snapshot = VariableSnapshot::default();
    let Some(frame) = event.call_frames.first() else {
        return snapshot;
    };

    for scope in frame.scope_chain.iter().filter(|it| it.kind == ScopeType::Closure) {
        collect_scope(session, scope, &mut snapshot, span).await;
    }
    debug!(
        parent: span,
        "Captured {} closure variables in `{}`.",
        snapshot.len(),
        frame.function_name,
    );
    snapshot
}

async fn collect_scope<S: DebugSession + ?Sized>(
    session: &S,
    scope: &Scope,
    snapshot: &mut VariableSnapshot,
    span: &Span,
) {
    let Some(object_id) = scope.object.object_id.clone() else {
        warn!(parent: span, "Closure scope {:?} has no object id.", scope.name);
        return;
    };

    let properties = match session
        .get_properties(GetPropertiesArguments::for_scope(object_id.clone()))
        .await
    {
        Ok(response) => response.result,
        Err(error) => {
            warn!(
                parent: span,
                "Failed to get properties of closure scope {object_id}: {error}",
            );
            return;
        }
    };

    for property in properties {
        if let Some(value) = property.value {
            snapshot.insert(property.name, value);
        }
    }
}
