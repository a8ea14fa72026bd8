//! Replays a recorded interaction script through an editor session.
//!
//! A script is a JSON array of editor events. Because node and edge ids are
//! generated at runtime, a step may name its result with `"as": "$name"` and
//! later steps may use `"$name"` anywhere an id is expected.

use crate::error::{AppError, AppResult};
use entigraph_core::{EditorEvent, EditorSession, EventOutcome};
use serde_json::Value;
use std::collections::HashMap;

const ALIAS_KEY: &str = "as";

/// Counts of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub handled: usize,
    pub ignored: usize,
    pub nodes_created: usize,
    pub edges_created: usize,
}

/// Parse a script into its raw steps.
pub fn parse_script(json: &str) -> AppResult<Vec<Value>> {
    let value: Value = serde_json::from_str(json).map_err(|e| AppError::Script(e.to_string()))?;
    match value {
        Value::Array(steps) => Ok(steps),
        _ => Err(AppError::Script("expected a JSON array of events".to_string())),
    }
}

/// Fields that carry node or edge ids, at any depth.
const ID_FIELDS: [&str; 4] = ["node", "edge", "source", "target"];

fn resolve(value: &mut Value, aliases: &HashMap<String, String>) -> AppResult<()> {
    if let Value::String(s) = value {
        if s.starts_with('$') {
            let id = aliases
                .get(s.as_str())
                .ok_or_else(|| AppError::Script(format!("unknown alias {}", s)))?;
            *s = id.clone();
        }
    }
    Ok(())
}

/// Replace `$name` aliases in id fields. Other strings, names included, are
/// left as written.
fn substitute(value: &mut Value, aliases: &HashMap<String, String>) -> AppResult<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                substitute(item, aliases)?;
            }
        }
        Value::Object(map) => {
            for (key, item) in map.iter_mut() {
                if ID_FIELDS.contains(&key.as_str()) {
                    resolve(item, aliases)?;
                }
                substitute(item, aliases)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Feed every step to `session`.
///
/// Malformed steps and unknown aliases abort the replay; events the session
/// ignores do not.
pub fn replay(session: &mut EditorSession, steps: Vec<Value>) -> AppResult<ReplaySummary> {
    let mut aliases: HashMap<String, String> = HashMap::new();
    let mut summary = ReplaySummary::default();

    for (index, mut step) in steps.into_iter().enumerate() {
        let alias = match step.as_object_mut().and_then(|obj| obj.remove(ALIAS_KEY)) {
            Some(Value::String(name)) if name.starts_with('$') => Some(name),
            Some(other) => {
                return Err(AppError::Script(format!(
                    "step {}: alias must be a string starting with '$', got {}",
                    index, other
                )));
            }
            None => None,
        };
        substitute(&mut step, &aliases)?;
        let event: EditorEvent = serde_json::from_value(step)
            .map_err(|e| AppError::Script(format!("step {}: {}", index, e)))?;

        let outcome = session.handle(event);
        log::debug!("step {}: {:?}", index, outcome);

        let created = match &outcome {
            EventOutcome::NodeCreated(id) => {
                summary.nodes_created += 1;
                Some(id.to_string())
            }
            EventOutcome::EdgeCreated(id) => {
                summary.edges_created += 1;
                Some(id.to_string())
            }
            _ => None,
        };
        match outcome {
            EventOutcome::Ignored(_) => summary.ignored += 1,
            _ => summary.handled += 1,
        }
        if let (Some(name), Some(id)) = (alias, created) {
            aliases.insert(name, id);
        }
    }

    Ok(summary)
}
