// Scripts file parser
//
// Accepts either a bare array of scripts or an object with a "scripts" array.
// Anything else, including broken JSON, is treated as "no scripts". One bad
// file must never stop the other projects from loading.

use crate::error::{Result, ScriptsError};
use crate::scripts::models::ScriptRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// What one scripts file holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedScripts {
    pub scripts: Vec<ScriptRecord>,
    /// Array entries that aren't valid scripts. Kept so rewriting the file
    /// doesn't drop them.
    pub unrecognized: Vec<Value>,
}

/// Parse a scripts file. Never fails; malformed input yields no scripts.
pub fn parse_scripts(content: &str) -> Vec<ScriptRecord> {
    parse_scripts_file(content).scripts
}

/// Like `parse_scripts`, but also hands back the entries that were skipped
pub fn parse_scripts_file(content: &str) -> ParsedScripts {
    match try_parse_scripts(content) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(error = %e, "ignoring unparseable scripts file");
            ParsedScripts::default()
        }
    }
}

fn try_parse_scripts(content: &str) -> Result<ParsedScripts> {
    let parsed: Value =
        serde_json::from_str(content).map_err(|e| ScriptsError::Parse(e.to_string()))?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("scripts") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(ScriptsError::Parse(
                    "expected a \"scripts\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(ScriptsError::Parse(
                "expected an array or an object".to_string(),
            ))
        }
    };

    let mut parsed = ParsedScripts::default();
    for entry in entries {
        match ScriptRecord::deserialize(&entry) {
            Ok(script) => parsed.scripts.push(script),
            // Missing or non-string name/command/description/category
            Err(e) => {
                debug!(error = %e, "skipping malformed script entry");
                parsed.unrecognized.push(entry);
            }
        }
    }

    Ok(parsed)
}
