//! Trace document parser.
//!
//! Parses the collector's JSON output into a [`TraceDocument`]. Unlike a
//! profiler, we cannot drop individual malformed events: every event takes
//! part in frame inference, so one bad record fails the whole document.

use super::schema::{InteractionEvent, ParticipantMeta, TraceDocument, TransactionMeta};
use crate::utils::config::EVENT_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::Path;

/// Read and parse a trace document from disk
///
/// **Public** - used by the generate and validate commands
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<TraceDocument, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&contents)?;

    parse_trace_document(&raw)
}

/// Parse a trace document from raw JSON
///
/// **Public** - main entry point for parsing
///
/// Accepts either an object with `events` (plus optional `transaction` and
/// `participants`) or a bare array of events.
///
/// # Errors
/// * `ParseError::InvalidFormat` - Document is neither object nor array,
///   has no event list, or an event fails to decode
pub fn parse_trace_document(raw: &serde_json::Value) -> Result<TraceDocument, ParseError> {
    let document = match raw {
        serde_json::Value::Object(obj) => parse_document_object(obj)?,

        serde_json::Value::Array(events) => {
            debug!("Trace is a bare event array, no metadata attached");
            TraceDocument {
                events: parse_events_array(events)?,
                ..Default::default()
            }
        }

        _ => {
            return Err(ParseError::InvalidFormat(
                "Trace must be a JSON object or array".to_string(),
            ))
        }
    };

    debug!(
        "Parsed {} events, {} participants",
        document.events.len(),
        document.participants.len()
    );

    Ok(document)
}

/// Parse the object form of a trace document
///
/// **Private** - internal helper for parse_trace_document
fn parse_document_object(
    obj: &serde_json::Map<String, serde_json::Value>,
) -> Result<TraceDocument, ParseError> {
    let events_value = EVENT_FIELD_NAMES
        .iter()
        .find_map(|field| obj.get(*field).and_then(|v| v.as_array()))
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "No event list found (expected one of: {})",
                EVENT_FIELD_NAMES.join(", ")
            ))
        })?;

    let transaction = match obj.get("transaction") {
        Some(value) if !value.is_null() => {
            Some(serde_json::from_value::<TransactionMeta>(value.clone())?)
        }
        _ => None,
    };

    let participants = match obj.get("participants") {
        Some(value) if !value.is_null() => {
            serde_json::from_value::<BTreeMap<String, ParticipantMeta>>(value.clone())?
        }
        _ => {
            warn!("No participant metadata in trace, addresses will be shown as-is");
            BTreeMap::new()
        }
    };

    Ok(TraceDocument {
        transaction,
        participants,
        events: parse_events_array(events_value)?,
    })
}

/// Parse array of interaction events
///
/// **Private** - internal parsing logic
fn parse_events_array(
    events_array: &[serde_json::Value],
) -> Result<Vec<InteractionEvent>, ParseError> {
    events_array
        .iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<InteractionEvent>(value.clone()).map_err(|e| {
                ParseError::InvalidFormat(format!("Failed to parse event {}: {}", index, e))
            })
        })
        .collect()
}
