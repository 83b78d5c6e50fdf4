//! Dataset to normalized event list pipeline.
//!
//! The normalization process, per raw event in `dataset.events`:
//! 1. Lays the event defaults and, if the event's series exists, the
//!    series' `defaults` under the raw record
//! 2. Builds the [`Event`] (links, description, sort key)
//! 3. Derives a workshop sub-event from `workshop_event`, if present, and
//!    runs it through steps 1-2
//!
//! Parents and sub-events are then stably sorted by `sort_date`.

use tracing::debug;

use crate::error::{EventRef, NormalizeError, NormalizeResult};
use crate::event::Event;
use crate::merge::merge;
use crate::value::{Map, Value};

/// Converts a merged dataset into the sorted list of normalized events.
///
/// Missing `events` or `series` keys are treated as empty.
///
/// # Errors
///
/// Fails on the first event that cannot be normalized, most commonly one
/// without a `start`.
pub fn normalize_events(dataset: &Map) -> NormalizeResult<Vec<Event>> {
    let empty_series = Map::new();
    let series = match dataset.get("series") {
        None | Some(Value::Null) => &empty_series,
        Some(Value::Mapping(series)) => series,
        Some(other) => {
            return Err(NormalizeError::InvalidDataset {
                key: "series",
                expected: "mapping",
                found: other.type_name(),
            });
        }
    };
    let raw_events: &[Value] = match dataset.get("events") {
        None | Some(Value::Null) => &[],
        Some(Value::Sequence(events)) => events,
        Some(other) => {
            return Err(NormalizeError::InvalidDataset {
                key: "events",
                expected: "sequence",
                found: other.type_name(),
            });
        }
    };

    let mut events = Vec::with_capacity(raw_events.len());
    let mut sub_events = Vec::new();

    for (index, raw) in raw_events.iter().enumerate() {
        let Some(raw) = raw.as_mapping() else {
            return Err(NormalizeError::NotAMapping {
                event: EventRef::event(index, None),
                found: raw.type_name(),
            });
        };
        let title = raw.get("title").and_then(Value::to_text);

        events.push(normalize_event(
            raw,
            series,
            &EventRef::event(index, title.clone()),
        )?);

        match raw.get("workshop_event") {
            None | Some(Value::Null) => {}
            Some(Value::Mapping(workshop)) => {
                let derived = derive_workshop_event(raw, workshop);
                let title = derived.get("title").and_then(Value::to_text).or(title);
                sub_events.push(normalize_event(
                    &derived,
                    series,
                    &EventRef::workshop_event(index, title),
                )?);
            }
            Some(other) => {
                return Err(NormalizeError::NotAMapping {
                    event: EventRef::workshop_event(index, title),
                    found: other.type_name(),
                });
            }
        }
    }

    events.extend(sub_events);
    events.sort_by_key(|event| event.sort_date);
    debug!(count = events.len(), "Normalized events");
    Ok(events)
}

/// Normalizes one raw event record.
///
/// Precedence, lowest first: event defaults, the series' defaults, the
/// event's own fields.
pub fn normalize_event(raw: &Map, series: &Map, at: &EventRef) -> NormalizeResult<Event> {
    let defaults = event_defaults();
    let series_id = raw.get("series").and_then(Value::to_text);

    let record = match series_id.as_deref().and_then(|id| series_defaults(series, id)) {
        Some(series_defaults) => merge(&[&defaults, series_defaults, raw]),
        None => {
            if let Some(ref id) = series_id {
                debug!(event = %at, series = %id, "No defaults for series");
            }
            merge(&[&defaults, raw])
        }
    };

    Event::from_record(record, at)
}

/// Builds the raw record of a workshop sub-event.
///
/// The workshop's own fields take precedence over the marker flags, which
/// take precedence over the parent's fields. The parent's `workshop_event`
/// is not inherited.
pub fn derive_workshop_event(parent: &Map, workshop: &Map) -> Map {
    let mut parent = parent.clone();
    parent.shift_remove("workshop_event");
    merge(&[&parent, &workshop_markers(), workshop])
}

fn series_defaults<'a>(series: &'a Map, series_id: &str) -> Option<&'a Map> {
    series
        .get(series_id)
        .and_then(Value::as_mapping)
        .and_then(|s| s.get("defaults"))
        .and_then(Value::as_mapping)
}

/// Fields every event has before series defaults are applied.
fn event_defaults() -> Map {
    Map::from_iter([
        ("description".to_string(), Value::from("")),
        ("links".to_string(), Value::Mapping(Map::new())),
        ("workshop".to_string(), Value::from(false)),
        ("social".to_string(), Value::from(false)),
    ])
}

fn workshop_markers() -> Map {
    Map::from_iter([
        ("workshop".to_string(), Value::from(true)),
        ("social".to_string(), Value::from(false)),
        ("sub_event".to_string(), Value::from(true)),
    ])
}
