//! Normalized event records.
//!
//! [`Event`] is what renderers consume: defaults applied, links resolved,
//! description trimmed and a full-timestamp `sort_date` computed. Fields
//! the data defines beyond the modelled ones are kept in [`Event::extra`]
//! and serialized alongside the modelled fields.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{EventRef, NormalizeError, NormalizeResult};
use crate::links::{EventLink, resolve_links};
use crate::time::{EventTime, MonthWindow};
use crate::value::{Map, Value};

/// A normalized event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub title: String,
    pub start: EventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    /// Whitespace-trimmed description, empty when the data has none.
    pub description: String,
    pub links: Vec<EventLink>,
    /// Identifier of the series the event belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    pub workshop: bool,
    pub social: bool,
    /// Set on events derived from a parent's `workshop_event`.
    pub sub_event: bool,
    /// `start` as a full timestamp; midnight for date-only starts.
    pub sort_date: NaiveDateTime,
    /// iCalendar data URL, attached by renderers that offer calendar downloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ical_url: Option<String>,
    /// Every other field of the event record.
    #[serde(flatten)]
    pub extra: Map,
}

impl Event {
    /// Builds an event from a record that already has defaults and series
    /// defaults merged in.
    ///
    /// # Errors
    ///
    /// Fails if `start` is missing or not a date/datetime, or if `end` or
    /// `description` hold a value of the wrong kind.
    pub fn from_record(mut record: Map, at: &EventRef) -> NormalizeResult<Self> {
        let start = match record.shift_remove("start") {
            None | Some(Value::Null) => {
                return Err(NormalizeError::MissingField {
                    event: at.clone(),
                    field: "start",
                });
            }
            Some(value) => time_field(&value, "start", at)?,
        };

        let end = match record.shift_remove("end") {
            None | Some(Value::Null) => None,
            Some(value) => Some(time_field(&value, "end", at)?),
        };

        let description = match record.shift_remove("description") {
            None | Some(Value::Null) => String::new(),
            Some(value) => value
                .to_text()
                .ok_or_else(|| NormalizeError::InvalidField {
                    event: at.clone(),
                    field: "description",
                    expected: "string",
                    found: value.type_name(),
                })?
                .trim()
                .to_string(),
        };

        let title = record
            .shift_remove("title")
            .and_then(|v| v.to_text())
            .unwrap_or_default();
        let links = resolve_links(&record.shift_remove("links").unwrap_or(Value::Null));
        let series = record.shift_remove("series").and_then(|v| v.to_text());
        let workshop = flag(&mut record, "workshop");
        let social = flag(&mut record, "social");
        let sub_event = flag(&mut record, "sub_event");

        // Computed fields are never taken from the data.
        record.shift_remove("sort_date");
        record.shift_remove("ical_url");

        Ok(Self {
            title,
            start,
            end,
            description,
            links,
            series,
            workshop,
            social,
            sub_event,
            sort_date: start.sort_date(),
            ical_url: None,
            extra: record,
        })
    }

    /// Returns true for workshops that are not social events.
    pub fn is_workshop(&self) -> bool {
        self.workshop && !self.social
    }

    /// The calendar month the event starts in.
    pub fn month(&self) -> MonthWindow {
        MonthWindow::containing(self.start.date())
    }
}

fn time_field(value: &Value, field: &'static str, at: &EventRef) -> NormalizeResult<EventTime> {
    EventTime::from_value(value).ok_or_else(|| NormalizeError::InvalidField {
        event: at.clone(),
        field,
        expected: "date or datetime",
        found: value.type_name(),
    })
}

fn flag(record: &mut Map, key: &str) -> bool {
    record
        .shift_remove(key)
        .is_some_and(|value| value.is_truthy())
}
