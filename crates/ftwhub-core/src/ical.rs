//! iCalendar export of single events.
//!
//! Newsletters link every event to a `data:` URL holding a one-event
//! calendar, so readers can add it to their calendar with one click.

use icalendar::{Calendar, CalendarDateTime, Component, DatePerhapsTime, EventLike};

use crate::event::Event;
use crate::time::EventTime;

const DATA_URL_PREFIX: &str = "data:text/calendar;charset=utf-8,";

/// Builds a `VCALENDAR` document holding `event`.
pub fn to_calendar(event: &Event) -> Calendar {
    let mut vevent = icalendar::Event::new();
    vevent
        .summary(&event.title)
        .starts(date_perhaps_time(event.start));
    if let Some(end) = event.end {
        vevent.ends(date_perhaps_time(end));
    }
    if !event.description.is_empty() {
        vevent.description(&event.description);
    }
    if let Some(link) = event.links.first() {
        vevent.url(&link.href);
    }

    let mut calendar = Calendar::new();
    calendar.push(vevent.done());
    calendar.done()
}

/// Returns a `data:` URL with `event` as a percent-encoded iCalendar document.
pub fn ical_data_url(event: &Event) -> String {
    let ics = to_calendar(event).to_string();
    format!("{DATA_URL_PREFIX}{}", urlencoding::encode(&ics))
}

// Event times carry no zone, so they are exported as floating times.
fn date_perhaps_time(time: EventTime) -> DatePerhapsTime {
    match time {
        EventTime::AllDay(date) => DatePerhapsTime::Date(date),
        EventTime::DateTime(dt) => DatePerhapsTime::DateTime(CalendarDateTime::Floating(dt)),
    }
}
